//! Slow healing applied to a single part (bandages, plasters)

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Heals one point every `ticks_per_heal` until `max_heal` points are done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartHealer {
    pub ticks_per_heal: Tick,
    pub max_heal: u32,
    ticks_passed: Tick,
    heals_done: u32,
}

impl PartHealer {
    pub fn new(ticks_per_heal: Tick, max_heal: u32) -> Self {
        Self {
            ticks_per_heal: ticks_per_heal.max(1),
            max_heal,
            ticks_passed: 0,
            heals_done: 0,
        }
    }

    /// Advance one tick. Returns true when a heal point is due.
    pub fn tick(&mut self) -> bool {
        if self.has_finished() {
            return false;
        }
        self.ticks_passed += 1;
        if self.ticks_passed >= self.ticks_per_heal {
            self.ticks_passed = 0;
            self.heals_done += 1;
            true
        } else {
            false
        }
    }

    pub fn has_finished(&self) -> bool {
        self.heals_done >= self.max_heal
    }

    pub fn heals_done(&self) -> u32 {
        self.heals_done
    }

    pub fn ticks_passed(&self) -> Tick {
        self.ticks_passed
    }
}
