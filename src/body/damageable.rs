//! Health pool of a single body part

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::body::healer::PartHealer;
use crate::body::part::PlayerPart;

/// One body location with its own health
///
/// `current_health` always stays within `[0, max_health]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageablePart {
    pub part: PlayerPart,
    max_health: f32,
    current_health: f32,
    /// Whether this part reaching zero can kill the player
    pub can_cause_death: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    healer: Option<PartHealer>,
}

impl DamageablePart {
    /// A part at full health
    pub fn new(part: PlayerPart, max_health: f32, can_cause_death: bool) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            part,
            max_health,
            current_health: max_health,
            can_cause_death,
            healer: None,
        }
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    /// Set health directly, clamped to `[0, max_health]`
    pub fn set_current_health(&mut self, health: f32) {
        self.current_health = health.clamp(0.0, self.max_health);
    }

    /// Current health as a fraction of max health
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.current_health / self.max_health
        }
    }

    /// Apply up to `amount` damage without going below `min_health`.
    ///
    /// Returns the amount that did not fit. A part that is already below
    /// the floor absorbs nothing.
    pub fn damage(&mut self, amount: f32, min_health: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let mut floor = min_health.max(0.0);
        if floor > self.max_health {
            warn!(
                target: "triage::body",
                part = %self.part,
                min_health,
                max_health = self.max_health,
                "min health above max health, clamping"
            );
            floor = self.max_health;
        }
        let floor = floor.min(self.current_health);

        let new_health = (self.current_health - amount).max(floor);
        let absorbed = self.current_health - new_health;
        self.current_health = new_health;
        amount - absorbed
    }

    /// Heal up to `amount`. Returns the amount that did not fit.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let healed = (self.max_health - self.current_health).clamp(0.0, amount);
        self.current_health = (self.current_health + healed).min(self.max_health);
        amount - healed
    }

    pub fn healer(&self) -> Option<&PartHealer> {
        self.healer.as_ref()
    }

    pub fn set_healer(&mut self, healer: Option<PartHealer>) {
        self.healer = healer;
    }

    pub(crate) fn healer_mut(&mut self) -> Option<&mut PartHealer> {
        self.healer.as_mut()
    }

    /// Restore the invariant after loading untrusted data
    pub(crate) fn sanitize(&mut self) {
        if !self.max_health.is_finite() || self.max_health < 0.0 {
            self.max_health = 0.0;
        }
        if !self.current_health.is_finite() {
            self.current_health = 0.0;
        }
        self.current_health = self.current_health.clamp(0.0, self.max_health);
    }
}
