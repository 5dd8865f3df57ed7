//! Status effects driven by the health of a body part
//!
//! Debuffs are created per player from the registry and receive every
//! damage/heal on the parts of their [`DebuffSlot`](crate::body::DebuffSlot).

pub mod builder;
pub mod constant;
pub mod on_hit;
pub mod shared;

use std::sync::Arc;

use crate::core::types::EffectId;
use crate::host::PlayerHost;

pub use builder::{DebuffBuilder, DebuffFactory, DebuffKind};
pub use constant::ConstantDebuff;
pub use on_hit::OnHitDebuff;
pub use shared::SharedDebuff;

/// Predicate deciding whether a debuff is active at all (usually a config toggle)
pub type EnabledFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Effect reacting to damage and healing of its parts
pub trait Debuff: Send {
    /// Effect this debuff applies
    fn effect(&self) -> &EffectId;

    /// `health_per_max` is the part's health fraction after the damage
    fn handle_damage_taken(
        &mut self,
        damage: f32,
        health_per_max: f32,
        player: &mut dyn PlayerHost,
    );

    fn handle_healing(
        &mut self,
        healing_done: f32,
        health_per_max: f32,
        player: &mut dyn PlayerHost,
    );

    fn is_enabled(&self) -> bool {
        true
    }

    /// Called once per tick with the slot-wide health fraction
    fn update(&mut self, _player: &mut dyn PlayerHost, _health_per_max: f32) {}
}

pub(crate) fn always_enabled() -> EnabledFn {
    Arc::new(|| true)
}
