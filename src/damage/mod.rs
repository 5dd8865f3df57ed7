//! Damage pipeline: sources, mitigation, distribution strategies and death

pub mod armor;
pub mod death;
pub mod distribution;
pub mod health;
pub mod random;
pub mod source;
pub mod standard;

pub use armor::{ArmorMaterial, ArmorPiece, Enchantment};
pub use death::{kill_player, DeathOutcome};
pub use distribution::{
    distribute_by_table, distribute_on_parts, handle_damage_taken, DamageContext,
    DamageDistribution, Distribution, PriorityTable,
};
pub use health::distribute_health;
pub use random::{RandomDistribution, ANY_KILL, ANY_NOKILL, NEAREST_KILL, NEAREST_NOKILL};
pub use source::DamageSource;
pub use standard::StandardDistribution;
