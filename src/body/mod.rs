pub mod damageable;
pub mod healer;
pub mod model;
pub mod part;

pub use damageable::DamageablePart;
pub use healer::PartHealer;
pub use model::{ModelSnapshot, ModelTag, PlayerDamageModel};
pub use part::{DebuffSlot, EquipmentSlot, PlayerPart};
