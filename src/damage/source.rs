//! Damage source classification
//!
//! The host tags every hit with a source kind. The kind selects the
//! distribution strategy; the flags decide which mitigations apply.

use serde::{Deserialize, Serialize};

/// Default hunger cost of taking a hit
pub const DEFAULT_HUNGER_COST: f32 = 0.1;

/// Describes how a player was damaged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageSource {
    /// Identifier used for strategy lookup, e.g. `"fall"`
    pub kind: String,
    /// Armor does not reduce this damage
    pub bypasses_armor: bool,
    /// No effect or enchantment reduces this damage
    pub is_absolute: bool,
    pub is_fire: bool,
    pub is_explosion: bool,
    pub is_projectile: bool,
    pub is_fall: bool,
    /// Exhaustion added when this damage lands
    pub hunger_cost: f32,
}

impl DamageSource {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            bypasses_armor: false,
            is_absolute: false,
            is_fire: false,
            is_explosion: false,
            is_projectile: false,
            is_fall: false,
            hunger_cost: DEFAULT_HUNGER_COST,
        }
    }

    pub fn bypassing_armor(mut self) -> Self {
        self.bypasses_armor = true;
        self
    }

    pub fn absolute(mut self) -> Self {
        self.is_absolute = true;
        self.hunger_cost = 0.0;
        self
    }

    pub fn fire(mut self) -> Self {
        self.is_fire = true;
        self
    }

    pub fn explosion(mut self) -> Self {
        self.is_explosion = true;
        self
    }

    pub fn projectile(mut self) -> Self {
        self.is_projectile = true;
        self
    }

    // === Stock sources ===

    pub fn generic() -> Self {
        Self::new("generic").bypassing_armor()
    }

    pub fn fall() -> Self {
        let mut source = Self::new("fall").bypassing_armor();
        source.is_fall = true;
        source
    }

    pub fn hot_floor() -> Self {
        Self::new("hot_floor").fire()
    }

    pub fn in_fire() -> Self {
        Self::new("in_fire").fire()
    }

    pub fn on_fire() -> Self {
        Self::new("on_fire").bypassing_armor().fire()
    }

    pub fn lava() -> Self {
        Self::new("lava").fire()
    }

    pub fn lightning() -> Self {
        Self::new("lightning_bolt")
    }

    pub fn drown() -> Self {
        Self::new("drown").bypassing_armor()
    }

    pub fn starve() -> Self {
        Self::new("starve").bypassing_armor().absolute()
    }

    pub fn magic() -> Self {
        Self::new("magic").bypassing_armor()
    }

    pub fn anvil() -> Self {
        Self::new("anvil")
    }

    pub fn fly_into_wall() -> Self {
        Self::new("fly_into_wall").bypassing_armor()
    }

    pub fn cramming() -> Self {
        Self::new("cramming").bypassing_armor()
    }

    pub fn explosion_source() -> Self {
        Self::new("explosion").explosion()
    }

    pub fn arrow() -> Self {
        Self::new("arrow").projectile()
    }

    pub fn mob() -> Self {
        Self::new("mob")
    }

    /// Look up a stock source by kind; unknown kinds become a plain source
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "generic" => Self::generic(),
            "fall" => Self::fall(),
            "hot_floor" => Self::hot_floor(),
            "in_fire" => Self::in_fire(),
            "on_fire" => Self::on_fire(),
            "lava" => Self::lava(),
            "lightning_bolt" => Self::lightning(),
            "drown" => Self::drown(),
            "starve" => Self::starve(),
            "magic" => Self::magic(),
            "anvil" => Self::anvil(),
            "fly_into_wall" => Self::fly_into_wall(),
            "cramming" => Self::cramming(),
            "explosion" => Self::explosion_source(),
            "arrow" => Self::arrow(),
            "mob" => Self::mob(),
            other => Self::new(other),
        }
    }
}
