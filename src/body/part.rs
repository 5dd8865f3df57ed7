//! Body parts, armor slots and the slot-to-part mapping
//!
//! Each armor slot protects a fixed group of parts. The groups never overlap
//! and together cover the whole body.

use serde::{Deserialize, Serialize};

use crate::core::error::TriageError;

/// Independently tracked body location (8 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPart {
    Head,
    LeftArm,
    LeftLeg,
    LeftFoot,
    /// Center mass
    Body,
    RightArm,
    RightLeg,
    RightFoot,
}

impl PlayerPart {
    /// All parts in model order
    pub const ALL: [PlayerPart; 8] = [
        PlayerPart::Head,
        PlayerPart::LeftArm,
        PlayerPart::LeftLeg,
        PlayerPart::LeftFoot,
        PlayerPart::Body,
        PlayerPart::RightArm,
        PlayerPart::RightLeg,
        PlayerPart::RightFoot,
    ];

    /// Position in [`PlayerPart::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in tags and logs
    pub fn id(self) -> &'static str {
        match self {
            PlayerPart::Head => "head",
            PlayerPart::LeftArm => "left_arm",
            PlayerPart::LeftLeg => "left_leg",
            PlayerPart::LeftFoot => "left_foot",
            PlayerPart::Body => "body",
            PlayerPart::RightArm => "right_arm",
            PlayerPart::RightLeg => "right_leg",
            PlayerPart::RightFoot => "right_foot",
        }
    }

    /// Armor slot covering this part
    pub fn slot(self) -> EquipmentSlot {
        match self {
            PlayerPart::Head => EquipmentSlot::Head,
            PlayerPart::LeftArm | PlayerPart::RightArm | PlayerPart::Body => EquipmentSlot::Chest,
            PlayerPart::LeftLeg | PlayerPart::RightLeg => EquipmentSlot::Legs,
            PlayerPart::LeftFoot | PlayerPart::RightFoot => EquipmentSlot::Feet,
        }
    }
}

impl std::fmt::Display for PlayerPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for PlayerPart {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerPart::ALL
            .into_iter()
            .find(|part| part.id() == s)
            .ok_or_else(|| TriageError::UnknownPart(s.to_string()))
    }
}

/// Armor slots, each gating one part group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Chest,
    Legs,
    Feet,
}

impl EquipmentSlot {
    /// Armor slots from the ground up
    pub const ARMOR_SLOTS: [EquipmentSlot; 4] = [
        EquipmentSlot::Feet,
        EquipmentSlot::Legs,
        EquipmentSlot::Chest,
        EquipmentSlot::Head,
    ];

    /// Parts protected by this slot
    pub fn parts(self) -> &'static [PlayerPart] {
        match self {
            EquipmentSlot::Head => &[PlayerPart::Head],
            EquipmentSlot::Chest => &[PlayerPart::LeftArm, PlayerPart::RightArm, PlayerPart::Body],
            EquipmentSlot::Legs => &[PlayerPart::LeftLeg, PlayerPart::RightLeg],
            EquipmentSlot::Feet => &[PlayerPart::LeftFoot, PlayerPart::RightFoot],
        }
    }

    /// Position in [`EquipmentSlot::ARMOR_SLOTS`]
    pub fn armor_index(self) -> usize {
        match self {
            EquipmentSlot::Feet => 0,
            EquipmentSlot::Legs => 1,
            EquipmentSlot::Chest => 2,
            EquipmentSlot::Head => 3,
        }
    }
}

/// Groups of parts that share a set of debuffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebuffSlot {
    Head,
    Body,
    Arms,
    LegsAndFeet,
}

impl DebuffSlot {
    pub const ALL: [DebuffSlot; 4] = [
        DebuffSlot::Head,
        DebuffSlot::Body,
        DebuffSlot::Arms,
        DebuffSlot::LegsAndFeet,
    ];

    pub fn parts(self) -> &'static [PlayerPart] {
        match self {
            DebuffSlot::Head => &[PlayerPart::Head],
            DebuffSlot::Body => &[PlayerPart::Body],
            DebuffSlot::Arms => &[PlayerPart::LeftArm, PlayerPart::RightArm],
            DebuffSlot::LegsAndFeet => &[
                PlayerPart::LeftLeg,
                PlayerPart::RightLeg,
                PlayerPart::LeftFoot,
                PlayerPart::RightFoot,
            ],
        }
    }

    pub fn contains(self, part: PlayerPart) -> bool {
        self.parts().contains(&part)
    }
}
