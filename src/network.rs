//! Payloads sent from the server to the owning client
//!
//! Only the payload is produced here; the host transport frames and
//! delivers it.

use serde::{Deserialize, Serialize};

use crate::body::model::ModelTag;
use crate::body::part::PlayerPart;
use crate::core::error::Result;
use crate::core::types::EntityId;

/// Damage about to be applied to one part, for client-side prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageNotice {
    pub part: PlayerPart,
    pub damage: f32,
    pub min_health: f32,
}

/// Full model state, sent on login/respawn and after changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSync {
    pub player: EntityId,
    pub tag: ModelTag,
}

impl DamageNotice {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl ModelSync {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
