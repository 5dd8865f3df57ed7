//! Triage - multi-part player damage model
//!
//! Splits a player's health over eight body parts, routes incoming damage
//! through armor and a per-source distribution strategy, and drives status
//! effects from the health of each part. The host game is reached only
//! through the [`host::PlayerHost`] trait.

pub mod body;
pub mod core;
pub mod damage;
pub mod debuff;
pub mod events;
pub mod host;
pub mod network;
pub mod registry;
