pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, DamageConfig, DeathRule};
pub use error::{Result, TriageError};
