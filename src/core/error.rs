use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Registration is closed, cannot register {what}")]
    RegistrationClosed { what: String },

    #[error("Debuff {effect} has no conditions")]
    EmptyDebuffConditions { effect: String },

    #[error("Constant debuff {effect} cannot play a sound")]
    ConstantDebuffWithSound { effect: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown body part: {0}")]
    UnknownPart(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
