use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Selection found nothing to cast. Every unit keeps a zero-cooldown
    /// basic attack, so this means that guarantee was broken upstream.
    #[error("No eligible active skill for {unit}")]
    NoEligibleSkill { unit: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
