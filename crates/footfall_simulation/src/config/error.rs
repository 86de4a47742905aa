//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading a tuning profile
///
/// Gameplay itself never fails; this is the only fallible surface.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
