//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! CoreError   (bad amount, unknown denomination, bad tender) ──┐
//! ConfigError (unreadable / invalid tiendita.toml)         ────┼──► CliError ──► stderr, exit 1
//! io::Error   (stdout closed)                              ────┘
//! ```

use thiserror::Error;
use tiendita_core::CoreError;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tiendita_core::Money;

    #[test]
    fn test_core_errors_pass_through() {
        let err: CliError = CoreError::UnknownDenomination {
            value: Money::from_cents(30),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown denomination: $0.30");
    }

    #[test]
    fn test_config_error_message() {
        let err: CliError = ConfigError::Invalid("attempts must be at least 1".into()).into();
        assert_eq!(err.to_string(), "Invalid config: attempts must be at least 1");
    }
}
