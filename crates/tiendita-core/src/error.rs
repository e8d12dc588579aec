//! # Error Types
//!
//! Domain-specific error types for tiendita-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiendita-core errors (this file)                                      │
//! │  └── CoreError        - Domain errors                                  │
//! │      ├── UnknownDenomination  (value not in the catalog)               │
//! │      ├── InvalidAmount        (unparsable / non-finite amount)         │
//! │      └── InvalidTender        (malformed tender JSON)                  │
//! │                                                                         │
//! │  tiendita-cli errors (app)                                             │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: CoreError → CliError → stderr                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - A change amount of zero or less: the generator returns no suggestions.
//! - A suggestion that overshoots by less than the smallest coin: accepted
//!   rounding, reported through `ChangeSuggestion::overshoot`.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A face value that is not in the register's catalog.
    ///
    /// ## When This Occurs
    /// - A tap or URL parameter names a value like 0.30 or 1000
    /// - A tender JSON mentions a bill the register does not handle
    #[error("Unknown denomination: {value}")]
    UnknownDenomination { value: Money },

    /// An amount that cannot be turned into cents.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// A tender payload that is not a list of `{denom, count}` entries.
    #[error("Invalid tender: {reason}")]
    InvalidTender { reason: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidTender {
            reason: err.to_string(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
