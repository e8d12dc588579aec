//! # Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIENDITA_SUGGESTION_ATTEMPTS=30                                    │
//! │     TIENDITA_SEED=42                                                   │
//! │     TIENDITA_CATALOG=extended                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/tiendita/tiendita.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     15 attempts, random seed, standard catalog                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [suggestions]
//! attempts = 15
//! seed = 42            # optional, makes suggestions reproducible
//! catalog = "standard" # standard | extended
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tiendita_core::change::DEFAULT_ATTEMPTS;
use tiendita_core::{Catalog, ChangeGenerator};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Upper bound on randomized attempts per request.
pub const MAX_ATTEMPTS: usize = 1000;

// =============================================================================
// Catalog Kind
// =============================================================================

/// Which denomination catalog suggestions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// 200 down to 0.5.
    #[default]
    Standard,

    /// Standard plus the 500 bill.
    Extended,
}

impl CatalogKind {
    pub fn catalog(&self) -> Catalog {
        match self {
            CatalogKind::Standard => Catalog::standard(),
            CatalogKind::Extended => Catalog::extended(),
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Standard => write!(f, "standard"),
            CatalogKind::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for CatalogKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "default" => Ok(CatalogKind::Standard),
            "extended" | "with-500" => Ok(CatalogKind::Extended),
            other => Err(ConfigError::Invalid(format!(
                "Unknown catalog: '{}'. Valid options: standard, extended",
                other
            ))),
        }
    }
}

// =============================================================================
// Suggestion Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSettings {
    /// Randomized candidates per request.
    #[serde(default = "default_attempts")]
    pub attempts: usize,

    /// Fixed seed; `None` draws a fresh seed from the OS each run.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub catalog: CatalogKind,
}

fn default_attempts() -> usize {
    DEFAULT_ATTEMPTS
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        SuggestionSettings {
            attempts: default_attempts(),
            seed: None,
            catalog: CatalogKind::default(),
        }
    }
}

// =============================================================================
// Tiendita Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TienditaConfig {
    #[serde(default)]
    pub suggestions: SuggestionSettings,
}

impl TienditaConfig {
    /// Loads file config (if present), applies env overrides, validates.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::resolve_path(config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, config_path: &Path) -> ConfigResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;
        info!(path = ?config_path, "Saved config");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let attempts = self.suggestions.attempts;
        if attempts == 0 {
            return Err(ConfigError::Invalid(
                "suggestions.attempts must be at least 1".to_string(),
            ));
        }
        if attempts > MAX_ATTEMPTS {
            return Err(ConfigError::Invalid(format!(
                "suggestions.attempts must be at most {}, got {}",
                MAX_ATTEMPTS, attempts
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process env in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(attempts) = lookup("TIENDITA_SUGGESTION_ATTEMPTS") {
            match attempts.trim().parse() {
                Ok(attempts) => self.suggestions.attempts = attempts,
                Err(_) => warn!(%attempts, "Ignoring invalid TIENDITA_SUGGESTION_ATTEMPTS"),
            }
        }

        if let Some(seed) = lookup("TIENDITA_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.suggestions.seed = Some(seed),
                Err(_) => warn!(%seed, "Ignoring invalid TIENDITA_SEED"),
            }
        }

        if let Some(catalog) = lookup("TIENDITA_CATALOG") {
            match catalog.parse() {
                Ok(kind) => self.suggestions.catalog = kind,
                Err(e) => warn!("Ignoring TIENDITA_CATALOG: {}", e),
            }
        }
    }

    /// The explicit path if given, else the platform config file.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| {
            ProjectDirs::from("mx", "La Tiendita", "tiendita")
                .map(|dirs| dirs.config_dir().join("tiendita.toml"))
        })
    }

    pub fn generator(&self) -> ChangeGenerator {
        ChangeGenerator::new(self.suggestions.catalog.catalog(), self.suggestions.attempts)
    }
}
