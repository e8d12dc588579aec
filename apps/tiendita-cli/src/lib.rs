//! # tiendita-cli
//!
//! Terminal front end for tiendita-core.
//!
//! ## Startup Sequence
//! 1. Parse arguments ([`cli::Cli`])
//! 2. Initialize tracing (stderr, `RUST_LOG` aware)
//! 3. Load configuration ([`config::TienditaConfig`])
//! 4. Dispatch the command ([`commands::execute`])

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::io;

use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::TienditaConfig;
use error::CliResult;

/// Runs the CLI after arguments have been parsed.
pub fn run(cli: Cli) -> CliResult<()> {
    init_tracing(cli.verbose);

    let config_path = TienditaConfig::resolve_path(cli.config.clone());
    let config = TienditaConfig::load(config_path.clone())?;
    tracing::debug!(?config, "Loaded config");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli.command, &config, config_path.as_deref(), &mut out)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - Default: WARN, with INFO for our own crates
/// - `--verbose`: DEBUG everywhere
/// - `RUST_LOG` overrides both
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn,tiendita_cli=info,tiendita_core=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_names_our_crates() {
        assert_eq!(default_filter(true), "debug");
        let quiet = default_filter(false);
        assert!(quiet.contains("tiendita_cli=info"));
        assert!(quiet.contains("tiendita_core=info"));
        assert!(quiet.parse::<EnvFilter>().is_ok());
    }
}
