//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tiendita_core::{CoreError, Money};

#[derive(Parser, Debug)]
#[command(
    name = "tiendita",
    version,
    about = "Compose cash payments and suggest change for La Tiendita's registers"
)]
pub struct Cli {
    /// Path to tiendita.toml (defaults to the platform config dir)
    #[arg(long, global = true, env = "TIENDITA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the bills and coins the register handles
    Catalog {
        /// Include the 500 bill
        #[arg(long)]
        extended: bool,

        #[arg(long)]
        json: bool,
    },

    /// Tap denominations toward a sale total
    Compose {
        /// Sale total the payment is composed against
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        target: Money,

        /// Face values to take back out (repeatable)
        #[arg(long = "remove", value_parser = parse_money)]
        remove: Vec<Money>,

        /// Face values tapped, e.g. `20 20 20 5 0.5`
        #[arg(value_parser = parse_money)]
        values: Vec<Money>,

        /// Print the composed payment as tender JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest ways to hand back a change amount
    Change {
        #[arg(value_parser = parse_money, allow_negative_numbers = true)]
        amount: Money,

        /// Seed for reproducible suggestions (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Randomized attempts (overrides config)
        #[arg(long)]
        attempts: Option<usize>,

        /// Fixed tiered suggestions instead of randomized ones
        #[arg(long)]
        quick: bool,

        /// Start browsing at this suggestion index
        #[arg(long, default_value_t = 0)]
        show: usize,

        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },

    /// Settle a tender JSON against a sale total
    Tender {
        #[arg(long, value_parser = parse_money)]
        total: Money,

        /// e.g. `[{"denom":50,"count":1}]`
        tender: String,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },
}

fn parse_money(input: &str) -> Result<Money, CoreError> {
    Money::parse(input)
}
