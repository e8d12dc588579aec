//! # tiendita
//!
//! ```text
//! tiendita catalog
//! tiendita compose --target 62.50 20 20 20 5
//! tiendita change 37.50 --seed 42
//! tiendita tender --total 37.50 '[{"denom":50,"count":1}]'
//! ```

use clap::Parser;
use tiendita_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tiendita_cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
