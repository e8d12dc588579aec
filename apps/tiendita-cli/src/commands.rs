//! # Command Handlers
//!
//! Each handler turns parsed arguments into core calls and prints the
//! result. Output goes to the writer passed in (stdout in production),
//! logs go through `tracing` to stderr.

use std::io::Write;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tiendita_core::payment::coin_counts;
use tiendita_core::{
    cycle, decode_tender, encode_tender, quick_suggestions, Catalog, ChangeSuggestion, CoinCount,
    Composer, CycleDirection, Denomination, DenominationKind, DenominationSelection, Money,
    Settlement,
};
use tracing::{debug, info};

use crate::cli::Commands;
use crate::config::TienditaConfig;
use crate::error::{CliResult, ConfigError};

/// Runs one command against the loaded config.
///
/// `config_path` is where `config --write` saves to.
pub fn execute<W: Write>(
    command: &Commands,
    config: &TienditaConfig,
    config_path: Option<&Path>,
    out: &mut W,
) -> CliResult<()> {
    match command {
        Commands::Catalog { extended, json } => {
            let catalog = if *extended {
                Catalog::extended()
            } else {
                config.suggestions.catalog.catalog()
            };
            print_catalog(catalog, *json, out)
        }
        Commands::Compose {
            target,
            remove,
            values,
            json,
        } => {
            let composer = compose(config.suggestions.catalog.catalog(), *target, values, remove)?;
            if *json {
                writeln!(out, "{}", encode_tender(composer.selection())?)?;
                return Ok(());
            }
            print_composition(&composer, config, out)
        }
        Commands::Change {
            amount,
            seed,
            attempts,
            quick,
            show,
            json,
        } => {
            let suggestions = if *quick {
                quick_suggestions(*amount)
            } else {
                let generator = match attempts {
                    Some(attempts) => {
                        let mut overridden = config.clone();
                        overridden.suggestions.attempts = *attempts;
                        overridden.validate()?;
                        overridden.generator()
                    }
                    None => config.generator(),
                };
                let mut rng = rng_for(seed.or(config.suggestions.seed));
                generator.generate(*amount, &mut rng)
            };
            print_suggestions(&suggestions, *show, *json, out)
        }
        Commands::Config { write } => {
            write!(out, "{}", toml::to_string_pretty(config).map_err(ConfigError::from)?)?;
            if *write {
                let path = config_path.ok_or_else(|| {
                    ConfigError::Invalid("no config path available on this platform".to_string())
                })?;
                config.save(path)?;
                writeln!(out, "# written to {}", path.display())?;
            }
            Ok(())
        }
        Commands::Tender {
            total,
            tender,
            seed,
            json,
        } => {
            let catalog = config.suggestions.catalog.catalog();
            let selection = decode_tender(tender, &catalog)?;
            let settlement = Composer::with_selection(catalog, *total, selection).settle();
            info!(
                total = %settlement.total,
                tendered = %settlement.tendered,
                change = %settlement.change,
                "Settled tender"
            );

            let mut rng = rng_for(seed.or(config.suggestions.seed));
            let suggestions = config.generator().generate(settlement.change, &mut rng);
            if *json {
                let view = TenderView {
                    settlement,
                    suggestions: suggestions.iter().enumerate().map(SuggestionView::from).collect(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
                return Ok(());
            }
            print_settlement(&settlement, out)?;
            if let Some(first) = suggestions.first() {
                writeln!(out, "Suggested change: {}", describe(first.selection()))?;
            }
            Ok(())
        }
    }
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            debug!(seed, "Using fixed seed");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

fn compose(
    catalog: Catalog,
    target: Money,
    taps: &[Money],
    removals: &[Money],
) -> CliResult<Composer> {
    let mut composer = Composer::new(catalog, target);
    for &value in taps {
        composer.tap(value)?;
    }
    for &value in removals {
        composer.untap(value)?;
    }
    Ok(composer)
}

// =============================================================================
// Output
// =============================================================================

/// `$20.00 ×3, $0.50 ×1`
fn describe(selection: &DenominationSelection) -> String {
    if selection.is_empty() {
        return "(nothing)".to_string();
    }
    selection
        .iter()
        .map(|(value, count)| format!("{} ×{}", value, count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_catalog<W: Write>(catalog: Catalog, json: bool, out: &mut W) -> CliResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(catalog.list())?)?;
        return Ok(());
    }
    for Denomination { value, kind } in catalog.list() {
        let kind = match kind {
            DenominationKind::Bill => "bill",
            DenominationKind::Coin => "coin",
        };
        writeln!(out, "{:>8}  {}", value.to_string(), kind)?;
    }
    Ok(())
}

fn print_composition<W: Write>(
    composer: &Composer,
    config: &TienditaConfig,
    out: &mut W,
) -> CliResult<()> {
    writeln!(out, "Selected: {}", describe(composer.selection()))?;
    print_settlement(&composer.settle(), out)?;

    if composer.change().is_positive() {
        let hint = config.generator().greedy(composer.change());
        writeln!(out, "Suggested change: {}", describe(hint.selection()))?;
    }
    Ok(())
}

fn print_settlement<W: Write>(settlement: &Settlement, out: &mut W) -> CliResult<()> {
    writeln!(out, "Total due: {}", settlement.total)?;
    writeln!(out, "Tendered:  {}", settlement.tendered)?;
    if settlement.is_complete() {
        writeln!(out, "Change:    {}", settlement.change)?;
    } else {
        writeln!(out, "Missing:   {}", settlement.shortfall)?;
    }
    Ok(())
}

fn print_suggestions<W: Write>(
    suggestions: &[ChangeSuggestion],
    start: usize,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    if json {
        let views: Vec<SuggestionView> = suggestions
            .iter()
            .enumerate()
            .map(SuggestionView::from)
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }

    if suggestions.is_empty() {
        writeln!(out, "No change owed.")?;
        return Ok(());
    }

    // Browse from `start`, wrapping around like the "another suggestion" button.
    let mut index = start % suggestions.len();
    for _ in 0..suggestions.len() {
        let suggestion = &suggestions[index];
        write!(
            out,
            "[{}/{}] {} pieces: {}",
            index + 1,
            suggestions.len(),
            suggestion.pieces(),
            describe(suggestion.selection())
        )?;
        if suggestion.is_exact() {
            writeln!(out)?;
        } else {
            writeln!(out, " (rounded up by {})", suggestion.overshoot())?;
        }
        index = cycle(suggestions, index, CycleDirection::Forward).unwrap_or(0);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionView {
    rank: usize,
    total: f64,
    pieces: u64,
    overshoot: f64,
    coins: Vec<CoinCount>,
}

impl From<(usize, &ChangeSuggestion)> for SuggestionView {
    fn from((rank, suggestion): (usize, &ChangeSuggestion)) -> Self {
        SuggestionView {
            rank,
            total: suggestion.total().to_decimal(),
            pieces: suggestion.pieces(),
            overshoot: suggestion.overshoot().to_decimal(),
            coins: coin_counts(suggestion.selection()),
        }
    }
}

#[derive(Debug, Serialize)]
struct TenderView {
    settlement: Settlement,
    suggestions: Vec<SuggestionView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogKind, MAX_ATTEMPTS};
    use crate::error::CliError;
    use tiendita_core::CoreError;

    fn run(command: Commands) -> CliResult<String> {
        let mut config = TienditaConfig::default();
        config.suggestions.seed = Some(42);
        let mut out = Vec::new();
        execute(&command, &config, None, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_catalog_lists_standard_by_default() {
        let output = run(Commands::Catalog {
            extended: false,
            json: false,
        })
        .unwrap();
        assert_eq!(output.lines().count(), 9);
        assert!(output.lines().next().unwrap().contains("$200.00"));
        assert!(output.contains("$0.50  coin"));
    }

    #[test]
    fn test_catalog_json_has_extended_bill() {
        let output = run(Commands::Catalog {
            extended: true,
            json: true,
        })
        .unwrap();
        let parsed: Vec<Denomination> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0].value, Money::from_pesos(500));
    }

    #[test]
    fn test_compose_reports_change_and_hint() {
        let output = run(Commands::Compose {
            target: Money::from_pesos(60),
            remove: vec![],
            values: vec![
                Money::from_pesos(20),
                Money::from_pesos(20),
                Money::from_pesos(20),
                Money::from_pesos(5),
            ],
            json: false,
        })
        .unwrap();
        assert!(output.contains("Selected: $20.00 ×3, $5.00 ×1"));
        assert!(output.contains("Tendered:  $65.00"));
        assert!(output.contains("Change:    $5.00"));
        assert!(output.contains("Suggested change: $5.00 ×1"));
    }

    #[test]
    fn test_compose_reports_missing_money() {
        let output = run(Commands::Compose {
            target: Money::from_pesos(60),
            remove: vec![Money::from_pesos(20)],
            values: vec![Money::from_pesos(20), Money::from_pesos(20)],
            json: false,
        })
        .unwrap();
        assert!(output.contains("Missing:   $40.00"));
        assert!(!output.contains("Suggested change"));
    }

    #[test]
    fn test_compose_json_is_tender_format() {
        let output = run(Commands::Compose {
            target: Money::from_pesos(10),
            remove: vec![],
            values: vec![Money::from_pesos(20), Money::from_cents(50)],
            json: true,
        })
        .unwrap();
        assert_eq!(output.trim(), r#"[{"denom":20.0,"count":1},{"denom":0.5,"count":1}]"#);
    }

    #[test]
    fn test_compose_rejects_unknown_value() {
        let err = run(Commands::Compose {
            target: Money::from_pesos(10),
            remove: vec![],
            values: vec![Money::from_pesos(3)],
            json: false,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::UnknownDenomination { .. })
        ));
    }

    #[test]
    fn test_change_lists_greedy_first() {
        let output = run(Commands::Change {
            amount: Money::from_cents(3750),
            seed: None,
            attempts: None,
            quick: false,
            show: 0,
            json: false,
        })
        .unwrap();
        let first = output.lines().next().unwrap();
        assert!(first.starts_with("[1/"));
        assert!(first.contains("5 pieces: $20.00 ×1, $10.00 ×1, $5.00 ×1, $2.00 ×1, $0.50 ×1"));
    }

    #[test]
    fn test_change_show_starts_browsing_at_index() {
        let output = run(Commands::Change {
            amount: Money::from_pesos(150),
            seed: None,
            attempts: None,
            quick: true,
            show: 1,
            json: false,
        })
        .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[2/2]"));
        assert!(lines[1].starts_with("[1/2]"));
    }

    #[test]
    fn test_change_flags_rounded_suggestions() {
        let output = run(Commands::Change {
            amount: Money::from_cents(3730),
            seed: None,
            attempts: Some(3),
            quick: false,
            show: 0,
            json: false,
        })
        .unwrap();
        assert!(output.lines().all(|l| l.ends_with("(rounded up by $0.20)")));
    }

    #[test]
    fn test_change_rejects_out_of_range_attempts() {
        for attempts in [0, MAX_ATTEMPTS + 1, 5_000_000] {
            let err = run(Commands::Change {
                amount: Money::from_pesos(88),
                seed: None,
                attempts: Some(attempts),
                quick: false,
                show: 0,
                json: false,
            })
            .unwrap_err();
            assert!(
                matches!(err, CliError::Config(ConfigError::Invalid(_))),
                "attempts {attempts}: {err}"
            );
        }

        let output = run(Commands::Change {
            amount: Money::from_pesos(88),
            seed: None,
            attempts: Some(MAX_ATTEMPTS),
            quick: false,
            show: 0,
            json: true,
        })
        .unwrap();
        let views: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(views.as_array().unwrap().len() <= MAX_ATTEMPTS + 1);
    }

    #[test]
    fn test_change_nothing_owed() {
        let output = run(Commands::Change {
            amount: Money::zero(),
            seed: None,
            attempts: None,
            quick: false,
            show: 0,
            json: false,
        })
        .unwrap();
        assert_eq!(output.trim(), "No change owed.");
    }

    #[test]
    fn test_tender_settles_and_suggests() {
        let output = run(Commands::Tender {
            total: Money::from_cents(3750),
            tender: r#"[{"denom":50,"count":1}]"#.to_string(),
            seed: None,
            json: false,
        })
        .unwrap();
        assert!(output.contains("Change:    $12.50"));
        assert!(output.contains("Suggested change: $10.00 ×1, $2.00 ×1, $0.50 ×1"));
    }

    #[test]
    fn test_tender_with_huge_count_settles_without_tapping() {
        let output = run(Commands::Tender {
            total: Money::from_pesos(30),
            tender: r#"[{"denom":50,"count":4000000000}]"#.to_string(),
            seed: None,
            json: false,
        })
        .unwrap();
        assert!(output.contains("Tendered:  $200000000000.00"));
        assert!(output.contains("Change:    $199999999970.00"));
    }

    #[test]
    fn test_tender_rejects_off_catalog_decimal() {
        let err = run(Commands::Tender {
            total: Money::from_pesos(30),
            tender: r#"[{"denom":20.004,"count":2}]"#.to_string(),
            seed: None,
            json: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::InvalidAmount { .. })));
    }

    #[test]
    fn test_tender_json_view() {
        let output = run(Commands::Tender {
            total: Money::from_pesos(30),
            tender: r#"[{"denom":20,"count":2}]"#.to_string(),
            seed: Some(1),
            json: true,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["settlement"]["change"], 1000);
        assert_eq!(value["suggestions"][0]["pieces"], 1);
        assert_eq!(value["suggestions"][0]["coins"][0]["denom"], 10.0);
    }

    #[test]
    fn test_config_prints_and_writes_toml() {
        let output = run(Commands::Config { write: false }).unwrap();
        assert!(output.contains("[suggestions]"));
        assert!(output.contains("attempts = 15"));
        assert!(output.contains("seed = 42"));

        let err = run(Commands::Config { write: true }).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tiendita.toml");
        let mut out = Vec::new();
        execute(
            &Commands::Config { write: true },
            &TienditaConfig::default(),
            Some(&path),
            &mut out,
        )
        .unwrap();
        let saved: TienditaConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, TienditaConfig::default());
    }

    #[test]
    fn test_tender_with_extended_catalog_accepts_500() {
        let mut config = TienditaConfig::default();
        config.suggestions.catalog = CatalogKind::Extended;
        config.suggestions.seed = Some(5);
        let mut out = Vec::new();
        execute(
            &Commands::Tender {
                total: Money::from_pesos(450),
                tender: r#"[{"denom":500,"count":1}]"#.to_string(),
                seed: None,
                json: false,
            },
            &config,
            None,
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Change:    $50.00"));
    }
}
