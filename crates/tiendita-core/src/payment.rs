//! # Payment Settlement & Tender Encoding
//!
//! Settles a cash tender against a sale total and converts selections to and
//! from the JSON form the web front end passes between screens.
//!
//! ## Tender Wire Format
//! ```json
//! [{"denom": 20, "count": 3}, {"denom": 0.5, "count": 1}]
//! ```
//! Face values travel as decimals (that is what the screens show), ordered
//! largest first, zero counts omitted.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::composer::DenominationSelection;
use crate::denomination::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Settlement
// =============================================================================

/// Outcome of comparing what was handed over with what is owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub total: Money,
    pub tendered: Money,
    /// Owed back to the customer.
    pub change: Money,
    /// Still missing ("falta dinero").
    pub shortfall: Money,
}

impl Settlement {
    /// True when the tender covers the total.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.shortfall.is_zero()
    }

    #[inline]
    pub fn owes_change(&self) -> bool {
        self.change.is_positive()
    }
}

/// Settles `tendered` against `total`.
///
/// ## Example
/// ```rust
/// use tiendita_core::money::Money;
/// use tiendita_core::payment::settle;
///
/// let s = settle(Money::from_cents(3750), Money::from_pesos(50));
/// assert_eq!(s.change, Money::from_cents(1250));
/// assert!(s.is_complete());
/// ```
pub fn settle(total: Money, tendered: Money) -> Settlement {
    Settlement {
        total,
        tendered,
        change: tendered.saturating_sub(total),
        shortfall: total.saturating_sub(tendered),
    }
}

// =============================================================================
// Tender Encoding
// =============================================================================

/// One entry of the tender JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoinCount {
    pub denom: f64,
    pub count: u64,
}

/// Flattens a selection into wire entries, largest face value first.
pub fn coin_counts(selection: &DenominationSelection) -> Vec<CoinCount> {
    selection
        .iter()
        .map(|(value, count)| CoinCount {
            denom: value.to_decimal(),
            count,
        })
        .collect()
}

/// Encodes a selection as tender JSON.
pub fn encode_tender(selection: &DenominationSelection) -> CoreResult<String> {
    Ok(serde_json::to_string(&coin_counts(selection))?)
}

/// Decodes tender JSON, checking every face value against `catalog`.
///
/// Repeated denominations are summed and zero counts dropped.
///
/// ## Errors
/// - `InvalidTender` for anything that is not a `{denom, count}` array
/// - `InvalidAmount` for a non-finite `denom`
/// - `UnknownDenomination` for a value outside the catalog
/// - `InvalidTender` when the tender adds up to more than [`Money::MAX`]
pub fn decode_tender(json: &str, catalog: &Catalog) -> CoreResult<DenominationSelection> {
    let entries: Vec<CoinCount> = serde_json::from_str(json)?;

    let mut selection = DenominationSelection::new();
    for entry in &entries {
        let denomination = catalog.find_by_decimal(entry.denom)?;
        selection.add_units(denomination.value, entry.count);
    }

    if selection.total() > Money::MAX {
        return Err(CoreError::InvalidTender {
            reason: format!("tender adds up to more than {}", Money::MAX),
        });
    }

    debug!(
        entries = entries.len(),
        total = %selection.total(),
        "Decoded tender"
    );
    Ok(selection)
}
