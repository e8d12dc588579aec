//! # Denomination Catalog
//!
//! The fixed set of bills and coins a register physically holds.
//!
//! ## Catalogs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mexican Peso Denominations                        │
//! │                                                                         │
//! │  extended:  500 │ 200  100  50  20 │ 10  5  2  1  0.5                   │
//! │  standard:        200  100  50  20 │ 10  5  2  1  0.5                   │
//! │                   ───── bills ──── │ ───── coins ─────                  │
//! │                                                                         │
//! │  Both are descending by face value. That ordering is what the          │
//! │  register screen shows and what greedy change-making walks.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalogs are process-wide constants; a [`Catalog`] is a cheap `Copy`
//! view over one of them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// Whether a denomination is paper or metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    Bill,
    Coin,
}

/// A single bill or coin face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    /// Face value in cents.
    pub value: Money,
    pub kind: DenominationKind,
}

impl Denomination {
    const fn bill(pesos: i64) -> Self {
        Denomination {
            value: Money::from_pesos(pesos),
            kind: DenominationKind::Bill,
        }
    }

    const fn coin(cents: i64) -> Self {
        Denomination {
            value: Money::from_cents(cents),
            kind: DenominationKind::Coin,
        }
    }

    #[inline]
    pub fn is_bill(&self) -> bool {
        self.kind == DenominationKind::Bill
    }
}

// =============================================================================
// Catalog Constants
// =============================================================================

static EXTENDED: [Denomination; 10] = [
    Denomination::bill(500),
    Denomination::bill(200),
    Denomination::bill(100),
    Denomination::bill(50),
    Denomination::bill(20),
    Denomination::coin(1000),
    Denomination::coin(500),
    Denomination::coin(200),
    Denomination::coin(100),
    Denomination::coin(50),
];

// =============================================================================
// Catalog
// =============================================================================

/// An ordered (descending) view over a fixed denomination set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    denominations: &'static [Denomination],
}

impl Catalog {
    /// The register's catalog: 200 down to 0.5.
    ///
    /// Everything but the 500 bill, which the cash drawer does not take.
    pub fn standard() -> Self {
        Catalog {
            denominations: &EXTENDED[1..],
        }
    }

    /// The standard catalog plus the 500 bill.
    pub fn extended() -> Self {
        Catalog {
            denominations: &EXTENDED,
        }
    }

    /// Returns the denominations, descending by face value.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::denomination::Catalog;
    ///
    /// let values: Vec<i64> = Catalog::standard()
    ///     .list()
    ///     .iter()
    ///     .map(|d| d.value.cents())
    ///     .collect();
    /// assert_eq!(values, vec![20000, 10000, 5000, 2000, 1000, 500, 200, 100, 50]);
    /// ```
    #[inline]
    pub fn list(&self) -> &'static [Denomination] {
        self.denominations
    }

    /// Looks up the catalog entry with exactly this face value.
    ///
    /// ## Errors
    /// `UnknownDenomination` if the value is not in this catalog.
    pub fn find_by_value(&self, value: Money) -> CoreResult<Denomination> {
        self.denominations
            .iter()
            .copied()
            .find(|d| d.value == value)
            .ok_or(CoreError::UnknownDenomination { value })
    }

    /// Same as [`Catalog::find_by_value`] for a raw float from the UI.
    ///
    /// The float must name a face value exactly; `0.501` is rejected rather
    /// than taken as the 50 centavo coin.
    pub fn find_by_decimal(&self, value: f64) -> CoreResult<Denomination> {
        self.find_by_value(Money::from_decimal_exact(value)?)
    }

    /// The smallest face value in the catalog.
    ///
    /// Falls back to one cent for an empty view so callers can always round up.
    pub fn smallest(&self) -> Money {
        self.denominations
            .last()
            .map(|d| d.value)
            .unwrap_or(Money::from_cents(1))
    }

    /// A sub-catalog of the denominations whose face value is at most `max`.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::denomination::Catalog;
    /// use tiendita_core::money::Money;
    ///
    /// let small = Catalog::extended().capped_at(Money::from_pesos(50));
    /// assert_eq!(small.list()[0].value, Money::from_pesos(50));
    /// assert_eq!(small.len(), 7);
    /// ```
    pub fn capped_at(&self, max: Money) -> Catalog {
        let start = self
            .denominations
            .iter()
            .position(|d| d.value <= max)
            .unwrap_or(self.denominations.len());
        Catalog {
            denominations: &self.denominations[start..],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}
