//! # Exact Composer
//!
//! Tracks how many of each bill and coin an operator has tapped, and what
//! that adds up to.
//!
//! ## Tap Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Composing a Payment                                  │
//! │                                                                         │
//! │  Sale total: $60.00                                                     │
//! │                                                                         │
//! │  tap(20) ──► {20:1}            total $20.00   remaining $40.00          │
//! │  tap(20) ──► {20:2}            total $40.00   remaining $20.00          │
//! │  tap(20) ──► {20:3}            total $60.00   remaining $0.00           │
//! │  tap(5)  ──► {20:3, 5:1}       total $65.00   change    $5.00           │
//! │  untap(2)──► {20:3, 5:1}       (nothing to remove, no-op)               │
//! │                                                                         │
//! │  Every step is integer cents; there is nothing to round.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use tracing::trace;

use crate::denomination::{Catalog, Denomination};
use crate::error::CoreResult;
use crate::money::Money;
use crate::payment::{settle, Settlement};

// =============================================================================
// Denomination Selection
// =============================================================================

/// How many physical units of each face value are included.
///
/// ## Invariants
/// - Keys are unique face values
/// - Counts are never zero: a denomination whose count drops to zero is
///   removed, so two selections with the same units compare equal
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DenominationSelection {
    counts: BTreeMap<Money, u64>,
}

impl DenominationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `denomination`.
    pub fn increment(&mut self, denomination: Denomination) {
        self.add_units(denomination.value, 1);
    }

    /// Removes one unit of `denomination`, if there is one.
    pub fn decrement(&mut self, denomination: Denomination) {
        if let Some(count) = self.counts.get_mut(&denomination.value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&denomination.value);
            }
        }
    }

    /// Adds `count` units of the given face value.
    pub fn add_units(&mut self, value: Money, count: u64) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(value).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn count(&self, value: Money) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Σ(face value × count), in exact cents.
    pub fn total(&self) -> Money {
        self.counts.iter().map(|(&value, &count)| value * count).sum()
    }

    /// Total number of physical bills and coins.
    pub fn pieces(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// `(face value, count)` pairs, largest face value first.
    pub fn iter(&self) -> impl Iterator<Item = (Money, u64)> + '_ {
        self.counts.iter().rev().map(|(&value, &count)| (value, count))
    }
}

impl FromIterator<(Money, u64)> for DenominationSelection {
    fn from_iter<I: IntoIterator<Item = (Money, u64)>>(iter: I) -> Self {
        let mut selection = DenominationSelection::new();
        for (value, count) in iter {
            selection.add_units(value, count);
        }
        selection
    }
}

// =============================================================================
// Composer
// =============================================================================

/// A payment being composed against a target amount.
///
/// Values are validated against the catalog before touching the selection,
/// so the selection only ever holds real denominations.
#[derive(Debug, Clone)]
pub struct Composer {
    catalog: Catalog,
    target: Money,
    selection: DenominationSelection,
}

impl Composer {
    /// Starts an empty composition toward `target` (usually the sale total).
    pub fn new(catalog: Catalog, target: Money) -> Self {
        Composer {
            catalog,
            target,
            selection: DenominationSelection::new(),
        }
    }

    /// Resumes a composition from an already validated selection, such as
    /// one returned by [`crate::payment::decode_tender`].
    pub fn with_selection(
        catalog: Catalog,
        target: Money,
        selection: DenominationSelection,
    ) -> Self {
        Composer {
            catalog,
            target,
            selection,
        }
    }

    /// Adds one unit of the denomination with face value `value`.
    ///
    /// ## Errors
    /// `UnknownDenomination` when the value is not in the catalog; the
    /// selection is left untouched.
    pub fn tap(&mut self, value: Money) -> CoreResult<Money> {
        let denomination = self.catalog.find_by_value(value)?;
        self.selection.increment(denomination);
        trace!(value = %value, total = %self.total(), "tap");
        Ok(self.total())
    }

    /// Removes one unit of the denomination with face value `value`.
    pub fn untap(&mut self, value: Money) -> CoreResult<Money> {
        let denomination = self.catalog.find_by_value(value)?;
        self.selection.decrement(denomination);
        trace!(value = %value, total = %self.total(), "untap");
        Ok(self.total())
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    #[inline]
    pub fn target(&self) -> Money {
        self.target
    }

    #[inline]
    pub fn selection(&self) -> &DenominationSelection {
        &self.selection
    }

    pub fn into_selection(self) -> DenominationSelection {
        self.selection
    }

    pub fn total(&self) -> Money {
        self.selection.total()
    }

    /// What is still missing to reach the target (zero once reached).
    pub fn remaining(&self) -> Money {
        self.target.saturating_sub(self.total())
    }

    /// What the customer is owed back (zero until the target is passed).
    pub fn change(&self) -> Money {
        self.total().saturating_sub(self.target)
    }

    pub fn is_short(&self) -> bool {
        self.total() < self.target
    }

    pub fn settle(&self) -> Settlement {
        settle(self.target, self.total())
    }
}
