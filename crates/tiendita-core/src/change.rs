//! # Change Suggestions
//!
//! Proposes ways to hand change back to a customer.
//!
//! ## Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  generate($37.50)                                       │
//! │                                                                         │
//! │  1. Greedy baseline (always kept, first in line)                        │
//! │     200 100 50 20 10 5 2 1 0.5  ──►  {20:1 10:1 5:1 2:1 0.5:1}          │
//! │                                                                         │
//! │  2. N randomized attempts (N = 15 by default)                           │
//! │     shuffle order ──► per denomination take max or random 1..=max       │
//! │     ──► cover what is left with the smallest coin                       │
//! │                                                                         │
//! │  3. Drop structural duplicates, stable-sort by number of pieces         │
//! │                                                                         │
//! │  [ {20,10,5,2,0.5} , {10×3,5,2,0.5} , {20,5×3,2,0.5} , ... ]            │
//! │      5 pieces          6 pieces         6 pieces                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Up
//! Whatever cannot be paid with the catalog is covered by rounding up with
//! the smallest coin. For an amount like $37.30 every suggestion comes out
//! at $37.50: it never falls short, and it overshoots by less than one
//! smallest coin. [`ChangeSuggestion::overshoot`] reports the difference.
//!
//! The randomness source is always passed in. Seed a generator to get the
//! same suggestions twice.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::composer::DenominationSelection;
use crate::denomination::{Catalog, Denomination};
use crate::money::Money;

/// Randomized candidates tried per [`ChangeGenerator::generate`] call.
pub const DEFAULT_ATTEMPTS: usize = 15;

// =============================================================================
// Change Suggestion
// =============================================================================

/// One concrete way to hand back a requested amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSuggestion {
    requested: Money,
    selection: DenominationSelection,
}

impl ChangeSuggestion {
    fn new(requested: Money, selection: DenominationSelection) -> Self {
        ChangeSuggestion {
            requested,
            selection,
        }
    }

    #[inline]
    pub fn requested(&self) -> Money {
        self.requested
    }

    #[inline]
    pub fn selection(&self) -> &DenominationSelection {
        &self.selection
    }

    pub fn total(&self) -> Money {
        self.selection.total()
    }

    /// Number of bills and coins handed over.
    pub fn pieces(&self) -> u64 {
        self.selection.pieces()
    }

    /// How much more than requested this hands over (rounding up).
    pub fn overshoot(&self) -> Money {
        self.total() - self.requested
    }

    pub fn is_exact(&self) -> bool {
        self.overshoot().is_zero()
    }
}

// =============================================================================
// Generator
// =============================================================================

/// Builds ranked, de-duplicated change suggestions over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChangeGenerator {
    catalog: Catalog,
    attempts: usize,
}

impl Default for ChangeGenerator {
    fn default() -> Self {
        ChangeGenerator::new(Catalog::standard(), DEFAULT_ATTEMPTS)
    }
}

impl ChangeGenerator {
    pub fn new(catalog: Catalog, attempts: usize) -> Self {
        ChangeGenerator { catalog, attempts }
    }

    #[inline]
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// The fewest-pieces breakdown: walk the catalog largest first.
    pub fn greedy(&self, amount: Money) -> ChangeSuggestion {
        greedy_suggestion(self.catalog, amount)
    }

    /// Ranked suggestions for `amount`.
    ///
    /// Returns nothing for zero or negative amounts ("no change owed").
    /// Otherwise the greedy breakdown is always present and comes first
    /// among suggestions with the same number of pieces.
    ///
    /// ## Example
    /// ```rust
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use tiendita_core::change::ChangeGenerator;
    /// use tiendita_core::money::Money;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let suggestions = ChangeGenerator::default().generate(Money::from_cents(3750), &mut rng);
    /// assert_eq!(suggestions[0].pieces(), 5);
    /// assert!(suggestions.iter().all(|s| s.is_exact()));
    /// ```
    pub fn generate<R: Rng + ?Sized>(&self, amount: Money, rng: &mut R) -> Vec<ChangeSuggestion> {
        if !amount.is_positive() {
            debug!(amount = %amount, "No change owed, nothing to suggest");
            return Vec::new();
        }

        let greedy = self.greedy(amount);
        let mut seen: HashSet<DenominationSelection> = HashSet::new();
        seen.insert(greedy.selection.clone());
        let mut suggestions = vec![greedy];
        let mut duplicates = 0usize;

        for attempt in 0..self.attempts {
            let selection = self.random_selection(amount, rng);
            if !seen.insert(selection.clone()) {
                duplicates += 1;
                continue;
            }
            let candidate = ChangeSuggestion::new(amount, selection);
            trace!(attempt, pieces = candidate.pieces(), "Kept change candidate");
            suggestions.push(candidate);
        }

        // Stable: the greedy baseline stays ahead of equally short candidates.
        suggestions.sort_by_key(ChangeSuggestion::pieces);

        debug!(
            amount = %amount,
            attempts = self.attempts,
            kept = suggestions.len(),
            duplicates,
            "Generated change suggestions"
        );
        suggestions
    }

    /// [`ChangeGenerator::generate`] for a raw float; NaN, infinities and
    /// unparsable values yield no suggestions.
    pub fn generate_decimal<R: Rng + ?Sized>(
        &self,
        amount: f64,
        rng: &mut R,
    ) -> Vec<ChangeSuggestion> {
        match Money::from_decimal(amount) {
            Ok(amount) => self.generate(amount, rng),
            Err(err) => {
                debug!(%err, "Ignoring change request");
                Vec::new()
            }
        }
    }

    fn random_selection<R: Rng + ?Sized>(
        &self,
        amount: Money,
        rng: &mut R,
    ) -> DenominationSelection {
        let mut order: Vec<Denomination> = self.catalog.list().to_vec();
        order.shuffle(rng);

        let mut selection = DenominationSelection::new();
        let mut remaining = amount;
        for denomination in order {
            let max = remaining.units_of(denomination.value);
            if max == 0 {
                continue;
            }
            let count = if rng.gen_bool(0.5) {
                max
            } else {
                rng.gen_range(1..=max)
            };
            selection.add_units(denomination.value, count);
            remaining -= denomination.value * count;
        }

        cover_remainder(&mut selection, remaining, self.catalog.smallest());
        selection
    }
}

fn greedy_suggestion(catalog: Catalog, amount: Money) -> ChangeSuggestion {
    let mut selection = DenominationSelection::new();
    let mut remaining = amount;
    for denomination in catalog.list() {
        let count = remaining.units_of(denomination.value);
        if count > 0 {
            selection.add_units(denomination.value, count);
            remaining -= denomination.value * count;
        }
    }
    cover_remainder(&mut selection, remaining, catalog.smallest());
    ChangeSuggestion::new(amount, selection)
}

/// Rounds any leftover up to whole units of the smallest coin.
fn cover_remainder(selection: &mut DenominationSelection, remaining: Money, smallest: Money) {
    let units = remaining.units_to_cover(smallest);
    if units > 0 {
        trace!(remaining = %remaining, units, "Covering remainder with smallest coin");
        selection.add_units(smallest, units);
    }
}

// =============================================================================
// Quick Tiered Suggestions
// =============================================================================

/// Up to three fixed alternatives over the extended catalog:
///
/// 1. greedy with every denomination (500 included)
/// 2. greedy without the 500 and 200 bills, when the amount is at least $20
/// 3. greedy with bills no larger than 50, when the amount is $10 to $200
///
/// Tiers that repeat an earlier breakdown are skipped.
pub fn quick_suggestions(amount: Money) -> Vec<ChangeSuggestion> {
    if !amount.is_positive() {
        return Vec::new();
    }

    let extended = Catalog::extended();
    let mut tiers = vec![extended];
    if amount >= Money::from_pesos(20) {
        tiers.push(extended.capped_at(Money::from_pesos(100)));
    }
    if amount >= Money::from_pesos(10) && amount <= Money::from_pesos(200) {
        tiers.push(extended.capped_at(Money::from_pesos(50)));
    }

    let mut suggestions: Vec<ChangeSuggestion> = Vec::with_capacity(tiers.len());
    for tier in tiers {
        let suggestion = greedy_suggestion(tier, amount);
        if !suggestions.contains(&suggestion) {
            suggestions.push(suggestion);
        }
    }
    suggestions
}

// =============================================================================
// Cycling
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// Next index when browsing suggestions, wrapping at both ends.
///
/// Returns `None` for an empty list.
///
/// ## Example
/// ```rust
/// use tiendita_core::change::{cycle, CycleDirection};
///
/// let list = ["a", "b", "c"];
/// assert_eq!(cycle(&list, 2, CycleDirection::Forward), Some(0));
/// assert_eq!(cycle(&list, 0, CycleDirection::Backward), Some(2));
/// ```
pub fn cycle<T>(suggestions: &[T], current: usize, direction: CycleDirection) -> Option<usize> {
    let len = suggestions.len();
    if len == 0 {
        return None;
    }
    let current = current % len;
    Some(match direction {
        CycleDirection::Forward => (current + 1) % len,
        CycleDirection::Backward => (current + len - 1) % len,
    })
}
