//! # tiendita-core: Change-Making Logic for La Tiendita
//!
//! The register front end shows a grid of bills and coins. This crate is
//! the arithmetic behind it: composing a payment tap by tap, settling it
//! against the sale total, and suggesting how to hand back the change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        La Tiendita Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (web screens / tiendita CLI)             │   │
//! │  │    Sale total ──► Tap bills ──► Change owed ──► Suggestions     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tiendita-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌───────────┐      │   │
//! │  │   │denomination│ │ composer │ │  change   │ │  payment  │      │   │
//! │  │   │  Catalog   │ │ Selection│ │ Generator │ │ Settlement│      │   │
//! │  │   └────────────┘ └──────────┘ └───────────┘ └───────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL RANDOMNESS • INTEGER CENTS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`denomination`] - The fixed bill/coin catalogs
//! - [`composer`] - Tap-by-tap selections and payment composition
//! - [`change`] - Ranked change suggestions
//! - [`payment`] - Settlement and the tender JSON format
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tiendita_core::{Catalog, ChangeGenerator, Composer, Money};
//!
//! let mut composer = Composer::new(Catalog::standard(), Money::from_cents(3750));
//! composer.tap(Money::from_pesos(50)).unwrap();
//! assert_eq!(composer.change(), Money::from_cents(1250));
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let suggestions = ChangeGenerator::default().generate(composer.change(), &mut rng);
//! assert_eq!(suggestions[0].pieces(), 3); // 10 + 2 + 0.5
//! ```

pub mod change;
pub mod composer;
pub mod denomination;
pub mod error;
pub mod money;
pub mod payment;

pub use change::{cycle, quick_suggestions, ChangeGenerator, ChangeSuggestion, CycleDirection};
pub use composer::{Composer, DenominationSelection};
pub use denomination::{Catalog, Denomination, DenominationKind};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use payment::{decode_tender, encode_tender, settle, CoinCount, Settlement};
