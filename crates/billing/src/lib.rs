//! `billing` crate — pure billing rules with no I/O.
//!
//! Holds the invoice total calculator, the currency helpers it relies on,
//! and the "merge non-empty fields" primitives shared by every update
//! operation in the `db` crate.

pub mod merge;
pub mod money;
pub mod totals;

pub use merge::{keep_or_replace, Blank, MergeNonEmpty};
pub use money::{round_currency, TAX_RATE};
pub use totals::InvoiceTotals;
