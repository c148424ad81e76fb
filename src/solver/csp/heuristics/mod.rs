//! Pluggable ordering policies for the backtracking engine.
//!
//! Row selection and value ordering are strategy injections, not an
//! inheritance hierarchy: both CSP variants share one engine and differ only
//! in which policies get plugged in, so their correctness behaviour is
//! identical by construction.

pub mod row;
pub mod value;

pub use row::{MinimumRemainingValues, RowSelectionPolicy, SelectFirstRow};
pub use value::{AscendingColumns, LeastConstrainingValue, ValueOrderingPolicy};
