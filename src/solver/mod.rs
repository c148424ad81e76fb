//! The solver backends and the contract they share.
//!
//! Every method — the exact CSP variants and the stochastic baselines —
//! implements [`Solver`], so the experiment runner and the CLI can treat them
//! interchangeably.

pub mod budget;
pub mod csp;
pub mod ga;
pub mod sa;

use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::error::Result;

/// The shared solving contract.
///
/// `solve` either returns a full assignment (slot `r` holds the 0-indexed
/// column of the queen in row `r`), or `None` when no solution was found
/// within the time budget. The only error condition is invalid input
/// (`n < 1`), reported before any search state is allocated.
pub trait Solver {
    /// A short, stable label for this method, used in experiment reports.
    fn name(&self) -> &'static str;

    /// Attempts to place `n` non-attacking queens within `time_limit`.
    ///
    /// `seed` is part of the contract for protocol uniformity: stochastic
    /// solvers consume it for reproducible randomized choices, while the
    /// deterministic CSP variants ignore it.
    fn solve(
        &self,
        n: usize,
        time_limit: Duration,
        seed: Option<u64>,
    ) -> Result<Option<Vec<usize>>>;
}

/// Builds the RNG used by the stochastic solvers: a ChaCha stream seeded
/// from `seed`, or from OS entropy when no seed is given.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
