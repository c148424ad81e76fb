//! The exact constraint-satisfaction solver: backtracking with forward
//! checking, in two variants that differ only in ordering policy.

pub mod domains;
pub mod engine;
pub mod heuristics;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    solver::{
        budget::Budget,
        csp::{
            engine::{BacktrackingSearch, SearchStats},
            heuristics::{
                AscendingColumns, LeastConstrainingValue, MinimumRemainingValues,
                RowSelectionPolicy, SelectFirstRow, ValueOrderingPolicy,
            },
        },
        Solver,
    },
};

/// Which ordering policies get wired into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Static ordering: lowest unassigned row, ascending columns.
    Basic,
    /// Dynamic ordering: MRV row selection, LCV value ordering.
    Dynamic,
}

impl Variant {
    fn policies(&self) -> (Box<dyn RowSelectionPolicy>, Box<dyn ValueOrderingPolicy>) {
        match self {
            Variant::Basic => (Box::new(SelectFirstRow), Box::new(AscendingColumns)),
            Variant::Dynamic => (
                Box::new(MinimumRemainingValues),
                Box::new(LeastConstrainingValue),
            ),
        }
    }
}

/// The exact N-Queens solver. Construct one per variant; each `solve` call
/// builds its own search state, so a single `CspSolver` is safely reusable
/// and reentrant across threads.
#[derive(Debug, Clone, Copy)]
pub struct CspSolver {
    variant: Variant,
}

impl CspSolver {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// Backtracking + forward checking with static orderings.
    pub fn basic() -> Self {
        Self::new(Variant::Basic)
    }

    /// Backtracking + forward checking with MRV and LCV.
    pub fn dynamic() -> Self {
        Self::new(Variant::Dynamic)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Runs the search under an explicit [`Budget`], returning the full
    /// search statistics alongside the result. `solve` is a thin wrapper
    /// over this; tests and benchmarks use it directly.
    pub fn search_with_budget(
        &self,
        n: usize,
        budget: &Budget,
    ) -> Result<(Option<Vec<usize>>, SearchStats)> {
        if n < 1 {
            return Err(Error::InvalidBoardSize(n));
        }
        let (row_policy, value_policy) = self.variant.policies();
        let engine = BacktrackingSearch::new(row_policy, value_policy);
        Ok(engine.search(n, budget))
    }
}

impl Solver for CspSolver {
    fn name(&self) -> &'static str {
        match self.variant {
            Variant::Basic => "CSP_basic",
            Variant::Dynamic => "CSP_dynamic",
        }
    }

    fn solve(
        &self,
        n: usize,
        time_limit: Duration,
        _seed: Option<u64>,
    ) -> Result<Option<Vec<usize>>> {
        let budget = Budget::with_time_limit(time_limit);
        let (solution, _stats) = self.search_with_budget(n, &budget)?;
        Ok(solution)
    }
}
