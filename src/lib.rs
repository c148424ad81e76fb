//! Regina solves the N-Queens problem with several competing methods that
//! share one external contract.
//!
//! The centrepiece is an exact constraint-satisfaction solver: backtracking
//! with forward checking, optionally guided by the minimum-remaining-values
//! (MRV) and least-constraining-value (LCV) heuristics. Alongside it live two
//! stochastic baselines, simulated annealing and a permutation genetic
//! algorithm, plus an experiment runner that races all of them across a grid
//! of board sizes and persists the outcome.
//!
//! # Core Concepts
//!
//! - **[`Solver`]**: the shared contract. `solve(n, time_limit, seed)` returns
//!   a full assignment (one column per row) or `None` when the budget runs
//!   out. Deterministic solvers ignore the seed; stochastic ones consume it.
//! - **[`CspSolver`]**: the exact engine. A [`Variant`] chooses which
//!   row-selection and value-ordering policies get plugged into the single
//!   backtracking implementation.
//! - **[`board::verify`]**: the independent companion check used to validate
//!   any returned assignment, regardless of which method produced it.
//!
//! # Example: solving 8-Queens exactly
//!
//! ```
//! use std::time::Duration;
//!
//! use regina::board;
//! use regina::solver::csp::CspSolver;
//! use regina::solver::Solver;
//!
//! let solver = CspSolver::dynamic();
//! let assignment = solver
//!     .solve(8, Duration::from_secs(5), None)
//!     .unwrap()
//!     .expect("8-queens is solvable");
//!
//! assert_eq!(assignment.len(), 8);
//! assert!(board::verify(&assignment));
//! ```
//!
//! [`Solver`]: solver::Solver
//! [`CspSolver`]: solver::csp::CspSolver
//! [`Variant`]: solver::csp::Variant

pub mod board;
pub mod error;
pub mod experiment;
pub mod solver;

pub use error::{Error, Result};
