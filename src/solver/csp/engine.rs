//! The backtracking engine shared by both CSP variants.
//!
//! The search is a depth-first walk driven by the injected row-selection and
//! value-ordering policies. Instead of relying on the call stack for undo,
//! every commitment records its domain removals on an explicit trail, and
//! backtracking replays that trail in reverse. An explicit frame stack keeps
//! the walk iterative, so large boards never run into recursion depth.

use tracing::debug;

use crate::solver::{
    budget::Budget,
    csp::{
        domains::{Assignment, DomainTable, TrailMark},
        heuristics::{RowSelectionPolicy, ValueOrderingPolicy},
    },
};

/// Why a search ended without an assignment.
///
/// Both reasons surface as "no result" at the contract boundary, but a
/// budget cutoff says nothing about solvability, while search-space
/// exhaustion is a proof that no solution exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// The time or node budget ran out mid-search.
    Budget,
    /// Every branch was explored and refuted.
    SearchSpace,
}

/// Counters accumulated over one search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Nodes expanded, i.e. row selections made.
    pub nodes_visited: u64,
    /// Times a row's candidate list was exhausted and the frontier retreated.
    pub backtracks: u64,
    /// Domain values removed by forward checking on surviving commitments.
    pub prunings: u64,
    /// Set when the search returned no assignment.
    pub exhaustion: Option<Exhaustion>,
}

/// One entry of the explicit search stack: a row being decided, its ordered
/// candidates, and the trail mark to rewind to when the current candidate is
/// abandoned.
struct Frame {
    row: usize,
    candidates: Vec<usize>,
    next: usize,
    mark: TrailMark,
}

/// The engine. Both variants are this one implementation with different
/// policies plugged in; it consults no randomness, so runs with identical
/// inputs produce identical assignments.
pub struct BacktrackingSearch {
    row_policy: Box<dyn RowSelectionPolicy>,
    value_policy: Box<dyn ValueOrderingPolicy>,
}

impl BacktrackingSearch {
    pub fn new(
        row_policy: Box<dyn RowSelectionPolicy>,
        value_policy: Box<dyn ValueOrderingPolicy>,
    ) -> Self {
        Self {
            row_policy,
            value_policy,
        }
    }

    /// Runs the search for an `n`-queens assignment within `budget`.
    ///
    /// The assignment, domain table, trail and frame stack are created here
    /// and dropped on return; no state survives across calls. The budget is
    /// polled once per node expansion — there is no preemption inside a
    /// node.
    pub fn search(&self, n: usize, budget: &Budget) -> (Option<Vec<usize>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut assignment = Assignment::new(n);
        let mut domains = DomainTable::new(n);
        let mut stack: Vec<Frame> = Vec::with_capacity(n);

        loop {
            // SELECTING
            if budget.is_exceeded(stats.nodes_visited) {
                debug!(nodes = stats.nodes_visited, "budget exhausted");
                stats.exhaustion = Some(Exhaustion::Budget);
                return (None, stats);
            }
            stats.nodes_visited += 1;

            if assignment.is_complete() {
                debug!(
                    nodes = stats.nodes_visited,
                    backtracks = stats.backtracks,
                    "search succeeded"
                );
                return (assignment.columns(), stats);
            }

            let Some(row) = self.row_policy.select_row(&assignment, &domains) else {
                // Unreachable while the assignment is incomplete.
                return (assignment.columns(), stats);
            };
            let candidates = self.value_policy.order_values(row, &assignment, &domains);
            let mark = domains.mark();
            stack.push(Frame {
                row,
                candidates,
                next: 0,
                mark,
            });

            // PROPAGATING / BACKTRACKING: advance the deepest frame until a
            // commitment survives forward checking, or the stack empties.
            loop {
                let Some(frame) = stack.last_mut() else {
                    debug!(nodes = stats.nodes_visited, "search space exhausted");
                    stats.exhaustion = Some(Exhaustion::SearchSpace);
                    return (None, stats);
                };

                if frame.next < frame.candidates.len() {
                    let col = frame.candidates[frame.next];
                    frame.next += 1;
                    frame.mark = domains.mark();

                    assignment.assign(frame.row, col);
                    if domains.commit(frame.row, col, &assignment) {
                        stats.prunings += (domains.mark() - frame.mark) as u64;
                        // Frontier advances; back to SELECTING.
                        break;
                    }

                    // Wipeout: undo this single commitment's propagation and
                    // move on to the next candidate.
                    assignment.unassign(frame.row);
                    domains.undo_to(frame.mark);
                } else {
                    // Candidates exhausted: retreat the frontier and resume
                    // the previous row's remaining candidates.
                    stack.pop();
                    stats.backtracks += 1;
                    if let Some(parent) = stack.last() {
                        assignment.unassign(parent.row);
                        domains.undo_to(parent.mark);
                    }
                }
            }
        }
    }
}
