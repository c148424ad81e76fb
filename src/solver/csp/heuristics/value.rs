//! Policies for ordering the candidate columns of the chosen row.

use crate::solver::csp::domains::{Assignment, DomainTable};

/// A strategy for the order in which a row's viable columns are tried.
///
/// The returned vector must contain exactly the row's current domain, and
/// the order must be deterministic for identical inputs.
pub trait ValueOrderingPolicy: std::fmt::Debug {
    fn order_values(&self, row: usize, assignment: &Assignment, domains: &DomainTable)
        -> Vec<usize>;
}

/// The static policy: candidates in ascending column order.
#[derive(Debug)]
pub struct AscendingColumns;

impl ValueOrderingPolicy for AscendingColumns {
    fn order_values(
        &self,
        row: usize,
        _assignment: &Assignment,
        domains: &DomainTable,
    ) -> Vec<usize> {
        domains.values(row).collect()
    }
}

/// Least constraining value: candidates ordered by ascending projected
/// constraint count.
///
/// For each candidate the policy counts how many values it would remove
/// from the other unassigned rows' domains, without actually committing, and
/// tries the least destructive candidate first. Ties break towards the lower
/// column so the ordering stays deterministic.
#[derive(Debug)]
pub struct LeastConstrainingValue;

impl ValueOrderingPolicy for LeastConstrainingValue {
    fn order_values(
        &self,
        row: usize,
        assignment: &Assignment,
        domains: &DomainTable,
    ) -> Vec<usize> {
        let mut candidates: Vec<usize> = domains.values(row).collect();
        candidates.sort_by_key(|&col| (domains.projected_impact(row, col, assignment), col));
        candidates
    }
}
