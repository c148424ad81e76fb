//! Policies for choosing which row the engine decides next.

use crate::solver::csp::domains::{Assignment, DomainTable};

/// A strategy for picking the next unassigned row to branch on.
///
/// Returns `None` only when every row is already assigned. Implementations
/// must be deterministic: the engine consults no randomness, so identical
/// inputs must yield identical selections.
pub trait RowSelectionPolicy: std::fmt::Debug {
    fn select_row(&self, assignment: &Assignment, domains: &DomainTable) -> Option<usize>;
}

/// The static policy: the lowest-indexed unassigned row.
#[derive(Debug)]
pub struct SelectFirstRow;

impl RowSelectionPolicy for SelectFirstRow {
    fn select_row(&self, assignment: &Assignment, _domains: &DomainTable) -> Option<usize> {
        assignment.unassigned_rows().next()
    }
}

/// Minimum remaining values: the unassigned row with the smallest domain.
///
/// A fail-first strategy — tackling the most constrained row early prunes
/// the search space sooner. Ties break towards the lower row index so that
/// selection stays deterministic.
#[derive(Debug)]
pub struct MinimumRemainingValues;

impl RowSelectionPolicy for MinimumRemainingValues {
    fn select_row(&self, assignment: &Assignment, domains: &DomainTable) -> Option<usize> {
        assignment
            .unassigned_rows()
            .min_by_key(|&row| (domains.size(row), row))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn select_first_picks_lowest_unassigned_row() {
        let mut assignment = Assignment::new(4);
        let domains = DomainTable::new(4);

        assert_eq!(SelectFirstRow.select_row(&assignment, &domains), Some(0));

        assignment.assign(0, 1);
        assignment.assign(1, 3);
        assert_eq!(SelectFirstRow.select_row(&assignment, &domains), Some(2));
    }

    #[test]
    fn select_first_returns_none_when_complete() {
        let mut assignment = Assignment::new(2);
        let domains = DomainTable::new(2);
        assignment.assign(0, 0);
        assignment.assign(1, 1);
        assert_eq!(SelectFirstRow.select_row(&assignment, &domains), None);
    }

    #[test]
    fn mrv_prefers_the_smallest_domain() {
        let mut assignment = Assignment::new(4);
        let mut domains = DomainTable::new(4);

        // Committing (0, 1) leaves row 1 with a singleton domain {3}, row 2
        // with {0, 2} and row 3 with {0, 2, 3}.
        assignment.assign(0, 1);
        assert!(domains.commit(0, 1, &assignment));

        assert_eq!(
            MinimumRemainingValues.select_row(&assignment, &domains),
            Some(1)
        );
    }

    #[test]
    fn mrv_breaks_ties_towards_the_lower_row() {
        // A fresh table: every unassigned row has an equal, full domain, so
        // the tie-break alone decides.
        let mut assignment = Assignment::new(5);
        let domains = DomainTable::new(5);
        assignment.assign(0, 2);

        assert_eq!(
            MinimumRemainingValues.select_row(&assignment, &domains),
            Some(1)
        );
    }
}
