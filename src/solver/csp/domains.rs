//! Search state for the exact solver: the row assignment, the per-row column
//! domains, and the trail that makes forward checking exactly reversible.
//!
//! All of this state is created fresh for one solve invocation and owned by
//! it; nothing here is shared across calls.

use std::collections::BTreeSet;

/// A position in the trail. Captured before a commitment so that
/// [`DomainTable::undo_to`] can restore the domains to exactly that point.
pub type TrailMark = usize;

/// The partial assignment: slot `r` holds the column committed for row `r`,
/// or `None` while the row is undecided.
///
/// Invariant: the committed rows are pairwise non-attacking. The engine only
/// commits values that survive forward checking, which preserves this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    slots: Vec<Option<usize>>,
}

impl Assignment {
    pub fn new(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }

    pub fn n(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, row: usize) -> Option<usize> {
        self.slots[row]
    }

    pub fn is_assigned(&self, row: usize) -> bool {
        self.slots[row].is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    pub fn assign(&mut self, row: usize, col: usize) {
        self.slots[row] = Some(col);
    }

    pub fn unassign(&mut self, row: usize) {
        self.slots[row] = None;
    }

    /// Iterates over the rows that still need a decision, in ascending order.
    pub fn unassigned_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(row, _)| row)
    }

    /// The conflict check: `true` iff placing a queen at `(row, col)` attacks
    /// no committed row. Two queens attack when they share a column or when
    /// their row and column distances are equal (a diagonal).
    pub fn consistent(&self, row: usize, col: usize) -> bool {
        self.slots.iter().enumerate().all(|(other_row, slot)| {
            let Some(other_col) = *slot else {
                return true;
            };
            if other_row == row {
                return true;
            }
            col != other_col && row.abs_diff(other_row) != col.abs_diff(other_col)
        })
    }

    /// Extracts the full column vector once every row is committed.
    pub fn columns(&self) -> Option<Vec<usize>> {
        self.slots.iter().copied().collect()
    }
}

/// The per-row column domains plus the undo trail.
///
/// Each unassigned row maps to the set of columns still consistent with
/// every commitment made so far; a freshly created table holds `{0..n-1}`
/// for every row. Commitments only ever remove values, and every removal is
/// logged on the trail, so replaying the trail in reverse is an exact
/// inverse: commit-then-undo leaves the domains identical to the pre-commit
/// snapshot.
#[derive(Debug, Clone)]
pub struct DomainTable {
    domains: Vec<BTreeSet<usize>>,
    trail: Vec<(usize, usize)>,
}

impl DomainTable {
    pub fn new(n: usize) -> Self {
        Self {
            domains: vec![(0..n).collect(); n],
            trail: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.domains.len()
    }

    pub fn size(&self, row: usize) -> usize {
        self.domains[row].len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.domains[row].contains(&col)
    }

    /// The values still viable for `row`, in ascending column order.
    pub fn values(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.domains[row].iter().copied()
    }

    /// Captures the current trail position. Pass it back to [`undo_to`] to
    /// roll back everything recorded since.
    ///
    /// [`undo_to`]: DomainTable::undo_to
    pub fn mark(&self) -> TrailMark {
        self.trail.len()
    }

    fn remove(&mut self, row: usize, col: usize) {
        if self.domains[row].remove(&col) {
            self.trail.push((row, col));
        }
    }

    /// Applies the commitment `(row, col)` with forward checking.
    ///
    /// Shrinks `row`'s own domain to the singleton `{col}`, then removes
    /// every conflicting value (same column or diagonal) from the domains of
    /// the other unassigned rows. Returns `false` as soon as any domain is
    /// wiped out — the branch is provably dead, and the wiped row is never
    /// visited. All removals stay on the trail either way, so the caller
    /// undoes a failed commitment with the mark it captured beforehand.
    pub fn commit(&mut self, row: usize, col: usize, assignment: &Assignment) -> bool {
        let others: Vec<usize> = self
            .domains[row]
            .iter()
            .copied()
            .filter(|&value| value != col)
            .collect();
        for value in others {
            self.remove(row, value);
        }

        let n = self.rows();
        for other_row in 0..n {
            if other_row == row || assignment.is_assigned(other_row) {
                continue;
            }
            let distance = row.abs_diff(other_row);
            self.remove(other_row, col);
            self.remove(other_row, col + distance);
            if col >= distance {
                self.remove(other_row, col - distance);
            }
            if self.domains[other_row].is_empty() {
                return false;
            }
        }
        true
    }

    /// Rolls the domains back to `mark`, restoring removals last-in-first-out.
    ///
    /// A restored value must be absent from its domain at restore time; a
    /// duplicate means the trail and the domains disagree, which is a logic
    /// bug and fatal in debug builds.
    pub fn undo_to(&mut self, mark: TrailMark) {
        debug_assert!(mark <= self.trail.len(), "undo past the end of the trail");
        while self.trail.len() > mark {
            let (row, col) = self.trail.pop().expect("trail entry above mark");
            let inserted = self.domains[row].insert(col);
            debug_assert!(
                inserted,
                "trail restore mismatch: ({row}, {col}) already present"
            );
        }
    }

    /// Counts how many values would be removed from the other unassigned
    /// rows' domains if `(row, col)` were committed, without committing.
    /// This is the projected constraint count that LCV sorts by.
    pub fn projected_impact(&self, row: usize, col: usize, assignment: &Assignment) -> usize {
        let n = self.rows();
        let mut impact = 0;
        for other_row in 0..n {
            if other_row == row || assignment.is_assigned(other_row) {
                continue;
            }
            let distance = row.abs_diff(other_row);
            if self.contains(other_row, col) {
                impact += 1;
            }
            if self.contains(other_row, col + distance) {
                impact += 1;
            }
            if col >= distance && distance > 0 && self.contains(other_row, col - distance) {
                impact += 1;
            }
        }
        impact
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Vec<BTreeSet<usize>> {
        self.domains.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn fresh_table_holds_full_domains() {
        let table = DomainTable::new(4);
        for row in 0..4 {
            assert_eq!(table.values(row).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn consistent_detects_column_and_diagonal_attacks() {
        let mut assignment = Assignment::new(4);
        assignment.assign(0, 1);

        assert!(!assignment.consistent(2, 1)); // same column
        assert!(!assignment.consistent(1, 0)); // anti-diagonal
        assert!(!assignment.consistent(1, 2)); // main diagonal
        assert!(!assignment.consistent(3, 4)); // main diagonal, distance 3
        assert!(assignment.consistent(1, 3));
        assert!(assignment.consistent(2, 0));
    }

    #[test]
    fn commit_prunes_exactly_the_conflicting_values() {
        let mut assignment = Assignment::new(4);
        let mut table = DomainTable::new(4);

        assignment.assign(0, 1);
        assert!(table.commit(0, 1, &assignment));

        assert_eq!(table.values(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(table.values(1).collect::<Vec<_>>(), vec![3]);
        assert_eq!(table.values(2).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table.values(3).collect::<Vec<_>>(), vec![0, 2, 3]);
    }

    #[test]
    fn commit_reports_wipeout_without_visiting_the_wiped_row() {
        // On a 2x2 board any first commitment empties the other row.
        let mut assignment = Assignment::new(2);
        let mut table = DomainTable::new(2);

        assignment.assign(0, 0);
        assert!(!table.commit(0, 0, &assignment));
        assert_eq!(table.size(1), 0);
    }

    #[test]
    fn commit_then_undo_restores_the_exact_snapshot() {
        let mut assignment = Assignment::new(6);
        let mut table = DomainTable::new(6);

        // A deeper state: one prior commitment already applied.
        assignment.assign(0, 2);
        assert!(table.commit(0, 2, &assignment));

        let snapshot = table.snapshot();
        let mark = table.mark();

        assignment.assign(3, 5);
        assert!(table.commit(3, 5, &assignment));
        assert_ne!(table.snapshot(), snapshot);

        assignment.unassign(3);
        table.undo_to(mark);
        assert_eq!(table.snapshot(), snapshot);
    }

    #[test]
    fn undo_restores_even_after_a_wipeout() {
        let mut assignment = Assignment::new(2);
        let mut table = DomainTable::new(2);
        let snapshot = table.snapshot();
        let mark = table.mark();

        assignment.assign(0, 1);
        assert!(!table.commit(0, 1, &assignment));

        assignment.unassign(0);
        table.undo_to(mark);
        assert_eq!(table.snapshot(), snapshot);
    }

    #[test]
    fn projected_impact_counts_without_mutating() {
        let mut assignment = Assignment::new(4);
        let table = DomainTable::new(4);
        assignment.assign(0, 1);

        let before = table.snapshot();
        // Committing (0, 1) would remove column 1 from rows 1-3, column 2
        // from row 1, column 0 from row 1, column 3 from row 2, and column 4
        // is out of range: {1,0,2} + {1,3} + {1} = 6 values.
        assert_eq!(table.projected_impact(0, 1, &assignment), 6);
        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn assigned_rows_are_skipped_by_forward_checking() {
        let mut assignment = Assignment::new(4);
        let mut table = DomainTable::new(4);

        assignment.assign(0, 1);
        assert!(table.commit(0, 1, &assignment));

        // Row 3 is committed before row 2's forward check runs, so its
        // (singleton) domain must be left alone by the new commitment.
        assignment.assign(3, 0);
        assert!(table.commit(3, 0, &assignment));
        assignment.assign(2, 2);
        table.commit(2, 2, &assignment);
        assert_eq!(table.values(3).collect::<Vec<_>>(), vec![0]);
    }

    proptest! {
        /// Trail round-trip: for arbitrary board sizes and any in-domain
        /// placement, commit followed by undo leaves the table identical to
        /// the pre-commit snapshot.
        #[test]
        fn commit_undo_round_trip(n in 1usize..12, row in 0usize..12, col in 0usize..12) {
            let row = row % n;
            let col = col % n;

            let mut assignment = Assignment::new(n);
            let mut table = DomainTable::new(n);
            let snapshot = table.snapshot();
            let mark = table.mark();

            assignment.assign(row, col);
            table.commit(row, col, &assignment);

            assignment.unassign(row);
            table.undo_to(mark);
            prop_assert_eq!(table.snapshot(), snapshot);
        }

        /// Forward checking agrees with the conflict checker: every value a
        /// commitment leaves in another row's domain is consistent with it.
        #[test]
        fn surviving_values_are_consistent(n in 2usize..10, row in 0usize..10, col in 0usize..10) {
            let row = row % n;
            let col = col % n;

            let mut assignment = Assignment::new(n);
            let mut table = DomainTable::new(n);
            assignment.assign(row, col);
            table.commit(row, col, &assignment);

            for other_row in assignment.unassigned_rows() {
                for value in table.values(other_row) {
                    prop_assert!(assignment.consistent(other_row, value));
                }
            }
        }
    }
}
