//! Shared board state helpers used by every solver and by the experiment
//! runner's independent verification step.
//!
//! An assignment is a `&[usize]` where slot `r` holds the column of the queen
//! in row `r`. Two queens attack each other when they share a column, a main
//! diagonal (`row - col`) or an anti-diagonal (`row + col`).

use rand::Rng;

/// Returns the total number of attacking queen pairs in `assignment`.
///
/// A valid solution has zero conflicts. Cost is O(n) via bucket counts over
/// columns and both diagonal families.
pub fn conflicts(assignment: &[usize]) -> usize {
    let n = assignment.len();
    if n == 0 {
        return 0;
    }

    let mut cols = vec![0usize; n];
    // Diagonal keys: row - col in [-(n-1), n-1] (shifted by n-1), row + col in [0, 2n-2].
    let mut main_diags = vec![0usize; 2 * n - 1];
    let mut anti_diags = vec![0usize; 2 * n - 1];

    for (row, &col) in assignment.iter().enumerate() {
        cols[col] += 1;
        main_diags[row + (n - 1) - col] += 1;
        anti_diags[row + col] += 1;
    }

    let pairs = |counts: &[usize]| {
        counts
            .iter()
            .map(|&c| c * c.saturating_sub(1) / 2)
            .sum::<usize>()
    };
    pairs(&cols) + pairs(&main_diags) + pairs(&anti_diags)
}

/// Returns `true` if `assignment` is a valid N-Queens solution: non-empty,
/// every column in bounds, and no attacking pair.
pub fn verify(assignment: &[usize]) -> bool {
    let n = assignment.len();
    if n == 0 {
        return false;
    }
    if assignment.iter().any(|&col| col >= n) {
        return false;
    }
    conflicts(assignment) == 0
}

/// Generates a random placement: each row gets an independently chosen
/// column in `0..n`.
pub fn random_assignment(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

/// Renders an ASCII board (`Q` for a queen, `.` for an empty cell), one rank
/// per line. Intended for CLI output and debugging.
pub fn render(assignment: &[usize]) -> String {
    let n = assignment.len();
    let mut lines = Vec::with_capacity(n);
    for &col in assignment {
        let rank: Vec<&str> = (0..n).map(|c| if c == col { "Q" } else { "." }).collect();
        lines.push(rank.join(" "));
    }
    lines.join("\n")
}
