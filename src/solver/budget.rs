//! Cooperative search budgets.
//!
//! The engine never interrupts itself mid-node; it polls the budget once per
//! node expansion. A budget can bound wall-clock time, visited nodes, or
//! both. Exceeding it is not an error: the search reports "no result within
//! budget", which the caller records as an unsuccessful run.

use std::time::{Duration, Instant};

/// A per-solve search budget. Created fresh for each `solve()` call.
#[derive(Debug, Clone)]
pub struct Budget {
    deadline: Option<Instant>,
    max_nodes: Option<u64>,
}

impl Budget {
    /// A budget that never expires. Useful for completeness tests, where the
    /// search must be allowed to exhaust the space.
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            max_nodes: None,
        }
    }

    /// Bounds the search by wall-clock time, measured from now.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + limit),
            max_nodes: None,
        }
    }

    /// Bounds the search by the number of expanded nodes.
    pub fn with_node_limit(max_nodes: u64) -> Self {
        Self {
            deadline: None,
            max_nodes: Some(max_nodes),
        }
    }

    /// Adds a node cap to an existing budget.
    pub fn and_node_limit(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Returns `true` once the budget is spent. Polled by the engine before
    /// expanding each node; `nodes_visited` is the count so far.
    pub fn is_exceeded(&self, nodes_visited: u64) -> bool {
        if let Some(max_nodes) = self.max_nodes {
            if nodes_visited >= max_nodes {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_budget_never_expires() {
        let budget = Budget::unbounded();
        assert!(!budget.is_exceeded(u64::MAX));
    }

    #[test]
    fn node_limit_trips_at_cap() {
        let budget = Budget::with_node_limit(100);
        assert!(!budget.is_exceeded(99));
        assert!(budget.is_exceeded(100));
        assert!(budget.is_exceeded(101));
    }

    #[test]
    fn elapsed_deadline_trips() {
        let budget = Budget::with_time_limit(Duration::ZERO);
        assert!(budget.is_exceeded(0));
    }

    #[test]
    fn generous_deadline_does_not_trip() {
        let budget = Budget::with_time_limit(Duration::from_secs(3600));
        assert!(!budget.is_exceeded(0));
    }

    #[test]
    fn combined_budget_trips_on_whichever_bound_comes_first() {
        // A node cap layered onto a generous deadline trips on the cap.
        let budget = Budget::with_time_limit(Duration::from_secs(3600)).and_node_limit(10);
        assert!(!budget.is_exceeded(9));
        assert!(budget.is_exceeded(10));

        // And the deadline still trips independently of the cap.
        let budget = Budget::with_time_limit(Duration::ZERO).and_node_limit(1_000_000);
        assert!(budget.is_exceeded(0));
    }
}
