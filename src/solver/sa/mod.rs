//! Simulated annealing: a stochastic peer of the exact CSP solver,
//! conforming to the same [`Solver`] contract.
//!
//! The walk starts from a uniformly random placement and repeatedly proposes
//! a neighbour — one queen moved to a different column, or (with a
//! configured probability) two queens' columns swapped — accepting it by the
//! Metropolis rule under a cooling temperature. The conflict count from
//! [`board::conflicts`] is the energy being minimised.

pub mod schedule;

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    board,
    error::{Error, Result},
    solver::{sa::schedule::{CoolingSchedule, GeometricSchedule}, seeded_rng, Solver},
};

/// Hyperparameters for one annealing run. Defaults follow the geometric
/// schedule `T0 = 1.0`, `alpha = 0.98`, `T_min = 1e-3`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaConfig {
    /// Initial temperature.
    pub t0: f64,
    /// Geometric decay factor per temperature level.
    pub alpha: f64,
    /// Stopping temperature.
    pub t_min: f64,
    /// Hard cap on neighbour trials across the whole run.
    pub max_steps: u64,
    /// Neighbour trials per temperature level.
    pub iters_per_temp: u32,
    /// Probability of proposing a swap move instead of a single-queen move.
    pub swap_prob: f64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            t0: 1.0,
            alpha: 0.98,
            t_min: 1e-3,
            max_steps: 50_000,
            iters_per_temp: 100,
            swap_prob: 0.0,
        }
    }
}

/// The annealing solver. Stateless between calls; every `solve` builds its
/// own RNG, schedule and walk.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealing {
    config: SaConfig,
}

impl SimulatedAnnealing {
    pub fn new(config: SaConfig) -> Self {
        Self { config }
    }
}

/// Proposes a neighbouring placement. Requires `n >= 2`.
fn propose_neighbor(state: &[usize], rng: &mut impl Rng, swap_prob: f64) -> Vec<usize> {
    let n = state.len();
    let mut neighbor = state.to_vec();
    if rng.gen::<f64>() < swap_prob {
        let i = rng.gen_range(0..n);
        let mut j = rng.gen_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        neighbor.swap(i, j);
    } else {
        let i = rng.gen_range(0..n);
        let mut new_col = rng.gen_range(0..n);
        while new_col == neighbor[i] {
            new_col = rng.gen_range(0..n);
        }
        neighbor[i] = new_col;
    }
    neighbor
}

impl Solver for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "SA"
    }

    fn solve(
        &self,
        n: usize,
        time_limit: Duration,
        seed: Option<u64>,
    ) -> Result<Option<Vec<usize>>> {
        if n < 1 {
            return Err(Error::InvalidBoardSize(n));
        }
        // A single queen has no neighbours to move to.
        if n == 1 {
            return Ok(Some(vec![0]));
        }

        let mut rng = seeded_rng(seed);
        let start = Instant::now();
        let mut schedule = GeometricSchedule::new(self.config.t0, self.config.alpha, self.config.t_min);

        let mut state = board::random_assignment(n, &mut rng);
        let mut cost = board::conflicts(&state);
        if cost == 0 {
            return Ok(Some(state));
        }
        let mut best_state = state.clone();
        let mut best_cost = cost;

        let mut steps: u64 = 0;
        while !schedule.done() && start.elapsed() < time_limit && steps < self.config.max_steps {
            let temperature = schedule.current();

            for _ in 0..self.config.iters_per_temp {
                let neighbor = propose_neighbor(&state, &mut rng, self.config.swap_prob);
                let new_cost = board::conflicts(&neighbor);
                let delta = new_cost as f64 - cost as f64;

                // Metropolis acceptance: always downhill, uphill with
                // probability exp(-delta / T).
                if delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                    state = neighbor;
                    cost = new_cost;
                    if cost < best_cost {
                        best_state = state.clone();
                        best_cost = cost;
                    }
                    if cost == 0 {
                        debug!(steps, "annealing reached zero conflicts");
                        return Ok(Some(state));
                    }
                }

                steps += 1;
                if start.elapsed() >= time_limit || steps >= self.config.max_steps {
                    break;
                }
            }

            schedule.step();
        }

        debug!(steps, best_cost, "annealing stopped without a perfect state");
        // Only a conflict-free placement counts as a result.
        if best_cost == 0 {
            Ok(Some(best_state))
        } else {
            Ok(None)
        }
    }
}
