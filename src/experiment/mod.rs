//! Experiment orchestration: race every configured method across a grid of
//! board sizes, independently verify each result, and collect tabular rows
//! for reporting.
//!
//! The solvers themselves hold no global state, so repeated runs here are
//! fully independent; all experiment-wide knobs live in [`ExperimentConfig`].

pub mod report;

use std::{collections::HashMap, fs, path::Path, time::Duration, time::Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    board,
    error::Result,
    solver::{
        csp::CspSolver,
        ga::{GaConfig, GeneticAlgorithm},
        sa::{SaConfig, SimulatedAnnealing},
        seeded_rng, Solver,
    },
};

use self::report::ResultRow;

/// The method roster. Labels match the persisted CSV so plots keyed on the
/// method column stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Backtracking + forward checking, static orderings.
    CspBasic,
    /// Backtracking + forward checking + MRV + LCV.
    CspDynamic,
    /// Simulated annealing.
    Sa,
    /// Genetic algorithm.
    Ga,
}

impl Method {
    pub fn label(&self) -> &'static str {
        match self {
            Method::CspBasic => "CSP_basic",
            Method::CspDynamic => "CSP_dynamic",
            Method::Sa => "SA",
            Method::Ga => "GA",
        }
    }

    /// Builds the solver backing this method, taking stochastic
    /// hyperparameters from the experiment configuration.
    pub fn solver(&self, config: &ExperimentConfig) -> Box<dyn Solver> {
        match self {
            Method::CspBasic => Box::new(CspSolver::basic()),
            Method::CspDynamic => Box::new(CspSolver::dynamic()),
            Method::Sa => Box::new(SimulatedAnnealing::new(config.sa.clone())),
            Method::Ga => Box::new(GeneticAlgorithm::new(config.ga.clone())),
        }
    }
}

/// Everything one experiment sweep needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Board sizes to test.
    pub board_sizes: Vec<usize>,
    /// Default runs per (method, n) cell.
    pub repeats: usize,
    /// Per-method overrides, e.g. more repeats for the stochastic methods.
    pub repeats_overrides: HashMap<Method, usize>,
    /// Master seed; per-run seeds are derived from it so stochastic runs are
    /// reproducible. `None` seeds every run from OS entropy.
    pub seed: Option<u64>,
    /// Wall-clock budget per single run, in seconds.
    pub time_limit_secs: f64,
    pub methods: Vec<Method>,
    pub sa: SaConfig,
    pub ga: GaConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            board_sizes: vec![8, 16, 32],
            repeats: 3,
            repeats_overrides: HashMap::new(),
            seed: Some(42),
            time_limit_secs: 5.0,
            methods: vec![
                Method::CspBasic,
                Method::CspDynamic,
                Method::Sa,
                Method::Ga,
            ],
            sa: SaConfig::default(),
            ga: GaConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Loads a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Runs the whole sweep and returns one row per (method, n) cell.
///
/// Every returned assignment is re-checked with [`board::verify`], so a
/// solver bug shows up as a failed run rather than a silently wrong success
/// count.
pub fn run(config: &ExperimentConfig) -> Result<Vec<ResultRow>> {
    let time_limit = Duration::from_secs_f64(config.time_limit_secs);
    let mut master_rng = seeded_rng(config.seed);
    let mut rows = Vec::new();

    for method in &config.methods {
        let solver = method.solver(config);
        let runs = config
            .repeats_overrides
            .get(method)
            .copied()
            .unwrap_or(config.repeats);

        for &n in &config.board_sizes {
            let mut success = 0usize;
            let mut elapsed_total = 0.0f64;

            for _ in 0..runs {
                // Derive a per-run seed; the deterministic solvers ignore it.
                let run_seed = config.seed.map(|_| master_rng.gen::<u64>());

                let started = Instant::now();
                let solution = solver.solve(n, time_limit, run_seed)?;
                let elapsed = started.elapsed().as_secs_f64();

                let ok = solution.as_deref().is_some_and(board::verify);
                if ok {
                    success += 1;
                }
                elapsed_total += elapsed;
            }

            let row = ResultRow {
                n,
                method: method.label().to_string(),
                runs,
                success,
                success_rate: if runs > 0 {
                    success as f64 / runs as f64
                } else {
                    0.0
                },
                avg_time_secs: if runs > 0 {
                    elapsed_total / runs as f64
                } else {
                    0.0
                },
            };
            info!(
                n = row.n,
                method = row.method,
                success = row.success,
                runs = row.runs,
                avg_time_secs = row.avg_time_secs,
                "experiment cell finished"
            );
            rows.push(row);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn csp_only_config() -> ExperimentConfig {
        ExperimentConfig {
            board_sizes: vec![4, 5],
            repeats: 2,
            methods: vec![Method::CspBasic, Method::CspDynamic],
            time_limit_secs: 30.0,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn produces_one_row_per_method_and_size() {
        let rows = run(&csp_only_config()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].method, "CSP_basic");
        assert_eq!(rows[0].n, 4);
        assert_eq!(rows[3].method, "CSP_dynamic");
        assert_eq!(rows[3].n, 5);
    }

    #[test]
    fn exact_methods_succeed_on_solvable_sizes() {
        for row in run(&csp_only_config()).unwrap() {
            assert_eq!(row.success, row.runs);
            assert_eq!(row.success_rate, 1.0);
        }
    }

    #[test]
    fn repeats_overrides_take_precedence() {
        let mut config = csp_only_config();
        config.board_sizes = vec![4];
        config.repeats_overrides.insert(Method::CspBasic, 5);

        let rows = run(&config).unwrap();
        assert_eq!(rows[0].runs, 5);
        assert_eq!(rows[1].runs, 2);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = csp_only_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ExperimentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.board_sizes, config.board_sizes);
        assert_eq!(parsed.methods, config.methods);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let parsed: ExperimentConfig =
            serde_json::from_str(r#"{"board_sizes": [6], "repeats": 1}"#).unwrap();
        assert_eq!(parsed.board_sizes, vec![6]);
        assert_eq!(parsed.repeats, 1);
        assert_eq!(parsed.time_limit_secs, 5.0);
        assert_eq!(parsed.methods.len(), 4);
    }
}
