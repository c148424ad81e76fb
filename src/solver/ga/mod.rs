//! A generational genetic algorithm over permutation individuals: the second
//! stochastic peer of the exact CSP solver, conforming to the same
//! [`Solver`] contract.

pub mod operators;

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    solver::{seeded_rng, Solver},
};

use self::operators::{
    best_individual, evaluate_fitness, init_population, order_crossover, pair_count,
    swap_mutate, tournament_select,
};

/// Hyperparameters for one evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub pop_size: usize,
    /// Probability of producing an offspring by crossover rather than
    /// cloning the fitter parent.
    pub cx_prob: f64,
    /// Swap-mutation probability per offspring.
    pub mut_prob: f64,
    pub tournament_size: usize,
    /// Best individuals copied unchanged into the next generation.
    pub elitism: usize,
    pub max_generations: u64,
    /// Early stop after this many generations without improvement.
    pub stagnation_limit: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            pop_size: 150,
            cx_prob: 0.9,
            mut_prob: 0.1,
            tournament_size: 3,
            elitism: 2,
            max_generations: 5_000,
            stagnation_limit: 300,
        }
    }
}

/// The evolutionary solver. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct GeneticAlgorithm {
    config: GaConfig,
}

impl GeneticAlgorithm {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }
}

impl Solver for GeneticAlgorithm {
    fn name(&self) -> &'static str {
        "GA"
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

        let mut rng = seeded_rng(seed);
        let start = Instant::now();

        // Guardrails on degenerate configurations.
        let pop_size = self.config.pop_size.max(4);
        let elitism = self.config.elitism.min(pop_size - 1);
        let tournament_size = self.config.tournament_size.max(2);
        let max_fitness = pair_count(n);

        let mut population = init_population(n, pop_size, &mut rng);
        let mut fitnesses = evaluate_fitness(&population);
        let (_, mut best_ind, mut best_fit) = best_individual(&population, &fitnesses);

        if best_fit == max_fitness {
            return Ok(Some(best_ind));
        }

        let mut generation: u64 = 0;
        let mut stagnant: u64 = 0;

        while generation < self.config.max_generations && start.elapsed() < time_limit {
            generation += 1;

            // Elitism: carry the top individuals over unchanged.
            let mut ranking: Vec<usize> = (0..pop_size).collect();
            ranking.sort_by(|&a, &b| fitnesses[b].cmp(&fitnesses[a]).then(a.cmp(&b)));
            let mut next_population: Vec<Vec<usize>> = ranking[..elitism]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            // Fill the rest via selection -> crossover -> mutation.
            while next_population.len() < pop_size {
                let i1 = tournament_select(&fitnesses, tournament_size, &mut rng);
                let i2 = tournament_select(&fitnesses, tournament_size, &mut rng);

                let mut child = if rng.gen::<f64>() < self.config.cx_prob {
                    order_crossover(&population[i1], &population[i2], &mut rng)
                } else if fitnesses[i1] >= fitnesses[i2] {
                    population[i1].clone()
                } else {
                    population[i2].clone()
                };
                swap_mutate(&mut child, &mut rng, self.config.mut_prob);
                next_population.push(child);
            }

            population = next_population;
            fitnesses = evaluate_fitness(&population);

            let (_, current_ind, current_fit) = best_individual(&population, &fitnesses);
            if current_fit > best_fit {
                best_ind = current_ind;
                best_fit = current_fit;
                stagnant = 0;
            } else {
                stagnant += 1;
            }

            if best_fit == max_fitness {
                debug!(generation, "evolution reached a perfect individual");
                return Ok(Some(best_ind));
            }
            if stagnant >= self.config.stagnation_limit {
                debug!(generation, best_fit, "evolution stagnated");
                break;
            }
        }

        debug!(generation, best_fit, "evolution stopped without a perfect individual");
        // Only a conflict-free individual counts as a result.
        if best_fit == max_fitness {
            Ok(Some(best_ind))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board;

    #[test]
    fn rejects_an_empty_board() {
        let solver = GeneticAlgorithm::default();
        assert!(matches!(
            solver.solve(0, Duration::from_secs(1), Some(1)),
            Err(Error::InvalidBoardSize(0))
        ));
    }

    #[test]
    fn single_queen_is_immediate() {
        let solver = GeneticAlgorithm::default();
        let result = solver.solve(1, Duration::from_secs(1), Some(1)).unwrap();
        assert_eq!(result, Some(vec![0]));
    }

    #[test]
    fn any_returned_assignment_verifies() {
        let solver = GeneticAlgorithm::default();
        for seed in 0..3 {
            if let Some(assignment) = solver
                .solve(6, Duration::from_secs(10), Some(seed))
                .unwrap()
            {
                assert!(board::verify(&assignment));
            }
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let solver = GeneticAlgorithm::default();
        let a = solver.solve(6, Duration::from_secs(10), Some(21)).unwrap();
        let b = solver.solve(6, Duration::from_secs(10), Some(21)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unsolvable_sizes_report_no_result() {
        // 2- and 3-queens have no conflict-free permutation; the run must
        // stop on stagnation rather than loop forever.
        let quick = GaConfig {
            pop_size: 20,
            max_generations: 50,
            stagnation_limit: 10,
            ..GaConfig::default()
        };
        let solver = GeneticAlgorithm::new(quick);
        for n in [2, 3] {
            let result = solver.solve(n, Duration::from_secs(10), Some(5)).unwrap();
            assert_eq!(result, None);
        }
    }
}
