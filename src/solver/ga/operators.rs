//! Operators for the permutation genetic algorithm.
//!
//! Individuals are permutations of `0..n`: row index is implicit and the
//! value is the column, so distinct columns hold by construction and only
//! diagonal conflicts can occur.

use rand::{seq::SliceRandom, Rng};

use crate::board;

/// Number of unordered queen pairs, `C(n, 2)`. Maps conflicts to fitness.
pub fn pair_count(n: usize) -> usize {
    n * (n - 1) / 2
}

/// Fitness = non-attacking pairs = `C(n, 2) - conflicts`. Higher is better;
/// a perfect individual scores exactly `pair_count(n)`.
pub fn fitness_of(individual: &[usize]) -> usize {
    pair_count(individual.len()) - board::conflicts(individual)
}

pub fn evaluate_fitness(population: &[Vec<usize>]) -> Vec<usize> {
    population
        .iter()
        .map(|individual| fitness_of(individual))
        .collect()
}

/// A uniformly random permutation of `0..n`.
pub fn random_permutation(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);
    permutation
}

pub fn init_population(n: usize, pop_size: usize, rng: &mut impl Rng) -> Vec<Vec<usize>> {
    (0..pop_size).map(|_| random_permutation(n, rng)).collect()
}

/// Returns `(index, individual, fitness)` of the best population member,
/// taking the first of equally fit individuals.
pub fn best_individual(population: &[Vec<usize>], fitnesses: &[usize]) -> (usize, Vec<usize>, usize) {
    let mut best = 0;
    for (index, &fitness) in fitnesses.iter().enumerate() {
        if fitness > fitnesses[best] {
            best = index;
        }
    }
    (best, population[best].clone(), fitnesses[best])
}

/// Tournament selection: samples `t_size` distinct indices and returns the
/// fittest of them (the first, on ties).
pub fn tournament_select(fitnesses: &[usize], t_size: usize, rng: &mut impl Rng) -> usize {
    let pop_size = fitnesses.len();
    let t_size = t_size.clamp(2, pop_size);
    let contestants = rand::seq::index::sample(rng, pop_size, t_size);
    let mut winner = contestants.index(0);
    for i in contestants.iter().skip(1) {
        if fitnesses[i] > fitnesses[winner] {
            winner = i;
        }
    }
    winner
}

/// Order crossover (OX) for permutations.
///
/// Copies a random slice `[a..=b]` of the first parent into the child at the
/// same positions, then fills the remaining slots, left to right, with the
/// second parent's genes in their original order, skipping genes already
/// present. The child is always a valid permutation.
pub fn order_crossover(p1: &[usize], p2: &[usize], rng: &mut impl Rng) -> Vec<usize> {
    let n = p1.len();
    let (mut a, mut b) = (rng.gen_range(0..n), rng.gen_range(0..n));
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    let mut child = vec![usize::MAX; n];
    let mut used = vec![false; n];
    child[a..=b].copy_from_slice(&p1[a..=b]);
    for &gene in &p1[a..=b] {
        used[gene] = true;
    }

    let mut slot = 0;
    for &gene in p2 {
        if used[gene] {
            continue;
        }
        while child[slot] != usize::MAX {
            slot += 1;
        }
        child[slot] = gene;
    }

    child
}

/// Swap mutation: with probability `prob`, exchanges two distinct positions
/// in place.
pub fn swap_mutate(individual: &mut [usize], rng: &mut impl Rng, prob: f64) {
    if rng.gen::<f64>() < prob {
        let n = individual.len();
        let i = rng.gen_range(0..n);
        let mut j = rng.gen_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        individual.swap(i, j);
    }
}
