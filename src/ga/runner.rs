//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives one population through
//! initialization → evaluation → (selection → crossover → mutation → evaluation)*
//! until the generation count or the time budget is exhausted.
//!
//! The best individual found so far is carried unchanged into every new
//! population, so the recorded best fitness never gets worse.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{GaProblem, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations executed after initialization.
    pub generations: usize,

    /// Whether the run stopped on the time budget.
    pub timed_out: bool,

    /// Best fitness so far: entry 0 after initialization, then one per generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Returns `Err` if the configuration is invalid.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>, String> {
        config.validate()?;

        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            population_size = config.population_size,
            max_generations = config.max_generations,
            seed = ?config.seed,
            "starting GA"
        );

        // 1. Initialize population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        // 2. Evaluate initial population
        evaluate_all(problem, &mut population, config.parallel);

        // 3. Track best
        let mut best = find_best(&population).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations.min(1 << 16) + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0usize;
        let mut timed_out = false;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(limit) = time_limit {
                if started.elapsed() >= limit {
                    timed_out = true;
                    info!(generation = gen, elapsed = ?started.elapsed(), "time budget exhausted");
                    break;
                }
            }

            // Elitism
            let mut next_gen: Vec<P::Individual> = Vec::with_capacity(config.population_size);
            next_gen.push(best.clone());

            // Generate offspring
            while next_gen.len() < config.population_size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    population[p1].clone()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(&mut child, &mut rng);
                }

                next_gen.push(child);
            }

            // The elite is already evaluated
            evaluate_all(problem, &mut next_gen[1..], config.parallel);

            population = next_gen;

            let gen_best = find_best(&population);
            if gen_best.fitness() < best.fitness() {
                best = gen_best.clone();
            }

            generations = gen + 1;
            fitness_history.push(best.fitness());
            debug!(generation = generations, best_fitness = best.fitness(), "generation done");
        }

        info!(
            generations,
            best_fitness = best.fitness(),
            elapsed = ?started.elapsed(),
            "GA finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            timed_out,
            fitness_history,
        })
    }
}

/// Evaluate every individual in place.
fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    if parallel {
        evaluate_parallel(problem, individuals);
    } else {
        for ind in individuals.iter_mut() {
            problem.evaluate(ind);
        }
    }
}

/// Each evaluation writes only to its own slot, so the result is the same
/// population the sequential path produces.
#[cfg(feature = "parallel")]
fn evaluate_parallel<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    use rayon::prelude::*;
    individuals
        .par_iter_mut()
        .for_each(|ind| problem.evaluate(ind));
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut() {
        problem.evaluate(ind);
    }
}

/// Find the individual with the lowest fitness; ties keep the earliest.
fn find_best<I: Individual>(population: &[I]) -> &I {
    population
        .iter()
        .min_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
