//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] separate the evolutionary loop from what
//! is being evolved. The runner only ever sees fitness values; decoding and
//! instance data stay behind the problem implementation.

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Lower fitness is better. Unevaluated individuals should report
/// `f64::INFINITY`.
pub trait Individual: Clone + Send + Sync {
    /// Current penalized objective value.
    fn fitness(&self) -> f64;
}

/// Defines what the GA evolves.
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to score one (stored on the individual)
/// 3. **Crossover**: how to recombine two parents into one child
/// 4. **Mutation**: how to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because, with the `parallel` feature,
/// a generation may be evaluated concurrently. Each evaluation writes only
/// to its own individual.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and stores the result on it.
    ///
    /// This is typically the most expensive operation.
    fn evaluate(&self, individual: &mut Self::Individual);

    /// Recombines two parents into one child.
    ///
    /// The default implementation clones parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}
