//! Tournament selection.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament selection: sample `k` individuals uniformly (with replacement)
/// and return the index of the one with the lowest fitness.
///
/// Ties keep the first sampled individual. `k = 0` is treated as `1`.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use proptest::prelude::*;

    #[derive(Clone)]
    struct TestInd {
        fit: f64,
    }

    impl Individual for TestInd {
        fn fitness(&self) -> f64 {
            self.fit
        }
    }

    fn make_population(fitnesses: &[f64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 4, &mut rng)] += 1;
        }
        // P(best sampled at least once in 4 draws) = 1 - (3/4)^4 ≈ 0.68
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_infinite_fitness_never_beats_finite() {
        let pop = make_population(&[f64::INFINITY, 3.0, f64::INFINITY]);
        let mut rng = StdRng::seed_from_u64(9);
        let mut finite_sampled = 0;
        for _ in 0..1000 {
            let mut replay = rng.clone();
            let sampled: Vec<usize> = (0..2).map(|_| replay.random_range(0..pop.len())).collect();
            let idx = tournament(&pop, 2, &mut rng);
            if sampled.contains(&1) {
                finite_sampled += 1;
                assert_eq!(idx, 1, "infinite fitness won over a sampled finite one");
            } else {
                assert!(pop[idx].fit.is_infinite());
            }
        }
        // P(finite sampled) = 1 - (2/3)^2 ≈ 0.56
        assert!(finite_sampled > 400, "finite individual sampled {finite_sampled}/1000");
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = StdRng::seed_from_u64(42);
        tournament(&pop, 3, &mut rng);
    }

    proptest! {
        #[test]
        fn prop_winner_no_worse_than_any_sampled(
            fits in prop::collection::vec(0.0..1000.0f64, 1..40),
            k in 1usize..8,
            seed in any::<u64>(),
        ) {
            let pop = make_population(&fits);
            let mut rng = StdRng::seed_from_u64(seed);
            // A clone of the generator replays the same draws.
            let mut replay = rng.clone();
            let sampled: Vec<usize> = (0..k).map(|_| replay.random_range(0..pop.len())).collect();

            let winner = tournament(&pop, k, &mut rng);
            prop_assert!(sampled.contains(&winner));
            for &i in &sampled {
                prop_assert!(pop[winner].fit <= pop[i].fit);
            }
            // Ties resolve to the first sampled index.
            let first_best = sampled
                .iter()
                .copied()
                .find(|&i| pop[i].fit == pop[winner].fit)
                .expect("winner is in the sample");
            prop_assert_eq!(winner, first_best);
        }
    }
}
