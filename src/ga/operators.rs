//! Permutation-preserving genetic operators for giant tours.
//!
//! Genes are customer ids. Any set of distinct non-negative ids works; the
//! giant tours of this crate use `1..=n`.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) producing one child.
///
/// # Algorithm
///
/// 1. Choose two distinct cut positions `a < b` uniformly at random
/// 2. Copy `parent1[a..=b]` into the child at the same positions
/// 3. Fill the remaining positions, starting right after `b` and wrapping
///    around, with the genes of `parent2` taken in `parent2`'s left-to-right
///    order, skipping genes already in the child
///
/// A single-gene parent is returned unchanged.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
///
/// # Examples
///
/// ```
/// use u_vrptw::ga::operators::order_crossover;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let child = order_crossover(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], &mut rng);
/// let mut sorted = child.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
/// ```
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (a, b) = random_cuts(n, rng);
    order_crossover_with_cuts(parent1, parent2, a, b)
}

/// OX with explicit cut positions `a <= b < n`.
///
/// # Panics
/// Panics if the parents have different lengths or the cuts are out of range.
///
/// # Examples
///
/// ```
/// use u_vrptw::ga::operators::order_crossover_with_cuts;
///
/// let child = order_crossover_with_cuts(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], 1, 2);
/// // Segment [2, 3] is kept; fill starts at position 3 with 5, 4, 1.
/// assert_eq!(child, vec![1, 2, 3, 5, 4]);
/// ```
pub fn order_crossover_with_cuts(parent1: &[usize], parent2: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(a <= b && b < n, "cuts must satisfy a <= b < n, got a={a}, b={b}, n={n}");

    let max_gene = parent1.iter().copied().max().unwrap_or(0);
    let mut present = vec![false; max_gene + 1];
    let mut child = vec![usize::MAX; n];

    for i in a..=b {
        child[i] = parent1[i];
        present[parent1[i]] = true;
    }

    let mut pos = (b + 1) % n;
    for &gene in parent2 {
        if !present[gene] {
            child[pos] = gene;
            present[gene] = true;
            pos = (pos + 1) % n;
        }
    }

    debug_assert!(
        child.iter().all(|&g| g != usize::MAX),
        "OX left an unfilled position: parents are not permutations of the same genes"
    );
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange the genes at two distinct random positions.
///
/// No-op for fewer than two genes.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (i, j) = random_cuts(n, rng);
    perm.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns `true` if `perm` contains each of `1..=n` exactly once, `n = perm.len()`.
pub fn is_customer_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n + 1];
    for &g in perm {
        if g == 0 || g > n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}

/// Two distinct positions in `0..n`, sorted. Requires `n >= 2`.
fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
