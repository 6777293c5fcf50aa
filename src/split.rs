//! Split decoder: optimal partition of a giant tour into routes.
//!
//! # Algorithm
//!
//! Route-first, cluster-second. A giant tour `π` (a permutation of all
//! customers, depot excluded) is cut into contiguous segments, each served by
//! one vehicle leaving and returning to the depot. Choosing the cuts is a
//! shortest path over tour prefixes:
//!
//! ```text
//! dp[0] = 0
//! dp[j] = min over i < j of dp[i] + arc_cost(i, j)
//! ```
//!
//! where `arc_cost(i, j)` is the penalized cost of one route serving
//! `π[i+1..=j]` (1-based positions). A backpointer per prefix recovers the
//! optimal cuts.
//!
//! Capacity is **hard** here: a segment whose load exceeds `Q` costs `+∞`.
//! Time windows are **soft**: the arc cost is
//! `distance + beta · lateness + gamma`, waiting is free.
//!
//! # Complexity
//!
//! `arc_cost` on its own is `O(j - i)`, so evaluating every cell naively is
//! `O(n³)`. [`split`] extends each segment incrementally from its start
//! position and stops at the first capacity overflow, which is `O(n²)` in the
//! worst case and yields exactly the same costs and cuts.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fitness::evaluate_route;
use crate::instance::{Instance, DEPOT};
use crate::penalty::Penalties;

/// Result of decoding one giant tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplitResult {
    /// Routes as customer-id sequences, depot implicit at both ends.
    pub routes: Vec<Vec<usize>>,
    /// Optimal penalized cost `dp[n]`. `+∞` if no decomposition exists.
    pub cost: f64,
}

impl SplitResult {
    /// Number of routes (vehicles used).
    pub fn vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the tour could be decomposed at all.
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }

    fn infeasible() -> Self {
        Self {
            routes: Vec::new(),
            cost: f64::INFINITY,
        }
    }
}

/// Penalized cost of a single route serving `tour[i..j]`.
///
/// Positions follow the prefix convention: the route covers the customers
/// after the first `i` tour positions up to and including position `j`.
/// The route is simulated by [`evaluate_route`], so the decoder and the
/// evaluator share one accounting of travel, waiting and lateness. Returns
/// `+∞` when the load exceeds the vehicle capacity.
///
/// # Panics
/// Panics if `i >= j` or `j > tour.len()`.
///
/// # Examples
///
/// ```
/// use u_vrptw::instance::{Instance, Node};
/// use u_vrptw::penalty::Penalties;
/// use u_vrptw::split::arc_cost;
///
/// let inst = Instance::from_nodes(
///     vec![Node::depot(0.0, 0.0), Node::new(1.0, 0.0, 1.0), Node::new(2.0, 0.0, 1.0)],
///     1.0,
/// ).unwrap();
/// let p = Penalties::default();
/// assert_eq!(arc_cost(&[1, 2], 0, 1, &inst, &p), 2.0);
/// assert_eq!(arc_cost(&[1, 2], 0, 2, &inst, &p), f64::INFINITY);
/// ```
pub fn arc_cost(tour: &[usize], i: usize, j: usize, inst: &Instance, penalties: &Penalties) -> f64 {
    assert!(i < j && j <= tour.len(), "invalid segment [{i}, {j})");

    let m = evaluate_route(&tour[i..j], inst);
    if m.load > inst.capacity() {
        return f64::INFINITY;
    }
    m.distance + penalties.beta * m.lateness + penalties.gamma
}

/// Splits a giant tour into the cost-minimal sequence of routes.
///
/// Deterministic and exact for the given tour and weights. Ties between
/// equal-cost cuts keep the earliest predecessor.
///
/// If some customer cannot be served by any route (its demand alone exceeds
/// `Q`), no decomposition exists: the result has `cost = +∞` and no routes.
/// Customers are never silently dropped.
///
/// # Examples
///
/// ```
/// use u_vrptw::instance::{Instance, Node};
/// use u_vrptw::penalty::Penalties;
/// use u_vrptw::split::split;
///
/// let inst = Instance::from_nodes(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1.0, 0.0, 1.0),
///         Node::new(2.0, 0.0, 1.0),
///         Node::new(3.0, 0.0, 1.0),
///     ],
///     2.0,
/// ).unwrap();
///
/// let result = split(&[1, 2, 3], &inst, &Penalties::default());
/// assert_eq!(result.routes, vec![vec![1], vec![2, 3]]);
/// assert!((result.cost - 8.0).abs() < 1e-9);
/// ```
pub fn split(tour: &[usize], inst: &Instance, penalties: &Penalties) -> SplitResult {
    let n = tour.len();
    if n == 0 {
        return SplitResult {
            routes: Vec::new(),
            cost: 0.0,
        };
    }

    let capacity = inst.capacity();
    let mut dp = vec![f64::INFINITY; n + 1];
    let mut prv = vec![usize::MAX; n + 1];
    dp[0] = 0.0;

    for i in 0..n {
        if dp[i] == f64::INFINITY {
            continue;
        }

        let mut load = 0.0;
        let mut time = 0.0;
        let mut distance = 0.0;
        let mut lateness = 0.0;
        let mut prev = DEPOT;

        for j in i..n {
            let cid = tour[j];
            let node = inst.node(cid);
            // Load only grows, so every longer segment overflows too.
            if load + node.demand > capacity {
                break;
            }

            let travel = inst.distance(prev, cid);
            distance += travel;
            time += travel;
            if time < node.ready {
                time = node.ready;
            }
            if time > node.due {
                lateness += time - node.due;
            }
            time += node.service;
            load += node.demand;
            prev = cid;

            let route_cost = distance
                + inst.distance(cid, DEPOT)
                + penalties.beta * lateness
                + penalties.gamma;
            let candidate = dp[i] + route_cost;
            if candidate < dp[j + 1] {
                dp[j + 1] = candidate;
                prv[j + 1] = i;
            }
        }
    }

    if dp[n] == f64::INFINITY {
        return SplitResult::infeasible();
    }

    let mut routes = Vec::new();
    let mut j = n;
    while j > 0 {
        let i = prv[j];
        routes.push(tour[i..j].to_vec());
        j = i;
    }
    routes.reverse();

    SplitResult {
        routes,
        cost: dp[n],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::evaluate_routes;
    use crate::instance::Node;

    /// Depot at the origin, customers at (1,0), (2,0), (3,0).
    fn line_instance(capacity: f64) -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1.0, 0.0, 1.0).with_time_window(0.0, 1000.0),
            Node::new(2.0, 0.0, 1.0).with_time_window(0.0, 1000.0),
            Node::new(3.0, 0.0, 1.0).with_time_window(0.0, 1000.0),
        ];
        Instance::from_nodes(nodes, capacity).expect("valid instance")
    }

    #[test]
    fn test_capacity_forces_best_two_route_split() {
        let inst = line_instance(2.0);
        let p = Penalties::new(1000.0, 100.0);

        // One route over all three customers carries 3 > Q = 2.
        assert_eq!(arc_cost(&[1, 2, 3], 0, 3, &inst, &p), f64::INFINITY);
        assert!((arc_cost(&[1, 2, 3], 0, 2, &inst, &p) - 4.0).abs() < 1e-12);
        assert!((arc_cost(&[1, 2, 3], 2, 3, &inst, &p) - 6.0).abs() < 1e-12);

        let result = split(&[1, 2, 3], &inst, &p);
        assert_eq!(result.routes, vec![vec![1], vec![2, 3]]);
        assert_eq!(result.vehicles(), 2);
        assert!((result.cost - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_route_when_capacity_allows() {
        let inst = line_instance(10.0);
        let result = split(&[1, 2, 3], &inst, &Penalties::default());
        assert_eq!(result.routes, vec![vec![1, 2, 3]]);
        assert!((result.cost - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_customer_has_no_decomposition() {
        let mut nodes = line_instance(2.0).nodes().to_vec();
        nodes[2].demand = 5.0;
        let inst = Instance::from_nodes(nodes, 2.0).expect("valid");
        let p = Penalties::default();

        for tour in [[1, 2, 3], [2, 1, 3], [3, 1, 2], [3, 2, 1]] {
            let pos = tour.iter().position(|&c| c == 2).expect("customer 2 in tour");
            for i in 0..=pos {
                for j in (pos + 1)..=3 {
                    assert_eq!(arc_cost(&tour, i, j, &inst, &p), f64::INFINITY);
                }
            }
            let result = split(&tour, &inst, &p);
            assert!(!result.is_feasible());
            assert!(result.routes.is_empty());
        }
    }

    #[test]
    fn test_lateness_priced_with_beta() {
        // Customer 1 is due at 0, arrival is at 5.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(5.0, 0.0, 1.0).with_time_window(0.0, 0.0),
        ];
        let inst = Instance::from_nodes(nodes, 10.0).expect("valid");
        let p = Penalties::new(1000.0, 3.0);
        let cost = arc_cost(&[1], 0, 1, &inst, &p);
        assert!((cost - (10.0 + 3.0 * 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_waiting_is_free() {
        // Arrive at 1, wait until 50; the second customer is reached at 51.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1.0, 0.0, 1.0).with_time_window(50.0, 100.0),
            Node::new(2.0, 0.0, 1.0).with_time_window(0.0, 60.0),
        ];
        let inst = Instance::from_nodes(nodes, 10.0).expect("valid");
        let result = split(&[1, 2], &inst, &Penalties::default());
        assert_eq!(result.routes, vec![vec![1, 2]]);
        assert!((result.cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_lateness_can_favor_extra_route() {
        // Serving 2 after 1 makes it late by 10; a direct trip is cheaper.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(10.0, 0.0, 1.0).with_time_window(0.0, 100.0).with_service(10.0),
            Node::new(0.0, 10.0, 1.0).with_time_window(0.0, 24.142_135_623_730_95),
        ];
        let inst = Instance::from_nodes(nodes, 10.0).expect("valid");
        let result = split(&[1, 2], &inst, &Penalties::new(1000.0, 100.0));
        assert_eq!(result.routes, vec![vec![1], vec![2]]);
        assert!((result.cost - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_surcharge_per_route() {
        let inst = line_instance(2.0);
        let p = Penalties::new(1000.0, 100.0).with_gamma(7.0);
        let result = split(&[1, 2, 3], &inst, &p);
        assert_eq!(result.vehicles(), 2);
        assert!((result.cost - (8.0 + 2.0 * 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_matches_naive_dp() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(3.0, 1.0, 2.0).with_time_window(0.0, 8.0).with_service(1.0),
            Node::new(-2.0, 4.0, 3.0).with_time_window(5.0, 12.0).with_service(2.0),
            Node::new(1.0, -5.0, 1.0).with_time_window(0.0, 20.0),
            Node::new(6.0, 6.0, 4.0).with_time_window(10.0, 30.0).with_service(3.0),
            Node::new(-4.0, -1.0, 2.0).with_time_window(0.0, 6.0),
        ];
        let inst = Instance::from_nodes(nodes, 6.0).expect("valid");
        let p = Penalties::new(1000.0, 50.0).with_gamma(2.0);
        let tour = [4, 2, 5, 1, 3];
        let n = tour.len();

        let mut dp = vec![f64::INFINITY; n + 1];
        dp[0] = 0.0;
        for j in 1..=n {
            for i in 0..j {
                let c = dp[i] + arc_cost(&tour, i, j, &inst, &p);
                if c < dp[j] {
                    dp[j] = c;
                }
            }
        }

        let result = split(&tour, &inst, &p);
        assert!((result.cost - dp[n]).abs() < 1e-9);
        let covered: usize = result.routes.iter().map(Vec::len).sum();
        assert_eq!(covered, n);
    }

    #[test]
    fn test_decoder_cost_matches_evaluator_with_lateness() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(4.0, 0.0, 2.0).with_time_window(0.0, 3.0).with_service(2.0),
            Node::new(4.0, 4.0, 2.0).with_time_window(6.0, 9.0).with_service(1.0),
            Node::new(0.0, 4.0, 2.0).with_time_window(0.0, 10.0),
        ];
        let inst = Instance::from_nodes(nodes, 6.0).expect("valid");
        let p = Penalties::new(1000.0, 20.0).with_gamma(1.5);

        for tour in [[1, 2, 3], [3, 2, 1], [2, 3, 1]] {
            let result = split(&tour, &inst, &p);
            let report = evaluate_routes(&result.routes, &inst, &p, None);
            assert_eq!(report.overload, 0.0);
            assert!(
                (report.fitness - result.cost).abs() < 1e-9,
                "tour {tour:?}: evaluator {} vs decoder {}",
                report.fitness,
                result.cost
            );
        }
    }

    #[test]
    fn test_empty_tour() {
        let inst = line_instance(2.0);
        let result = split(&[], &inst, &Penalties::default());
        assert!(result.routes.is_empty());
        assert_eq!(result.cost, 0.0);
        assert!(result.is_feasible());
    }

    #[test]
    fn test_routes_preserve_tour_order() {
        let inst = line_instance(1.0);
        let tour = [3, 1, 2];
        let result = split(&tour, &inst, &Penalties::default());
        let flattened: Vec<usize> = result.routes.concat();
        assert_eq!(flattened, tour.to_vec());
        assert_eq!(result.vehicles(), 3);
    }

    #[test]
    #[should_panic(expected = "invalid segment")]
    fn test_arc_cost_rejects_empty_segment() {
        let inst = line_instance(2.0);
        arc_cost(&[1, 2, 3], 1, 1, &inst, &Penalties::default());
    }
}
