//! Penalized objective for a formed set of routes.
//!
//! Unlike the split decoder, the evaluator never rejects a route on capacity:
//! any load above `Q` is reported as overage and priced with `alpha`. It is
//! used on decoder output inside the GA and standalone on caller-built routes
//! over the instance's customer ids.
//!
//! ```text
//! fitness = distance + alpha · overload + beta · lateness + gamma · vehicles + fleet_penalty
//! ```
//!
//! `fleet_penalty` comes from the optional [`VehicleLimit`] policy and is `0`
//! without one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::instance::{Instance, DEPOT};
use crate::penalty::{Penalties, VehicleLimit};

/// Simulated metrics of one route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteMetrics {
    /// Travel distance depot → customers → depot.
    pub distance: f64,
    /// Total demand served.
    pub load: f64,
    /// `max(0, load - Q)`.
    pub overload: f64,
    /// Sum of `arrival - due` over late customers.
    pub lateness: f64,
    /// Number of customers reached after their due time.
    pub late_customers: usize,
    /// Time the vehicle is back at the depot.
    pub duration: f64,
}

/// Objective value and its components for a whole solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessReport {
    /// Scalar penalized objective (lower is better).
    pub fitness: f64,
    /// Total travel distance.
    pub distance: f64,
    /// Total capacity overage.
    pub overload: f64,
    /// Total lateness.
    pub lateness: f64,
    /// Number of routes.
    pub vehicles: usize,
    /// Number of customers served late. Diagnostic only, never weighted.
    pub late_customers: usize,
    /// Term added by the vehicle-limit policy.
    pub fleet_penalty: f64,
}

impl FitnessReport {
    /// Report for a tour that admits no decomposition into routes.
    pub fn infeasible() -> Self {
        Self {
            fitness: f64::INFINITY,
            distance: f64::INFINITY,
            overload: 0.0,
            lateness: 0.0,
            vehicles: 0,
            late_customers: 0,
            fleet_penalty: 0.0,
        }
    }

    /// Returns `true` if all routes respect capacity and time windows, the
    /// fleet fits the vehicle limit, and the fitness is finite.
    pub fn is_feasible(&self) -> bool {
        self.fitness.is_finite()
            && self.overload == 0.0
            && self.lateness == 0.0
            && self.fleet_penalty == 0.0
    }

    /// Recombines the components with the given weights.
    ///
    /// Equal to [`fitness`](Self::fitness) for a report produced by
    /// [`evaluate_routes`] with the same weights.
    pub fn recompute(&self, penalties: &Penalties) -> f64 {
        self.distance
            + penalties.alpha * self.overload
            + penalties.beta * self.lateness
            + penalties.gamma * self.vehicles as f64
            + self.fleet_penalty
    }
}

/// Simulates one route from the depot and back.
///
/// Arriving before `ready` waits without cost. Arriving after `due` adds
/// `arrival - due` to lateness. The load is summed over the whole route and
/// the overage is taken once at the end.
///
/// # Panics
/// Panics if the route contains an id that is not a node of `inst`.
///
/// # Examples
///
/// ```
/// use u_vrptw::fitness::evaluate_route;
/// use u_vrptw::instance::{Instance, Node};
///
/// let inst = Instance::from_nodes(
///     vec![Node::depot(0.0, 0.0), Node::new(4.0, 0.0, 3.0).with_time_window(0.0, 1.0)],
///     2.0,
/// ).unwrap();
/// let m = evaluate_route(&[1], &inst);
/// assert_eq!(m.distance, 8.0);
/// assert_eq!(m.overload, 1.0);
/// assert_eq!(m.lateness, 3.0);
/// ```
pub fn evaluate_route(route: &[usize], inst: &Instance) -> RouteMetrics {
    let mut metrics = RouteMetrics::default();
    let mut time = 0.0;
    let mut prev = DEPOT;

    for &cid in route {
        let node = inst.node(cid);
        let travel = inst.distance(prev, cid);
        metrics.distance += travel;
        time += travel;
        if time < node.ready {
            time = node.ready;
        }
        if time > node.due {
            metrics.lateness += time - node.due;
            metrics.late_customers += 1;
        }
        time += node.service;
        metrics.load += node.demand;
        prev = cid;
    }

    let back = inst.distance(prev, DEPOT);
    metrics.distance += back;
    metrics.duration = time + back;
    metrics.overload = (metrics.load - inst.capacity()).max(0.0);
    metrics
}

/// Evaluates a list of routes under the given weights and optional vehicle cap.
///
/// # Examples
///
/// ```
/// use u_vrptw::fitness::evaluate_routes;
/// use u_vrptw::instance::{Instance, Node};
/// use u_vrptw::penalty::Penalties;
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
/// let p = Penalties::new(1000.0, 100.0);
///
/// let report = evaluate_routes(&[vec![1, 2, 3]], &inst, &p, None);
/// assert_eq!(report.distance, 6.0);
/// assert_eq!(report.overload, 1.0);
/// assert_eq!(report.fitness, 1006.0);
/// ```
pub fn evaluate_routes(
    routes: &[Vec<usize>],
    inst: &Instance,
    penalties: &Penalties,
    vehicle_limit: Option<&VehicleLimit>,
) -> FitnessReport {
    let mut distance = 0.0;
    let mut overload = 0.0;
    let mut lateness = 0.0;
    let mut late_customers = 0;

    for route in routes {
        let m = evaluate_route(route, inst);
        distance += m.distance;
        overload += m.overload;
        lateness += m.lateness;
        late_customers += m.late_customers;
    }

    let vehicles = routes.len();
    let fleet_penalty = vehicle_limit.map_or(0.0, |limit| limit.penalty(vehicles));

    let mut report = FitnessReport {
        fitness: 0.0,
        distance,
        overload,
        lateness,
        vehicles,
        late_customers,
        fleet_penalty,
    };
    report.fitness = report.recompute(penalties);
    report
}
