//! Giant-tour GA for VRPTW.
//!
//! [`VrptwProblem`] plugs the split decoder and the fitness evaluator into
//! the generic [`GaRunner`]: every individual is decoded into routes under
//! the run's penalties, and those routes are scored by the evaluator.
//! [`solve`] runs the search and packages the best tour as a
//! [`VrptwSolution`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::fitness::{evaluate_routes, FitnessReport};
use crate::ga::operators::{is_customer_permutation, order_crossover, swap_mutation};
use crate::ga::{GaConfig, GaProblem, GaRunner};
use crate::instance::Instance;
use crate::penalty::{Penalties, VehicleLimit};
use crate::split::{split, SplitResult};
use crate::tour::GiantTour;

/// Everything a run needs besides the instance.
///
/// ```
/// use u_vrptw::penalty::{Penalties, VehicleLimit};
/// use u_vrptw::solver::VrptwConfig;
///
/// let config = VrptwConfig::default()
///     .with_population_size(30)
///     .with_max_generations(100)
///     .with_penalties(Penalties::new(1000.0, 100.0))
///     .with_vehicle_limit(VehicleLimit::Reject { max_vehicles: 4 })
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VrptwConfig {
    /// Evolutionary loop parameters.
    pub ga: GaConfig,
    /// Objective weights, shared by decoder and evaluator.
    pub penalties: Penalties,
    /// Optional vehicle cap and how to enforce it.
    pub vehicle_limit: Option<VehicleLimit>,
}

impl VrptwConfig {
    /// Sets the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.ga = self.ga.with_population_size(n);
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.ga = self.ga.with_max_generations(n);
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.ga = self.ga.with_crossover_rate(rate);
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.ga = self.ga.with_mutation_rate(rate);
        self
    }

    /// Sets the wall-clock budget in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.ga = self.ga.with_time_limit_ms(ms);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga = self.ga.with_seed(seed);
        self
    }

    /// Sets the objective weights.
    pub fn with_penalties(mut self, penalties: Penalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the vehicle cap policy.
    pub fn with_vehicle_limit(mut self, limit: VehicleLimit) -> Self {
        self.vehicle_limit = Some(limit);
        self
    }

    /// Validates all parts of the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.ga.validate()?;
        self.penalties.validate()?;
        if let Some(limit) = &self.vehicle_limit {
            limit.validate()?;
        }
        Ok(())
    }
}

/// The VRPTW giant-tour problem seen by the GA.
pub struct VrptwProblem<'a> {
    instance: &'a Instance,
    penalties: Penalties,
    vehicle_limit: Option<VehicleLimit>,
}

impl<'a> VrptwProblem<'a> {
    /// Creates the problem for one run.
    pub fn new(instance: &'a Instance, penalties: Penalties, vehicle_limit: Option<VehicleLimit>) -> Self {
        Self {
            instance,
            penalties,
            vehicle_limit,
        }
    }

    /// Decodes a permutation and scores the resulting routes.
    ///
    /// A permutation with no decomposition gets [`FitnessReport::infeasible`].
    pub fn decode(&self, customers: &[usize]) -> (SplitResult, FitnessReport) {
        let decoded = split(customers, self.instance, &self.penalties);
        let report = if decoded.is_feasible() {
            evaluate_routes(
                &decoded.routes,
                self.instance,
                &self.penalties,
                self.vehicle_limit.as_ref(),
            )
        } else {
            FitnessReport::infeasible()
        };
        (decoded, report)
    }
}

impl GaProblem for VrptwProblem<'_> {
    type Individual = GiantTour;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> GiantTour {
        let mut customers: Vec<usize> = self.instance.customer_ids().collect();
        customers.shuffle(rng);
        GiantTour::from_genes(customers)
    }

    fn evaluate(&self, individual: &mut GiantTour) {
        let (_, report) = self.decode(individual.customers());
        individual.set_report(report);
    }

    fn crossover<R: Rng>(&self, parent1: &GiantTour, parent2: &GiantTour, rng: &mut R) -> GiantTour {
        GiantTour::from_genes(order_crossover(parent1.customers(), parent2.customers(), rng))
    }

    fn mutate<R: Rng>(&self, individual: &mut GiantTour, rng: &mut R) {
        swap_mutation(individual.genes_mut(), rng);
        debug_assert!(
            is_customer_permutation(individual.customers()),
            "swap mutation broke the permutation invariant"
        );
    }
}

/// Outcome of [`solve`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VrptwSolution {
    /// Best giant tour found.
    pub permutation: Vec<usize>,
    /// Routes decoded from `permutation` under the run's penalties.
    pub routes: Vec<Vec<usize>>,
    /// Standalone evaluation of `routes`.
    pub report: FitnessReport,
    /// Best fitness so far, one entry per generation including generation 0.
    pub history: Vec<f64>,
    /// Generations executed after initialization.
    pub generations: usize,
    /// Whether the time budget ended the run.
    pub timed_out: bool,
}

impl VrptwSolution {
    /// Number of routes (vehicles used).
    pub fn vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the solution needs more vehicles than `max_vehicles`.
    pub fn exceeds_vehicles(&self, max_vehicles: usize) -> bool {
        self.vehicles() > max_vehicles
    }
}

/// Runs the giant-tour GA on an instance.
///
/// Returns `Err` if the configuration is invalid. An instance where no
/// tour can be decoded (some customer exceeds the capacity on its own)
/// is not an error: the solution has no routes and infinite fitness.
///
/// # Examples
///
/// ```
/// use u_vrptw::instance::{Instance, Node};
/// use u_vrptw::solver::{solve, VrptwConfig};
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
/// let config = VrptwConfig::default()
///     .with_population_size(10)
///     .with_max_generations(20)
///     .with_seed(42);
/// let solution = solve(&inst, &config).unwrap();
/// assert_eq!(solution.history.len(), 21);
/// assert!((solution.report.fitness - 8.0).abs() < 1e-9);
/// ```
pub fn solve(instance: &Instance, config: &VrptwConfig) -> Result<VrptwSolution, String> {
    config.validate()?;

    info!(
        customers = instance.num_customers(),
        capacity = instance.capacity(),
        alpha = config.penalties.alpha,
        beta = config.penalties.beta,
        gamma = config.penalties.gamma,
        "solving VRPTW instance"
    );

    let problem = VrptwProblem::new(instance, config.penalties, config.vehicle_limit);
    let result = GaRunner::run(&problem, &config.ga)?;

    let permutation = result.best.into_customers();
    let (decoded, report) = problem.decode(&permutation);

    if !decoded.is_feasible() {
        warn!("no giant tour could be split into capacity-feasible routes");
    } else if !report.fitness.is_finite() {
        warn!(vehicles = report.vehicles, "best solution exceeds the vehicle limit");
    }

    info!(
        fitness = report.fitness,
        distance = report.distance,
        vehicles = report.vehicles,
        lateness = report.lateness,
        "best solution"
    );

    Ok(VrptwSolution {
        permutation,
        routes: decoded.routes,
        report,
        history: result.fitness_history,
        generations: result.generations,
        timed_out: result.timed_out,
    })
}
