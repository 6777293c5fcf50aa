//! Genetic algorithm for the Vehicle Routing Problem with Time Windows.
//!
//! Route-first, cluster-second: the search evolves *giant tours*
//! (permutations of all customers), and an exact dynamic program splits each
//! tour into depot-to-depot routes. Constraint violations are penalized
//! rather than forbidden:
//!
//! - **Capacity** is hard inside the split decoder (an overloaded segment is
//!   never a route) and soft in the standalone evaluator (overage × `alpha`).
//! - **Time windows** are soft everywhere: waiting is free, lateness × `beta`.
//! - **Vehicles** cost `gamma` each, with an optional cap that either rejects
//!   or penalizes larger fleets.
//!
//! # Modules
//!
//! - [`instance`]: Depot, customers, distance matrix, capacity
//! - [`penalty`]: Objective weights and the vehicle-cap policy
//! - [`split`]: Split decoder (giant tour → optimal routes)
//! - [`fitness`]: Penalized objective for a set of routes
//! - [`ga`]: Elitist GA with tournament selection, OX crossover, swap mutation
//! - [`tour`]: Giant tour chromosome
//! - [`solver`]: The VRPTW GA problem and the [`solve`](solver::solve) entry point
//!
//! # Example
//!
//! ```
//! use u_vrptw::instance::{Instance, Node};
//! use u_vrptw::solver::{solve, VrptwConfig};
//!
//! let nodes = vec![
//!     Node::depot(0.0, 0.0),
//!     Node::new(5.0, 0.0, 4.0).with_time_window(0.0, 20.0).with_service(1.0),
//!     Node::new(5.0, 5.0, 3.0).with_time_window(10.0, 40.0).with_service(1.0),
//!     Node::new(0.0, 5.0, 5.0).with_time_window(0.0, 60.0).with_service(1.0),
//! ];
//! let instance = Instance::from_nodes(nodes, 8.0).unwrap();
//!
//! let config = VrptwConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_seed(42);
//! let solution = solve(&instance, &config).unwrap();
//!
//! assert!(solution.report.fitness.is_finite());
//! assert_eq!(solution.history.len(), 51);
//! ```
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

pub mod fitness;
pub mod ga;
pub mod instance;
pub mod penalty;
pub mod solver;
pub mod split;
pub mod tour;
