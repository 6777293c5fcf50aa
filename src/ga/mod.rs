//! Genetic Algorithm engine.
//!
//! A single-population, elitist minimization search. The problem being
//! evolved is supplied through [`GaProblem`]; the giant-tour VRPTW problem
//! lives in [`crate::solver`].
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its fitness
//! - [`GaProblem`]: Initialization, evaluation, crossover, mutation
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generations, operator rates, time budget, seed
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best individual and per-generation history
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX) and swap mutation on permutations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::{GaProblem, Individual};
