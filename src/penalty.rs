//! Penalty weights and the vehicle-count policy.
//!
//! The same [`Penalties`] value is handed to the split decoder and to the
//! fitness evaluator so both price distance and lateness identically.
//!
//! | Weight  | Multiplies                       | Decoder | Evaluator |
//! |---------|----------------------------------|---------|-----------|
//! | `alpha` | capacity overage                 | (hard)  | yes       |
//! | `beta`  | cumulative lateness              | yes     | yes       |
//! | `gamma` | number of routes (vehicles used) | yes     | yes       |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weights of the penalized objective.
///
/// # Examples
///
/// ```
/// use u_vrptw::penalty::Penalties;
///
/// let p = Penalties::default();
/// assert_eq!(p.alpha, 1000.0);
/// assert_eq!(p.beta, 100.0);
/// assert_eq!(p.gamma, 0.0);
///
/// let p = Penalties::new(500.0, 10.0).with_gamma(25.0);
/// assert!(p.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Penalties {
    /// Weight of capacity overage.
    pub alpha: f64,
    /// Weight of cumulative lateness (sum of `arrival - due` over late customers).
    pub beta: f64,
    /// Flat surcharge per route.
    pub gamma: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            alpha: 1000.0,
            beta: 100.0,
            gamma: 0.0,
        }
    }
}

impl Penalties {
    /// Creates penalties with `gamma = 0`.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma: 0.0,
        }
    }

    /// Sets the per-route surcharge.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Returns `Err` if any weight is negative or non-finite.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {w}"));
            }
        }
        Ok(())
    }
}

/// What to do when a solution uses more routes than vehicles are available.
///
/// A run carries at most one policy, so rejection and soft penalties can
/// never be mixed within the same evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VehicleLimit {
    /// Fitness becomes `+∞` when the route count exceeds `max_vehicles`.
    Reject {
        /// Number of available vehicles.
        max_vehicles: usize,
    },
    /// Adds `weight` per route beyond `max_vehicles`.
    Penalize {
        /// Number of available vehicles.
        max_vehicles: usize,
        /// Additive penalty per excess route.
        weight: f64,
    },
}

impl VehicleLimit {
    /// The vehicle cap, whichever policy applies.
    pub fn max_vehicles(&self) -> usize {
        match *self {
            VehicleLimit::Reject { max_vehicles } | VehicleLimit::Penalize { max_vehicles, .. } => {
                max_vehicles
            }
        }
    }

    /// Additive term for `vehicles` routes: `0`, a finite penalty, or `+∞`.
    pub fn penalty(&self, vehicles: usize) -> f64 {
        let excess = vehicles.saturating_sub(self.max_vehicles());
        if excess == 0 {
            return 0.0;
        }
        match *self {
            VehicleLimit::Reject { .. } => f64::INFINITY,
            VehicleLimit::Penalize { weight, .. } => weight * excess as f64,
        }
    }

    /// Returns `Err` if the policy cannot be applied.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_vehicles() == 0 {
            return Err("max_vehicles must be at least 1".into());
        }
        if let VehicleLimit::Penalize { weight, .. } = *self {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("vehicle penalty weight must be finite and non-negative, got {weight}"));
            }
        }
        Ok(())
    }
}
