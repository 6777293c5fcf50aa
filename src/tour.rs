//! Giant tour chromosome.
//!
//! A giant tour encodes a VRPTW solution as one permutation of all customer
//! ids `1..=n`, depot excluded. The [split decoder](crate::split) turns it
//! into routes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fitness::FitnessReport;
use crate::ga::operators::is_customer_permutation;
use crate::ga::Individual;

/// A permutation of customer ids together with its last evaluation.
///
/// # Examples
///
/// ```
/// use u_vrptw::ga::Individual;
/// use u_vrptw::tour::GiantTour;
///
/// let tour = GiantTour::new(vec![3, 1, 2]).unwrap();
/// assert_eq!(tour.customers(), &[3, 1, 2]);
/// assert_eq!(tour.fitness(), f64::INFINITY);
///
/// assert!(GiantTour::new(vec![1, 1, 2]).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GiantTour {
    customers: Vec<usize>,
    report: Option<FitnessReport>,
}

impl GiantTour {
    /// Creates an unevaluated tour.
    ///
    /// Returns `Err` unless `customers` holds each of `1..=n` exactly once.
    pub fn new(customers: Vec<usize>) -> Result<Self, String> {
        if !is_customer_permutation(&customers) {
            return Err(format!(
                "giant tour must contain each customer 1..={} exactly once",
                customers.len()
            ));
        }
        Ok(Self::from_genes(customers))
    }

    /// Wraps operator output. The permutation invariant is checked in debug builds.
    pub(crate) fn from_genes(customers: Vec<usize>) -> Self {
        debug_assert!(
            is_customer_permutation(&customers),
            "operator broke the permutation invariant: {customers:?}"
        );
        Self {
            customers,
            report: None,
        }
    }

    /// The customer permutation.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers in the tour.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the tour has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// The last evaluation, if any.
    pub fn report(&self) -> Option<&FitnessReport> {
        self.report.as_ref()
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        self.report = None;
        &mut self.customers
    }

    pub(crate) fn set_report(&mut self, report: FitnessReport) {
        self.report = Some(report);
    }

    /// Consumes the tour, returning the permutation.
    pub fn into_customers(self) -> Vec<usize> {
        self.customers
    }
}

impl Individual for GiantTour {
    fn fitness(&self) -> f64 {
        self.report.map_or(f64::INFINITY, |r| r.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_permutations() {
        assert!(GiantTour::new(vec![0, 1]).is_err());
        assert!(GiantTour::new(vec![1, 3]).is_err());
        assert!(GiantTour::new(vec![2, 2]).is_err());
        assert!(GiantTour::new(vec![]).is_ok());
    }

    #[test]
    fn test_mutation_clears_report() {
        let mut tour = GiantTour::new(vec![1, 2]).expect("valid");
        tour.set_report(FitnessReport::infeasible());
        assert!(tour.report().is_some());
        tour.genes_mut().swap(0, 1);
        assert!(tour.report().is_none());
        assert_eq!(tour.customers(), &[2, 1]);
    }
}
