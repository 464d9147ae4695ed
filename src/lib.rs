//! Ant colony optimisation for the symmetric travelling salesman problem.
//!
//! A [`Problem`] holds the distances, a [`Colony`] runs a fixed number of
//! iterations over it and reports the final pheromone field together with
//! the best tour it came across.

pub mod aco;

pub use aco::{BestTour, Colony, DesirabilityMode, Outcome, Params, Problem};
