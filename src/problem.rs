//! # Problems and Solutions
//!
//! The `OptimizationProblem` trait marks a problem instance and tells whether it is
//! minimized or maximized. The `Solution` trait describes a candidate bound to one
//! problem instance.
//!
//! Fitness is always "higher is better". A minimization problem encodes its cost as
//! negative fitness, so every engine and strategy in this crate compares fitness as a
//! plain real number.
//!
//! Solutions are values: crossover, mutation and neighbor construction always build a
//! new solution instead of changing an existing one.
//!
//! ## Example
//!
//! ```rust
//! use heurist::problem::{OptimizationProblem, ProblemType, Solution};
//!
//! #[derive(Clone, Debug)]
//! struct Knapsack;
//!
//! impl OptimizationProblem for Knapsack {
//!     fn problem_type(&self) -> ProblemType {
//!         ProblemType::Maximization
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Packing {
//!     problem: Knapsack,
//!     value: f64,
//! }
//!
//! impl Solution for Packing {
//!     type Problem = Knapsack;
//!
//!     fn problem(&self) -> &Knapsack {
//!         &self.problem
//!     }
//!
//!     fn fitness(&self) -> f64 {
//!         self.value
//!     }
//!
//!     fn representation(&self) -> String {
//!         format!("[{}]", self.value)
//!     }
//! }
//!
//! let packing = Packing { problem: Knapsack, value: 12.5 };
//! assert_eq!(packing.fitness(), 12.5);
//! assert_eq!(packing.problem().problem_type(), ProblemType::Maximization);
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Whether a problem's objective is minimized or maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemType {
    Minimization,
    Maximization,
}

/// Marker trait for an optimization problem instance.
///
/// One instance is shared by every solution and strategy of a run and never changes
/// after construction.
pub trait OptimizationProblem: Debug {
    /// Returns whether the objective of this problem is minimized or maximized.
    fn problem_type(&self) -> ProblemType;
}

/// A candidate solution of exactly one [`OptimizationProblem`].
pub trait Solution: Clone + Debug {
    /// The problem this solution belongs to.
    type Problem: OptimizationProblem;

    /// Returns the problem instance this solution is bound to.
    fn problem(&self) -> &Self::Problem;

    /// Returns the fitness of this solution. Higher is better.
    fn fitness(&self) -> f64;

    /// Returns a human-readable representation of this solution.
    fn representation(&self) -> String;
}

/// Builds a starting solution for an optimization run.
///
/// Any `FnMut(&mut RandomNumberGenerator) -> Result<S>` closure is a constructor.
pub trait InitialSolutionConstructor<S: Solution> {
    /// Constructs a new initial solution.
    ///
    /// # Errors
    ///
    /// Returns an error if the constructed candidate is not a legal solution.
    fn initial_solution(&mut self, rng: &mut RandomNumberGenerator) -> Result<S>;
}

impl<S, F> InitialSolutionConstructor<S> for F
where
    S: Solution,
    F: FnMut(&mut RandomNumberGenerator) -> Result<S>,
{
    fn initial_solution(&mut self, rng: &mut RandomNumberGenerator) -> Result<S> {
        self(rng)
    }
}
