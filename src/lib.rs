//! # heurist
//!
//! Metaheuristics for combinatorial optimization: a generic genetic algorithm and two
//! corrective procedures, threshold accepting and simulated annealing. A 13-city
//! traveling salesman instance in [`tsp`] exercises all three.
//!
//! Fitness is always maximized. Problems that minimize a cost report it as negative
//! fitness.

pub mod corrective;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod population;
pub mod problem;
pub mod rng;
pub mod tsp;

// Re-export commonly used types for convenience
pub use error::{OptimizationError, OptionExt, Result};
pub use fitness::FitnessComparator;
pub use population::Population;
pub use problem::{InitialSolutionConstructor, OptimizationProblem, ProblemType, Solution};
pub use rng::RandomNumberGenerator;
