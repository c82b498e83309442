//! # Genetic Algorithm
//!
//! A generational loop over a [`Population`]: crossover, then mutation, then
//! selection, until a caller-supplied break condition holds.
//!
//! Every step is a pluggable strategy. Each strategy trait is implemented for plain
//! closures, so small experiments need no dedicated types:
//!
//! ```rust
//! # use heurist::problem::{OptimizationProblem, ProblemType, Solution};
//! # #[derive(Clone, Debug)]
//! # struct Line;
//! # impl OptimizationProblem for Line {
//! #     fn problem_type(&self) -> ProblemType { ProblemType::Maximization }
//! # }
//! # #[derive(Clone, Debug)]
//! # struct Point(f64);
//! # impl Solution for Point {
//! #     type Problem = Line;
//! #     fn problem(&self) -> &Line { &Line }
//! #     fn fitness(&self) -> f64 { self.0 }
//! #     fn representation(&self) -> String { self.0.to_string() }
//! # }
//! use heurist::ga::{GeneticAlgorithmBuilder, NoCrossover, NoMutation, ResultMode};
//! use heurist::population::Population;
//! use heurist::rng::RandomNumberGenerator;
//!
//! let initial = Population::new(vec![Point(0.0), Point(1.0)]).unwrap();
//!
//! let mut ga = GeneticAlgorithmBuilder::new()
//!     .with_initial_population(initial)
//!     .with_crossover_function(NoCrossover)
//!     .with_mutation_function(NoMutation)
//!     .with_selection_function(
//!         |_parents: &Population<Point>,
//!          children: Population<Point>,
//!          _rng: &mut RandomNumberGenerator| {
//!             let shifted = children.iter().map(|p| Point(p.0 + 1.0)).collect();
//!             Population::new(shifted)
//!         },
//!     )
//!     .with_break_condition(|_population: &Population<Point>, iteration: u64, _best: &Point| {
//!         iteration >= 10
//!     })
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! let best = ga.run(ResultMode::TotalBest).unwrap();
//! assert_eq!(best.0, 11.0);
//! assert_eq!(ga.iterations(), 10);
//! ```

pub mod builder;
pub mod crossover;
pub mod engine;
pub mod mutation;
pub mod selection;

use crate::error::Result;
use crate::population::Population;
use crate::problem::Solution;
use crate::rng::RandomNumberGenerator;

pub use builder::GeneticAlgorithmBuilder;
pub use crossover::NoCrossover;
pub use engine::{GeneticAlgorithm, ListenerId};
pub use mutation::{
    AdaptiveRateMutation, DynamicRateMutation, FixedRateMutation, MutationFunction, MutationRule,
    NoMutation,
};
pub use selection::{RouletteWheelSelection, ThresholdAcceptingSelection};

/// Which solution a genetic algorithm run returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultMode {
    /// The best solution observed in any generation.
    TotalBest,
    /// The best solution of the final generation only.
    BestOfLastPopulation,
}

/// Produces a child population from a parent population.
pub trait CrossoverFunction<S: Solution> {
    fn crossover(
        &mut self,
        parents: &Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>>;
}

impl<S, F> CrossoverFunction<S> for F
where
    S: Solution,
    F: FnMut(&Population<S>, &mut RandomNumberGenerator) -> Result<Population<S>>,
{
    fn crossover(
        &mut self,
        parents: &Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        self(parents, rng)
    }
}

/// Picks the next generation from the previous generation and its children.
pub trait SelectionFunction<S: Solution> {
    /// Returns a new population made of individuals picked from `children`, and
    /// optionally from `parents`.
    fn select(
        &mut self,
        parents: &Population<S>,
        children: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>>;

    /// Restores the state a run may have changed. Called after every run.
    fn reset(&mut self) {}
}

impl<S, F> SelectionFunction<S> for F
where
    S: Solution,
    F: FnMut(&Population<S>, Population<S>, &mut RandomNumberGenerator) -> Result<Population<S>>,
{
    fn select(
        &mut self,
        parents: &Population<S>,
        children: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        self(parents, children, rng)
    }
}

/// Decides when a genetic algorithm run stops.
///
/// A condition that never holds makes the run loop forever.
pub trait BreakCondition<S: Solution> {
    fn is_fulfilled(&mut self, population: &Population<S>, iteration_count: u64, best: &S)
        -> bool;
}

impl<S, F> BreakCondition<S> for F
where
    S: Solution,
    F: FnMut(&Population<S>, u64, &S) -> bool,
{
    fn is_fulfilled(
        &mut self,
        population: &Population<S>,
        iteration_count: u64,
        best: &S,
    ) -> bool {
        self(population, iteration_count, best)
    }
}

/// Observes a genetic algorithm run.
///
/// Called once with iteration `-1` before the first generation, then once after
/// every completed generation. Listeners run synchronously and must not re-enter
/// the algorithm they observe.
pub trait IterationListener<S: Solution> {
    fn update(&mut self, population: &Population<S>, best: &S, iteration: i64);
}

impl<S, F> IterationListener<S> for F
where
    S: Solution,
    F: FnMut(&Population<S>, &S, i64),
{
    fn update(&mut self, population: &Population<S>, best: &S, iteration: i64) {
        self(population, best, iteration)
    }
}
