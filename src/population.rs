//! # Population
//!
//! An ordered, non-empty group of candidate solutions processed together by one
//! generation of a [`GeneticAlgorithm`](crate::ga::GeneticAlgorithm).
//!
//! A population is never changed after construction. Merging and selection always
//! produce a new population.
//!
//! ## Example
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
//! use heurist::population::Population;
//!
//! let parents = Population::new(vec![Point(1.0), Point(3.0)]).unwrap();
//! let children = Population::from_solution(Point(2.0));
//! let merged = Population::merge(&parents, &children);
//!
//! assert_eq!(merged.size(), 3);
//! assert_eq!(merged.best_individual().fitness(), 3.0);
//! ```

use crate::error::{OptimizationError, Result};
use crate::problem::{InitialSolutionConstructor, Solution};
use crate::rng::RandomNumberGenerator;

/// A fixed-size, non-empty, ordered collection of solutions.
#[derive(Debug, Clone)]
pub struct Population<S: Solution> {
    individuals: Vec<S>,
}

impl<S: Solution> Population<S> {
    /// Creates a population from the given individuals.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError::EmptyPopulation`] if `individuals` is empty.
    pub fn new(individuals: Vec<S>) -> Result<Self> {
        if individuals.is_empty() {
            return Err(OptimizationError::EmptyPopulation);
        }
        Ok(Self { individuals })
    }

    /// Creates a population of `size` individuals built by `constructor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or the constructor fails.
    pub fn from_constructor<C>(
        constructor: &mut C,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self>
    where
        C: InitialSolutionConstructor<S> + ?Sized,
    {
        if size == 0 {
            return Err(OptimizationError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        let individuals = (0..size)
            .map(|_| constructor.initial_solution(rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { individuals })
    }

    /// Creates a population holding a single solution.
    pub fn from_solution(solution: S) -> Self {
        Self {
            individuals: vec![solution],
        }
    }

    /// Concatenates two populations into a new one of size `a.size() + b.size()`.
    pub fn merge(a: &Self, b: &Self) -> Self {
        let mut individuals = Vec::with_capacity(a.size() + b.size());
        individuals.extend_from_slice(&a.individuals);
        individuals.extend_from_slice(&b.individuals);
        Self { individuals }
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn individuals(&self) -> &[S] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.individuals.iter()
    }

    pub fn into_individuals(self) -> Vec<S> {
        self.individuals
    }

    /// Returns the individual with the highest fitness.
    ///
    /// Ties keep the earliest individual: a later one replaces the current best only
    /// if it is strictly better. Individuals with NaN fitness are skipped unless no
    /// other individual exists, in which case the first one is returned.
    pub fn best_individual(&self) -> &S {
        let mut scored = self.individuals.iter().filter(|s| !s.fitness().is_nan());
        let Some(mut best) = scored.next() else {
            return &self.individuals[0];
        };
        for candidate in scored {
            if candidate.fitness() - best.fitness() > 0.0 {
                best = candidate;
            }
        }
        best
    }

    /// Returns the arithmetic mean of all fitness values.
    pub fn mean_fitness(&self) -> f64 {
        let sum: f64 = self.individuals.iter().map(Solution::fitness).sum();
        sum / self.individuals.len() as f64
    }
}

impl<'a, S: Solution> IntoIterator for &'a Population<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
