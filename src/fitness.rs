//! # FitnessComparator
//!
//! Total ordering over fitness as plain real-number comparison. There is no branching
//! on [`ProblemType`](crate::problem::ProblemType): minimization problems are expected
//! to report cost as negative fitness.
//!
//! A positive difference means "better". Every predicate is derived from the signed
//! difference, so `is_better(a, b)` holds exactly when `fitness_difference(a, b) > 0`.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::problem::Solution;

/// Stateless fitness comparison for one solution type.
pub struct FitnessComparator<S> {
    _marker: PhantomData<fn(&S)>,
}

impl<S: Solution> FitnessComparator<S> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Returns `a.fitness() - b.fitness()`.
    pub fn fitness_difference(&self, a: &S, b: &S) -> f64 {
        a.fitness() - b.fitness()
    }

    /// Compares two solutions by their fitness difference.
    pub fn compare_solutions(&self, a: &S, b: &S) -> Ordering {
        Self::ordering_of(self.fitness_difference(a, b))
    }

    /// Compares two raw fitness values.
    pub fn compare_fitness(&self, fitness_a: f64, fitness_b: f64) -> Ordering {
        Self::ordering_of(fitness_a - fitness_b)
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(&self, a: &S, b: &S) -> bool {
        self.compare_solutions(a, b) == Ordering::Greater
    }

    /// Returns `true` if `a` is at least as good as `b`.
    pub fn is_better_or_equal(&self, a: &S, b: &S) -> bool {
        self.compare_solutions(a, b) != Ordering::Less
    }

    /// Returns `true` if `fitness_a` is strictly better than `fitness_b`.
    pub fn is_fitness_better(&self, fitness_a: f64, fitness_b: f64) -> bool {
        self.compare_fitness(fitness_a, fitness_b) == Ordering::Greater
    }

    /// Returns `true` if `fitness_a` is at least as good as `fitness_b`.
    pub fn is_fitness_better_or_equal(&self, fitness_a: f64, fitness_b: f64) -> bool {
        self.compare_fitness(fitness_a, fitness_b) != Ordering::Less
    }

    // NaN differences order as Less: a NaN candidate never counts as better or equal.
    fn ordering_of(difference: f64) -> Ordering {
        if difference == 0.0 {
            Ordering::Equal
        } else if difference > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl<S: Solution> Default for FitnessComparator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for FitnessComparator<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for FitnessComparator<S> {}

impl<S> fmt::Debug for FitnessComparator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessComparator").finish()
    }
}
