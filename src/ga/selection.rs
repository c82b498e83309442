//! # Selection
//!
//! - [`RouletteWheelSelection`] draws a new generation with replacement, each draw
//!   picking an individual with probability proportional to its weight.
//! - [`ThresholdAcceptingSelection`] turns a single-individual genetic algorithm into
//!   threshold accepting: the child replaces the parent unless it is worse by more
//!   than a sinking threshold.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use super::SelectionFunction;
use crate::{
    corrective::ThresholdSinkingFunction,
    error::{OptimizationError, Result},
    fitness::FitnessComparator,
    population::Population,
    problem::Solution,
    rng::RandomNumberGenerator,
};

fn fitness_weight<S: Solution>(individual: &S) -> f64 {
    individual.fitness()
}

/// Fitness-proportional selection.
///
/// The selection probability of an individual is its weight divided by the sum of all
/// weights in the pool. By default the weight is the fitness itself, which only suits
/// problems with non-negative fitness. Problems that encode cost as negative fitness
/// supply their own non-negative weight through [`RouletteWheelSelection::with_weight`].
pub struct RouletteWheelSelection<S, W = fn(&S) -> f64> {
    allow_parent_selection: bool,
    target_population_size: usize,
    weight: W,
    _marker: PhantomData<fn(&S)>,
}

impl<S: Solution> RouletteWheelSelection<S> {
    /// Creates a roulette wheel weighted by fitness.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `target_population_size` is zero.
    pub fn new(allow_parent_selection: bool, target_population_size: usize) -> Result<Self> {
        Self::with_weight(
            allow_parent_selection,
            target_population_size,
            fitness_weight::<S> as fn(&S) -> f64,
        )
    }
}

impl<S, W> RouletteWheelSelection<S, W>
where
    S: Solution,
    W: Fn(&S) -> f64,
{
    /// Creates a roulette wheel weighted by `weight`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `target_population_size` is zero.
    pub fn with_weight(
        allow_parent_selection: bool,
        target_population_size: usize,
        weight: W,
    ) -> Result<Self> {
        if target_population_size == 0 {
            return Err(OptimizationError::Configuration(
                "Target population size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            allow_parent_selection,
            target_population_size,
            weight,
            _marker: PhantomData,
        })
    }

    pub fn target_population_size(&self) -> usize {
        self.target_population_size
    }

    /// Calculates cumulative selection bounds for the pool.
    ///
    /// The bound of the last positive weight, and every bound after it, is forced to
    /// exactly `1.0` so rounding never leaves a gap at the top of the wheel.
    fn calculate_probabilities(&self, pool: &[S]) -> Result<Vec<f64>> {
        let weights: Vec<f64> = pool.iter().map(|individual| (self.weight)(individual)).collect();

        if let Some(bad) = weights.iter().find(|w| w.is_nan() || **w < 0.0) {
            return Err(OptimizationError::InvalidNumericValue(format!(
                "Roulette wheel weights must be non-negative numbers, got {}",
                bad
            )));
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(OptimizationError::InvalidNumericValue(format!(
                "Roulette wheel weights must have a positive finite sum, got {}",
                total
            )));
        }

        let mut cumulative = 0.0;
        let mut probabilities: Vec<f64> = weights
            .iter()
            .map(|w| {
                cumulative += w / total;
                cumulative
            })
            .collect();

        // Trailing zero weights share the top bound and stay unreachable.
        let last_weighted = weights.iter().rposition(|w| *w > 0.0).unwrap_or(0);
        for bound in &mut probabilities[last_weighted..] {
            *bound = 1.0;
        }

        Ok(probabilities)
    }

    /// Returns the first index whose partition `[previous bound, bound)` contains `r`.
    ///
    /// Zero-width partitions belong to zero weights and are never picked.
    fn select_individual(probabilities: &[f64], r: f64) -> usize {
        let mut lower = 0.0;
        for (index, &bound) in probabilities.iter().enumerate() {
            if bound > lower && r < bound {
                return index;
            }
            lower = bound;
        }
        probabilities.len() - 1
    }
}

impl<S, W> SelectionFunction<S> for RouletteWheelSelection<S, W>
where
    S: Solution,
    W: Fn(&S) -> f64,
{
    fn select(
        &mut self,
        parents: &Population<S>,
        children: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        let pool = if self.allow_parent_selection {
            Population::merge(parents, &children)
        } else {
            children
        };

        let probabilities = self.calculate_probabilities(pool.individuals())?;

        let selected = (0..self.target_population_size)
            .map(|_| {
                let index = Self::select_individual(&probabilities, rng.uniform());
                pool.individuals()[index].clone()
            })
            .collect();

        Population::new(selected)
    }
}

impl<S, W> fmt::Debug for RouletteWheelSelection<S, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouletteWheelSelection")
            .field("allow_parent_selection", &self.allow_parent_selection)
            .field("target_population_size", &self.target_population_size)
            .finish()
    }
}

/// Threshold accepting expressed as a 1+1 genetic algorithm selection step.
///
/// Both populations must hold exactly one individual. The child is kept if
/// `parent.fitness() - child.fitness() - threshold <= 0`; otherwise the parent is kept
/// and the threshold sinking function is told about the worse iteration.
#[derive(Debug, Clone)]
pub struct ThresholdAcceptingSelection<S> {
    sinking_function: ThresholdSinkingFunction,
    comparator: FitnessComparator<S>,
}

impl<S: Solution> ThresholdAcceptingSelection<S> {
    pub fn new(sinking_function: ThresholdSinkingFunction) -> Self {
        Self {
            sinking_function,
            comparator: FitnessComparator::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.sinking_function.threshold()
    }
}

impl<S: Solution> SelectionFunction<S> for ThresholdAcceptingSelection<S> {
    fn select(
        &mut self,
        parents: &Population<S>,
        children: Population<S>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        if parents.size() != 1 || children.size() != 1 {
            return Err(OptimizationError::Configuration(format!(
                "Threshold accepting selection needs exactly one parent and one child, \
                 got {} and {}",
                parents.size(),
                children.size()
            )));
        }

        let parent = &parents.individuals()[0];
        let child = &children.individuals()[0];
        let difference = self.comparator.fitness_difference(parent, child);

        if difference - self.sinking_function.threshold() <= 0.0 {
            Ok(children)
        } else {
            trace!(difference, threshold = self.threshold(), "Child rejected");
            self.sinking_function.notify_about_worse_iteration();
            Ok(parents.clone())
        }
    }

    fn reset(&mut self) {
        self.sinking_function.reset();
    }
}
