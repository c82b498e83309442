//! # Mutation
//!
//! A [`MutationFunction`] transforms a whole child population. The rate-based
//! functions in this module apply a per-individual [`MutationRule`] to each child
//! with probability equal to their current mutation rate:
//!
//! - [`FixedRateMutation`] keeps its rate constant.
//! - [`DynamicRateMutation`] changes its rate on a fixed schedule.
//! - [`AdaptiveRateMutation`] changes its rate based on how often recent generations
//!   improved.
//!
//! Rates always stay in `(0, 1]`.

pub mod adaptive;
pub mod dynamic;
pub mod fixed;

use crate::{
    error::{OptimizationError, Result},
    population::Population,
    problem::Solution,
    rng::RandomNumberGenerator,
};

pub use adaptive::{
    success_rate, AdaptiveRateChangeRule, AdaptiveRateMutation, PopulationMeanSuccess,
    RosenbergRateChangeRule, RosenbergSuccessValidator, SuccessFunction, SuccessValidator,
};
pub use dynamic::{DynamicRateMutation, RateChangeRule};
pub use fixed::FixedRateMutation;

/// Transforms a child population into a (possibly) mutated one of the same size.
pub trait MutationFunction<S: Solution> {
    fn mutate(
        &mut self,
        population: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>>;

    /// Restores the initial rate and history. Called after every run.
    fn reset(&mut self) {}
}

impl<S, F> MutationFunction<S> for F
where
    S: Solution,
    F: FnMut(Population<S>, &mut RandomNumberGenerator) -> Result<Population<S>>,
{
    fn mutate(
        &mut self,
        population: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        self(population, rng)
    }
}

/// Builds a mutated copy of a single individual.
pub trait MutationRule<S: Solution> {
    fn mutate_individual(&mut self, individual: &S, rng: &mut RandomNumberGenerator)
        -> Result<S>;
}

impl<S, F> MutationRule<S> for F
where
    S: Solution,
    F: FnMut(&S, &mut RandomNumberGenerator) -> Result<S>,
{
    fn mutate_individual(
        &mut self,
        individual: &S,
        rng: &mut RandomNumberGenerator,
    ) -> Result<S> {
        self(individual, rng)
    }
}

/// Mutation that returns the population unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMutation;

impl<S: Solution> MutationFunction<S> for NoMutation {
    fn mutate(
        &mut self,
        population: Population<S>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        Ok(population)
    }
}

pub(crate) fn validate_rate(rate: f64) -> Result<()> {
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(OptimizationError::Configuration(format!(
            "Mutation rate must be in (0, 1], got {}",
            rate
        )));
    }
    Ok(())
}

pub(crate) fn validate_iterations_until_change(iterations_until_change: u64) -> Result<()> {
    if iterations_until_change == 0 {
        return Err(OptimizationError::Configuration(
            "Iterations until rate change must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Clamps a recomputed rate back into `(0, 1]`.
pub(crate) fn bounded_rate(rate: f64) -> Result<f64> {
    if rate.is_nan() {
        return Err(OptimizationError::InvalidNumericValue(
            "Rate change rule produced NaN".to_string(),
        ));
    }
    Ok(rate.clamp(f64::MIN_POSITIVE, 1.0))
}

/// Applies `rule` to each individual with probability `rate`.
pub(crate) fn mutate_with_rate<S, R>(
    population: Population<S>,
    rate: f64,
    rule: &mut R,
    rng: &mut RandomNumberGenerator,
) -> Result<Population<S>>
where
    S: Solution,
    R: MutationRule<S>,
{
    let individuals = population
        .into_individuals()
        .into_iter()
        .map(|individual| {
            if rng.uniform() < rate {
                rule.mutate_individual(&individual, rng)
            } else {
                Ok(individual)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Population::new(individuals)
}
