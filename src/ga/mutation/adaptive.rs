//! Success-driven mutation rate control.
//!
//! [`AdaptiveRateMutation`] records the child populations it is handed. Every
//! `iterations_until_change` calls it measures the share of successful transitions in
//! that history, lets a [`SuccessValidator`] judge the share against a threshold, and
//! lets an [`AdaptiveRateChangeRule`] turn the verdict into a new rate.
//!
//! The defaults implement Rechenberg's one-fifth success rule: widen the search when
//! more than a fifth of the generations improved, narrow it when fewer did.

use std::cmp::Ordering;
use std::marker::PhantomData;

use tracing::debug;

use super::{
    bounded_rate, mutate_with_rate, validate_iterations_until_change, validate_rate,
    MutationFunction, MutationRule,
};
use crate::{
    error::{OptimizationError, Result},
    population::Population,
    problem::Solution,
    rng::RandomNumberGenerator,
};

/// Decides whether a generation transition counts as a success.
pub trait SuccessFunction<S: Solution> {
    fn was_successful_improvement(&self, parents: &Population<S>, children: &Population<S>)
        -> bool;
}

/// A transition succeeds when the mean fitness does not drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationMeanSuccess;

impl<S: Solution> SuccessFunction<S> for PopulationMeanSuccess {
    fn was_successful_improvement(
        &self,
        parents: &Population<S>,
        children: &Population<S>,
    ) -> bool {
        children.mean_fitness() >= parents.mean_fitness()
    }
}

/// Returns the share of successful transitions between consecutive generations.
///
/// # Errors
///
/// Returns a configuration error if fewer than two generations are given.
pub fn success_rate<S, F>(generations: &[Population<S>], success_function: &F) -> Result<f64>
where
    S: Solution,
    F: SuccessFunction<S> + ?Sized,
{
    if generations.len() < 2 {
        return Err(OptimizationError::Configuration(
            "Success rate needs at least two generations".to_string(),
        ));
    }
    let successes = generations
        .windows(2)
        .filter(|pair| success_function.was_successful_improvement(&pair[0], &pair[1]))
        .count();
    Ok(successes as f64 / (generations.len() - 1) as f64)
}

/// Judges a success rate against a threshold.
pub trait SuccessValidator {
    /// `Greater` widens the search, `Less` narrows it, `Equal` keeps the rate.
    fn validate(&self, success_rate: f64) -> Ordering;
}

/// Compares the success rate to a threshold, `0.2` by default.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosenbergSuccessValidator {
    threshold: f64,
}

impl RosenbergSuccessValidator {
    pub const DEFAULT_THRESHOLD: f64 = 0.2;

    /// # Errors
    ///
    /// Returns a configuration error unless `threshold` is in `(0, 1)`.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(OptimizationError::Configuration(format!(
                "Success threshold must be in (0, 1), got {}",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for RosenbergSuccessValidator {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl SuccessValidator for RosenbergSuccessValidator {
    fn validate(&self, success_rate: f64) -> Ordering {
        if success_rate > self.threshold {
            Ordering::Greater
        } else if success_rate == self.threshold {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    }
}

/// Turns a validator verdict into a new mutation rate.
pub trait AdaptiveRateChangeRule {
    fn change_rate(&self, rate: f64, verdict: Ordering) -> f64;
}

/// Doubles the rate on `Greater`, halves it on `Less`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosenbergRateChangeRule;

impl AdaptiveRateChangeRule for RosenbergRateChangeRule {
    fn change_rate(&self, rate: f64, verdict: Ordering) -> f64 {
        match verdict {
            Ordering::Greater => rate * 2.0,
            Ordering::Less => rate / 2.0,
            Ordering::Equal => rate,
        }
    }
}

/// Mutation whose rate follows the recent success of the search.
#[derive(Debug, Clone)]
pub struct AdaptiveRateMutation<
    S: Solution,
    R,
    F = PopulationMeanSuccess,
    V = RosenbergSuccessValidator,
    A = RosenbergRateChangeRule,
> {
    initial_rate: f64,
    rate: f64,
    rule: R,
    success_function: F,
    success_validator: V,
    rate_change_rule: A,
    iterations_until_change: u64,
    iteration: u64,
    initial_population: Population<S>,
    generations: Vec<Population<S>>,
    _marker: PhantomData<fn(&S)>,
}

impl<S, R> AdaptiveRateMutation<S, R>
where
    S: Solution,
    R: MutationRule<S>,
{
    /// Creates an adaptive mutation driven by the one-fifth success rule.
    pub fn rosenberg(
        initial_rate: f64,
        iterations_until_change: u64,
        rule: R,
        initial_population: Population<S>,
    ) -> Result<Self> {
        Self::new(
            initial_rate,
            iterations_until_change,
            rule,
            PopulationMeanSuccess,
            RosenbergSuccessValidator::default(),
            RosenbergRateChangeRule,
            initial_population,
        )
    }
}

impl<S, R, F, V, A> AdaptiveRateMutation<S, R, F, V, A>
where
    S: Solution,
    R: MutationRule<S>,
    F: SuccessFunction<S>,
    V: SuccessValidator,
    A: AdaptiveRateChangeRule,
{
    /// The history starts with `initial_population`, so the first rate change compares
    /// it against the first `iterations_until_change` child populations.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless `initial_rate` is in `(0, 1]` and
    /// `iterations_until_change` is positive.
    pub fn new(
        initial_rate: f64,
        iterations_until_change: u64,
        rule: R,
        success_function: F,
        success_validator: V,
        rate_change_rule: A,
        initial_population: Population<S>,
    ) -> Result<Self> {
        validate_rate(initial_rate)?;
        validate_iterations_until_change(iterations_until_change)?;
        Ok(Self {
            initial_rate,
            rate: initial_rate,
            rule,
            success_function,
            success_validator,
            rate_change_rule,
            iterations_until_change,
            iteration: 0,
            generations: vec![initial_population.clone()],
            initial_population,
            _marker: PhantomData,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn adapt_rate(&mut self) -> Result<()> {
        let success = success_rate(&self.generations, &self.success_function)?;
        let verdict = self.success_validator.validate(success);
        self.rate = bounded_rate(self.rate_change_rule.change_rate(self.rate, verdict))?;
        debug!(
            success_rate = success,
            ?verdict,
            rate = self.rate,
            "Adaptive mutation rate changed"
        );
        Ok(())
    }
}

impl<S, R, F, V, A> MutationFunction<S> for AdaptiveRateMutation<S, R, F, V, A>
where
    S: Solution,
    R: MutationRule<S>,
    F: SuccessFunction<S>,
    V: SuccessValidator,
    A: AdaptiveRateChangeRule,
{
    fn mutate(
        &mut self,
        population: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        if self.iteration >= self.iterations_until_change {
            self.adapt_rate()?;
            self.generations.clear();
            self.iteration = 0;
        } else {
            self.iteration += 1;
        }
        self.generations.push(population.clone());
        mutate_with_rate(population, self.rate, &mut self.rule, rng)
    }

    fn reset(&mut self) {
        self.rate = self.initial_rate;
        self.iteration = 0;
        self.generations = vec![self.initial_population.clone()];
    }
}
