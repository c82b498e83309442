use std::marker::PhantomData;

use tracing::debug;

use super::{
    bounded_rate, mutate_with_rate, validate_iterations_until_change, validate_rate,
    MutationFunction, MutationRule,
};
use crate::{error::Result, population::Population, problem::Solution, rng::RandomNumberGenerator};

/// Maps the current mutation rate to the next one.
pub trait RateChangeRule {
    fn change_rate(&mut self, rate: f64) -> f64;
}

impl<F> RateChangeRule for F
where
    F: FnMut(f64) -> f64,
{
    fn change_rate(&mut self, rate: f64) -> f64 {
        self(rate)
    }
}

/// Mutation whose rate is recomputed on a fixed schedule.
///
/// Each call first advances an internal counter. Once the counter has reached
/// `iterations_until_change`, it resets to zero and the rate is replaced by
/// `rate_change_rule(rate)`. The new rate is clamped to `(0, 1]`. Resetting restores
/// the initial rate and restarts the schedule.
#[derive(Debug, Clone)]
pub struct DynamicRateMutation<S, R, C> {
    initial_rate: f64,
    rate: f64,
    rule: R,
    rate_change_rule: C,
    iterations_until_change: u64,
    iteration: u64,
    _marker: PhantomData<fn(&S)>,
}

impl<S, R, C> DynamicRateMutation<S, R, C>
where
    S: Solution,
    R: MutationRule<S>,
    C: RateChangeRule,
{
    /// # Errors
    ///
    /// Returns a configuration error unless `initial_rate` is in `(0, 1]` and
    /// `iterations_until_change` is positive.
    pub fn new(
        initial_rate: f64,
        iterations_until_change: u64,
        rule: R,
        rate_change_rule: C,
    ) -> Result<Self> {
        validate_rate(initial_rate)?;
        validate_iterations_until_change(iterations_until_change)?;
        Ok(Self {
            initial_rate,
            rate: initial_rate,
            rule,
            rate_change_rule,
            iterations_until_change,
            iteration: 0,
            _marker: PhantomData,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl<S, R, C> MutationFunction<S> for DynamicRateMutation<S, R, C>
where
    S: Solution,
    R: MutationRule<S>,
    C: RateChangeRule,
{
    fn mutate(
        &mut self,
        population: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        if self.iteration >= self.iterations_until_change {
            self.iteration = 0;
            self.rate = bounded_rate(self.rate_change_rule.change_rate(self.rate))?;
            debug!(rate = self.rate, "Mutation rate changed");
        } else {
            self.iteration += 1;
        }
        mutate_with_rate(population, self.rate, &mut self.rule, rng)
    }

    fn reset(&mut self) {
        self.rate = self.initial_rate;
        self.iteration = 0;
    }
}
