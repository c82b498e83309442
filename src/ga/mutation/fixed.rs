use std::marker::PhantomData;

use super::{mutate_with_rate, validate_rate, MutationFunction, MutationRule};
use crate::{error::Result, population::Population, problem::Solution, rng::RandomNumberGenerator};

/// Mutates each child with a constant probability.
#[derive(Debug, Clone)]
pub struct FixedRateMutation<S, R> {
    rate: f64,
    rule: R,
    _marker: PhantomData<fn(&S)>,
}

impl<S, R> FixedRateMutation<S, R>
where
    S: Solution,
    R: MutationRule<S>,
{
    /// # Errors
    ///
    /// Returns a configuration error unless `rate` is in `(0, 1]`.
    pub fn new(rate: f64, rule: R) -> Result<Self> {
        validate_rate(rate)?;
        Ok(Self {
            rate,
            rule,
            _marker: PhantomData,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl<S, R> MutationFunction<S> for FixedRateMutation<S, R>
where
    S: Solution,
    R: MutationRule<S>,
{
    fn mutate(
        &mut self,
        population: Population<S>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        mutate_with_rate(population, self.rate, &mut self.rule, rng)
    }
}
