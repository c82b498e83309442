use super::CrossoverFunction;
use crate::{error::Result, population::Population, problem::Solution, rng::RandomNumberGenerator};

/// Crossover that returns the parent population unchanged as the children.
///
/// Used for single-individual strategies where mutation alone produces variation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCrossover;

impl<S: Solution> CrossoverFunction<S> for NoCrossover {
    fn crossover(
        &mut self,
        parents: &Population<S>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<S>> {
        Ok(parents.clone())
    }
}
