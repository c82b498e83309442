//! Construction, neighborhood and recombination operators for [`TspSolution`].

use crate::{
    corrective::NeighborFunction,
    error::{OptimizationError, OptionExt, Result},
    ga::{CrossoverFunction, MutationRule},
    population::Population,
    problem::{InitialSolutionConstructor, Solution},
    rng::RandomNumberGenerator,
};

use super::{City, TravelingSalesmanProblem, TspSolution};

/// Builds uniformly random tours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialTspSolutionConstructor {
    problem: TravelingSalesmanProblem,
}

impl InitialTspSolutionConstructor {
    pub fn new(problem: TravelingSalesmanProblem) -> Self {
        Self { problem }
    }
}

impl InitialSolutionConstructor<TspSolution> for InitialTspSolutionConstructor {
    fn initial_solution(&mut self, rng: &mut RandomNumberGenerator) -> Result<TspSolution> {
        let mut cities = City::ALL.to_vec();
        rng.shuffle(&mut cities);
        TspSolution::new(self.problem, cities)
    }
}

/// Swaps two distinct, uniformly chosen positions of a tour.
///
/// Serves both as the neighbor function of the corrective procedures and as the
/// mutation rule of the genetic algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapMutation;

impl SwapMutation {
    fn swapped(current: &TspSolution, rng: &mut RandomNumberGenerator) -> Result<TspSolution> {
        let (first, second) = rng
            .distinct_pair(current.cities().len())
            .ok_or_else_optimization(|| {
                OptimizationError::IllegalSolution(
                    "A swap needs a tour of at least two cities".to_string(),
                )
            })?;

        let mut cities = current.cities().to_vec();
        cities.swap(first, second);
        TspSolution::new(*current.problem(), cities)
    }
}

impl NeighborFunction<TspSolution> for SwapMutation {
    fn neighbor(
        &mut self,
        current: &TspSolution,
        rng: &mut RandomNumberGenerator,
    ) -> Result<TspSolution> {
        Self::swapped(current, rng)
    }
}

impl MutationRule<TspSolution> for SwapMutation {
    fn mutate_individual(
        &mut self,
        individual: &TspSolution,
        rng: &mut RandomNumberGenerator,
    ) -> Result<TspSolution> {
        Self::swapped(individual, rng)
    }
}

/// Order-preserving block crossover.
///
/// Each child takes a block of half the tour length from one parent, starting at a
/// random position and wrapping around the end of the tour. The remaining cities are
/// appended in the order they appear in a second, distinct parent. One child is bred
/// per parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCrossover;

impl BlockCrossover {
    fn breed(
        first: &TspSolution,
        second: &TspSolution,
        rng: &mut RandomNumberGenerator,
    ) -> Result<TspSolution> {
        let length = first.cities().len();
        let block_size = length / 2;
        let start = rng.index(length);

        let mut taken = [false; City::COUNT];
        let mut cities = Vec::with_capacity(length);
        for offset in 0..block_size {
            let city = first.cities()[(start + offset) % length];
            taken[city.index()] = true;
            cities.push(city);
        }
        cities.extend(
            second
                .cities()
                .iter()
                .copied()
                .filter(|city| !taken[city.index()]),
        );

        TspSolution::new(*first.problem(), cities)
    }
}

impl CrossoverFunction<TspSolution> for BlockCrossover {
    fn crossover(
        &mut self,
        parents: &Population<TspSolution>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<TspSolution>> {
        let individuals = parents.individuals();
        let children = (0..parents.size())
            .map(|_| {
                let (first, second) =
                    rng.distinct_pair(individuals.len())
                        .ok_or_else_optimization(|| {
                            OptimizationError::Configuration(
                                "Block crossover needs at least two parents".to_string(),
                            )
                        })?;
                Self::breed(&individuals[first], &individuals[second], rng)
            })
            .collect::<Result<Vec<_>>>()?;
        Population::new(children)
    }
}
