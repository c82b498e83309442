use super::{
    BreakCondition, CrossoverFunction, GeneticAlgorithm, MutationFunction, SelectionFunction,
};
use crate::{
    error::{OptimizationError, Result},
    population::Population,
    problem::Solution,
    rng::RandomNumberGenerator,
};

/// Step-by-step construction of a [`GeneticAlgorithm`].
///
/// Every strategy is required. The random number generator defaults to one seeded
/// from system entropy.
pub struct GeneticAlgorithmBuilder<S, C, M, Sel, B>
where
    S: Solution,
    C: CrossoverFunction<S>,
    M: MutationFunction<S>,
    Sel: SelectionFunction<S>,
    B: BreakCondition<S>,
{
    initial_population: Option<Population<S>>,
    crossover_function: Option<C>,
    mutation_function: Option<M>,
    selection_function: Option<Sel>,
    break_condition: Option<B>,
    rng: Option<RandomNumberGenerator>,
}

impl<S, C, M, Sel, B> GeneticAlgorithmBuilder<S, C, M, Sel, B>
where
    S: Solution,
    C: CrossoverFunction<S>,
    M: MutationFunction<S>,
    Sel: SelectionFunction<S>,
    B: BreakCondition<S>,
{
    pub fn new() -> Self {
        Self {
            initial_population: None,
            crossover_function: None,
            mutation_function: None,
            selection_function: None,
            break_condition: None,
            rng: None,
        }
    }

    pub fn with_initial_population(mut self, initial_population: Population<S>) -> Self {
        self.initial_population = Some(initial_population);
        self
    }

    pub fn with_crossover_function(mut self, crossover_function: C) -> Self {
        self.crossover_function = Some(crossover_function);
        self
    }

    pub fn with_mutation_function(mut self, mutation_function: M) -> Self {
        self.mutation_function = Some(mutation_function);
        self
    }

    pub fn with_selection_function(mut self, selection_function: Sel) -> Self {
        self.selection_function = Some(selection_function);
        self
    }

    pub fn with_break_condition(mut self, break_condition: B) -> Self {
        self.break_condition = Some(break_condition);
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Seeds the engine's random number generator for a reproducible run.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(RandomNumberGenerator::from_seed(seed))
    }

    pub fn build(self) -> Result<GeneticAlgorithm<S, C, M, Sel, B>> {
        let initial_population = self.initial_population.ok_or_else(|| {
            OptimizationError::Configuration("Initial population not specified".to_string())
        })?;

        let crossover_function = self.crossover_function.ok_or_else(|| {
            OptimizationError::Configuration("Crossover function not specified".to_string())
        })?;

        let mutation_function = self.mutation_function.ok_or_else(|| {
            OptimizationError::Configuration("Mutation function not specified".to_string())
        })?;

        let selection_function = self.selection_function.ok_or_else(|| {
            OptimizationError::Configuration("Selection function not specified".to_string())
        })?;

        let break_condition = self.break_condition.ok_or_else(|| {
            OptimizationError::Configuration("Break condition not specified".to_string())
        })?;

        Ok(GeneticAlgorithm::with_rng(
            initial_population,
            crossover_function,
            mutation_function,
            selection_function,
            break_condition,
            self.rng.unwrap_or_default(),
        ))
    }
}

impl<S, C, M, Sel, B> Default for GeneticAlgorithmBuilder<S, C, M, Sel, B>
where
    S: Solution,
    C: CrossoverFunction<S>,
    M: MutationFunction<S>,
    Sel: SelectionFunction<S>,
    B: BreakCondition<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ga::{NoCrossover, NoMutation, ResultMode},
        problem::test_support::Point,
    };

    type Keep = fn(&Population<Point>, Population<Point>, &mut RandomNumberGenerator)
        -> Result<Population<Point>>;
    type Stop = fn(&Population<Point>, u64, &Point) -> bool;

    fn keep_children(
        _parents: &Population<Point>,
        children: Population<Point>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<Point>> {
        Ok(children)
    }

    fn after_five(_population: &Population<Point>, iteration: u64, _best: &Point) -> bool {
        iteration >= 5
    }

    #[test]
    fn test_builder_complete() {
        let mut ga = GeneticAlgorithmBuilder::new()
            .with_initial_population(Population::from_solution(Point::new(4.0)))
            .with_crossover_function(NoCrossover)
            .with_mutation_function(NoMutation)
            .with_selection_function(keep_children as Keep)
            .with_break_condition(after_five as Stop)
            .with_seed(3)
            .build()
            .unwrap();

        assert_eq!(ga.run(ResultMode::TotalBest).unwrap().value, 4.0);
        assert_eq!(ga.iterations(), 5);
    }

    #[test]
    fn test_builder_missing_parts() {
        let result = GeneticAlgorithmBuilder::<Point, NoCrossover, NoMutation, Keep, Stop>::new()
            .with_crossover_function(NoCrossover)
            .with_mutation_function(NoMutation)
            .with_selection_function(keep_children)
            .with_break_condition(after_five)
            .build();
        assert!(matches!(
            result,
            Err(OptimizationError::Configuration(message)) if message.contains("Initial population")
        ));

        let result = GeneticAlgorithmBuilder::<Point, NoCrossover, NoMutation, Keep, Stop>::new()
            .with_initial_population(Population::from_solution(Point::new(0.0)))
            .with_crossover_function(NoCrossover)
            .with_mutation_function(NoMutation)
            .with_selection_function(keep_children)
            .build();
        assert!(matches!(
            result,
            Err(OptimizationError::Configuration(message)) if message.contains("Break condition")
        ));
    }
}
