use tracing::{debug, info, trace};

use super::{
    BreakCondition, CrossoverFunction, IterationListener, MutationFunction, ResultMode,
    SelectionFunction,
};
use crate::{
    error::Result, fitness::FitnessComparator, population::Population, problem::Solution,
    rng::RandomNumberGenerator,
};

/// Handle returned by [`GeneticAlgorithm::add_listener`], used to remove the listener
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Runs generations of crossover, mutation and selection over a population.
///
/// The engine owns its strategies and a [`RandomNumberGenerator`], which it lends to
/// every strategy call. After every run, successful or not, the mutation and selection
/// functions are reset, so a stateful strategy such as
/// [`DynamicRateMutation`](super::DynamicRateMutation) starts each run from its
/// initial rate.
pub struct GeneticAlgorithm<S, C, M, Sel, B>
where
    S: Solution,
    C: CrossoverFunction<S>,
    M: MutationFunction<S>,
    Sel: SelectionFunction<S>,
    B: BreakCondition<S>,
{
    initial_population: Population<S>,
    crossover_function: C,
    mutation_function: M,
    selection_function: Sel,
    break_condition: B,
    comparator: FitnessComparator<S>,
    listeners: Vec<(ListenerId, Box<dyn IterationListener<S>>)>,
    next_listener_id: u64,
    rng: RandomNumberGenerator,
    iterations: u64,
}

impl<S, C, M, Sel, B> GeneticAlgorithm<S, C, M, Sel, B>
where
    S: Solution,
    C: CrossoverFunction<S>,
    M: MutationFunction<S>,
    Sel: SelectionFunction<S>,
    B: BreakCondition<S>,
{
    /// Creates a genetic algorithm drawing randomness from system entropy.
    ///
    /// A [`Population`] is never empty, so every initial population is valid here. Use
    /// [`GeneticAlgorithmBuilder`](super::GeneticAlgorithmBuilder) to get configuration
    /// errors for missing parts instead.
    pub fn new(
        initial_population: Population<S>,
        crossover_function: C,
        mutation_function: M,
        selection_function: Sel,
        break_condition: B,
    ) -> Self {
        Self::with_rng(
            initial_population,
            crossover_function,
            mutation_function,
            selection_function,
            break_condition,
            RandomNumberGenerator::new(),
        )
    }

    pub fn with_rng(
        initial_population: Population<S>,
        crossover_function: C,
        mutation_function: M,
        selection_function: Sel,
        break_condition: B,
        rng: RandomNumberGenerator,
    ) -> Self {
        Self {
            initial_population,
            crossover_function,
            mutation_function,
            selection_function,
            break_condition,
            comparator: FitnessComparator::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
            rng,
            iterations: 0,
        }
    }

    /// Runs the algorithm and returns the solution selected by `mode`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a strategy. The run stops at that point.
    pub fn run(&mut self, mode: ResultMode) -> Result<S> {
        let outcome = self.evolve();
        self.reset();
        let (population, total_best) = outcome?;
        Ok(match mode {
            ResultMode::TotalBest => total_best,
            ResultMode::BestOfLastPopulation => population.best_individual().clone(),
        })
    }

    /// Runs the algorithm and returns the final population.
    pub fn run_population(&mut self) -> Result<Population<S>> {
        let outcome = self.evolve();
        self.reset();
        let (population, _) = outcome?;
        Ok(population)
    }

    /// Restores the per-run state of the mutation and selection functions.
    pub fn reset(&mut self) {
        self.mutation_function.reset();
        self.selection_function.reset();
    }

    /// Number of generations completed by the most recent run.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn initial_population(&self) -> &Population<S> {
        &self.initial_population
    }

    pub fn mutation_function(&self) -> &M {
        &self.mutation_function
    }

    pub fn selection_function(&self) -> &Sel {
        &self.selection_function
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: IterationListener<S> + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a previously registered listener. Returns `false` if it was not found.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn evolve(&mut self) -> Result<(Population<S>, S)> {
        let mut population = self.initial_population.clone();
        let mut total_best = population.best_individual().clone();
        self.iterations = 0;

        info!(
            population_size = population.size(),
            best_fitness = total_best.fitness(),
            "Starting genetic algorithm"
        );
        self.notify_listeners(&population, &total_best, -1);

        let mut iteration: u64 = 0;
        while !self
            .break_condition
            .is_fulfilled(&population, iteration, &total_best)
        {
            let children = self
                .crossover_function
                .crossover(&population, &mut self.rng)?;
            let children = self.mutation_function.mutate(children, &mut self.rng)?;
            population = self
                .selection_function
                .select(&population, children, &mut self.rng)?;

            let generation_best = population.best_individual();
            let replaces_nan =
                total_best.fitness().is_nan() && !generation_best.fitness().is_nan();
            if replaces_nan || self.comparator.is_better(generation_best, &total_best) {
                debug!(
                    iteration,
                    fitness = generation_best.fitness(),
                    "New total best solution"
                );
                total_best = generation_best.clone();
            }
            trace!(
                iteration,
                population_size = population.size(),
                generation_best = generation_best.fitness(),
                "Generation completed"
            );

            self.notify_listeners(&population, &total_best, iteration as i64);
            iteration += 1;
            self.iterations = iteration;
        }

        info!(
            iterations = iteration,
            best_fitness = total_best.fitness(),
            best = %total_best.representation(),
            "Genetic algorithm finished"
        );
        Ok((population, total_best))
    }

    fn notify_listeners(&mut self, population: &Population<S>, best: &S, iteration: i64) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.update(population, best, iteration);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        corrective::ThresholdSinkingFunction,
        error::OptimizationError,
        ga::{NoCrossover, NoMutation, ThresholdAcceptingSelection},
        problem::test_support::Point,
    };

    type Step = fn(&Population<Point>, Population<Point>, &mut RandomNumberGenerator)
        -> Result<Population<Point>>;

    fn shift_by_one(
        _parents: &Population<Point>,
        children: Population<Point>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<Point>> {
        Population::new(children.iter().map(|p| Point::new(p.value + 1.0)).collect())
    }

    fn random_walk(
        _parents: &Population<Point>,
        children: Population<Point>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<Point>> {
        Population::new(
            children
                .iter()
                .map(|p| Point::new(p.value + rng.uniform() - 0.5))
                .collect(),
        )
    }

    fn engine(
        selection: Step,
        generations: u64,
    ) -> GeneticAlgorithm<
        Point,
        NoCrossover,
        NoMutation,
        Step,
        impl FnMut(&Population<Point>, u64, &Point) -> bool,
    > {
        GeneticAlgorithm::with_rng(
            Population::new(vec![Point::new(0.0), Point::new(-1.0)]).unwrap(),
            NoCrossover,
            NoMutation,
            selection,
            move |_: &Population<Point>, iteration: u64, _: &Point| iteration >= generations,
            RandomNumberGenerator::from_seed(11),
        )
    }

    #[test]
    fn test_runs_until_break_condition() {
        let mut ga = engine(shift_by_one, 10);

        let best = ga.run(ResultMode::TotalBest).unwrap();
        assert_eq!(best.value, 10.0);
        assert_eq!(ga.iterations(), 10);

        let last = ga.run(ResultMode::BestOfLastPopulation).unwrap();
        assert_eq!(last.value, 10.0);

        let population = ga.run_population().unwrap();
        let values: Vec<f64> = population.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 9.0]);
    }

    #[test]
    fn test_total_best_is_monotone() {
        let mut ga = engine(random_walk, 500);
        let history = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&history);
        ga.add_listener(move |_: &Population<Point>, best: &Point, _: i64| {
            recorded.borrow_mut().push(best.value);
        });

        let total_best = ga.run(ResultMode::TotalBest).unwrap();

        let history = history.borrow();
        assert_eq!(history.len(), 501);
        assert!(history.windows(2).all(|pair| pair[1] >= pair[0]));
        assert_eq!(*history.last().unwrap(), total_best.value);
    }

    #[test]
    fn test_total_best_dominates_last_population() {
        let mut ga = engine(random_walk, 300);
        let last_population = ga.run_population().unwrap();

        let mut ga = engine(random_walk, 300);
        let total_best = ga.run(ResultMode::TotalBest).unwrap();

        assert!(total_best.value >= last_population.best_individual().value);
    }

    #[test]
    fn test_listeners_notified_in_order() {
        let mut ga = engine(shift_by_one, 3);
        let events = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&events);
        ga.add_listener(move |_: &Population<Point>, _: &Point, iteration: i64| {
            first.borrow_mut().push(("first", iteration));
        });
        let second = Rc::clone(&events);
        let second_id = ga.add_listener(move |_: &Population<Point>, _: &Point, iteration: i64| {
            second.borrow_mut().push(("second", iteration));
        });

        ga.run(ResultMode::TotalBest).unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                ("first", -1),
                ("second", -1),
                ("first", 0),
                ("second", 0),
                ("first", 1),
                ("second", 1),
                ("first", 2),
                ("second", 2),
            ]
        );

        assert!(ga.remove_listener(second_id));
        assert!(!ga.remove_listener(second_id));
        events.borrow_mut().clear();

        ga.run(ResultMode::TotalBest).unwrap();
        assert!(events.borrow().iter().all(|(name, _)| *name == "first"));
        assert_eq!(events.borrow().len(), 4);
    }

    #[test]
    fn test_immediate_break_returns_initial_best() {
        let mut ga = engine(shift_by_one, 0);
        let best = ga.run(ResultMode::TotalBest).unwrap();
        assert_eq!(best.value, 0.0);
        assert_eq!(ga.iterations(), 0);
    }

    #[test]
    fn test_strategy_error_aborts_run() {
        let failing: Step = |_, _, _| Err(OptimizationError::EmptyPopulation);
        let mut ga = engine(failing, 10);
        let result = ga.run(ResultMode::TotalBest);
        assert!(result.is_err());
        assert_eq!(ga.iterations(), 0);
    }

    #[test]
    fn test_selection_is_reset_after_every_run() {
        let sinking = ThresholdSinkingFunction::new(1.0, 0.5, 1).unwrap();
        let mut calls = 0;
        let mut ga = GeneticAlgorithm::with_rng(
            Population::from_solution(Point::new(0.0)),
            NoCrossover,
            move |children: Population<Point>, _rng: &mut RandomNumberGenerator| {
                let step = if calls % 2 == 0 { 2.0 } else { 0.75 };
                calls += 1;
                Population::new(children.iter().map(|p| Point::new(p.value - step)).collect())
            },
            ThresholdAcceptingSelection::new(sinking),
            |_: &Population<Point>, iteration: u64, _: &Point| iteration >= 2,
            RandomNumberGenerator::from_seed(3),
        );

        // Rejecting the 2.0 drop sinks the threshold to 0.5, so the 0.75 drop is
        // rejected as well.
        for _ in 0..2 {
            let last = ga.run(ResultMode::BestOfLastPopulation).unwrap();
            assert_eq!(last.value, 0.0);
            assert_eq!(ga.selection_function().threshold(), 1.0);
        }
    }

    #[test]
    fn test_selection_is_reset_after_failed_run() {
        let sinking = ThresholdSinkingFunction::new(1.0, 0.5, 1).unwrap();
        let mut calls = 0;
        let mut ga = GeneticAlgorithm::with_rng(
            Population::from_solution(Point::new(0.0)),
            NoCrossover,
            move |children: Population<Point>, _rng: &mut RandomNumberGenerator| {
                calls += 1;
                if calls > 1 {
                    return Err(OptimizationError::EmptyPopulation);
                }
                Population::new(children.iter().map(|p| Point::new(p.value - 2.0)).collect())
            },
            ThresholdAcceptingSelection::new(sinking),
            |_: &Population<Point>, iteration: u64, _: &Point| iteration >= 5,
            RandomNumberGenerator::from_seed(3),
        );

        assert!(ga.run(ResultMode::TotalBest).is_err());
        assert_eq!(ga.iterations(), 1);
        assert_eq!(ga.selection_function().threshold(), 1.0);
    }

    #[test]
    fn test_nan_total_best_is_replaced() {
        let replace: Step = |_, _, _| Ok(Population::from_solution(Point::new(1.0)));
        let mut ga = GeneticAlgorithm::with_rng(
            Population::from_solution(Point::new(f64::NAN)),
            NoCrossover,
            NoMutation,
            replace,
            |_: &Population<Point>, iteration: u64, _: &Point| iteration >= 1,
            RandomNumberGenerator::from_seed(3),
        );

        let best = ga.run(ResultMode::TotalBest).unwrap();
        assert_eq!(best.value, 1.0);
    }
}
