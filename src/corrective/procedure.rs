use tracing::{debug, info, trace};

use super::{
    AcceptanceFunction, AnnealingAcceptance, AnnealingFunction, BreakCondition,
    NeighborFunction, ResultMode, TemperatureBreakCondition, ThresholdAcceptance,
    ThresholdBreakCondition, ThresholdSinkingFunction,
};
use crate::{
    error::Result,
    fitness::FitnessComparator,
    problem::{InitialSolutionConstructor, Solution},
    rng::RandomNumberGenerator,
};

/// Threshold accepting procedure with a threshold-based stop of type `T`.
pub type ThresholdAccepting<S, N, B, T = fn(f64) -> bool> =
    CorrectiveProcedure<S, N, ThresholdAcceptance<T>, B>;

/// Simulated annealing procedure with a temperature-based stop of type `T`.
pub type SimulatedAnnealing<S, N, B, T = fn(f64) -> bool> =
    CorrectiveProcedure<S, N, AnnealingAcceptance<T>, B>;

/// Single-solution local search driven by an acceptance rule.
///
/// The initial solution is constructed once, when the procedure is created, and every
/// run starts from it. A run loops until the break condition or the acceptance rule's
/// own stop signal holds:
///
/// 1. build a neighbor of the current solution,
/// 2. ask the acceptance rule whether it replaces the current solution,
/// 3. in [`ResultMode::TotalBest`], remember the neighbor if it beats the best so far.
///
/// After the run, accepted or not, the acceptance rule is reset.
pub struct CorrectiveProcedure<S, N, A, B>
where
    S: Solution,
    N: NeighborFunction<S>,
    A: AcceptanceFunction<S>,
    B: BreakCondition<S>,
{
    initial_solution: S,
    neighbor_function: N,
    acceptance_function: A,
    break_condition: B,
    comparator: FitnessComparator<S>,
    rng: RandomNumberGenerator,
    total_iterations: u64,
    accepted_iterations: u64,
}

impl<S, N, A, B> CorrectiveProcedure<S, N, A, B>
where
    S: Solution,
    N: NeighborFunction<S>,
    A: AcceptanceFunction<S>,
    B: BreakCondition<S>,
{
    /// Creates a procedure and constructs its initial solution.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error if no initial solution can be built.
    pub fn new<C>(
        mut constructor: C,
        neighbor_function: N,
        acceptance_function: A,
        break_condition: B,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self>
    where
        C: InitialSolutionConstructor<S>,
    {
        let initial_solution = constructor.initial_solution(&mut rng)?;
        Ok(Self {
            initial_solution,
            neighbor_function,
            acceptance_function,
            break_condition,
            comparator: FitnessComparator::new(),
            rng,
            total_iterations: 0,
            accepted_iterations: 0,
        })
    }

    /// Runs the search and returns the solution selected by `mode`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the neighbor function. The acceptance rule is
    /// reset in that case too.
    pub fn run(&mut self, mode: ResultMode) -> Result<S> {
        let outcome = self.search(mode);
        self.reset();
        let (current, best) = outcome?;
        Ok(match mode {
            ResultMode::TotalBest => best,
            ResultMode::Last => current,
        })
    }

    /// Restores the acceptance rule to its initial state.
    pub fn reset(&mut self) {
        self.acceptance_function.reset();
    }

    /// Number of iterations of the most recent run.
    pub fn number_of_iterations(&self) -> u64 {
        self.total_iterations
    }

    /// Number of accepted neighbors in the most recent run.
    pub fn accepted_iterations(&self) -> u64 {
        self.accepted_iterations
    }

    pub fn initial_solution(&self) -> &S {
        &self.initial_solution
    }

    pub fn acceptance_function(&self) -> &A {
        &self.acceptance_function
    }

    fn search(&mut self, mode: ResultMode) -> Result<(S, S)> {
        self.total_iterations = 0;
        self.accepted_iterations = 0;
        let mut current = self.initial_solution.clone();
        let mut best = current.clone();

        info!(
            initial_fitness = current.fitness(),
            ?mode,
            "Starting corrective procedure"
        );

        while !(self.break_condition.is_fulfilled(
            &current,
            self.total_iterations,
            self.accepted_iterations,
        ) || self.acceptance_function.should_stop())
        {
            let neighbor = self.neighbor_function.neighbor(&current, &mut self.rng)?;
            let accepted =
                self.acceptance_function
                    .accept(&current, &neighbor, &self.comparator, &mut self.rng);

            if mode == ResultMode::TotalBest && self.comparator.is_better(&neighbor, &best) {
                debug!(
                    iteration = self.total_iterations,
                    fitness = neighbor.fitness(),
                    "New total best solution"
                );
                best = neighbor.clone();
            }

            trace!(
                iteration = self.total_iterations,
                accepted,
                neighbor_fitness = neighbor.fitness(),
                "Neighbor evaluated"
            );

            if accepted {
                current = neighbor;
                self.accepted_iterations += 1;
            }
            self.total_iterations += 1;
        }

        info!(
            iterations = self.total_iterations,
            accepted = self.accepted_iterations,
            current_fitness = current.fitness(),
            best_fitness = best.fitness(),
            "Corrective procedure finished"
        );
        Ok((current, best))
    }
}

impl<S, N, B, T> CorrectiveProcedure<S, N, ThresholdAcceptance<T>, B>
where
    S: Solution,
    N: NeighborFunction<S>,
    B: BreakCondition<S>,
    T: ThresholdBreakCondition,
{
    /// Creates a threshold accepting procedure.
    ///
    /// The run stops when either `break_condition` or `threshold_break` holds.
    pub fn threshold_accepting<C>(
        constructor: C,
        neighbor_function: N,
        break_condition: B,
        sinking_function: ThresholdSinkingFunction,
        threshold_break: T,
        rng: RandomNumberGenerator,
    ) -> Result<Self>
    where
        C: InitialSolutionConstructor<S>,
    {
        Self::new(
            constructor,
            neighbor_function,
            ThresholdAcceptance::with_break_condition(sinking_function, threshold_break),
            break_condition,
            rng,
        )
    }

    /// Current threshold. Equals the initial threshold between runs.
    pub fn threshold(&self) -> f64 {
        self.acceptance_function.threshold()
    }
}

impl<S, N, B, T> CorrectiveProcedure<S, N, AnnealingAcceptance<T>, B>
where
    S: Solution,
    N: NeighborFunction<S>,
    B: BreakCondition<S>,
    T: TemperatureBreakCondition,
{
    /// Creates a simulated annealing procedure.
    ///
    /// The run stops when either `break_condition` or `temperature_break` holds.
    pub fn simulated_annealing<C>(
        constructor: C,
        neighbor_function: N,
        break_condition: B,
        annealing_function: AnnealingFunction,
        temperature_break: T,
        rng: RandomNumberGenerator,
    ) -> Result<Self>
    where
        C: InitialSolutionConstructor<S>,
    {
        Self::new(
            constructor,
            neighbor_function,
            AnnealingAcceptance::with_break_condition(annealing_function, temperature_break),
            break_condition,
            rng,
        )
    }

    /// Current temperature. Equals the initial temperature between runs.
    pub fn temperature(&self) -> f64 {
        self.acceptance_function.temperature()
    }
}
