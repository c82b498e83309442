//! # Corrective Procedures
//!
//! Single-solution local search: start from one solution, repeatedly build a
//! neighbor and let an [`AcceptanceFunction`] decide whether the neighbor replaces the
//! current solution.
//!
//! Two acceptance rules ship with the crate:
//!
//! - [`ThresholdAcceptance`]: accept a neighbor unless it is worse than the current
//!   solution by more than a threshold that sinks over time.
//! - [`AnnealingAcceptance`]: accept improvements, and accept a worse neighbor with
//!   probability `exp(Δ/T)` for a temperature `T` that cools over time.
//!
//! Both are available as ready-made procedures through
//! [`CorrectiveProcedure::threshold_accepting`] and
//! [`CorrectiveProcedure::simulated_annealing`].

pub mod annealing;
pub mod decay;
pub mod procedure;
pub mod threshold;

use crate::{
    error::Result, fitness::FitnessComparator, problem::Solution, rng::RandomNumberGenerator,
};

pub use annealing::{AnnealingAcceptance, AnnealingFunction, TemperatureBreakCondition};
pub use decay::{DecayOptions, DecayOptionsBuilder};
pub use procedure::{CorrectiveProcedure, SimulatedAnnealing, ThresholdAccepting};
pub use threshold::{ThresholdAcceptance, ThresholdBreakCondition, ThresholdSinkingFunction};

/// Which solution a corrective procedure run returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultMode {
    /// The best neighbor generated during the run, accepted or not.
    TotalBest,
    /// The current solution when the run stops.
    Last,
}

/// Builds a neighbor of the current solution.
pub trait NeighborFunction<S: Solution> {
    fn neighbor(&mut self, current: &S, rng: &mut RandomNumberGenerator) -> Result<S>;
}

impl<S, F> NeighborFunction<S> for F
where
    S: Solution,
    F: FnMut(&S, &mut RandomNumberGenerator) -> Result<S>,
{
    fn neighbor(&mut self, current: &S, rng: &mut RandomNumberGenerator) -> Result<S> {
        self(current, rng)
    }
}

/// Decides whether a neighbor replaces the current solution.
///
/// Acceptance rules may carry state that changes while a run progresses. The
/// procedure calls [`AcceptanceFunction::reset`] after every run and ORs
/// [`AcceptanceFunction::should_stop`] into its break condition.
pub trait AcceptanceFunction<S: Solution> {
    fn accept(
        &mut self,
        current: &S,
        neighbor: &S,
        comparator: &FitnessComparator<S>,
        rng: &mut RandomNumberGenerator,
    ) -> bool;

    /// Algorithm-specific stop signal, checked before every iteration.
    fn should_stop(&mut self) -> bool {
        false
    }

    /// Restores the state the rule had before the run.
    fn reset(&mut self) {}
}

impl<S, F> AcceptanceFunction<S> for F
where
    S: Solution,
    F: FnMut(&S, &S, &FitnessComparator<S>, &mut RandomNumberGenerator) -> bool,
{
    fn accept(
        &mut self,
        current: &S,
        neighbor: &S,
        comparator: &FitnessComparator<S>,
        rng: &mut RandomNumberGenerator,
    ) -> bool {
        self(current, neighbor, comparator, rng)
    }
}

/// Decides when a corrective procedure run stops.
pub trait BreakCondition<S: Solution> {
    fn is_fulfilled(&mut self, current: &S, iteration_count: u64, accepted_count: u64) -> bool;
}

impl<S, F> BreakCondition<S> for F
where
    S: Solution,
    F: FnMut(&S, u64, u64) -> bool,
{
    fn is_fulfilled(&mut self, current: &S, iteration_count: u64, accepted_count: u64) -> bool {
        self(current, iteration_count, accepted_count)
    }
}
