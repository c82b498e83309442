use tracing::debug;

use super::{decay::GeometricDecay, AcceptanceFunction, DecayOptions};
use crate::{
    error::Result, fitness::FitnessComparator, problem::Solution, rng::RandomNumberGenerator,
};

/// A threshold that sinks geometrically as rejected neighbors accumulate.
///
/// After every `worse_iteration_threshold` notifications the threshold is multiplied
/// by `alpha` and the counter starts over.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSinkingFunction {
    decay: GeometricDecay,
}

impl ThresholdSinkingFunction {
    /// # Errors
    ///
    /// Returns a configuration error unless `initial_threshold > 0`, `alpha` is in
    /// `(0, 1)` and `worse_iteration_threshold > 0`.
    pub fn new(initial_threshold: f64, alpha: f64, worse_iteration_threshold: u64) -> Result<Self> {
        Self::from_options(DecayOptions::new(
            initial_threshold,
            alpha,
            worse_iteration_threshold,
        ))
    }

    pub fn from_options(options: DecayOptions) -> Result<Self> {
        Ok(Self {
            decay: GeometricDecay::new(options, "Initial threshold")?,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.decay.value()
    }

    pub fn initial_threshold(&self) -> f64 {
        self.decay.options().initial_value
    }

    /// Rejected neighbors counted since the last sink.
    pub fn worse_iterations(&self) -> u64 {
        self.decay.worse_iterations()
    }

    pub fn notify_about_worse_iteration(&mut self) {
        if self.decay.notify_worse() {
            debug!(threshold = self.decay.value(), "Threshold sunk");
        }
    }

    /// Restores the initial threshold and clears the rejection counter.
    pub fn reset(&mut self) {
        self.decay.reset();
    }
}

/// Stops a threshold accepting run depending on the current threshold.
pub trait ThresholdBreakCondition {
    fn is_fulfilled(&mut self, threshold: f64) -> bool;
}

impl<F> ThresholdBreakCondition for F
where
    F: FnMut(f64) -> bool,
{
    fn is_fulfilled(&mut self, threshold: f64) -> bool {
        self(threshold)
    }
}

fn never(_threshold: f64) -> bool {
    false
}

/// Threshold accepting as an [`AcceptanceFunction`].
///
/// A neighbor is accepted iff `current.fitness() - neighbor.fitness() - threshold <= 0`.
/// Every rejection is reported to the sinking function.
#[derive(Debug, Clone)]
pub struct ThresholdAcceptance<T = fn(f64) -> bool> {
    sinking_function: ThresholdSinkingFunction,
    threshold_break: T,
}

impl ThresholdAcceptance {
    /// Creates a threshold acceptance without a threshold-based stop.
    pub fn new(sinking_function: ThresholdSinkingFunction) -> Self {
        Self {
            sinking_function,
            threshold_break: never,
        }
    }
}

impl<T: ThresholdBreakCondition> ThresholdAcceptance<T> {
    pub fn with_break_condition(
        sinking_function: ThresholdSinkingFunction,
        threshold_break: T,
    ) -> Self {
        Self {
            sinking_function,
            threshold_break,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.sinking_function.threshold()
    }

    pub fn sinking_function(&self) -> &ThresholdSinkingFunction {
        &self.sinking_function
    }
}

impl<S, T> AcceptanceFunction<S> for ThresholdAcceptance<T>
where
    S: Solution,
    T: ThresholdBreakCondition,
{
    fn accept(
        &mut self,
        current: &S,
        neighbor: &S,
        comparator: &FitnessComparator<S>,
        _rng: &mut RandomNumberGenerator,
    ) -> bool {
        let difference = comparator.fitness_difference(current, neighbor);
        if difference - self.sinking_function.threshold() <= 0.0 {
            true
        } else {
            self.sinking_function.notify_about_worse_iteration();
            false
        }
    }

    fn should_stop(&mut self) -> bool {
        self.threshold_break
            .is_fulfilled(self.sinking_function.threshold())
    }

    fn reset(&mut self) {
        self.sinking_function.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::OptimizationError, problem::test_support::Point};

    #[test]
    fn test_sinking_schedule() {
        let mut sinking = ThresholdSinkingFunction::new(25_000.0, 0.99, 100).unwrap();

        for _ in 0..99 {
            sinking.notify_about_worse_iteration();
        }
        assert_eq!(sinking.threshold(), 25_000.0);
        assert_eq!(sinking.worse_iterations(), 99);

        sinking.notify_about_worse_iteration();
        assert!((sinking.threshold() - 24_750.0).abs() < 1e-9);
        assert_eq!(sinking.worse_iterations(), 0);

        for _ in 0..100 {
            sinking.notify_about_worse_iteration();
        }
        assert!((sinking.threshold() - 25_000.0 * 0.99 * 0.99).abs() < 1e-9);

        sinking.reset();
        assert_eq!(sinking.threshold(), sinking.initial_threshold());
        assert_eq!(sinking.worse_iterations(), 0);
    }

    #[test]
    fn test_invalid_sinking_function() {
        assert!(matches!(
            ThresholdSinkingFunction::new(-1.0, 0.5, 10),
            Err(OptimizationError::Configuration(_))
        ));
        assert!(matches!(
            ThresholdSinkingFunction::new(1.0, 1.5, 10),
            Err(OptimizationError::Configuration(_))
        ));
        assert!(matches!(
            ThresholdSinkingFunction::new(1.0, 0.5, 0),
            Err(OptimizationError::Configuration(_))
        ));
    }

    #[test]
    fn test_acceptance_rule() {
        let sinking = ThresholdSinkingFunction::new(10.0, 0.5, 1).unwrap();
        let mut acceptance = ThresholdAcceptance::new(sinking);
        let comparator = FitnessComparator::new();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let current = Point::new(50.0);

        assert!(acceptance.accept(&current, &Point::new(60.0), &comparator, &mut rng));
        assert!(acceptance.accept(&current, &Point::new(40.0), &comparator, &mut rng));
        assert!(!acceptance.accept(&current, &Point::new(39.0), &comparator, &mut rng));
        assert_eq!(acceptance.threshold(), 5.0);

        AcceptanceFunction::<Point>::reset(&mut acceptance);
        assert_eq!(acceptance.threshold(), 10.0);
    }

    #[test]
    fn test_threshold_break() {
        let sinking = ThresholdSinkingFunction::new(8.0, 0.5, 1).unwrap();
        let mut acceptance =
            ThresholdAcceptance::with_break_condition(sinking, |threshold: f64| threshold < 3.0);
        let comparator = FitnessComparator::new();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let current = Point::new(100.0);
        let worse = Point::new(0.0);

        assert!(!AcceptanceFunction::<Point>::should_stop(&mut acceptance));
        assert!(!acceptance.accept(&current, &worse, &comparator, &mut rng));
        assert_eq!(acceptance.threshold(), 4.0);
        assert!(!AcceptanceFunction::<Point>::should_stop(&mut acceptance));
        assert!(!acceptance.accept(&current, &worse, &comparator, &mut rng));
        assert_eq!(acceptance.threshold(), 2.0);
        assert!(AcceptanceFunction::<Point>::should_stop(&mut acceptance));
    }
}
