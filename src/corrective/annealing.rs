use tracing::debug;

use super::{decay::GeometricDecay, AcceptanceFunction, DecayOptions};
use crate::{
    error::Result, fitness::FitnessComparator, problem::Solution, rng::RandomNumberGenerator,
};

/// Temperature schedule of simulated annealing.
///
/// The temperature starts at `initial_temperature` and is multiplied by `alpha` after
/// every `worse_iteration_threshold` rejected neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingFunction {
    decay: GeometricDecay,
}

impl AnnealingFunction {
    /// # Errors
    ///
    /// Returns a configuration error unless `initial_temperature > 0`, `alpha` is in
    /// `(0, 1)` and `worse_iteration_threshold > 0`.
    pub fn new(
        initial_temperature: f64,
        alpha: f64,
        worse_iteration_threshold: u64,
    ) -> Result<Self> {
        Self::from_options(DecayOptions::new(
            initial_temperature,
            alpha,
            worse_iteration_threshold,
        ))
    }

    pub fn from_options(options: DecayOptions) -> Result<Self> {
        Ok(Self {
            decay: GeometricDecay::new(options, "Initial temperature")?,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.decay.value()
    }

    pub fn initial_temperature(&self) -> f64 {
        self.decay.options().initial_value
    }

    pub fn worse_iterations(&self) -> u64 {
        self.decay.worse_iterations()
    }

    /// Draws whether a neighbor should be accepted.
    ///
    /// The acceptance likelihood is `exp((neighbor - current) / T)`, which is at least
    /// one for neighbors that are not worse.
    pub fn accept_with_likelihood<S: Solution>(
        &self,
        neighbor: &S,
        current: &S,
        comparator: &FitnessComparator<S>,
        rng: &mut RandomNumberGenerator,
    ) -> bool {
        let difference = comparator.fitness_difference(neighbor, current);
        let likelihood = (difference / self.temperature()).exp();
        likelihood >= rng.uniform()
    }

    pub fn notify_about_worse_iteration(&mut self) {
        if self.decay.notify_worse() {
            debug!(temperature = self.decay.value(), "Temperature lowered");
        }
    }

    /// Restores the initial temperature and clears the rejection counter.
    pub fn reset(&mut self) {
        self.decay.reset();
    }
}

/// Stops a simulated annealing run depending on the current temperature.
pub trait TemperatureBreakCondition {
    fn is_fulfilled(&mut self, temperature: f64) -> bool;
}

impl<F> TemperatureBreakCondition for F
where
    F: FnMut(f64) -> bool,
{
    fn is_fulfilled(&mut self, temperature: f64) -> bool {
        self(temperature)
    }
}

fn never(_temperature: f64) -> bool {
    false
}

/// Simulated annealing as an [`AcceptanceFunction`].
///
/// Neighbors at least as good as the current solution are always accepted. A worse
/// neighbor is accepted with probability `exp(Δ/T)`. Each rejection is reported to the
/// annealing function.
#[derive(Debug, Clone)]
pub struct AnnealingAcceptance<T = fn(f64) -> bool> {
    annealing_function: AnnealingFunction,
    temperature_break: T,
}

impl AnnealingAcceptance {
    /// Creates an annealing acceptance without a temperature-based stop.
    pub fn new(annealing_function: AnnealingFunction) -> Self {
        Self {
            annealing_function,
            temperature_break: never,
        }
    }
}

impl<T: TemperatureBreakCondition> AnnealingAcceptance<T> {
    pub fn with_break_condition(
        annealing_function: AnnealingFunction,
        temperature_break: T,
    ) -> Self {
        Self {
            annealing_function,
            temperature_break,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.annealing_function.temperature()
    }

    pub fn annealing_function(&self) -> &AnnealingFunction {
        &self.annealing_function
    }
}

impl<S, T> AcceptanceFunction<S> for AnnealingAcceptance<T>
where
    S: Solution,
    T: TemperatureBreakCondition,
{
    fn accept(
        &mut self,
        current: &S,
        neighbor: &S,
        comparator: &FitnessComparator<S>,
        rng: &mut RandomNumberGenerator,
    ) -> bool {
        if comparator.is_better_or_equal(neighbor, current)
            || self
                .annealing_function
                .accept_with_likelihood(neighbor, current, comparator, rng)
        {
            true
        } else {
            self.annealing_function.notify_about_worse_iteration();
            false
        }
    }

    fn should_stop(&mut self) -> bool {
        self.temperature_break
            .is_fulfilled(self.annealing_function.temperature())
    }

    fn reset(&mut self) {
        self.annealing_function.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::OptimizationError, problem::test_support::Point};

    #[test]
    fn test_invalid_annealing_function() {
        assert!(matches!(
            AnnealingFunction::new(0.0, 0.5, 1),
            Err(OptimizationError::Configuration(_))
        ));
        assert!(matches!(
            AnnealingFunction::new(10.0, 1.0, 1),
            Err(OptimizationError::Configuration(_))
        ));
        assert!(matches!(
            AnnealingFunction::new(10.0, 0.5, 0),
            Err(OptimizationError::Configuration(_))
        ));
    }

    #[test]
    fn test_improvements_always_accepted() {
        let mut acceptance =
            AnnealingAcceptance::new(AnnealingFunction::new(1e-9, 0.5, 1).unwrap());
        let comparator = FitnessComparator::new();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let current = Point::new(10.0);

        for _ in 0..100 {
            assert!(acceptance.accept(&current, &Point::new(10.0), &comparator, &mut rng));
            assert!(acceptance.accept(&current, &Point::new(11.0), &comparator, &mut rng));
        }
        assert_eq!(acceptance.annealing_function().worse_iterations(), 0);
    }

    #[test]
    fn test_acceptance_likelihood_matches_temperature() {
        let annealing = AnnealingFunction::new(10.0, 0.5, u64::MAX).unwrap();
        let comparator = FitnessComparator::new();
        let mut rng = RandomNumberGenerator::from_seed(17);
        let current = Point::new(0.0);
        let neighbor = Point::new(-10.0);

        let trials = 20_000;
        let accepted = (0..trials)
            .filter(|_| {
                annealing.accept_with_likelihood(&neighbor, &current, &comparator, &mut rng)
            })
            .count();

        // exp(-1) ~= 0.368
        let share = accepted as f64 / trials as f64;
        assert!((share - (-1.0f64).exp()).abs() < 0.02, "share {}", share);
    }

    #[test]
    fn test_cooling_and_reset() {
        let mut acceptance = AnnealingAcceptance::with_break_condition(
            AnnealingFunction::new(100.0, 0.5, 2).unwrap(),
            |temperature: f64| temperature < 30.0,
        );
        let comparator = FitnessComparator::new();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let current = Point::new(0.0);
        // Hopelessly worse: exp(-1e6 / T) underflows to zero.
        let worse = Point::new(-1e6);

        for _ in 0..4 {
            assert!(!acceptance.accept(&current, &worse, &comparator, &mut rng));
        }
        assert_eq!(acceptance.temperature(), 25.0);
        assert!(AcceptanceFunction::<Point>::should_stop(&mut acceptance));

        AcceptanceFunction::<Point>::reset(&mut acceptance);
        assert_eq!(acceptance.temperature(), 100.0);
        assert!(!AcceptanceFunction::<Point>::should_stop(&mut acceptance));
    }
}
