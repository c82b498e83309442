//! # DecayOptions
//!
//! The `DecayOptions` struct configures a geometrically decaying control value: the
//! sinking threshold of threshold accepting, or the temperature of simulated
//! annealing. The value starts at `initial_value` and is multiplied by `alpha` each
//! time `worse_iteration_threshold` rejected neighbors have accumulated.
//!
//! ## Example
//!
//! ```rust
//! use heurist::corrective::DecayOptions;
//!
//! let options = DecayOptions::builder()
//!     .initial_value(2_000.0)
//!     .alpha(0.95)
//!     .build();
//!
//! assert_eq!(options.initial_value, 2_000.0);
//! assert_eq!(options.worse_iteration_threshold, 100);
//! ```

use crate::error::{OptimizationError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecayOptions {
    /// Starting threshold or temperature. Must be positive.
    pub initial_value: f64,
    /// Decay factor applied on every decay step. Must be in `(0, 1)`.
    pub alpha: f64,
    /// Rejected neighbors that trigger one decay step. Must be positive.
    pub worse_iteration_threshold: u64,
}

impl DecayOptions {
    /// Default starting threshold of threshold accepting.
    pub const DEFAULT_INITIAL_VALUE: f64 = 25_000.0;
    pub const DEFAULT_TEMPERATURE: f64 = 2_000.0;
    pub const DEFAULT_ALPHA: f64 = 0.99;
    pub const DEFAULT_WORSE_ITERATION_THRESHOLD: u64 = 100;

    pub fn new(initial_value: f64, alpha: f64, worse_iteration_threshold: u64) -> Self {
        Self {
            initial_value,
            alpha,
            worse_iteration_threshold,
        }
    }

    /// Defaults for simulated annealing: the default options with a starting
    /// temperature of 2 000.
    pub fn annealing() -> Self {
        Self {
            initial_value: Self::DEFAULT_TEMPERATURE,
            ..Self::default()
        }
    }

    /// Returns a builder that falls back to the defaults for unset fields.
    pub fn builder() -> DecayOptionsBuilder {
        DecayOptionsBuilder::default()
    }
}

impl Default for DecayOptions {
    fn default() -> Self {
        Self {
            initial_value: Self::DEFAULT_INITIAL_VALUE,
            alpha: Self::DEFAULT_ALPHA,
            worse_iteration_threshold: Self::DEFAULT_WORSE_ITERATION_THRESHOLD,
        }
    }
}

/// Builder for `DecayOptions`.
#[derive(Debug, Clone, Default)]
pub struct DecayOptionsBuilder {
    initial_value: Option<f64>,
    alpha: Option<f64>,
    worse_iteration_threshold: Option<u64>,
}

impl DecayOptionsBuilder {
    pub fn initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn alpha(mut self, value: f64) -> Self {
        self.alpha = Some(value);
        self
    }

    pub fn worse_iteration_threshold(mut self, value: u64) -> Self {
        self.worse_iteration_threshold = Some(value);
        self
    }

    pub fn build(self) -> DecayOptions {
        DecayOptions {
            initial_value: self
                .initial_value
                .unwrap_or(DecayOptions::DEFAULT_INITIAL_VALUE),
            alpha: self.alpha.unwrap_or(DecayOptions::DEFAULT_ALPHA),
            worse_iteration_threshold: self
                .worse_iteration_threshold
                .unwrap_or(DecayOptions::DEFAULT_WORSE_ITERATION_THRESHOLD),
        }
    }
}

/// Shared counter and value of the threshold and temperature functions.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GeometricDecay {
    options: DecayOptions,
    value: f64,
    worse_iterations: u64,
}

impl GeometricDecay {
    /// `name` labels the value in configuration errors, e.g. "Initial temperature".
    pub(crate) fn new(options: DecayOptions, name: &str) -> Result<Self> {
        if !(options.initial_value > 0.0) || !options.initial_value.is_finite() {
            return Err(OptimizationError::Configuration(format!(
                "{} must be greater than 0, got {}",
                name, options.initial_value
            )));
        }
        if !(options.alpha > 0.0 && options.alpha < 1.0) {
            return Err(OptimizationError::Configuration(format!(
                "Alpha must be in (0, 1), got {}",
                options.alpha
            )));
        }
        if options.worse_iteration_threshold == 0 {
            return Err(OptimizationError::Configuration(
                "Worse iteration threshold must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            options,
            value: options.initial_value,
            worse_iterations: 0,
        })
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn worse_iterations(&self) -> u64 {
        self.worse_iterations
    }

    pub(crate) fn options(&self) -> &DecayOptions {
        &self.options
    }

    /// Counts one rejected neighbor. Returns `true` if this completed a decay step.
    pub(crate) fn notify_worse(&mut self) -> bool {
        self.worse_iterations += 1;
        if self.worse_iterations >= self.options.worse_iteration_threshold {
            self.value *= self.options.alpha;
            self.worse_iterations = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.options.initial_value;
        self.worse_iterations = 0;
    }
}
