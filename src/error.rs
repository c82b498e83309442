//! # Error Types
//!
//! This module defines the error type shared by every engine and strategy in the
//! crate. All failures are reported immediately to the caller; nothing is retried.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use heurist::error::{OptimizationError, Result};
//!
//! fn validate_rate(rate: f64) -> Result<f64> {
//!     if rate <= 0.0 || rate > 1.0 {
//!         return Err(OptimizationError::Configuration(
//!             "Mutation rate must be within (0, 1]".to_string(),
//!         ));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(validate_rate(0.5).is_ok());
//! assert!(validate_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use heurist::error::{OptimizationError, OptionExt};
//!
//! fn first_fitness(values: &[f64]) -> heurist::error::Result<f64> {
//!     values.first().copied().ok_or_else_optimization(||
//!         OptimizationError::EmptyPopulation
//!     )
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an optimization.
#[derive(Error, Debug)]
pub enum OptimizationError {
    /// A parameter was out of range or a required component was missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A population was built from zero individuals.
    #[error("Empty population error: A population must contain at least one individual")]
    EmptyPopulation,

    /// A candidate solution violates the structure its problem requires.
    #[error("Illegal solution: {0}")]
    IllegalSolution(String),

    /// A numeric input makes the requested computation meaningless.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizationError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, OptimizationError>` using
    /// a closure to generate the error.
    fn ok_or_else_optimization<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_optimization<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError,
    {
        self.ok_or_else(err_fn)
    }
}
