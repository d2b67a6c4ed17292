//! Error types for the Enrolment Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during enrolment assessment.
//!
//! Policy rejections (an opt-out outside its window, a re-enrolment that is
//! not yet due) are *not* errors: they are expected outcomes and are returned
//! as typed negative results by the calculation functions themselves.

use thiserror::Error;

/// The main error type for the Enrolment Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use enrolment_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Staging configuration failed eager validation.
    ///
    /// Calculations must never be invoked against a configuration that
    /// failed validation; callers should surface every collected message.
    #[error("Invalid staging configuration: {}", messages.join("; "))]
    InvalidStagingConfig {
        /// Every validation failure found in the configuration.
        messages: Vec<String>,
    },

    /// A payroll record was invalid in a way that prevents assessment.
    #[error("Invalid payroll record field '{field}': {message}")]
    InvalidRecord {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
