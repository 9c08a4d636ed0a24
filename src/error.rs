//! Unified error hierarchy for wellrs
//!
//! Provides a structured error type system for calculator input validation,
//! configuration handling, and report export, with integration into the
//! tracing system.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all wellrs operations
#[derive(Debug, Error)]
pub enum WellRsError {
    /// Calculator input or domain errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Calculation errors
///
/// Every calculator reduces to a single invalid-input condition: a required
/// value is missing, non-positive, or outside the formula's domain. No
/// partial result is ever produced.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// A required numeric input is missing or non-positive
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// Inputs are individually valid but violate a formula's domain
    #[error("Out of domain for {calculation}: {reason}")]
    OutOfDomain { calculation: String, reason: String },

    /// A profile field required by the calculation is not set
    #[error("Missing profile field: {field}")]
    MissingProfile { field: String },
}

impl CalculationError {
    /// Shorthand for the common non-positive-input rejection
    pub fn invalid(calculation: &str, parameter: &str, value: impl ToString) -> Self {
        CalculationError::InvalidParameter {
            calculation: calculation.to_string(),
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }
}

/// Report export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Nothing to export (no section of the report could be computed)
    #[error("Report is empty: {reason}")]
    EmptyReport { reason: String },

    /// Export failed
    #[error("Export failed to {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    /// IO error during export
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for wellrs operations
pub type Result<T> = std::result::Result<T, WellRsError>;

impl WellRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WellRsError::Calculation(_) => ErrorSeverity::Warning,
            WellRsError::Configuration(_) => ErrorSeverity::Error,
            WellRsError::Export(_) => ErrorSeverity::Error,
            WellRsError::Io(_) => ErrorSeverity::Error,
            WellRsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WellRsError::Calculation(CalculationError::InvalidParameter {
                calculation,
                parameter,
                ..
            }) => {
                format!(
                    "Cannot calculate {}: {} must be a positive number.",
                    calculation, parameter
                )
            }
            WellRsError::Calculation(CalculationError::OutOfDomain { calculation, reason }) => {
                format!("Cannot calculate {}: {}.", calculation, reason)
            }
            WellRsError::Calculation(CalculationError::MissingProfile { field }) => {
                format!(
                    "Your profile is missing '{}'. Set it with `wellrs profile set`.",
                    field
                )
            }
            WellRsError::Configuration(_) => {
                "Unable to read configuration. Please check your config file.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
