// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for nanobench.
//!
//! All errors are explicit enum variants. Scenario callbacks are the one place a
//! boxed error crosses the boundary, because the workload is user code.

use std::path::PathBuf;

use thiserror::Error;

/// Error type returned by a failing scenario callback.
pub type ScenarioError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for the measurement engine.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Sampling Errors
    // =========================================================================
    #[error("Invalid argument: {name} = {value} - {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "Timing is consistently zero in estimation loop, cannot benchmark (n={n}): \
         scenario too cheap or clock too coarse"
    )]
    NonMeasurable { n: u64 },

    #[error("Iteration count overflow during {stage}")]
    Overflow { stage: &'static str },

    // =========================================================================
    // Scenario Errors - Fail-Fast, No Retry
    // =========================================================================
    #[error("Scenario '{scenario}' failed at iteration {iteration}: {source}")]
    ScenarioFailure {
        scenario: String,
        iteration: u64,
        #[source]
        source: ScenarioError,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Hard validation errors for configuration values.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Field {field} = {value} out of bounds (min: {min}, max: {max})")]
    OutOfBounds {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_scenario_failure_keeps_source() {
        let err = BenchError::ScenarioFailure {
            scenario: "parse".to_string(),
            iteration: 3,
            source: "bad input".into(),
        };
        assert!(err.to_string().contains("parse"));
        assert!(err.to_string().contains("iteration 3"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("bad input".to_string()));
    }

    #[test]
    fn test_error_chain() {
        let validation_err = ConfigValidationError::InvalidFieldValue {
            field: "time_budget_secs",
            value: "0.01".to_string(),
            reason: "Must be at least 0.1".to_string(),
        };
        let bench_err: BenchError = validation_err.into();
        assert!(matches!(bench_err, BenchError::InvalidConfig(_)));
        assert!(bench_err.to_string().contains("time_budget_secs"));
    }

    #[test]
    fn test_non_measurable_display() {
        let err = BenchError::NonMeasurable { n: 4096 };
        assert!(err.to_string().contains("consistently zero"));
        assert!(err.to_string().contains("n=4096"));
    }
}
