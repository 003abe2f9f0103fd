use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Computation error: {0}")]
    Computation(#[from] ComputationError),

    #[error("Reference data error: {0}")]
    ReferenceData(#[from] ReferenceDataError),

    #[error("Simulation history error: {0}")]
    History(#[from] HistoryConflict),
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Malformed or out-of-range input. Carries every field problem found in the
/// record so the caller can correct them in one round trip.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{}", format_field_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Prefixes every field name, e.g. `stages[2].energyUsage`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        for error in &mut self.errors {
            error.field = format!("{}.{}", prefix, error.field);
        }
        self
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("No circularity parameters for metal type '{metal}'")]
    MissingMetalParameters { metal: String },

    #[error("No score benchmark for metal type '{metal}'")]
    MissingBenchmark { metal: String },

    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),
}

#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to read reference data file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reference data JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse reference data YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Unsupported reference data version: {0}")]
    UnsupportedVersion(String),

    #[error("Reference data validation failed: {message}")]
    Validation { message: String },
}

/// Lost an optimistic append race on a project's simulation history.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("History length changed: expected {expected}, found {actual}")]
pub struct HistoryConflict {
    pub expected: usize,
    pub actual: usize,
}

pub type Result<T> = std::result::Result<T, LcaError>;
