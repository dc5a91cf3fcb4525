//! Error handling for SOS document parsing and batch processing.
//!
//! [`SosError`] covers anything wrong with a document, [`UnsupportedVersion`]
//! an explicit dialect string the parser does not know, and
//! [`ProcessingError`] the file-level batch layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while classifying, unwrapping or extracting one document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SosError {
    /// Input bytes are not well-formed XML (or not UTF-8)
    #[error("Malformed XML document: {message}")]
    MalformedDocument { message: String },

    /// Root element matches none of the known observation dialects
    #[error("Unrecognized observation dialect: root element {root}")]
    UnrecognizedDialect { root: String },

    /// Explicitly requested dialect does not match the document root
    #[error("Expected {expected} document, found root element {found}")]
    UnexpectedRoot { expected: String, found: String },

    /// Envelope payload is present but of the wrong type
    #[error("Envelope payload type mismatch: expected {expected}, found {actual}")]
    EnvelopeTypeMismatch { expected: String, actual: String },

    /// Envelope has no usable payload
    #[error("Missing or invalid envelope payload: {reason}")]
    MissingOrInvalidPayload { reason: String },

    /// Required element absent during schema inference or extraction
    #[error("Could not parse required element: {field} (observation {observation})")]
    MissingRequiredField { field: String, observation: usize },

    /// Element present but its nested link/text/title structure is not
    #[error("Malformed {field} element in observation {observation}: {detail}")]
    MalformedFieldStructure {
        field: String,
        detail: String,
        observation: usize,
    },

    /// Optional column chosen from observation 0 is missing on a later observation
    #[error("Optional element {field} present on first observation but missing on observation {observation}")]
    InconsistentOptionalField { field: String, observation: usize },

    /// Schema handed to an extractor names a field its field plan does not know
    #[error("Field {field} is not part of the {plan} field plan")]
    SchemaMismatch { field: String, plan: String },
}

impl SosError {
    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    pub fn unrecognized_dialect(root: impl Into<String>) -> Self {
        Self::UnrecognizedDialect { root: root.into() }
    }

    pub fn unexpected_root(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedRoot {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn envelope_type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::EnvelopeTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_payload(reason: impl Into<String>) -> Self {
        Self::MissingOrInvalidPayload {
            reason: reason.into(),
        }
    }

    pub fn missing_required(field: impl Into<String>, observation: usize) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            observation,
        }
    }

    pub fn malformed_field(
        field: impl Into<String>,
        detail: impl Into<String>,
        observation: usize,
    ) -> Self {
        Self::MalformedFieldStructure {
            field: field.into(),
            detail: detail.into(),
            observation,
        }
    }

    pub fn inconsistent_optional(field: impl Into<String>, observation: usize) -> Self {
        Self::InconsistentOptionalField {
            field: field.into(),
            observation,
        }
    }

    pub fn schema_mismatch(field: impl Into<String>, plan: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            field: field.into(),
            plan: plan.into(),
        }
    }

    /// Name of the offending field, for field-level failures
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field, .. }
            | Self::MalformedFieldStructure { field, .. }
            | Self::InconsistentOptionalField { field, .. }
            | Self::SchemaMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for SosError {
    fn from(error: roxmltree::Error) -> Self {
        Self::malformed_document(error.to_string())
    }
}

impl From<std::str::Utf8Error> for SosError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::malformed_document(format!("input is not valid UTF-8: {}", error))
    }
}

/// Explicit dialect selector string that is not one of the supported versions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported SOS version '{requested}': only 1.0.0, 2.0.0 and UCD_SOCIAL are supported")]
pub struct UnsupportedVersion {
    pub requested: String,
}

/// File-level failures of the batch processor
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Directory traversal failed: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("No XML input files found in: {inputs}")]
    NoInputs { inputs: String },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: SosError,
    },

    #[error("Inputs {first} and {second} would both be written to {output}")]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to write output for {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl ProcessingError {
    pub fn parse(path: impl Into<PathBuf>, source: SosError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SosError>;

pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;
