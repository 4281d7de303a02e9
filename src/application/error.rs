//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::report::Severity;
use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures raised while converting a hierarchy.
///
/// Each variant marks the isolation boundary at which it was caught.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// One item or container operation failed; the next sibling is processed.
    #[error("Could not process {element}: {source}")]
    Element {
        element: String,
        #[source]
        source: DomainError,
    },

    /// Materializing one collection failed; its subtree yields no anchor.
    #[error("Error processing collection {container}: {source}")]
    Subtree {
        container: String,
        #[source]
        source: DomainError,
    },

    /// The whole conversion failed; mutations already applied are kept.
    #[error("Error during conversion: {source}")]
    Operation {
        #[source]
        source: DomainError,
    },

    /// The conversion had nothing to do and was cancelled without mutation.
    #[error("{0}")]
    Precondition(String),
}

impl ConversionError {
    pub fn element(element: impl Into<String>, source: DomainError) -> Self {
        Self::Element {
            element: element.into(),
            source,
        }
    }

    pub fn subtree(container: impl Into<String>, source: DomainError) -> Self {
        Self::Subtree {
            container: container.into(),
            source,
        }
    }

    /// Severity used when the failure is reported.
    pub fn severity(&self) -> Severity {
        match self {
            ConversionError::Element { .. } | ConversionError::Precondition(_) => Severity::Warning,
            ConversionError::Subtree { .. } | ConversionError::Operation { .. } => Severity::Error,
        }
    }
}

impl From<DomainError> for ConversionError {
    fn from(source: DomainError) -> Self {
        ConversionError::Operation { source }
    }
}

/// Result type for conversion steps.
pub type ConversionResult<T> = Result<T, ConversionError>;
