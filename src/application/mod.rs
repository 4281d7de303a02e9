//! Application layer: converters and status reporting
//!
//! This layer orchestrates domain logic and depends on the scene store boundary trait.

pub mod error;
pub mod error_ext;
pub mod operators;
pub mod report;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ConversionError, ConversionResult};
pub use error_ext::DomainResultExt;
pub use operators::{convert_collections_to_empties, convert_empties_to_collections};
pub use report::{ConversionReport, ConversionStats, Outcome, Severity, StatusMessage};
