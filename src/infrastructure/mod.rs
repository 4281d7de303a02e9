//! Infrastructure layer: scene store boundary, scene files and DI container
//!
//! This layer implements the host boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod scene_file;
pub mod traits;

pub use error::{InfraError, InfraResult};
