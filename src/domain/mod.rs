//! Domain layer: scene entities and the in-memory scene store
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;

pub use arena::{Scene, DEFAULT_ROOT_NAME};
pub use entities::*;
pub use error::{DomainError, DomainResult};
