//! groupnode: convert scene collection hierarchies to empty-node hierarchies and back.
//!
//! The converters work against the [`SceneStore`] capability; [`Scene`] is the
//! in-memory store used by the CLI and the tests.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    convert_collections_to_empties, convert_empties_to_collections, ConversionReport, Outcome,
    Severity,
};
pub use domain::Scene;
pub use infrastructure::traits::SceneStore;
