//! Error conversion helpers for scene store operations
//!
//! Provides extension traits that tag a store failure with the isolation
//! boundary it belongs to.

use crate::application::error::{ConversionError, ConversionResult};
use crate::domain::DomainResult;

/// Extension trait for converting `DomainResult` into `ConversionResult`.
pub trait DomainResultExt<T> {
    /// Tag a failure as an element-level failure.
    ///
    /// # Example
    /// ```ignore
    /// store.unlink_object(container, item)
    ///     .element_context(|| format!("object {name}"))?;
    /// ```
    fn element_context<F>(self, element: F) -> ConversionResult<T>
    where
        F: FnOnce() -> String;

    /// Tag a failure as a subtree-level failure for `container`.
    fn subtree_context(self, container: &str) -> ConversionResult<T>;
}

impl<T> DomainResultExt<T> for DomainResult<T> {
    fn element_context<F>(self, element: F) -> ConversionResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ConversionError::element(element(), e))
    }

    fn subtree_context(self, container: &str) -> ConversionResult<T> {
        self.map_err(|e| ConversionError::subtree(container, e))
    }
}
