//! Entry points for the UI / automation surface
//!
//! Both run with default [`Settings`]; callers needing other settings build
//! the converters directly.

use std::sync::Arc;

use crate::application::report::ConversionReport;
use crate::application::services::{GroupToNodeConverter, NodeToGroupConverter};
use crate::config::Settings;
use crate::infrastructure::traits::SceneStore;

/// Convert all collections into an empty-node hierarchy.
pub fn convert_collections_to_empties(store: &mut dyn SceneStore) -> ConversionReport {
    GroupToNodeConverter::new(Arc::new(Settings::default())).convert(store)
}

/// Convert every root empty and its descendants into a collection.
pub fn convert_empties_to_collections(store: &mut dyn SceneStore) -> ConversionReport {
    NodeToGroupConverter::new(Arc::new(Settings::default())).convert(store)
}
