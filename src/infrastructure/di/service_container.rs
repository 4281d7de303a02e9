//! Service container for dependency injection
//!
//! Wires up the converters with shared settings.

use std::sync::Arc;

use crate::application::services::{GroupToNodeConverter, NodeToGroupConverter};
use crate::config::Settings;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Collections → empties
    pub group_to_node: GroupToNodeConverter,

    /// Empties → collections
    pub node_to_group: NodeToGroupConverter,
}

impl ServiceContainer {
    /// Create a new service container sharing one settings instance.
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);

        Self {
            group_to_node: GroupToNodeConverter::new(Arc::clone(&settings)),
            node_to_group: NodeToGroupConverter::new(Arc::clone(&settings)),
            settings,
        }
    }
}
