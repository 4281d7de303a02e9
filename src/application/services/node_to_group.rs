//! Node→Group conversion
//!
//! Creates one collection per parentless empty and moves the empty together
//! with its whole descendant subtree into it. Parent links are left alone;
//! only collection membership changes.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error::{ConversionError, ConversionResult};
use crate::application::report::ConversionReport;
use crate::application::services::hierarchy::{descendant_closure, root_anchors};
use crate::config::Settings;
use crate::domain::ObjectId;
use crate::infrastructure::traits::SceneStore;

/// Converts an empty-node hierarchy into flat collections.
pub struct NodeToGroupConverter {
    settings: Arc<Settings>,
}

impl NodeToGroupConverter {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Group every root empty's subtree into a new collection.
    ///
    /// Cancels with a warning when there are no root empties. Any store
    /// failure cancels the run with a single error; collections and moves
    /// already made are kept.
    #[instrument(level = "debug", skip_all)]
    pub fn convert(&self, store: &mut dyn SceneStore) -> ConversionReport {
        let mut report = ConversionReport::new();
        match self.convert_all(store, &mut report) {
            Ok(created) => {
                report.info(format!("Created {created} collection(s) from root empties"));
            }
            Err(e) => report.cancel(&e),
        }
        report
    }

    fn convert_all(
        &self,
        store: &mut dyn SceneStore,
        report: &mut ConversionReport,
    ) -> ConversionResult<usize> {
        let roots = root_anchors(store)?;
        if roots.is_empty() {
            return Err(ConversionError::Precondition(
                "No root empties found".to_string(),
            ));
        }
        debug!("convert_all: {} root empties", roots.len());

        let mut created = 0;
        for root in roots {
            self.group_subtree(store, report, root)?;
            created += 1;
        }
        Ok(created)
    }

    fn group_subtree(
        &self,
        store: &mut dyn SceneStore,
        report: &mut ConversionReport,
        root: ObjectId,
    ) -> ConversionResult<()> {
        let name = store.object_name(root)?;
        let group = store.new_container(&name)?;
        let scene_root = store.root_container();
        store.link_container(scene_root, group)?;
        report.stats.containers_created += 1;

        let closure = descendant_closure(store, root, self.settings.closure)?;
        debug!("group_subtree: {} -> {} objects", name, closure.len());

        for object in closure {
            // snapshot: unlinking changes the membership list
            for holder in store.users_collection(object)? {
                store.unlink_object(holder, object)?;
            }
            store.link_object(group, object)?;
            report.stats.objects_moved += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::report::Outcome;
    use crate::domain::{ObjectKind, Scene};

    fn converter() -> NodeToGroupConverter {
        NodeToGroupConverter::new(Arc::new(Settings::default()))
    }

    #[test]
    fn given_only_items_when_converting_then_cancels_without_mutation() {
        let mut scene = Scene::default();
        let door = scene.add_object("Door", ObjectKind::Item);
        scene.link_object(scene.root(), door).unwrap();

        let report = converter().convert(&mut scene);

        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.messages[0].text, "No root empties found");
        assert_eq!(scene.containers(), vec![scene.root()]);
        assert_eq!(scene.users_collection(door).unwrap(), vec![scene.root()]);
    }

    #[test]
    fn given_multi_homed_node_when_converting_then_unlinked_from_all_holders() {
        let mut scene = Scene::default();
        let a = scene.new_container("A");
        let b = scene.new_container("B");
        let marker = scene.add_object("Marker", ObjectKind::Anchor);
        scene.link_object(a, marker).unwrap();
        scene.link_object(b, marker).unwrap();

        let report = converter().convert(&mut scene);

        assert!(report.is_finished());
        let group = scene.find_container("Marker").expect("group created");
        assert_eq!(scene.users_collection(marker).unwrap(), vec![group]);
        assert_eq!(scene.container_parent(group).unwrap(), Some(scene.root()));
        assert_eq!(report.messages[0].text, "Created 1 collection(s) from root empties");
    }
}
