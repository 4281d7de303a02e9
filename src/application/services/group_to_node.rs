//! Group→Node conversion
//!
//! Turns every collection into an empty (anchor node) of the same name,
//! mirrors collection nesting as parent links between the empties, moves
//! each collection's objects into the scene root, and finally removes all
//! collections except the root.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error::{ConversionError, ConversionResult};
use crate::application::error_ext::DomainResultExt;
use crate::application::report::ConversionReport;
use crate::application::services::hierarchy::{cleanup_containers, top_level_containers};
use crate::config::Settings;
use crate::domain::{ContainerId, DomainResult, ObjectId};
use crate::infrastructure::traits::SceneStore;

/// Converts a collection hierarchy into an empty-node hierarchy.
pub struct GroupToNodeConverter {
    settings: Arc<Settings>,
}

/// Mutable state of one conversion run.
struct Run<'a> {
    store: &'a mut dyn SceneStore,
    report: ConversionReport,
    visited: HashSet<ContainerId>,
}

impl GroupToNodeConverter {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Convert every non-root collection in `store`.
    ///
    /// Never fails: per-object problems become warnings, per-collection
    /// problems become errors, and only a failure outside those boundaries
    /// cancels the run (without rolling back what was already changed).
    #[instrument(level = "debug", skip_all)]
    pub fn convert(&self, store: &mut dyn SceneStore) -> ConversionReport {
        let mut run = Run {
            store,
            report: ConversionReport::new(),
            visited: HashSet::new(),
        };

        match self.convert_all(&mut run) {
            Ok(()) => run
                .report
                .info("Successfully converted collections to empties"),
            Err(e) => run.report.cancel(&e),
        }
        run.report
    }

    fn convert_all(&self, run: &mut Run<'_>) -> ConversionResult<()> {
        let top_level = top_level_containers(&*run.store)?;
        debug!("convert_all: {} top-level collections", top_level.len());

        for container in top_level {
            self.convert_subtree(run, container, None);
        }

        let removed = cleanup_containers(&mut *run.store, &mut run.report);
        run.report.stats.containers_removed += removed;
        Ok(())
    }

    /// Convert one collection and its descendants.
    ///
    /// Returns the new anchor, or None when the subtree was abandoned. Objects
    /// of an abandoned subtree are still moved into the scene root.
    fn convert_subtree(
        &self,
        run: &mut Run<'_>,
        container: ContainerId,
        parent_anchor: Option<ObjectId>,
    ) -> Option<ObjectId> {
        if !run.visited.insert(container) {
            let name = container_label(&*run.store, container);
            run.report
                .warning(format!("Skipping collection {name}: reached twice"));
            return None;
        }

        match self.create_anchor(run, container, parent_anchor) {
            Ok(anchor) => Some(anchor),
            Err(e) => {
                run.report.failure(&e);
                self.salvage(run, container);
                None
            }
        }
    }

    fn create_anchor(
        &self,
        run: &mut Run<'_>,
        container: ContainerId,
        parent_anchor: Option<ObjectId>,
    ) -> ConversionResult<ObjectId> {
        let name = run
            .store
            .container_name(container)
            .map_err(|e| ConversionError::subtree(container.to_string(), e))?;
        debug!("create_anchor: collection={}", name);

        let anchor = run.store.new_anchor(&name).subtree_context(&name)?;
        run.report.stats.anchors_created += 1;
        run.store
            .set_display_type(anchor, self.settings.anchor_display)
            .subtree_context(&name)?;

        let scene_root = run.store.root_container();
        run.store
            .link_object(scene_root, anchor)
            .subtree_context(&name)?;

        if let Some(parent) = parent_anchor {
            run.store
                .set_parent(anchor, Some(parent))
                .subtree_context(&name)?;
        }

        self.rehome_objects(run, container, Some(anchor))
            .subtree_context(&name)?;

        // snapshot: children are consumed while we recurse
        let children = run
            .store
            .container_children(container)
            .subtree_context(&name)?;
        for child in children {
            self.convert_subtree(run, child, Some(anchor));
        }

        Ok(anchor)
    }

    /// Move the direct objects of `container` into the scene root.
    ///
    /// Objects without a parent get `anchor` as parent; existing parents are
    /// kept. Per-object failures are reported and skipped.
    fn rehome_objects(
        &self,
        run: &mut Run<'_>,
        container: ContainerId,
        anchor: Option<ObjectId>,
    ) -> DomainResult<()> {
        // snapshot: unlinking mutates the member list
        let objects = run.store.container_objects(container)?;
        let scene_root = run.store.root_container();

        for object in objects {
            match rehome_object(&mut *run.store, container, scene_root, object, anchor) {
                Ok(()) => run.report.stats.items_rehomed += 1,
                Err(e) => run.report.failure(&e),
            }
        }
        Ok(())
    }

    /// Move the objects of an abandoned subtree into the scene root so that
    /// removing its collections does not strand them.
    fn salvage(&self, run: &mut Run<'_>, container: ContainerId) {
        let mut pending = vec![container];
        let mut seen = HashSet::new();
        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Err(e) = self.rehome_objects(run, current, None) {
                debug!("salvage: skipping {}: {}", current, e);
                continue;
            }
            if let Ok(children) = run.store.container_children(current) {
                pending.extend(children.into_iter().filter(|c| !run.visited.contains(c)));
            }
        }
    }
}

fn rehome_object(
    store: &mut dyn SceneStore,
    container: ContainerId,
    scene_root: ContainerId,
    object: ObjectId,
    anchor: Option<ObjectId>,
) -> ConversionResult<()> {
    let name = store
        .object_name(object)
        .unwrap_or_else(|_| object.to_string());
    let element = || format!("object {name}");

    store.unlink_object(container, object).element_context(element)?;

    if !store
        .contains_object(scene_root, object)
        .element_context(element)?
    {
        store.link_object(scene_root, object).element_context(element)?;
    }

    if let Some(anchor) = anchor {
        if store.parent(object).element_context(element)?.is_none() {
            store
                .set_parent(object, Some(anchor))
                .element_context(element)?;
        }
    }
    Ok(())
}

fn container_label(store: &dyn SceneStore, container: ContainerId) -> String {
    store
        .container_name(container)
        .unwrap_or_else(|_| container.to_string())
}
