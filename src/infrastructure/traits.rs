//! Host data access boundary
//!
//! The converters only talk to the scene through [`SceneStore`], so they can
//! run against the in-memory [`Scene`] or any other host that provides the
//! same primitives (and against fault-injecting wrappers in tests).

use crate::domain::{
    ContainerId, DisplayType, DomainResult, ObjectId, ObjectKind, Scene,
};

/// Scene-graph storage capability consumed by the converters.
///
/// Every list returned is an owned snapshot; mutating the store while
/// iterating one is safe.
pub trait SceneStore {
    /// The scene root container; never converted or removed.
    fn root_container(&self) -> ContainerId;

    /// All containers, root included.
    fn containers(&self) -> Vec<ContainerId>;

    /// All scene objects (anchors and items).
    fn objects(&self) -> Vec<ObjectId>;

    fn container_name(&self, container: ContainerId) -> DomainResult<String>;

    /// Direct member objects of a container.
    fn container_objects(&self, container: ContainerId) -> DomainResult<Vec<ObjectId>>;

    /// Direct child containers of a container.
    fn container_children(&self, container: ContainerId) -> DomainResult<Vec<ContainerId>>;

    /// Create an unlinked container named `name` (or a suffixed variant).
    fn new_container(&mut self, name: &str) -> DomainResult<ContainerId>;

    /// Make `child` a sub-container of `parent`.
    fn link_container(&mut self, parent: ContainerId, child: ContainerId) -> DomainResult<()>;

    fn remove_container(&mut self, container: ContainerId) -> DomainResult<()>;

    fn link_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()>;

    fn unlink_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()>;

    fn object_name(&self, object: ObjectId) -> DomainResult<String>;

    fn object_kind(&self, object: ObjectId) -> DomainResult<ObjectKind>;

    /// Create an anchor node named `name` (or a suffixed variant).
    fn new_anchor(&mut self, name: &str) -> DomainResult<ObjectId>;

    fn parent(&self, object: ObjectId) -> DomainResult<Option<ObjectId>>;

    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) -> DomainResult<()>;

    fn set_display_type(&mut self, object: ObjectId, display: DisplayType) -> DomainResult<()>;

    /// Containers currently holding `object` as a member.
    fn users_collection(&self, object: ObjectId) -> DomainResult<Vec<ContainerId>>;

    fn anchors(&self) -> Vec<ObjectId> {
        self.objects()
            .into_iter()
            .filter(|o| matches!(self.object_kind(*o), Ok(ObjectKind::Anchor)))
            .collect()
    }

    fn items(&self) -> Vec<ObjectId> {
        self.objects()
            .into_iter()
            .filter(|o| matches!(self.object_kind(*o), Ok(ObjectKind::Item)))
            .collect()
    }

    fn contains_object(&self, container: ContainerId, object: ObjectId) -> DomainResult<bool> {
        Ok(self.container_objects(container)?.contains(&object))
    }

    /// Objects whose parent is `object` (full scan).
    fn object_children(&self, object: ObjectId) -> DomainResult<Vec<ObjectId>> {
        let mut children = Vec::new();
        for candidate in self.objects() {
            if self.parent(candidate)? == Some(object) {
                children.push(candidate);
            }
        }
        Ok(children)
    }
}

impl SceneStore for Scene {
    fn root_container(&self) -> ContainerId {
        self.root()
    }

    fn containers(&self) -> Vec<ContainerId> {
        Scene::containers(self)
    }

    fn objects(&self) -> Vec<ObjectId> {
        Scene::objects(self)
    }

    fn container_name(&self, container: ContainerId) -> DomainResult<String> {
        Ok(self.container(container)?.name.clone())
    }

    fn container_objects(&self, container: ContainerId) -> DomainResult<Vec<ObjectId>> {
        Ok(self.container(container)?.objects.clone())
    }

    fn container_children(&self, container: ContainerId) -> DomainResult<Vec<ContainerId>> {
        Ok(self.container(container)?.children.clone())
    }

    fn new_container(&mut self, name: &str) -> DomainResult<ContainerId> {
        Ok(Scene::new_container(self, name))
    }

    fn link_container(&mut self, parent: ContainerId, child: ContainerId) -> DomainResult<()> {
        Scene::link_container(self, parent, child)
    }

    fn remove_container(&mut self, container: ContainerId) -> DomainResult<()> {
        Scene::remove_container(self, container)
    }

    fn link_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        Scene::link_object(self, container, object)
    }

    fn unlink_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        Scene::unlink_object(self, container, object)
    }

    fn object_name(&self, object: ObjectId) -> DomainResult<String> {
        Ok(self.object(object)?.name.clone())
    }

    fn object_kind(&self, object: ObjectId) -> DomainResult<ObjectKind> {
        Ok(self.object(object)?.kind)
    }

    fn new_anchor(&mut self, name: &str) -> DomainResult<ObjectId> {
        Ok(self.add_object(name, ObjectKind::Anchor))
    }

    fn parent(&self, object: ObjectId) -> DomainResult<Option<ObjectId>> {
        Ok(self.object(object)?.parent)
    }

    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) -> DomainResult<()> {
        Scene::set_parent(self, object, parent)
    }

    fn set_display_type(&mut self, object: ObjectId, display: DisplayType) -> DomainResult<()> {
        Scene::set_display_type(self, object, display)
    }

    fn users_collection(&self, object: ObjectId) -> DomainResult<Vec<ContainerId>> {
        Scene::users_collection(self, object)
    }

    fn anchors(&self) -> Vec<ObjectId> {
        Scene::anchors(self)
    }

    fn items(&self) -> Vec<ObjectId> {
        Scene::items(self)
    }

    fn object_children(&self, object: ObjectId) -> DomainResult<Vec<ObjectId>> {
        Scene::object_children(self, object)
    }
}
