//! Arena-backed in-memory scene store.

use generational_arena::Arena;
use tracing::instrument;

use crate::domain::entities::{
    Container, ContainerId, DisplayType, ObjectId, ObjectKind, SceneObject,
};
use crate::domain::error::{DomainError, DomainResult};

/// Default name of the scene root container.
pub const DEFAULT_ROOT_NAME: &str = "Scene Collection";

/// Scene graph storage: objects and containers addressed by stable handles.
///
/// Uses generational arenas so handles to removed entities are detected as
/// stale instead of silently aliasing a reused slot. Insertion order is tracked
/// separately so enumeration is deterministic.
#[derive(Debug)]
pub struct Scene {
    objects: Arena<SceneObject>,
    containers: Arena<Container>,
    object_order: Vec<ObjectId>,
    container_order: Vec<ContainerId>,
    root: ContainerId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME)
    }
}

impl Scene {
    pub fn new(root_name: &str) -> Self {
        let mut containers = Arena::new();
        let root = ContainerId(containers.insert(Container::new(root_name)));
        Self {
            objects: Arena::new(),
            containers,
            object_order: Vec::new(),
            container_order: vec![root],
            root,
        }
    }

    pub fn root(&self) -> ContainerId {
        self.root
    }

    // ---------------------------------------------------------------
    // lookups
    // ---------------------------------------------------------------

    pub fn object(&self, id: ObjectId) -> DomainResult<&SceneObject> {
        self.objects.get(id.0).ok_or(DomainError::StaleObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> DomainResult<&mut SceneObject> {
        self.objects.get_mut(id.0).ok_or(DomainError::StaleObject(id))
    }

    pub fn container(&self, id: ContainerId) -> DomainResult<&Container> {
        self.containers
            .get(id.0)
            .ok_or(DomainError::StaleContainer(id))
    }

    fn container_mut(&mut self, id: ContainerId) -> DomainResult<&mut Container> {
        self.containers
            .get_mut(id.0)
            .ok_or(DomainError::StaleContainer(id))
    }

    /// All containers in creation order, root first.
    pub fn containers(&self) -> Vec<ContainerId> {
        self.container_order.clone()
    }

    /// All objects in creation order.
    pub fn objects(&self) -> Vec<ObjectId> {
        self.object_order.clone()
    }

    pub fn anchors(&self) -> Vec<ObjectId> {
        self.objects_of_kind(ObjectKind::Anchor)
    }

    pub fn items(&self) -> Vec<ObjectId> {
        self.objects_of_kind(ObjectKind::Item)
    }

    fn objects_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId> {
        self.object_order
            .iter()
            .copied()
            .filter(|id| self.objects.get(id.0).is_some_and(|o| o.kind == kind))
            .collect()
    }

    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.object_order
            .iter()
            .copied()
            .find(|id| self.objects.get(id.0).is_some_and(|o| o.name == name))
    }

    pub fn find_container(&self, name: &str) -> Option<ContainerId> {
        self.container_order
            .iter()
            .copied()
            .find(|id| self.containers.get(id.0).is_some_and(|c| c.name == name))
    }

    /// The container listing `id` as a child, if any.
    pub fn container_parent(&self, id: ContainerId) -> DomainResult<Option<ContainerId>> {
        self.container(id)?;
        Ok(self
            .container_order
            .iter()
            .copied()
            .find(|c| self.containers.get(c.0).is_some_and(|c| c.children.contains(&id))))
    }

    /// Objects whose parent is `id`, in object order.
    pub fn object_children(&self, id: ObjectId) -> DomainResult<Vec<ObjectId>> {
        self.object(id)?;
        Ok(self
            .object_order
            .iter()
            .copied()
            .filter(|o| self.objects.get(o.0).is_some_and(|o| o.parent == Some(id)))
            .collect())
    }

    /// Containers currently holding `id` as a member.
    pub fn users_collection(&self, id: ObjectId) -> DomainResult<Vec<ContainerId>> {
        self.object(id)?;
        Ok(self
            .container_order
            .iter()
            .copied()
            .filter(|c| self.containers.get(c.0).is_some_and(|c| c.objects.contains(&id)))
            .collect())
    }

    // ---------------------------------------------------------------
    // naming
    // ---------------------------------------------------------------

    /// First free name of the form `base`, `base.001`, `base.002`, ...
    fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn unique_object_name(&self, base: &str) -> String {
        Self::unique_name(base, |n| self.objects.iter().any(|(_, o)| o.name == n))
    }

    fn unique_container_name(&self, base: &str) -> String {
        Self::unique_name(base, |n| self.containers.iter().any(|(_, c)| c.name == n))
    }

    // ---------------------------------------------------------------
    // mutation
    // ---------------------------------------------------------------

    #[instrument(level = "trace", skip(self))]
    pub fn add_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let name = self.unique_object_name(name);
        let id = ObjectId(self.objects.insert(SceneObject::new(name, kind)));
        self.object_order.push(id);
        id
    }

    /// Create an unlinked container.
    #[instrument(level = "trace", skip(self))]
    pub fn new_container(&mut self, name: &str) -> ContainerId {
        let name = self.unique_container_name(name);
        let id = ContainerId(self.containers.insert(Container::new(name)));
        self.container_order.push(id);
        id
    }

    #[instrument(level = "trace", skip(self))]
    pub fn link_container(&mut self, parent: ContainerId, child: ContainerId) -> DomainResult<()> {
        let child_name = self.container(child)?.name.clone();
        let parent_name = self.container(parent)?.name.clone();

        if let Some(existing) = self.container_parent(child)? {
            return Err(DomainError::ContainerAlreadyLinked {
                child: child_name,
                parent: self.container(existing)?.name.clone(),
            });
        }
        if child == self.root || child == parent || self.container_is_ancestor(child, parent)? {
            return Err(DomainError::ContainerCycle {
                child: child_name,
                parent: parent_name,
            });
        }

        self.container_mut(parent)?.children.push(child);
        Ok(())
    }

    /// True if `ancestor` appears on the container-parent chain of `id`.
    fn container_is_ancestor(&self, ancestor: ContainerId, id: ContainerId) -> DomainResult<bool> {
        let mut current = self.container_parent(id)?;
        while let Some(c) = current {
            if c == ancestor {
                return Ok(true);
            }
            current = self.container_parent(c)?;
        }
        Ok(false)
    }

    /// Remove a container. Member objects survive; child containers become parentless.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_container(&mut self, id: ContainerId) -> DomainResult<()> {
        if id == self.root {
            return Err(DomainError::RootContainer);
        }
        self.container(id)?;

        for (_, container) in self.containers.iter_mut() {
            container.children.retain(|c| *c != id);
        }
        self.containers.remove(id.0);
        self.container_order.retain(|c| *c != id);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn link_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        let object_name = self.object(object)?.name.clone();
        let target = self.container_mut(container)?;
        if target.objects.contains(&object) {
            return Err(DomainError::AlreadyLinked {
                object: object_name,
                container: target.name.clone(),
            });
        }
        target.objects.push(object);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn unlink_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        let object_name = self.object(object)?.name.clone();
        let target = self.container_mut(container)?;
        let Some(pos) = target.objects.iter().position(|o| *o == object) else {
            return Err(DomainError::NotLinked {
                object: object_name,
                container: target.name.clone(),
            });
        };
        target.objects.remove(pos);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) -> DomainResult<()> {
        if let Some(p) = parent {
            let parent_name = self.object(p)?.name.clone();
            let object_name = self.object(object)?.name.clone();
            // walk up from the new parent; meeting `object` means a cycle
            let mut current = Some(p);
            while let Some(c) = current {
                if c == object {
                    return Err(DomainError::ParentCycle {
                        object: object_name,
                        parent: parent_name,
                    });
                }
                current = self.object(c)?.parent;
            }
        }
        self.object_mut(object)?.parent = parent;
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_display_type(
        &mut self,
        object: ObjectId,
        display_type: DisplayType,
    ) -> DomainResult<()> {
        let target = self.object_mut(object)?;
        if !target.is_anchor() {
            return Err(DomainError::NotAnAnchor(target.name.clone()));
        }
        target.display_type = Some(display_type);
        Ok(())
    }
}
