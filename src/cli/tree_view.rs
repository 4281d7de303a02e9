//! Tree rendering of the collection hierarchy and the empty-node forest.

use termtree::Tree;

use crate::domain::{ContainerId, DomainResult, ObjectId, ObjectKind};
use crate::infrastructure::traits::SceneStore;

pub trait TreeView {
    /// Collections from the scene root down, objects as leaves.
    fn collection_tree(&self) -> DomainResult<Tree<String>>;

    /// One tree per parentless object, following parent links.
    fn object_forest(&self) -> DomainResult<Vec<Tree<String>>>;
}

impl<S: SceneStore + ?Sized> TreeView for S {
    fn collection_tree(&self) -> DomainResult<Tree<String>> {
        let mut tree = container_tree(self, self.root_container())?;

        // containers nobody links (possible after partial failures)
        for container in self.containers() {
            if container == self.root_container() {
                continue;
            }
            let linked = self
                .containers()
                .into_iter()
                .map(|c| self.container_children(c))
                .collect::<DomainResult<Vec<_>>>()?
                .iter()
                .any(|children| children.contains(&container));
            if !linked {
                let mut orphan = container_tree(self, container)?;
                orphan.root = format!("{} (unlinked)", orphan.root);
                tree.push(orphan);
            }
        }
        Ok(tree)
    }

    fn object_forest(&self) -> DomainResult<Vec<Tree<String>>> {
        let mut forest = Vec::new();
        for object in self.objects() {
            if self.parent(object)?.is_none() {
                forest.push(object_tree(self, object)?);
            }
        }
        Ok(forest)
    }
}

fn object_label<S: SceneStore + ?Sized>(store: &S, object: ObjectId) -> DomainResult<String> {
    let name = store.object_name(object)?;
    Ok(match store.object_kind(object)? {
        ObjectKind::Anchor => format!("{name} [empty]"),
        ObjectKind::Item => name,
    })
}

fn container_tree<S: SceneStore + ?Sized>(
    store: &S,
    container: ContainerId,
) -> DomainResult<Tree<String>> {
    let mut tree = Tree::new(format!("{}/", store.container_name(container)?));
    for child in store.container_children(container)? {
        tree.push(container_tree(store, child)?);
    }
    for object in store.container_objects(container)? {
        tree.push(Tree::new(object_label(store, object)?));
    }
    Ok(tree)
}

fn object_tree<S: SceneStore + ?Sized>(store: &S, object: ObjectId) -> DomainResult<Tree<String>> {
    let mut tree = Tree::new(object_label(store, object)?);
    for child in store.object_children(object)? {
        tree.push(object_tree(store, child)?);
    }
    Ok(tree)
}
