//! Hierarchy queries and cleanup shared by both converters.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::error::ConversionError;
use crate::application::report::ConversionReport;
use crate::domain::{ContainerId, DomainResult, ObjectId, ObjectKind};
use crate::infrastructure::traits::SceneStore;

/// How the descendant closure of a root node is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureStrategy {
    /// Repeated full scans until no node is added. O(N²).
    #[default]
    Scan,
    /// Precomputed parent→children index walked depth-first. O(N).
    Index,
}

impl fmt::Display for ClosureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosureStrategy::Scan => write!(f, "scan"),
            ClosureStrategy::Index => write!(f, "index"),
        }
    }
}

impl std::str::FromStr for ClosureStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(ClosureStrategy::Scan),
            "index" => Ok(ClosureStrategy::Index),
            other => Err(format!("unknown closure strategy: {other}")),
        }
    }
}

/// Non-root containers not listed as a child by any other non-root container.
///
/// Containers hanging directly off the root still count as top-level.
pub fn top_level_containers(store: &dyn SceneStore) -> DomainResult<Vec<ContainerId>> {
    let root = store.root_container();
    let candidates: Vec<ContainerId> = store
        .containers()
        .into_iter()
        .filter(|c| *c != root)
        .collect();

    let mut top_level = Vec::new();
    for candidate in &candidates {
        let mut listed = false;
        for other in candidates.iter().filter(|o| *o != candidate) {
            if store.container_children(*other)?.contains(candidate) {
                listed = true;
                break;
            }
        }
        if !listed {
            top_level.push(*candidate);
        }
    }
    debug!("top_level_containers: {} of {}", top_level.len(), candidates.len());
    Ok(top_level)
}

/// Anchor nodes without a parent, in object order.
pub fn root_anchors(store: &dyn SceneStore) -> DomainResult<Vec<ObjectId>> {
    let mut roots = Vec::new();
    for object in store.objects() {
        if store.object_kind(object)? == ObjectKind::Anchor && store.parent(object)?.is_none() {
            roots.push(object);
        }
    }
    Ok(roots)
}

/// `root` plus every object whose parent chain reaches `root`.
///
/// The root comes first; the remaining order depends on the strategy.
pub fn descendant_closure(
    store: &dyn SceneStore,
    root: ObjectId,
    strategy: ClosureStrategy,
) -> DomainResult<Vec<ObjectId>> {
    match strategy {
        ClosureStrategy::Scan => closure_by_scan(store, root),
        ClosureStrategy::Index => closure_by_index(store, root),
    }
}

fn closure_by_scan(store: &dyn SceneStore, root: ObjectId) -> DomainResult<Vec<ObjectId>> {
    let objects = store.objects();
    let mut members = HashSet::from([root]);
    let mut closure = vec![root];

    loop {
        let mut grew = false;
        for object in &objects {
            if members.contains(object) {
                continue;
            }
            if let Some(parent) = store.parent(*object)? {
                if members.contains(&parent) {
                    members.insert(*object);
                    closure.push(*object);
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }
    Ok(closure)
}

fn closure_by_index(store: &dyn SceneStore, root: ObjectId) -> DomainResult<Vec<ObjectId>> {
    let mut children: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
    for object in store.objects() {
        if let Some(parent) = store.parent(object)? {
            children.entry(parent).or_default().push(object);
        }
    }

    let mut visited = HashSet::new();
    let mut closure = Vec::new();
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        closure.push(current);
        if let Some(kids) = children.get(&current) {
            // reversed so siblings come out in object order
            stack.extend(kids.iter().rev().copied());
        }
    }
    Ok(closure)
}

/// Remove every non-root container, visited or not.
///
/// Removal failures are reported as warnings. Returns the number removed.
pub fn cleanup_containers(store: &mut dyn SceneStore, report: &mut ConversionReport) -> usize {
    let root = store.root_container();
    let doomed: Vec<ContainerId> = store
        .containers()
        .into_iter()
        .filter(|c| *c != root)
        .collect();

    let mut removed = 0;
    for container in doomed {
        let name = store
            .container_name(container)
            .unwrap_or_else(|_| container.to_string());
        match store.remove_container(container) {
            Ok(()) => {
                debug!("cleanup: removed collection {}", name);
                removed += 1;
            }
            Err(e) => report.failure(&ConversionError::element(format!("collection {name}"), e)),
        }
    }
    removed
}
