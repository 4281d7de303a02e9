//! Scene files: TOML description of collections, empties and items
//!
//! ```toml
//! [root]
//! name = "Scene Collection"
//! children = ["Building"]
//!
//! [[objects]]
//! name = "Door"
//! kind = "item"
//!
//! [[collections]]
//! name = "Building"
//! objects = ["Door"]
//! ```
//!
//! Names are references: every name listed under `objects`, `children` or
//! `parent` must be declared exactly once.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{ContainerId, DisplayType, DomainError, ObjectId, ObjectKind, Scene};
use crate::infrastructure::{InfraError, InfraResult};

/// Error building a scene from a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SceneFormatError {
    pub message: String,
}

impl SceneFormatError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<DomainError> for SceneFormatError {
    fn from(e: DomainError) -> Self {
        Self::new(e.to_string())
    }
}

/// The scene root collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub objects: Vec<String>,
    pub children: Vec<String>,
}

/// One scene object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
}

/// One non-root collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Serializable form of a [`Scene`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub root: RootSection,
    pub objects: Vec<ObjectEntry>,
    pub collections: Vec<CollectionEntry>,
}

impl SceneDocument {
    pub fn from_toml_str(content: &str) -> Result<Self, SceneFormatError> {
        toml::from_str(content).map_err(|e| SceneFormatError::new(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, SceneFormatError> {
        toml::to_string_pretty(self).map_err(|e| SceneFormatError::new(e.to_string()))
    }

    /// Capture the current state of a scene.
    pub fn from_scene(scene: &Scene) -> Result<Self, SceneFormatError> {
        let object_name = |id: ObjectId| -> Result<String, SceneFormatError> {
            Ok(scene.object(id)?.name.clone())
        };
        let container_name = |id: ContainerId| -> Result<String, SceneFormatError> {
            Ok(scene.container(id)?.name.clone())
        };

        let mut objects = Vec::new();
        for id in scene.objects() {
            let object = scene.object(id)?;
            objects.push(ObjectEntry {
                name: object.name.clone(),
                kind: object.kind,
                parent: object.parent.map(object_name).transpose()?,
                display_type: object.display_type,
            });
        }

        let root_id = scene.root();
        let root = scene.container(root_id)?;
        let root = RootSection {
            name: Some(root.name.clone()),
            objects: root
                .objects
                .iter()
                .map(|o| object_name(*o))
                .collect::<Result<_, _>>()?,
            children: root
                .children
                .iter()
                .map(|c| container_name(*c))
                .collect::<Result<_, _>>()?,
        };

        let mut collections = Vec::new();
        for id in scene.containers().into_iter().filter(|c| *c != root_id) {
            let container = scene.container(id)?;
            collections.push(CollectionEntry {
                name: container.name.clone(),
                objects: container
                    .objects
                    .iter()
                    .map(|o| object_name(*o))
                    .collect::<Result<_, _>>()?,
                children: container
                    .children
                    .iter()
                    .map(|c| container_name(*c))
                    .collect::<Result<_, _>>()?,
            });
        }

        Ok(Self {
            root,
            objects,
            collections,
        })
    }

    /// Build a scene; `default_root` names the root when the document does not.
    pub fn into_scene(self, default_root: &str) -> Result<Scene, SceneFormatError> {
        let root_name = self.root.name.as_deref().unwrap_or(default_root);
        let mut scene = Scene::new(root_name);

        let mut objects: HashMap<String, ObjectId> = HashMap::new();
        for entry in &self.objects {
            if objects.contains_key(&entry.name) {
                return Err(SceneFormatError::new(format!(
                    "duplicate object name '{}'",
                    entry.name
                )));
            }
            let id = scene.add_object(&entry.name, entry.kind);
            if let Some(display) = entry.display_type {
                scene.set_display_type(id, display)?;
            }
            objects.insert(entry.name.clone(), id);
        }

        let lookup_object = |name: &str| -> Result<ObjectId, SceneFormatError> {
            objects
                .get(name)
                .copied()
                .ok_or_else(|| DomainError::UnknownObject(name.to_string()).into())
        };

        for entry in &self.objects {
            if let Some(parent) = &entry.parent {
                scene.set_parent(lookup_object(&entry.name)?, Some(lookup_object(parent)?))?;
            }
        }

        let mut containers: HashMap<String, ContainerId> = HashMap::new();
        let mut reserved: HashSet<&str> = HashSet::from([root_name]);
        for entry in &self.collections {
            if !reserved.insert(entry.name.as_str()) {
                return Err(SceneFormatError::new(format!(
                    "duplicate collection name '{}'",
                    entry.name
                )));
            }
            containers.insert(entry.name.clone(), scene.new_container(&entry.name));
        }

        let lookup_container = |name: &str| -> Result<ContainerId, SceneFormatError> {
            containers
                .get(name)
                .copied()
                .ok_or_else(|| DomainError::UnknownContainer(name.to_string()).into())
        };

        let root = scene.root();
        for name in &self.root.objects {
            scene.link_object(root, lookup_object(name)?)?;
        }
        for name in &self.root.children {
            scene.link_container(root, lookup_container(name)?)?;
        }
        for entry in &self.collections {
            let id = lookup_container(&entry.name)?;
            for name in &entry.objects {
                scene.link_object(id, lookup_object(name)?)?;
            }
            for name in &entry.children {
                scene.link_container(id, lookup_container(name)?)?;
            }
        }

        debug!(
            "into_scene: {} objects, {} collections",
            objects.len(),
            containers.len()
        );
        Ok(scene)
    }
}

/// Read and build a scene from a TOML file.
pub fn load_scene(path: &Path, default_root: &str) -> InfraResult<Scene> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
    let format_err = |e: SceneFormatError| InfraError::SceneFormat {
        path: path.to_path_buf(),
        message: e.message,
    };
    SceneDocument::from_toml_str(&content)
        .and_then(|doc| doc.into_scene(default_root))
        .map_err(format_err)
}

/// Write a scene to a TOML file, replacing it atomically.
pub fn save_scene(scene: &Scene, path: &Path) -> InfraResult<()> {
    let format_err = |e: SceneFormatError| InfraError::SceneFormat {
        path: path.to_path_buf(),
        message: e.message,
    };
    let content = SceneDocument::from_scene(scene)
        .and_then(|doc| doc.to_toml_string())
        .map_err(format_err)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| InfraError::io(format!("create temp file in {}", dir.display()), e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| InfraError::io(format!("write {}", tmp.path().display()), e))?;
    tmp.persist(path)
        .map_err(|e| InfraError::io(format!("replace {}", path.display()), e.error))?;
    debug!("save_scene: wrote {}", path.display());
    Ok(())
}
