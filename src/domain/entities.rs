//! Domain entities: scene objects, containers and their handles

use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Handle to a scene object (anchor node or item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) Index);

/// Handle to a container (collection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub(crate) Index);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "object#{slot}.{generation}")
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "container#{slot}.{generation}")
    }
}

/// What a scene object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Non-rendering placeholder used only for hierarchy (an "empty")
    Anchor,
    /// Leaf payload entity
    Item,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Anchor => write!(f, "anchor"),
            ObjectKind::Item => write!(f, "item"),
        }
    }
}

/// How an anchor node is drawn by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayType {
    #[default]
    PlainAxes,
    Arrows,
    SingleArrow,
    Circle,
    Cube,
    Sphere,
    Cone,
    Image,
}

impl DisplayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::PlainAxes => "PLAIN_AXES",
            DisplayType::Arrows => "ARROWS",
            DisplayType::SingleArrow => "SINGLE_ARROW",
            DisplayType::Circle => "CIRCLE",
            DisplayType::Cube => "CUBE",
            DisplayType::Sphere => "SPHERE",
            DisplayType::Cone => "CONE",
            DisplayType::Image => "IMAGE",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DisplayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAIN_AXES" => Ok(DisplayType::PlainAxes),
            "ARROWS" => Ok(DisplayType::Arrows),
            "SINGLE_ARROW" => Ok(DisplayType::SingleArrow),
            "CIRCLE" => Ok(DisplayType::Circle),
            "CUBE" => Ok(DisplayType::Cube),
            "SPHERE" => Ok(DisplayType::Sphere),
            "CONE" => Ok(DisplayType::Cone),
            "IMAGE" => Ok(DisplayType::Image),
            other => Err(format!("unknown display type: {other}")),
        }
    }
}

/// A scene object stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject {
    /// Unique name across all scene objects
    pub name: String,
    pub kind: ObjectKind,
    /// Parent object, None for roots
    pub parent: Option<ObjectId>,
    /// Only anchors carry a display type
    pub display_type: Option<DisplayType>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        let display_type = match kind {
            ObjectKind::Anchor => Some(DisplayType::default()),
            ObjectKind::Item => None,
        };
        Self {
            name: name.into(),
            kind,
            parent: None,
            display_type,
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.kind == ObjectKind::Anchor
    }
}

/// A named grouping construct holding objects and child containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    /// Unique name across all containers
    pub name: String,
    /// Member objects, in link order
    pub objects: Vec<ObjectId>,
    /// Child containers, in link order
    pub children: Vec<ContainerId>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            children: Vec::new(),
        }
    }
}
