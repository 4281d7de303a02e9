//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::{ContainerId, ObjectId};

/// Domain errors represent violations of scene store invariants.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("stale object reference: {0}")]
    StaleObject(ObjectId),

    #[error("stale collection reference: {0}")]
    StaleContainer(ContainerId),

    #[error("object '{object}' is already linked to collection '{container}'")]
    AlreadyLinked { object: String, container: String },

    #[error("object '{object}' is not linked to collection '{container}'")]
    NotLinked { object: String, container: String },

    #[error("collection '{child}' is already a child of '{parent}'")]
    ContainerAlreadyLinked { child: String, parent: String },

    #[error("linking collection '{child}' under '{parent}' would create a cycle")]
    ContainerCycle { child: String, parent: String },

    #[error("parenting '{object}' to '{parent}' would create a cycle")]
    ParentCycle { object: String, parent: String },

    #[error("the scene root collection cannot be removed")]
    RootContainer,

    #[error("object '{0}' is not an empty")]
    NotAnAnchor(String),

    #[error("no object named '{0}'")]
    UnknownObject(String),

    #[error("no collection named '{0}'")]
    UnknownContainer(String),

    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// Result type for scene store operations.
pub type DomainResult<T> = Result<T, DomainError>;
