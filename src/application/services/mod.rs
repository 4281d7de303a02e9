//! Application services
//!
//! Concrete converters that orchestrate hierarchy rewrites. Converters depend
//! on the [`SceneStore`](crate::infrastructure::traits::SceneStore) boundary
//! trait but are themselves concrete structs, not traits.

mod group_to_node;
pub mod hierarchy;
mod node_to_group;

pub use group_to_node::GroupToNodeConverter;
pub use hierarchy::ClosureStrategy;
pub use node_to_group::NodeToGroupConverter;
