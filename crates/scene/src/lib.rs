//! Scene graph: named nodes composed by parent reference, local transforms
//! resolved to world space on demand, capability flags instead of a class
//! hierarchy.
//!
//! # Invariants
//! - A node's parent always exists in the same scene; parenting never forms a cycle.
//! - Iteration follows creation order, so identical build sequences give
//!   identical traversals regardless of the random node ids.
//! - Collision is resolved against axis-aligned boxes only.

pub mod collision;
pub mod node;
pub mod prefab;
pub mod scene;

pub use collision::{Aabb, CollisionProxy, CollisionWorld};
pub use node::{Capabilities, Material, Mesh, Node, Primitive};
pub use prefab::{Prefab, PrefabNode};
pub use scene::{Scene, SceneError};
