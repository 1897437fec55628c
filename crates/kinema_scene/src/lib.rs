//! Scene Graph
//!
//! The node hierarchy that animated poses are written into:
//! - [`Node`]: hierarchy links and a local transform
//! - [`Transform`]: position, rotation, scale with matrix caching and dirty tracking
//! - [`Scene`]: node storage, naming and name lookup
//! - [`transform_system`]: world matrix propagation, decoupled from `Scene`
//!
//! Nodes are addressed by [`NodeHandle`], a generational key. A handle held
//! after its node was removed simply fails to resolve, which makes it safe to
//! keep as a non-owning back-reference.

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
