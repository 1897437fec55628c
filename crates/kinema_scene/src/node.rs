use crate::NodeHandle;
use crate::transform::Transform;
use glam::Affine3A;

/// A minimal scene node containing only essential hot data.
///
/// Names live in the owning [`Scene`](crate::Scene) rather than on the node,
/// keeping nodes small for the per-frame transform traversal.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node handle (None for root nodes)
    pub(crate) parent: Option<NodeHandle>,
    /// Child node handles
    pub(crate) children: Vec<NodeHandle>,

    /// Local transform written by animation and read by the transform system
    pub transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the world transformation matrix computed by the last
    /// [`update_hierarchy`](crate::transform_system::update_hierarchy) pass.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
