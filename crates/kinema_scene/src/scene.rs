use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;

use crate::NodeHandle;
use crate::node::Node;
use crate::transform_system;

/// Scene graph container
///
/// Owns the node storage, the root list and node names. Animation samplers
/// hold [`NodeHandle`]s into it without extending any node's lifetime.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    names: SecondaryMap<NodeHandle, String>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node Creation & Removal
    // ========================================================================

    /// Adds an unnamed node at the root level.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    /// Adds a named node at the root level.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        let handle = self.create_node();
        self.names.insert(handle, name.to_string());
        handle
    }

    /// Adds a node to the scene at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };

        let children = node.children.clone();
        let parent = node.parent;

        for child in children {
            self.remove_node(child);
        }

        if let Some(parent_handle) = parent {
            if let Some(parent) = self.nodes.get_mut(parent_handle)
                && let Some(pos) = parent.children.iter().position(|&x| x == handle)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        self.names.remove(handle);
        self.nodes.remove(handle);
    }

    /// Makes `child` a child of `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach!");
            return;
        }
        if self.is_ancestor_of(child, parent) {
            log::warn!("Cannot attach node under its own descendant!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes[child].parent;
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        self.nodes[parent].children.push(child);

        // 3. Update child; its world matrix now depends on a different chain
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
    }

    /// Whether `ancestor` appears on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    // ========================================================================
    // Names
    // ========================================================================

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if self.nodes.contains_key(handle) {
            self.names.insert(handle, name.to_string());
        }
    }

    // ========================================================================
    // Hierarchy Queries
    // ========================================================================

    /// Collects `root` and all its descendants in depth-first pre-order.
    ///
    /// Returns an empty list when `root` is not a live node.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut result = Vec::new();
        let mut stack: SmallVec<[NodeHandle; 32]> = SmallVec::new();
        stack.push(root);

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            result.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }

        result
    }

    /// Finds the first node named `name` under `root` (inclusive), depth-first.
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.collect_subtree(root)
            .into_iter()
            .find(|&handle| self.get_name(handle) == Some(name))
    }

    /// Builds a name → handle index over the subtree at `root`.
    ///
    /// When several nodes share a name the first one in depth-first order wins,
    /// matching [`find_node_by_name`](Self::find_node_by_name).
    #[must_use]
    pub fn build_name_index(&self, root: NodeHandle) -> FxHashMap<&str, NodeHandle> {
        let mut index = FxHashMap::default();
        for handle in self.collect_subtree(root) {
            if let Some(name) = self.get_name(handle) {
                index.entry(name).or_insert(handle);
            }
        }
        index
    }

    // ========================================================================
    // Transform Update
    // ========================================================================

    /// Recomputes world matrices for every dirty node and its descendants.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }
}
