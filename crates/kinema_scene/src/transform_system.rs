//! Transform System
//!
//! Propagates local transforms down the hierarchy into world matrices.
//! Decoupled from [`Scene`](crate::Scene): it only borrows the node map and
//! the root list, so callers can run it while holding other scene state.
//!
//! Only nodes whose local transform is dirty, or whose parent's world matrix
//! changed in the same pass, have their world matrix recomputed.

use glam::Affine3A;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::NodeHandle;
use crate::node::Node;

/// Updates world matrices for every hierarchy under `roots`.
///
/// Uses an explicit stack, so arbitrarily deep chains do not overflow.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: SmallVec<[(NodeHandle, Affine3A, bool); 32]> = SmallVec::new();

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    drain_stack(nodes, &mut stack);
}

/// Updates the subtree starting at `root_handle`, taking the parent's
/// current world matrix as the starting point.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    let Some(node) = nodes.get(root_handle) else {
        return;
    };

    let parent_world = node
        .parent
        .and_then(|parent| nodes.get(parent))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack: SmallVec<[(NodeHandle, Affine3A, bool); 32]> = SmallVec::new();
    stack.push((root_handle, parent_world, true));

    drain_stack(nodes, &mut stack);
}

fn drain_stack(
    nodes: &mut SlotMap<NodeHandle, Node>,
    stack: &mut SmallVec<[(NodeHandle, Affine3A, bool); 32]>,
) {
    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;

        // Reverse order keeps children processed first-to-last
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}
