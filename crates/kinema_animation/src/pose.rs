use glam::{Quat, Vec3};
use kinema_scene::{NodeHandle, Scene};

use crate::values::Interpolatable;

/// A node's local transform at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalPose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

impl Default for LocalPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Interpolatable for LocalPose {
    /// Lerps position and scale, slerps rotation. Exact at both ends.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        if t <= 0.0 {
            return start;
        }
        if t >= 1.0 {
            return end;
        }
        Self {
            position: Vec3::interpolate_linear(start.position, end.position, t),
            rotation: Quat::interpolate_linear(start.rotation, end.rotation, t),
            scale: Vec3::interpolate_linear(start.scale, end.scale, t),
        }
    }
}

/// Per-node storage for the most recently computed pose.
///
/// `target` is a generational handle into a [`Scene`]; it never keeps the
/// node alive, and a handle whose node was removed resolves to nothing.
#[derive(Debug, Clone)]
pub struct PoseSlot {
    node_name: String,
    pose: LocalPose,
    written: bool,
    target: Option<NodeHandle>,
}

impl PoseSlot {
    #[must_use]
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            pose: LocalPose::IDENTITY,
            written: false,
            target: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &LocalPose {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.pose.scale
    }

    /// Whether the pose was written since the last push.
    #[inline]
    #[must_use]
    pub fn is_written(&self) -> bool {
        self.written
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<NodeHandle> {
        self.target
    }

    /// Replaces the back-reference. `None` disables pushing for this slot.
    #[inline]
    pub fn set_target(&mut self, target: Option<NodeHandle>) {
        self.target = target;
    }

    pub fn write_transform(&mut self, position: Vec3, rotation: Quat, scale: Vec3) {
        self.write_pose(LocalPose {
            position,
            rotation,
            scale,
        });
    }

    #[inline]
    pub fn write_pose(&mut self, pose: LocalPose) {
        self.pose = pose;
        self.written = true;
    }

    /// Copies a written pose into the target node and clears the written flag.
    ///
    /// Unbound slots and targets no longer in the scene are silently skipped.
    pub fn push_to_target(&mut self, scene: &mut Scene) {
        if self.written
            && let Some(handle) = self.target
            && let Some(node) = scene.get_node_mut(handle)
        {
            let transform = &mut node.transform;
            transform.position = self.pose.position;
            transform.rotation = self.pose.rotation;
            transform.scale = self.pose.scale;
            if !transform.is_dirty() {
                transform.mark_dirty();
            }
        }
        self.written = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_without_target_clears_written() {
        let mut scene = Scene::new();
        let mut slot = PoseSlot::new("hips");
        slot.write_transform(Vec3::X, Quat::IDENTITY, Vec3::ONE);
        assert!(slot.is_written());

        slot.push_to_target(&mut scene);
        assert!(!slot.is_written());
    }

    #[test]
    fn push_writes_target_and_marks_dirty() {
        let mut scene = Scene::new();
        let node = scene.create_node_with_name("hips");
        scene.update_matrix_world();
        assert!(!scene.get_node(node).unwrap().transform.is_dirty());

        let mut slot = PoseSlot::new("hips");
        slot.set_target(Some(node));
        slot.write_transform(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_z(0.5), Vec3::splat(2.0));
        slot.push_to_target(&mut scene);

        let transform = &scene.get_node(node).unwrap().transform;
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::from_rotation_z(0.5));
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert!(transform.is_dirty());
    }

    #[test]
    fn unwritten_slot_leaves_target_alone() {
        let mut scene = Scene::new();
        let node = scene.create_node_with_name("hips");
        scene.get_node_mut(node).unwrap().transform.position = Vec3::Y;

        let mut slot = PoseSlot::new("hips");
        slot.set_target(Some(node));
        slot.push_to_target(&mut scene);

        assert_eq!(scene.get_node(node).unwrap().transform.position, Vec3::Y);
    }

    #[test]
    fn removed_target_is_a_no_op() {
        let mut scene = Scene::new();
        let node = scene.create_node_with_name("hips");

        let mut slot = PoseSlot::new("hips");
        slot.set_target(Some(node));
        scene.remove_node(node);

        slot.write_transform(Vec3::X, Quat::IDENTITY, Vec3::ONE);
        slot.push_to_target(&mut scene);
        assert!(!slot.is_written());
    }

    #[test]
    fn pose_interpolation_is_exact_at_ends() {
        let a = LocalPose {
            position: Vec3::new(0.1, 0.2, 0.3),
            rotation: Quat::from_rotation_x(0.7),
            scale: Vec3::splat(0.9),
        };
        let b = LocalPose {
            position: Vec3::new(5.0, -1.0, 2.0),
            rotation: Quat::from_rotation_y(-1.1),
            scale: Vec3::splat(1.3),
        };
        assert_eq!(LocalPose::interpolate_linear(a, b, 0.0), a);
        assert_eq!(LocalPose::interpolate_linear(a, b, 1.0), b);
    }
}
