//! Skeletal Animation
//!
//! Time-stepping, keyframe sampling and two-pose blending:
//! - [`Animation`]: immutable per-node keyframe tracks, shared via `Arc`
//! - [`Skeleton`]: owns a pose slot per node, a time cursor and seek hints
//! - [`PoseSlot`]: one node's sampled [`LocalPose`] and its scene target
//! - [`seek`]: cursor-cached keyframe interval search
//!
//! Poses are written into a [`kinema_scene::Scene`] by
//! [`Skeleton::push_pose`]; nothing else here touches the scene.

mod blend;
pub mod clip;
pub mod pose;
pub mod seek;
pub mod skeleton;
pub mod values;

pub use clip::{Animation, Keyframe, NodeTrack};
pub use pose::{LocalPose, PoseSlot};
pub use seek::KeyframeCursor;
pub use skeleton::Skeleton;
pub use values::Interpolatable;
