//! # Kinema
//!
//! Runtime skeletal animation sampling and blending.
//!
//! A [`Skeleton`] is built once from a template hierarchy, plays an
//! [`Animation`] by stepping a time cursor, optionally blends with another
//! skeleton, and pushes the result into a live [`Scene`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kinema::prelude::*;
//!
//! let mut skeleton = Skeleton::from_hierarchy(&scene, rig_root)?;
//! skeleton.assign_animation(Arc::clone(&walk));
//! skeleton.bind(&scene, rig_root)?;
//!
//! // Every frame
//! skeleton.update(dt, &mut scene);
//! scene.update_matrix_world();
//! ```
//!
//! The workspace is split into:
//! - [`errors`] and [`settings`]: the error type and skeleton configuration
//! - [`scene`]: the node hierarchy poses are written into
//! - [`animation`]: keyframes, sampling, blending

pub use kinema_animation as animation;
pub use kinema_core::{errors, settings};
pub use kinema_scene as scene;

pub use glam;

pub use kinema_animation::{
    Animation, Interpolatable, Keyframe, KeyframeCursor, LocalPose, NodeTrack, PoseSlot, Skeleton,
};
pub use kinema_core::{KinemaError, Result, SkeletonSettings};
pub use kinema_scene::{Node, NodeHandle, Scene, Transform};

pub mod prelude {
    pub use crate::{
        Animation, Keyframe, KinemaError, LocalPose, NodeHandle, NodeTrack, Scene, Skeleton,
        SkeletonSettings,
    };
}
