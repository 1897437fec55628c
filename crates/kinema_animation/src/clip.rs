use glam::{Quat, Vec3};
use kinema_core::{KinemaError, Result};

use crate::pose::LocalPose;

/// A timestamped local transform sample on one node's track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Keyframe {
    #[must_use]
    pub fn new(time: f64, position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            time,
            position,
            rotation,
            scale,
        }
    }

    /// A key that only moves the node; rotation and scale stay identity.
    #[must_use]
    pub fn from_position(time: f64, position: Vec3) -> Self {
        Self::new(time, position, Quat::IDENTITY, Vec3::ONE)
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> LocalPose {
        LocalPose {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

/// The keyframes of a single node, ascending by time.
#[derive(Debug, Clone)]
pub struct NodeTrack {
    pub node_name: String,
    pub keys: Vec<Keyframe>,
}

impl NodeTrack {
    #[must_use]
    pub fn new(node_name: impl Into<String>, keys: Vec<Keyframe>) -> Self {
        Self {
            node_name: node_name.into(),
            keys,
        }
    }

    /// Time of the last key, `0.0` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.time)
    }
}

/// A named set of per-node tracks.
///
/// Immutable once built; share it between skeletons with `Arc<Animation>`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub duration: f64,
    pub tracks: Vec<NodeTrack>,
}

impl Animation {
    /// Builds an animation whose duration is the latest key time over all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<NodeTrack>) -> Self {
        let duration = tracks
            .iter()
            .map(NodeTrack::end_time)
            .fold(0.0_f64, f64::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// Builds an animation with an explicit duration. A duration shorter than
    /// the last key is raised to it.
    #[must_use]
    pub fn with_duration(name: impl Into<String>, duration: f64, tracks: Vec<NodeTrack>) -> Self {
        let mut animation = Self::new(name, tracks);
        animation.duration = animation.duration.max(duration);
        animation
    }

    #[must_use]
    pub fn track(&self, node_name: &str) -> Option<&NodeTrack> {
        self.tracks.iter().find(|t| t.node_name == node_name)
    }

    /// Checks that every key time is finite and that each track is sorted.
    ///
    /// Sampling never calls this; loaders that do not trust their input can.
    pub fn validate(&self) -> Result<()> {
        for track in &self.tracks {
            for (index, key) in track.keys.iter().enumerate() {
                if !key.time.is_finite() {
                    return Err(KinemaError::NonFiniteKeyframe {
                        node: track.node_name.clone(),
                        index,
                    });
                }
                if index > 0 && key.time < track.keys[index - 1].time {
                    return Err(KinemaError::UnsortedKeyframes {
                        node: track.node_name.clone(),
                        index,
                    });
                }
            }
        }
        Ok(())
    }
}
