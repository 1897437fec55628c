//! Skeleton Settings
//!
//! Construction-time configuration for a skeleton sampler.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kinema_core::SkeletonSettings;
//!
//! // Play once and hold the last frame
//! let settings = SkeletonSettings {
//!     looping: false,
//!     ..Default::default()
//! };
//!
//! let skeleton = Skeleton::from_node_names(["hips", "spine"]).with_settings(&settings);
//! ```
//!
//! Settings are plain serde data, so they can also come from a JSON file.

use serde::{Deserialize, Serialize};

/// Configuration applied when a skeleton is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonSettings {
    /// Initial looping flag. When `false` playback holds the last frame.
    pub looping: bool,

    /// Report animation tracks targeting nodes the skeleton does not know
    /// at `warn` level. When `false` they are reported at `debug` level.
    pub warn_unknown_nodes: bool,
}

impl Default for SkeletonSettings {
    fn default() -> Self {
        Self {
            looping: true,
            warn_unknown_nodes: true,
        }
    }
}
