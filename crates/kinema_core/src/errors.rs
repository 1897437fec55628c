//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! Only caller mistakes surface as [`KinemaError`]:
//! - Playback requested without an assigned animation
//! - Binding to (or building from) a node that is not part of the scene
//! - Seeking to a non-finite time
//! - Malformed keyframe data, when explicitly validated
//!
//! Data-shape anomalies met during sampling (unknown node names, zero-length
//! intervals, empty tracks) are recovered locally and never reach this type.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kinema_core::errors::{KinemaError, Result};
//!
//! fn seek(skeleton: &mut Skeleton) -> Result<()> {
//!     skeleton.set_time(0.5)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Kinema engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinemaError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A playback operation was requested while no animation is assigned.
    #[error("No animation assigned to skeleton")]
    NoAnimation,

    /// The node handle does not refer to a live node in the scene.
    #[error("Hierarchy root is not a live node in the scene")]
    InvalidHierarchy,

    /// A seek target was NaN or infinite.
    #[error("Invalid playback time: {0}")]
    InvalidTime(f64),

    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// Keyframe times of a track are not in ascending order.
    #[error("Keyframes of track '{node}' are not sorted at index {index}")]
    UnsortedKeyframes {
        /// Name of the offending track's node
        node: String,
        /// Index of the first key that is earlier than its predecessor
        index: usize,
    },

    /// A keyframe time is NaN or infinite.
    #[error("Keyframe {index} of track '{node}' has a non-finite time")]
    NonFiniteKeyframe {
        /// Name of the offending track's node
        node: String,
        /// Index of the offending key
        index: usize,
    },
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
