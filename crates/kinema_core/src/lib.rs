//! Kinema Core
//!
//! Foundational types shared by every Kinema crate:
//!
//! - [`errors`]: the [`KinemaError`] type and [`Result`] alias
//! - [`settings`]: serde-backed configuration for skeletons

pub mod errors;
pub mod settings;

pub use errors::{KinemaError, Result};
pub use settings::SkeletonSettings;
