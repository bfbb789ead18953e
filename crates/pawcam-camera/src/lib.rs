//! Frame sources for pawcam.
//!
//! A `FrameSource` yields the current image as an RGBA `RawFrame`, whether
//! it comes from a live camera or from an uploaded file. Cameras are opened
//! through a `CameraProvider`, and `ActiveSource` keeps at most one of them
//! open at a time.

pub mod active;
pub mod config;
pub mod error;
pub mod still;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use active::ActiveSource;
pub use config::{CameraConfig, Constraints, FacingMode};
pub use error::CameraError;
pub use still::StillImage;
pub use traits::{CameraProvider, FrameSource};

#[cfg(feature = "v4l2")]
pub use v4l2::{V4l2Camera, V4l2Provider};
