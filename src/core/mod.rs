/// Core modules: settings, defaults, shared components and geometry helpers
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;

// Re-export commonly used items for convenience
pub use components::{RigCamera, Tags, ZoomArm};
pub use config::{CollisionChannel, RtsCameraSettings};
pub use error::CameraConfigError;
