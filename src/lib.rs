//! RTS-style camera rig for Bevy: a pivot on the ground with a pitched zoom
//! arm, driven by keyboard, wheel, drag and edge scrolling, optionally
//! following terrain height and a target, clamped to a tagged boundary.

pub mod camera;
pub mod core;
pub mod world;

pub use crate::camera::{spawn_rts_camera, RTSCamera, RtsCameraPlugin, RtsCameraSet};
pub use crate::core::{CameraConfigError, RtsCameraSettings, Tags};
