use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::constants::camera::*;
use crate::core::error::CameraConfigError;

/// Collision channel a ground probe is traced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CollisionChannel {
    #[default]
    WorldStatic,
    WorldDynamic,
    Custom(u8),
}

/// Tunables for a camera rig. Read once when the rig is attached and never
/// changed afterwards; every field has a default so partial TOML files work.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtsCameraSettings {
    /// World units per second for a full-scale move command.
    pub move_speed: f32,
    /// Degrees added or removed by one discrete turn.
    pub rotate_speed: f32,
    /// Zoom-arm length change per unit of zoom input.
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Exponential catch-up rate of the arm length toward the desired zoom.
    pub zoom_catchup_speed: f32,
    pub edge_scroll_speed: f32,
    /// Width of each edge-scroll band as a fraction of the viewport extent.
    pub edge_scroll_threshold: f32,
    /// Fraction of the viewport a drag has to cover to reach full speed.
    pub drag_extent: f32,
    /// Half-length of the vertical ground probe.
    pub ground_trace_length: f32,
    pub collision_channel: CollisionChannel,
    pub dynamic_height: bool,
    pub edge_scrolling: bool,
    pub camera_lag: bool,
    pub camera_rotation_lag: bool,
    pub camera_lag_speed: f32,
    pub camera_rotation_lag_speed: f32,
    pub starting_pitch: f32,
    pub starting_yaw: f32,
    /// Tag carried by the volume that bounds the rig.
    pub boundary_tag: String,
}

impl Default for RtsCameraSettings {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            min_zoom: MIN_ZOOM_LENGTH,
            max_zoom: MAX_ZOOM_LENGTH,
            zoom_catchup_speed: ZOOM_CATCHUP_SPEED,
            edge_scroll_speed: EDGE_SCROLL_SPEED,
            edge_scroll_threshold: EDGE_SCROLL_THRESHOLD,
            drag_extent: DRAG_EXTENT,
            ground_trace_length: GROUND_TRACE_LENGTH,
            collision_channel: CollisionChannel::default(),
            dynamic_height: true,
            edge_scrolling: true,
            camera_lag: true,
            camera_rotation_lag: true,
            camera_lag_speed: CAMERA_LAG_SPEED,
            camera_rotation_lag_speed: CAMERA_ROTATION_LAG_SPEED,
            starting_pitch: STARTING_PITCH_DEGREES,
            starting_yaw: STARTING_YAW_DEGREES,
            boundary_tag: BOUNDARY_TAG.to_string(),
        }
    }
}

impl RtsCameraSettings {
    /// Load settings from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CameraConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CameraConfigError> {
        let settings: Self =
            toml::from_str(content).map_err(|e| CameraConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CameraConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CameraConfigError::Parse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        if !(self.min_zoom <= self.max_zoom) {
            return Err(CameraConfigError::Invalid(format!(
                "min_zoom ({}) must not exceed max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("rotate_speed", self.rotate_speed),
            ("zoom_catchup_speed", self.zoom_catchup_speed),
            ("edge_scroll_speed", self.edge_scroll_speed),
            ("ground_trace_length", self.ground_trace_length),
            ("camera_lag_speed", self.camera_lag_speed),
            ("camera_rotation_lag_speed", self.camera_rotation_lag_speed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(CameraConfigError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        let fractions = [
            ("edge_scroll_threshold", self.edge_scroll_threshold),
            ("drag_extent", self.drag_extent),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(CameraConfigError::Invalid(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }
}
