use bevy::prelude::*;

use crate::core::math::{exp_interp_heading, exp_interp_vec3};

/// Where the zoom arm actually sits when camera lag trails the rig.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmLag {
    pub pivot: Vec3,
    pub yaw: f32,
}

impl ArmLag {
    pub fn new(pivot: Vec3, yaw: f32) -> Self {
        Self { pivot, yaw }
    }

    /// Moves the lagged pivot and heading toward the rig. A `None` speed
    /// means that lag is disabled and the arm snaps.
    pub fn update(
        &mut self,
        target_pivot: Vec3,
        target_yaw: f32,
        position_speed: Option<f32>,
        rotation_speed: Option<f32>,
        dt: f32,
    ) {
        self.pivot = match position_speed {
            Some(speed) => exp_interp_vec3(self.pivot, target_pivot, dt, speed),
            None => target_pivot,
        };
        self.yaw = match rotation_speed {
            Some(speed) => exp_interp_heading(self.yaw, target_yaw, dt, speed),
            None => target_yaw,
        };
    }
}
