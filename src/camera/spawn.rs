use bevy::prelude::*;

use crate::camera::rig::RTSCamera;
use crate::core::components::{RigCamera, ZoomArm};
use crate::core::config::RtsCameraSettings;

/// Far plane as a multiple of the longest zoom, so the ground at the far
/// edge of a pitched view stays inside the frustum.
const FAR_PLANE_ZOOM_MULTIPLIER: f32 = 4.0;

/// Spawns a camera rig at `position`: the rig pivot, its zoom arm and the
/// camera at the end of the arm. Returns the rig entity.
///
/// The arm is a root entity rather than a child of the rig so that camera
/// lag can trail the pivot in world space.
pub fn spawn_rts_camera(commands: &mut Commands, settings: RtsCameraSettings, position: Vec3) -> Entity {
    let far = settings.max_zoom.max(1.0) * FAR_PLANE_ZOOM_MULTIPLIER;
    let zoom = settings.max_zoom;

    let rig = commands
        .spawn((
            Name::new("RTS Camera Rig"),
            RTSCamera::new(settings, position),
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .id();

    commands
        .spawn((
            Name::new("RTS Camera Arm"),
            ZoomArm { rig, length: zoom },
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .with_children(|arm| {
            arm.spawn((
                Name::new("RTS Camera"),
                Camera3d::default(),
                Projection::Perspective(PerspectiveProjection {
                    far,
                    ..default()
                }),
                Transform::from_xyz(0.0, 0.0, zoom),
                RigCamera { rig },
            ));
        });

    debug!("Spawned RTS camera rig {:?} at {:?} (far plane {})", rig, position, far);
    rig
}
