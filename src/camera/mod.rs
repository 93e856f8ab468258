/// Camera rig: move queue, input translation, per-frame pipeline and the
/// Bevy plugin that drives it
pub mod bounds;
pub mod commands;
pub mod edge_scroll;
pub mod ground;
pub mod input;
pub mod lag;
pub mod rig;
pub mod spawn;
pub mod state;
pub mod systems;
pub mod translator;
pub mod zoom;

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::core::config::RtsCameraSettings;

use ground::GroundSurfaces;
use input::{translate_camera_input, CameraInputBindings};
use systems::{
    activate_rig_cameras, attach_camera_rigs, confine_cursor_for_edge_scrolling,
    despawn_orphaned_arms, run_camera_pipeline, sync_rig_transforms,
};

// Re-export commonly used items
pub use bounds::{BoundaryRegion, WorldBounds};
pub use commands::{MoveCommand, MoveCommandQueue};
pub use ground::{FlatGround, GroundProbe, GroundSurface, HeightfieldGround};
pub use rig::{RigHost, TickReport, RTSCamera};
pub use spawn::spawn_rts_camera;
pub use state::{CameraRigState, DragState, Viewport};
pub use translator::MoveAxis;

/// Ordering of the rig's per-frame work inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RtsCameraSet {
    /// New rigs pick up their position and boundary.
    Attach,
    /// Device input becomes rig callbacks.
    Input,
    /// Moves, edge scroll, ground, zoom, follow, bounds and lag.
    Pipeline,
    /// Rig state is written to transforms.
    Sync,
}

pub struct RtsCameraPlugin {
    pub settings: RtsCameraSettings,
}

impl Default for RtsCameraPlugin {
    fn default() -> Self {
        Self {
            settings: RtsCameraSettings::default(),
        }
    }
}

impl Plugin for RtsCameraPlugin {
    fn build(&self, app: &mut App) {
        if let Err(err) = self.settings.validate() {
            error!("RTS camera settings are invalid: {}", err);
        }

        app.insert_resource(self.settings.clone())
            .init_resource::<CameraInputBindings>()
            .init_resource::<GroundSurfaces>()
            .configure_sets(
                Update,
                (
                    RtsCameraSet::Attach,
                    RtsCameraSet::Input,
                    RtsCameraSet::Pipeline,
                    RtsCameraSet::Sync,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (attach_camera_rigs, confine_cursor_for_edge_scrolling, activate_rig_cameras)
                        .in_set(RtsCameraSet::Attach),
                    run_camera_pipeline.in_set(RtsCameraSet::Pipeline),
                    (sync_rig_transforms, despawn_orphaned_arms).in_set(RtsCameraSet::Sync),
                ),
            );

        info!("RTS camera plugin initialized");
    }

    // Checked once every plugin is built, so plugin order doesn't matter.
    fn finish(&self, app: &mut App) {
        // Without device input the rig still runs its pipeline; it just never
        // receives input callbacks.
        if input_available(app) {
            app.add_systems(Update, translate_camera_input.in_set(RtsCameraSet::Input));
        } else {
            error!("Error: input plugin not found");
            error!("Keyboard inputs will probably not function");
            error!("Add DefaultPlugins (or InputPlugin) to enable camera controls");
        }
    }
}

/// Whether the resources `translate_camera_input` reads are present.
fn input_available(app: &App) -> bool {
    let world = app.world();
    world.contains_resource::<ButtonInput<KeyCode>>()
        && world.contains_resource::<ButtonInput<MouseButton>>()
        && world.contains_resource::<Events<MouseWheel>>()
        && world.contains_resource::<Events<MouseMotion>>()
}
