/// Demo world: noise terrain registered as camera ground, a bounds volume
/// and a wandering scout to follow
pub mod systems;
pub mod terrain;

use bevy::prelude::*;

use systems::{
    handle_follow_hotkeys, setup_lighting, spawn_camera_bounds, spawn_demo_camera, spawn_scout,
    wander_scouts,
};
use terrain::{spawn_terrain, TerrainSettings};

// Re-export commonly used items
pub use terrain::Heightmap;

pub struct DemoWorldPlugin;

impl Plugin for DemoWorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainSettings>()
            .add_systems(
                Startup,
                (
                    setup_lighting,
                    spawn_terrain,
                    spawn_camera_bounds,
                    (spawn_scout, spawn_demo_camera),
                )
                    .chain(),
            )
            .add_systems(Update, (wander_scouts, handle_follow_hotkeys));
    }
}
