use bevy::prelude::*;
use rand::Rng;

use crate::camera::rig::RTSCamera;
use crate::camera::spawn::spawn_rts_camera;
use crate::core::components::Tags;
use crate::core::config::RtsCameraSettings;
use crate::core::constants::hotkeys;
use crate::world::terrain::Heightmap;

// === DEMO SCENE CONSTANTS ===
const LIGHT_ROTATION_X: f32 = -0.8;
const LIGHT_ROTATION_Y: f32 = -0.3;
const BOUNDS_HALF_EXTENT: f32 = 3000.0;
const BOUNDS_HALF_HEIGHT: f32 = 2000.0;
const SCOUT_SIZE: f32 = 80.0;
const SCOUT_SPEED: f32 = 250.0;
const SCOUT_ROAM_RADIUS: f32 = 2500.0;
const SCOUT_ARRIVAL_DISTANCE: f32 = 50.0;

/// A unit that walks between random points on the terrain.
#[derive(Component, Debug, Clone)]
pub struct Wanderer {
    pub destination: Vec2,
    pub speed: f32,
}

pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 1.0, 0.9),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, LIGHT_ROTATION_X, LIGHT_ROTATION_Y, 0.0)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.5, 0.5, 0.7),
        brightness: 500.0,
    });
}

/// Spawns the volume the camera pivot is kept inside: a hidden box mesh
/// carrying the boundary tag.
pub fn spawn_camera_bounds(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    settings: Res<RtsCameraSettings>,
) {
    commands.spawn((
        Name::new("Camera Bounds"),
        Tags::new([settings.boundary_tag.clone()]),
        Mesh3d(meshes.add(Cuboid::new(
            BOUNDS_HALF_EXTENT * 2.0,
            BOUNDS_HALF_HEIGHT * 2.0,
            BOUNDS_HALF_EXTENT * 2.0,
        ))),
        Transform::default(),
        Visibility::Hidden,
    ));
    debug!("Camera bounds volume tagged '{}'", settings.boundary_tag);
}

pub fn spawn_scout(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    heightmap: Res<Heightmap>,
) {
    let height = heightmap.height_at(0.0, 0.0) + SCOUT_SIZE * 0.5;
    commands.spawn((
        Name::new("Scout"),
        Mesh3d(meshes.add(Cuboid::from_length(SCOUT_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.3, 0.2))),
        Transform::from_xyz(0.0, height, 0.0),
        Wanderer {
            destination: Vec2::ZERO,
            speed: SCOUT_SPEED,
        },
    ));
}

pub fn spawn_demo_camera(mut commands: Commands, settings: Res<RtsCameraSettings>, heightmap: Res<Heightmap>) {
    let position = Vec3::new(0.0, heightmap.height_at(0.0, 0.0), 0.0);
    spawn_rts_camera(&mut commands, settings.clone(), position);
    info!("Demo camera spawned: WASD pan, Q/E turn, wheel zoom, right-drag pan, F follow scout, U release");
}

fn random_destination() -> Vec2 {
    let mut rng = rand::thread_rng();
    Vec2::new(
        rng.gen_range(-SCOUT_ROAM_RADIUS..SCOUT_ROAM_RADIUS),
        rng.gen_range(-SCOUT_ROAM_RADIUS..SCOUT_ROAM_RADIUS),
    )
}

pub fn wander_scouts(
    time: Res<Time>,
    heightmap: Res<Heightmap>,
    mut scouts: Query<(&mut Transform, &mut Wanderer)>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut wanderer) in scouts.iter_mut() {
        let here = Vec2::new(transform.translation.x, transform.translation.z);
        let to_destination = wanderer.destination - here;
        if to_destination.length() <= SCOUT_ARRIVAL_DISTANCE {
            wanderer.destination = random_destination();
            continue;
        }

        let step = to_destination.normalize() * (wanderer.speed * dt).min(to_destination.length());
        let next = here + step;
        transform.translation = Vec3::new(next.x, heightmap.height_at(next.x, next.y) + SCOUT_SIZE * 0.5, next.y);
    }
}

pub fn handle_follow_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    scouts: Query<Entity, With<Wanderer>>,
    mut rigs: Query<&mut RTSCamera>,
) {
    if keyboard.just_pressed(hotkeys::FOLLOW_SCOUT) {
        let Some(scout) = scouts.iter().next() else {
            warn!("No scout to follow");
            return;
        };
        for mut rig in rigs.iter_mut() {
            rig.follow_target(scout);
        }
        info!("Camera following scout {:?}", scout);
    } else if keyboard.just_pressed(hotkeys::UNFOLLOW) {
        for mut rig in rigs.iter_mut() {
            rig.unfollow_target();
        }
        info!("Camera released");
    }
}
