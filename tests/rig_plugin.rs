use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::time::TimeUpdateStrategy;

use rts_camera::camera::ground::{FlatGround, GroundSurfaces};
use rts_camera::camera::MoveAxis;
use rts_camera::core::components::{RigCamera, ZoomArm};
use rts_camera::core::constants::camera::BOUNDARY_TAG;
use rts_camera::{spawn_rts_camera, RTSCamera, RtsCameraPlugin, RtsCameraSettings, Tags};

const FRAME: Duration = Duration::from_millis(100);

fn still_settings() -> RtsCameraSettings {
    RtsCameraSettings {
        dynamic_height: false,
        edge_scrolling: false,
        camera_lag: false,
        camera_rotation_lag: false,
        ..default()
    }
}

fn test_app(settings: RtsCameraSettings) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, RtsCameraPlugin { settings }))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.finish();
    app.cleanup();
    app
}

fn spawn_rig(app: &mut App, settings: RtsCameraSettings, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((RTSCamera::new(settings, position), Transform::from_translation(position)))
        .id()
}

fn spawn_bounds(app: &mut App, half: f32) -> Entity {
    app.world_mut()
        .spawn((
            Tags::new([BOUNDARY_TAG]),
            Aabb::from_min_max(Vec3::new(-half, -50.0, -half), Vec3::new(half, 50.0, half)),
            GlobalTransform::from_translation(Vec3::ZERO),
        ))
        .id()
}

fn rig(app: &App, entity: Entity) -> &RTSCamera {
    app.world().get::<RTSCamera>(entity).unwrap()
}

#[test]
fn rig_is_clamped_into_tagged_volume() {
    let mut app = test_app(still_settings());
    spawn_bounds(&mut app, 100.0);
    let entity = spawn_rig(&mut app, still_settings(), Vec3::new(150.0, 0.0, -200.0));

    app.update();

    let camera = rig(&app, entity);
    assert!(camera.is_attached());
    assert!(camera.boundary().is_some());
    assert_eq!(camera.position(), Vec3::new(100.0, 0.0, -100.0));

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert_eq!(transform.translation, Vec3::new(100.0, 0.0, -100.0));
}

#[test]
fn tagged_mesh_volume_bounds_rig_before_bounds_are_calculated() {
    let mut app = test_app(still_settings());
    app.init_resource::<Assets<Mesh>>();
    app.add_systems(Startup, |mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>| {
        commands.spawn((
            Tags::new([BOUNDARY_TAG]),
            Mesh3d(meshes.add(Cuboid::new(200.0, 100.0, 200.0))),
            Transform::from_xyz(1000.0, 0.0, 1000.0),
        ));
    });
    let entity = spawn_rig(&mut app, still_settings(), Vec3::new(500.0, 0.0, 500.0));

    app.update();

    let camera = rig(&app, entity);
    let region = camera.boundary().expect("mesh volume should bound the rig");
    assert_eq!(region.origin, Vec2::new(1000.0, 1000.0));
    assert_eq!(camera.position(), Vec3::new(900.0, 0.0, 900.0));
}

#[test]
fn untagged_volume_leaves_rig_unbounded() {
    let mut app = test_app(still_settings());
    app.world_mut().spawn((
        Tags::new(["Decoration"]),
        Aabb::from_min_max(Vec3::splat(-10.0), Vec3::splat(10.0)),
        GlobalTransform::IDENTITY,
    ));
    let entity = spawn_rig(&mut app, still_settings(), Vec3::new(500.0, 0.0, 500.0));

    app.update();

    let camera = rig(&app, entity);
    assert!(camera.is_attached());
    assert_eq!(camera.boundary(), None);
    assert_eq!(camera.position(), Vec3::new(500.0, 0.0, 500.0));
}

#[test]
fn queued_moves_use_frame_time() {
    let mut app = test_app(still_settings());
    let entity = spawn_rig(&mut app, still_settings(), Vec3::ZERO);
    // First frame has no elapsed time
    app.update();

    app.world_mut()
        .get_mut::<RTSCamera>(entity)
        .unwrap()
        .on_move_axis(MoveAxis::Forward, 1.0);
    app.update();

    let dt = app.world().resource::<Time>().delta_secs();
    assert!(dt > 0.0);
    let camera = rig(&app, entity);
    let expected = -camera.settings().move_speed * dt;
    assert!((camera.position().z - expected).abs() < 1e-3);
    assert!(camera.position().x.abs() < 1e-3);
    assert!(camera.pending_moves().is_empty());
}

#[test]
fn follow_target_is_tracked_and_clamped() {
    let mut app = test_app(still_settings());
    spawn_bounds(&mut app, 100.0);
    let target = app
        .world_mut()
        .spawn(GlobalTransform::from_translation(Vec3::new(500.0, 10.0, 20.0)))
        .id();
    let entity = spawn_rig(&mut app, still_settings(), Vec3::ZERO);
    app.world_mut()
        .get_mut::<RTSCamera>(entity)
        .unwrap()
        .follow_target(target);

    app.update();
    assert_eq!(rig(&app, entity).position(), Vec3::new(100.0, 10.0, 20.0));

    app.world_mut().despawn(target);
    app.update();
    assert_eq!(rig(&app, entity).followed(), None);
}

#[test]
fn follow_target_spawned_this_frame_uses_its_transform() {
    let mut app = test_app(still_settings());
    let target = app.world_mut().spawn(Transform::from_xyz(50.0, 5.0, 30.0)).id();
    let entity = spawn_rig(&mut app, still_settings(), Vec3::ZERO);
    app.world_mut()
        .get_mut::<RTSCamera>(entity)
        .unwrap()
        .follow_target(target);

    app.update();
    assert_eq!(rig(&app, entity).position(), Vec3::new(50.0, 5.0, 30.0));

    app.world_mut().get_mut::<Transform>(target).unwrap().translation = Vec3::new(-20.0, 5.0, 10.0);
    app.update();
    assert_eq!(rig(&app, entity).position(), Vec3::new(-20.0, 5.0, 10.0));
}

#[test]
fn ground_surfaces_set_rig_height() {
    let settings = RtsCameraSettings {
        dynamic_height: true,
        ..still_settings()
    };
    let mut app = test_app(settings.clone());
    app.world_mut()
        .resource_mut::<GroundSurfaces>()
        .add(FlatGround::new(25.0));
    let entity = spawn_rig(&mut app, settings, Vec3::new(40.0, 0.0, -40.0));

    app.update();

    let camera = rig(&app, entity);
    assert_eq!(camera.position(), Vec3::new(40.0, 25.0, -40.0));
    assert!(!camera.probe_warning_reported());
}

#[test]
fn missing_ground_is_reported_once_and_keeps_position() {
    let settings = RtsCameraSettings {
        dynamic_height: true,
        ..still_settings()
    };
    let mut app = test_app(settings.clone());
    let entity = spawn_rig(&mut app, settings, Vec3::new(0.0, 7.0, 0.0));

    app.update();
    app.update();

    let camera = rig(&app, entity);
    assert!(camera.probe_warning_reported());
    assert_eq!(camera.position(), Vec3::new(0.0, 7.0, 0.0));
}

#[test]
fn keyboard_pans_rig_when_input_plugin_is_added_later() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        RtsCameraPlugin {
            settings: still_settings(),
        },
    ))
    .add_plugins(InputPlugin)
    .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.finish();
    app.cleanup();
    let entity = spawn_rig(&mut app, still_settings(), Vec3::ZERO);
    app.update();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyD);
    app.update();

    let camera = rig(&app, entity);
    assert!(camera.position().x > 0.0);
    assert!(camera.position().z.abs() < 1e-3);
}

#[test]
fn rig_runs_without_input_plugin() {
    let mut app = test_app(still_settings());
    let entity = spawn_rig(&mut app, still_settings(), Vec3::new(1.0, 2.0, 3.0));

    app.update();
    app.update();

    assert!(app.world().get_resource::<ButtonInput<KeyCode>>().is_none());
    assert_eq!(rig(&app, entity).position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn spawned_rig_drives_arm_and_camera() {
    let mut app = test_app(still_settings());
    let settings = still_settings();
    app.add_systems(Startup, move |mut commands: Commands| {
        spawn_rts_camera(&mut commands, settings.clone(), Vec3::new(10.0, 0.0, 10.0));
    });

    app.update();

    let mut arms = app.world_mut().query::<(&ZoomArm, &Transform)>();
    let (arm, arm_transform) = arms.single(app.world());
    let rig_entity = arm.rig;
    assert_eq!(arm.length, still_settings().max_zoom);
    assert_eq!(arm_transform.translation, Vec3::new(10.0, 0.0, 10.0));

    let mut cameras = app.world_mut().query::<(&RigCamera, &Transform)>();
    let (link, camera_transform) = cameras.single(app.world());
    assert_eq!(link.rig, rig_entity);
    assert_eq!(camera_transform.translation, Vec3::new(0.0, 0.0, still_settings().max_zoom));

    app.world_mut().despawn(rig_entity);
    app.update();

    let mut arms = app.world_mut().query::<&ZoomArm>();
    assert_eq!(arms.iter(app.world()).count(), 0);
    let mut cameras = app.world_mut().query::<&RigCamera>();
    assert_eq!(cameras.iter(app.world()).count(), 0);
}
