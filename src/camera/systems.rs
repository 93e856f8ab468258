use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::primitives::Aabb;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::camera::bounds::WorldBounds;
use crate::camera::ground::{GroundProbe, GroundSurfaces};
use crate::camera::rig::{RigHost, RTSCamera};
use crate::camera::state::Viewport;
use crate::core::components::{RigCamera, Tags, ZoomArm};
use crate::core::math::heading_rotation;

/// The ECS world as seen by a rig.
pub struct EcsRigHost<'a, L> {
    pub viewport: Viewport,
    pub ground: Option<&'a GroundSurfaces>,
    pub locate: L,
    pub volumes: Vec<(&'a Tags, WorldBounds)>,
}

impl<L> RigHost for EcsRigHost<'_, L>
where
    L: Fn(Entity) -> Option<Vec3>,
{
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn probe_ground(&self, probe: &GroundProbe) -> Option<Vec3> {
        self.ground.and_then(|ground| ground.cast(probe))
    }

    fn locate(&self, target: Entity) -> Option<Vec3> {
        (self.locate)(target)
    }

    fn tagged_bounds(&self, tag: &str) -> Vec<WorldBounds> {
        self.volumes
            .iter()
            .filter(|(tags, _)| tags.has(tag))
            .map(|(_, bounds)| *bounds)
            .collect()
    }
}

/// Pointer and size of the primary window; no window reads as an empty
/// viewport.
pub fn window_viewport(window: Option<&Window>) -> Viewport {
    match window {
        Some(window) => Viewport::new(
            window.cursor_position(),
            Vec2::new(window.width(), window.height()),
        ),
        None => Viewport::default(),
    }
}

/// World transform of an entity as of this frame. Roots are read from their
/// `Transform`, since `GlobalTransform` is only propagated in `PostUpdate`.
pub fn current_world_transform(
    transform: Option<&Transform>,
    global: Option<&GlobalTransform>,
    parent: Option<&Parent>,
) -> Option<GlobalTransform> {
    match (transform, parent) {
        (Some(transform), None) => Some(GlobalTransform::from(*transform)),
        _ => global.copied(),
    }
}

/// Local bounds of a volume: its `Aabb`, or the box around its mesh when
/// bounds have not been calculated yet.
pub fn volume_local_bounds(
    aabb: Option<&Aabb>,
    mesh: Option<&Mesh3d>,
    meshes: Option<&Assets<Mesh>>,
) -> Option<Aabb> {
    if let Some(aabb) = aabb {
        return Some(*aabb);
    }
    meshes?.get(&mesh?.0)?.compute_aabb()
}

type VolumeQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Tags,
        Option<&'static Aabb>,
        Option<&'static Mesh3d>,
        Option<&'static Transform>,
        Option<&'static GlobalTransform>,
        Option<&'static Parent>,
    ),
>;

/// Sets up rigs the frame they appear: takes the spawn transform as the
/// starting position and resolves the boundary volume.
pub fn attach_camera_rigs(
    mut rigs: Query<(Entity, &mut RTSCamera, &Transform), Added<RTSCamera>>,
    volumes: VolumeQuery,
    meshes: Option<Res<Assets<Mesh>>>,
) {
    if rigs.is_empty() {
        return;
    }

    let mut tagged: Vec<(&Tags, WorldBounds)> = Vec::new();
    for (entity, tags, aabb, mesh, transform, global, parent) in volumes.iter() {
        let Some(local) = volume_local_bounds(aabb, mesh, meshes.as_deref()) else {
            debug!("Tagged entity {:?} has no bounds yet", entity);
            continue;
        };
        let Some(world) = current_world_transform(transform, global, parent) else {
            continue;
        };
        tagged.push((
            tags,
            WorldBounds::from_local(local.center.into(), local.half_extents.into(), &world),
        ));
    }

    for (entity, mut rig, transform) in rigs.iter_mut() {
        rig.set_position(transform.translation);
        let host = EcsRigHost {
            viewport: Viewport::default(),
            ground: None,
            locate: |_: Entity| None,
            volumes: tagged.clone(),
        };
        rig.attach(&host);
        info!("RTS camera rig {:?} attached at {:?}", entity, transform.translation);
    }
}

/// Keeps the cursor inside the window for rigs that edge scroll.
pub fn confine_cursor_for_edge_scrolling(
    rigs: Query<&RTSCamera, Added<RTSCamera>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !rigs.iter().any(|rig| rig.settings().edge_scrolling) {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Confined;
    window.cursor_options.visible = true;
    debug!("Cursor confined to the primary window for edge scrolling");
}

/// Makes a newly spawned rig camera the only active 3D camera.
pub fn activate_rig_cameras(
    mut added: Query<(Entity, &RigCamera, &mut Camera), Added<RigCamera>>,
    mut others: Query<&mut Camera, (With<Camera3d>, Without<RigCamera>)>,
) {
    for (entity, link, mut camera) in added.iter_mut() {
        camera.is_active = true;
        for mut other in others.iter_mut() {
            other.is_active = false;
        }
        info!("RTS camera {:?} of rig {:?} is now the active view", entity, link.rig);
    }
}

/// Runs every rig's per-frame pipeline.
pub fn run_camera_pipeline(
    time: Res<Time>,
    ground: Option<Res<GroundSurfaces>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    targets: Query<(Option<&Transform>, Option<&GlobalTransform>, Option<&Parent>)>,
    mut rigs: Query<(Entity, &mut RTSCamera)>,
) {
    let dt = time.delta_secs();
    let host = EcsRigHost {
        viewport: window_viewport(windows.get_single().ok()),
        ground: ground.as_deref(),
        locate: |target: Entity| {
            let (transform, global, parent) = targets.get(target).ok()?;
            current_world_transform(transform, global, parent).map(|world| world.translation())
        },
        volumes: Vec::new(),
    };

    for (entity, mut rig) in rigs.iter_mut() {
        let report = rig.tick(dt, &host);
        trace!("Camera rig {:?} tick: {:?}", entity, report);
    }
}

/// Writes rig state back to the rig, arm and camera transforms.
pub fn sync_rig_transforms(
    mut rigs: Query<(&RTSCamera, &mut Transform), (Without<ZoomArm>, Without<RigCamera>)>,
    mut arms: Query<(&mut ZoomArm, &mut Transform), (Without<RTSCamera>, Without<RigCamera>)>,
    mut cameras: Query<(&Parent, &mut Transform), (With<RigCamera>, Without<RTSCamera>, Without<ZoomArm>)>,
) {
    for (rig, mut transform) in rigs.iter_mut() {
        transform.translation = rig.position();
        transform.rotation = heading_rotation(rig.yaw());
    }

    for (mut arm, mut transform) in arms.iter_mut() {
        let Ok((rig, _)) = rigs.get(arm.rig) else {
            continue;
        };
        let settings = rig.settings();
        arm.length = rig.current_zoom();
        transform.translation = rig.lag().pivot;
        transform.rotation = heading_rotation(rig.lag().yaw + settings.starting_yaw)
            * Quat::from_rotation_x(settings.starting_pitch.to_radians());
    }

    // Cameras sit at the end of their arm
    for (parent, mut transform) in cameras.iter_mut() {
        let Ok((arm, _)) = arms.get(parent.get()) else {
            continue;
        };
        transform.translation = Vec3::new(0.0, 0.0, arm.length);
        transform.rotation = Quat::IDENTITY;
    }
}

/// Removes arms (and their cameras) whose rig has been despawned.
pub fn despawn_orphaned_arms(
    mut commands: Commands,
    arms: Query<(Entity, &ZoomArm)>,
    rigs: Query<(), With<RTSCamera>>,
) {
    for (entity, arm) in arms.iter() {
        if rigs.get(arm.rig).is_err() {
            debug!("Despawning zoom arm {:?}: rig {:?} is gone", entity, arm.rig);
            commands.entity(entity).despawn_recursive();
        }
    }
}
