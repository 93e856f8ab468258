//! The camera rig controller: owns the rig state and runs the per-tick
//! pipeline.

use bevy::prelude::*;

use crate::camera::bounds::{resolve_boundary, BoundaryRegion, WorldBounds};
use crate::camera::commands::{MoveCommand, MoveCommandQueue};
use crate::camera::edge_scroll::{apply_edge_scroll, sample_edges};
use crate::camera::ground::{GroundProbe, ProbeMissLatch};
use crate::camera::lag::ArmLag;
use crate::camera::state::{CameraRigState, DragState, Viewport};
use crate::camera::translator::{drag_commands, step_drag, MoveAxis};
use crate::camera::zoom::{accumulate_zoom, smooth_zoom};
use crate::core::config::RtsCameraSettings;
use crate::core::math::{from_planar, planar};

/// What the rig needs from the world around it.
pub trait RigHost {
    /// Current pointer position and viewport size.
    fn viewport(&self) -> Viewport;
    /// First hit along a vertical probe, if any.
    fn probe_ground(&self, probe: &GroundProbe) -> Option<Vec3>;
    /// World position of a followed entity, `None` once it is gone.
    fn locate(&self, target: Entity) -> Option<Vec3>;
    /// World boxes of every volume carrying `tag`.
    fn tagged_bounds(&self, tag: &str) -> Vec<WorldBounds>;
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub moves_applied: usize,
    pub edge_scrolled: bool,
    /// `Some(hit)` when the ground probe ran.
    pub ground_hit: Option<bool>,
    pub followed: bool,
    pub clamped: bool,
}

/// RTS camera rig. Input callbacks queue intents or adjust targets; `tick`
/// applies them in a fixed order once per frame.
#[derive(Component, Debug, Clone)]
pub struct RTSCamera {
    settings: RtsCameraSettings,
    state: CameraRigState,
    queue: MoveCommandQueue,
    boundary: Option<BoundaryRegion>,
    follow: Option<Entity>,
    probe_miss: ProbeMissLatch,
    lag: ArmLag,
    attached: bool,
}

impl RTSCamera {
    /// A rig at `position`, arm fully extended.
    pub fn new(settings: RtsCameraSettings, position: Vec3) -> Self {
        let state = CameraRigState::new(position, settings.max_zoom);
        Self {
            lag: ArmLag::new(position, state.yaw),
            settings,
            state,
            queue: MoveCommandQueue::default(),
            boundary: None,
            follow: None,
            probe_miss: ProbeMissLatch::default(),
            attached: false,
        }
    }

    pub fn settings(&self) -> &RtsCameraSettings {
        &self.settings
    }

    pub fn state(&self) -> &CameraRigState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Teleports the rig. The arm lag is reset so the camera does not sweep.
    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
        self.lag.pivot = position;
    }

    pub fn yaw(&self) -> f32 {
        self.state.yaw
    }

    /// Heading of the zoom arm: rig yaw plus the arm's starting yaw.
    pub fn arm_heading(&self) -> f32 {
        self.state.yaw + self.settings.starting_yaw
    }

    pub fn current_zoom(&self) -> f32 {
        self.state.current_zoom
    }

    pub fn desired_zoom(&self) -> f32 {
        self.state.desired_zoom
    }

    pub fn drag(&self) -> DragState {
        self.state.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.state.drag.is_dragging()
    }

    pub fn pending_moves(&self) -> &[MoveCommand] {
        self.queue.pending()
    }

    pub fn boundary(&self) -> Option<BoundaryRegion> {
        self.boundary
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn probe_warning_reported(&self) -> bool {
        self.probe_miss.is_set()
    }

    pub fn lag(&self) -> &ArmLag {
        &self.lag
    }

    // === Follow target ===

    pub fn follow_target(&mut self, target: Entity) {
        self.follow = Some(target);
    }

    pub fn unfollow_target(&mut self) {
        self.follow = None;
    }

    pub fn followed(&self) -> Option<Entity> {
        self.follow
    }

    // === Input callbacks ===

    /// Zoom input; the desired arm length stays within the zoom range.
    pub fn on_zoom(&mut self, delta: f32) {
        self.state.desired_zoom = accumulate_zoom(
            self.state.desired_zoom,
            delta,
            self.settings.zoom_speed,
            self.settings.min_zoom,
            self.settings.max_zoom,
        );
    }

    /// Continuous yaw input in degrees.
    pub fn on_rotate(&mut self, delta: f32) {
        self.state.yaw += delta;
    }

    pub fn turn_left(&mut self) {
        self.state.yaw -= self.settings.rotate_speed;
    }

    pub fn turn_right(&mut self) {
        self.state.yaw += self.settings.rotate_speed;
    }

    /// Axis input along the arm's forward or right direction.
    pub fn on_move_axis(&mut self, axis: MoveAxis, scalar: f32) {
        self.queue.enqueue(axis.command(self.arm_heading(), scalar));
    }

    /// Drag button sample; `active` is whether the button is held.
    pub fn on_drag(&mut self, active: bool, viewport: &Viewport) {
        let step = step_drag(self.state.drag, active, viewport, self.settings.drag_extent);
        match (self.state.drag, step.next) {
            (DragState::Idle, DragState::Dragging { origin }) => {
                debug!("Camera drag started at {origin:?}");
            }
            (DragState::Dragging { .. }, DragState::Idle) => {
                debug!("Camera drag ended");
            }
            _ => {}
        }
        self.state.drag = step.next;

        if let Some(pan) = step.pan {
            for command in drag_commands(pan, self.arm_heading()) {
                self.queue.enqueue(command);
            }
        }
    }

    // === Lifecycle ===

    /// Resolves the boundary volume. Runs once per rig; later calls are
    /// ignored so a missing volume is never searched for again.
    pub fn attach(&mut self, host: &impl RigHost) {
        if self.attached {
            return;
        }
        self.attached = true;

        let candidates = host.tagged_bounds(&self.settings.boundary_tag);
        self.boundary = resolve_boundary(&candidates);
        match self.boundary {
            Some(region) => info!(
                "Camera bounds resolved from '{}': origin {:?}, half extents {:?}",
                self.settings.boundary_tag, region.origin, region.half_extents
            ),
            None => info!(
                "No volume tagged '{}' found; camera movement is unbounded",
                self.settings.boundary_tag
            ),
        }
    }

    /// Runs the per-frame pipeline: queued moves, edge scrolling, ground
    /// height, zoom smoothing, follow target, bounds, then arm lag.
    pub fn tick(&mut self, dt: f32, host: &impl RigHost) -> TickReport {
        let mut report = TickReport::default();

        report.moves_applied = self.apply_move_commands(dt);
        report.edge_scrolled = self.edge_scroll(dt, host);
        report.ground_hit = self.follow_ground(host);
        self.smooth_zoom(dt);
        report.followed = self.follow_target_if_set(host);
        report.clamped = self.apply_bounds();
        self.update_lag(dt);

        report
    }

    fn apply_move_commands(&mut self, dt: f32) -> usize {
        let mut position = planar(self.state.position);
        let applied = self.queue.drain_into(&mut position, self.settings.move_speed, dt);
        self.state.position = from_planar(position, self.state.position.y);
        applied
    }

    fn edge_scroll(&mut self, dt: f32, host: &impl RigHost) -> bool {
        if !self.settings.edge_scrolling || self.is_dragging() {
            return false;
        }
        let intensities = sample_edges(&host.viewport(), self.settings.edge_scroll_threshold);
        if intensities.is_idle() {
            return false;
        }
        let mut position = planar(self.state.position);
        apply_edge_scroll(
            &mut position,
            &intensities,
            self.state.yaw,
            self.settings.edge_scroll_speed,
            dt,
        );
        self.state.position = from_planar(position, self.state.position.y);
        true
    }

    fn follow_ground(&mut self, host: &impl RigHost) -> Option<bool> {
        if !self.settings.dynamic_height {
            return None;
        }
        let probe = GroundProbe::through(
            self.state.position,
            self.settings.ground_trace_length,
            self.settings.collision_channel,
        );
        match host.probe_ground(&probe) {
            Some(hit) => {
                self.state.position = hit;
                Some(true)
            }
            None => {
                if self.probe_miss.record_miss() {
                    warn!("Error: RTS camera rig needs to be placed on the ground!");
                    warn!("Increase ground_trace_length or change the starting position of the rig.");
                    warn!(
                        "Or add a volume tagged '{}' to the scene.",
                        self.settings.boundary_tag
                    );
                }
                Some(false)
            }
        }
    }

    fn smooth_zoom(&mut self, dt: f32) {
        self.state.current_zoom = smooth_zoom(
            self.state.current_zoom,
            self.state.desired_zoom,
            dt,
            self.settings.zoom_catchup_speed,
        );
    }

    fn follow_target_if_set(&mut self, host: &impl RigHost) -> bool {
        let Some(target) = self.follow else {
            return false;
        };
        match host.locate(target) {
            Some(location) => {
                self.state.position = location;
                true
            }
            None => {
                debug!("Follow target {target:?} is gone; following stopped");
                self.follow = None;
                false
            }
        }
    }

    fn apply_bounds(&mut self) -> bool {
        let Some(region) = self.boundary else {
            return false;
        };
        let current = planar(self.state.position);
        let clamped = region.clamp(current);
        self.state.position = from_planar(clamped, self.state.position.y);
        clamped != current
    }

    fn update_lag(&mut self, dt: f32) {
        let position_speed = self.settings.camera_lag.then_some(self.settings.camera_lag_speed);
        let rotation_speed = self
            .settings
            .camera_rotation_lag
            .then_some(self.settings.camera_rotation_lag_speed);
        self.lag.update(
            self.state.position,
            self.state.yaw,
            position_speed,
            rotation_speed,
            dt,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ground::{FlatGround, GroundSurface};
    use std::cell::Cell;

    /// Scripted host for driving the rig without an ECS world.
    #[derive(Default)]
    struct FakeHost {
        viewport: Viewport,
        ground: Option<FlatGround>,
        probes: Cell<usize>,
        target: Option<(Entity, Vec3)>,
        volumes: Vec<WorldBounds>,
    }

    impl RigHost for FakeHost {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn probe_ground(&self, probe: &GroundProbe) -> Option<Vec3> {
            self.probes.set(self.probes.get() + 1);
            self.ground.as_ref().and_then(|g| g.cast(probe))
        }

        fn locate(&self, target: Entity) -> Option<Vec3> {
            self.target
                .filter(|(entity, _)| *entity == target)
                .map(|(_, position)| position)
        }

        fn tagged_bounds(&self, _tag: &str) -> Vec<WorldBounds> {
            self.volumes.clone()
        }
    }

    fn quiet_settings() -> RtsCameraSettings {
        RtsCameraSettings {
            edge_scrolling: false,
            dynamic_height: false,
            camera_lag: false,
            camera_rotation_lag: false,
            ..default()
        }
    }

    fn square_volume() -> WorldBounds {
        WorldBounds {
            center: Vec3::ZERO,
            half_extents: Vec3::new(100.0, 50.0, 100.0),
        }
    }

    #[test]
    fn starts_fully_zoomed_out() {
        let rig = RTSCamera::new(RtsCameraSettings::default(), Vec3::ZERO);
        assert_eq!(rig.current_zoom(), 5000.0);
        assert_eq!(rig.desired_zoom(), 5000.0);
        assert!(!rig.is_dragging());
    }

    #[test]
    fn zoom_input_stays_in_range() {
        let mut rig = RTSCamera::new(RtsCameraSettings::default(), Vec3::ZERO);
        rig.on_zoom(50.0);
        assert_eq!(rig.desired_zoom(), 500.0);
        rig.on_zoom(-50.0);
        assert_eq!(rig.desired_zoom(), 5000.0);
        for delta in [3.0, -1.0, 7.5, -0.25, 100.0, -400.0] {
            rig.on_zoom(delta);
            assert!((500.0..=5000.0).contains(&rig.desired_zoom()));
        }
    }

    #[test]
    fn current_zoom_stays_in_range_while_smoothing() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::ZERO);
        let host = FakeHost::default();
        rig.on_zoom(100.0);
        for _ in 0..300 {
            rig.tick(1.0 / 30.0, &host);
            assert!((500.0..=5000.0).contains(&rig.current_zoom()));
        }
        assert!((rig.current_zoom() - 500.0).abs() < 1.0);
    }

    #[test]
    fn turning_steps_by_rotate_speed() {
        let mut rig = RTSCamera::new(RtsCameraSettings::default(), Vec3::ZERO);
        rig.turn_right();
        assert_eq!(rig.yaw(), 45.0);
        rig.turn_left();
        rig.turn_left();
        assert_eq!(rig.yaw(), -45.0);
        rig.on_rotate(12.5);
        assert_eq!(rig.yaw(), -32.5);
    }

    #[test]
    fn queued_moves_apply_on_tick_then_clear() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::new(0.0, 7.0, 0.0));
        rig.on_move_axis(MoveAxis::Forward, 1.0);
        rig.on_move_axis(MoveAxis::Right, -1.0);
        assert_eq!(rig.pending_moves().len(), 2);

        let report = rig.tick(0.5, &FakeHost::default());
        assert_eq!(report.moves_applied, 2);
        assert!(rig.pending_moves().is_empty());
        // 50 * 0.5 forward (-Z) and 25 left (-X); height untouched
        let expected = Vec3::new(-25.0, 7.0, -25.0);
        assert!((rig.position() - expected).length() < 1e-4);

        let report = rig.tick(0.5, &FakeHost::default());
        assert_eq!(report.moves_applied, 0);
    }

    #[test]
    fn move_axis_uses_arm_heading() {
        let settings = RtsCameraSettings {
            starting_yaw: 90.0,
            ..quiet_settings()
        };
        let mut rig = RTSCamera::new(settings, Vec3::ZERO);
        rig.on_move_axis(MoveAxis::Forward, 1.0);
        rig.tick(1.0, &FakeHost::default());
        assert!((rig.position() - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn drag_pans_with_sign_conventions() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::ZERO);
        let size = Vec2::new(1000.0, 1000.0);
        rig.on_drag(true, &Viewport::new(Some(Vec2::new(500.0, 500.0)), size));
        assert_eq!(rig.drag().origin(), Some(Vec2::new(500.0, 500.0)));
        assert!(rig.pending_moves().is_empty());

        // Pointer moves right by 300px and down by 300px (600px is full speed)
        rig.on_drag(true, &Viewport::new(Some(Vec2::new(800.0, 800.0)), size));
        let moves = rig.pending_moves().to_vec();
        assert_eq!(moves.len(), 2);
        assert!((moves[0].scale - 0.5).abs() < 1e-5);
        assert!((moves[1].scale + 0.5).abs() < 1e-5);

        rig.tick(1.0, &FakeHost::default());
        // Right (+X) by 25 and backward (+Z) by 25
        assert!((rig.position() - Vec3::new(25.0, 0.0, 25.0)).length() < 1e-3);

        rig.on_drag(false, &Viewport::new(Some(Vec2::new(900.0, 900.0)), size));
        assert!(!rig.is_dragging());
        assert!(rig.pending_moves().is_empty());
        rig.tick(1.0, &FakeHost::default());
        assert!((rig.position() - Vec3::new(25.0, 0.0, 25.0)).length() < 1e-3);
    }

    #[test]
    fn drag_suppresses_edge_scroll() {
        let settings = RtsCameraSettings {
            edge_scrolling: true,
            ..quiet_settings()
        };
        let mut rig = RTSCamera::new(settings, Vec3::ZERO);
        let host = FakeHost {
            viewport: Viewport::new(Some(Vec2::new(0.0, 300.0)), Vec2::new(800.0, 600.0)),
            ..default()
        };

        let report = rig.tick(0.1, &host);
        assert!(report.edge_scrolled);
        assert!((rig.position() - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);

        rig.on_drag(true, &host.viewport);
        let report = rig.tick(0.1, &host);
        assert!(!report.edge_scrolled);
        assert!((rig.position() - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn ground_hit_replaces_position() {
        let settings = RtsCameraSettings {
            dynamic_height: true,
            ..quiet_settings()
        };
        let mut rig = RTSCamera::new(settings, Vec3::new(3.0, 400.0, 4.0));
        let host = FakeHost {
            ground: Some(FlatGround::new(25.0)),
            ..default()
        };
        let report = rig.tick(0.016, &host);
        assert_eq!(report.ground_hit, Some(true));
        assert_eq!(rig.position(), Vec3::new(3.0, 25.0, 4.0));
        assert!(!rig.probe_warning_reported());
    }

    #[test]
    fn ground_miss_latches_warning_once() {
        let settings = RtsCameraSettings {
            dynamic_height: true,
            ..quiet_settings()
        };
        let mut rig = RTSCamera::new(settings, Vec3::new(0.0, 12.0, 0.0));
        let host = FakeHost::default();

        assert!(!rig.probe_warning_reported());
        for _ in 0..100 {
            let report = rig.tick(0.016, &host);
            assert_eq!(report.ground_hit, Some(false));
            assert!(rig.probe_warning_reported());
        }
        assert_eq!(host.probes.get(), 100);
        assert_eq!(rig.position(), Vec3::new(0.0, 12.0, 0.0));
    }

    #[test]
    fn disabled_dynamic_height_skips_probe() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::ZERO);
        let host = FakeHost::default();
        let report = rig.tick(0.016, &host);
        assert_eq!(report.ground_hit, None);
        assert_eq!(host.probes.get(), 0);
    }

    #[test]
    fn boundary_resolves_once_and_clamps() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::new(150.0, 9.0, -200.0));
        let mut host = FakeHost {
            volumes: vec![square_volume()],
            ..default()
        };
        rig.attach(&host);
        assert!(rig.is_attached());
        assert_eq!(
            rig.boundary(),
            Some(BoundaryRegion::new(Vec2::ZERO, Vec2::new(100.0, 100.0)))
        );

        let report = rig.tick(0.016, &host);
        assert!(report.clamped);
        assert_eq!(rig.position(), Vec3::new(100.0, 9.0, -100.0));

        // A second attach does not search again
        host.volumes.clear();
        rig.attach(&host);
        assert!(rig.boundary().is_some());
    }

    #[test]
    fn missing_volume_leaves_rig_unbounded() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::new(1e6, 0.0, -1e6));
        let host = FakeHost::default();
        rig.attach(&host);
        assert_eq!(rig.boundary(), None);
        let report = rig.tick(0.016, &host);
        assert!(!report.clamped);
        assert_eq!(rig.position(), Vec3::new(1e6, 0.0, -1e6));
    }

    #[test]
    fn follow_target_overrides_moves_and_is_clamped() {
        let target = Entity::from_raw(42);
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::ZERO);
        let host = FakeHost {
            target: Some((target, Vec3::new(500.0, 3.0, 20.0))),
            volumes: vec![square_volume()],
            ..default()
        };
        rig.attach(&host);
        rig.follow_target(target);
        rig.on_move_axis(MoveAxis::Right, 1.0);

        let report = rig.tick(0.1, &host);
        assert!(report.followed);
        assert!(report.clamped);
        assert_eq!(rig.position(), Vec3::new(100.0, 3.0, 20.0));

        rig.unfollow_target();
        assert_eq!(rig.followed(), None);
        let report = rig.tick(0.1, &host);
        assert!(!report.followed);
    }

    #[test]
    fn lost_follow_target_is_dropped() {
        let mut rig = RTSCamera::new(quiet_settings(), Vec3::new(1.0, 2.0, 3.0));
        rig.follow_target(Entity::from_raw(7));
        let report = rig.tick(0.1, &FakeHost::default());
        assert!(!report.followed);
        assert_eq!(rig.followed(), None);
        assert_eq!(rig.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn arm_lag_trails_rig_when_enabled() {
        let settings = RtsCameraSettings {
            camera_lag: true,
            camera_rotation_lag: true,
            ..quiet_settings()
        };
        let mut rig = RTSCamera::new(settings, Vec3::ZERO);
        rig.on_move_axis(MoveAxis::Right, 1.0);
        rig.turn_right();
        rig.tick(1.0 / 60.0, &FakeHost::default());
        assert!(rig.lag().pivot.x > 0.0 && rig.lag().pivot.x < rig.position().x);
        assert!(rig.lag().yaw > 0.0 && rig.lag().yaw < 45.0);
    }

    #[test]
    fn teleport_resets_lag() {
        let mut rig = RTSCamera::new(RtsCameraSettings::default(), Vec3::ZERO);
        rig.set_position(Vec3::new(10.0, 0.0, 10.0));
        assert_eq!(rig.lag().pivot, Vec3::new(10.0, 0.0, 10.0));
    }
}
