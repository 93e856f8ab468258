use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::rig::RTSCamera;
use crate::camera::systems::window_viewport;
use crate::camera::translator::MoveAxis;
use crate::core::constants::{hotkeys, input};

/// Keys and buttons driving the camera rig.
#[derive(Resource, Debug, Clone)]
pub struct CameraInputBindings {
    pub move_forward: KeyCode,
    pub move_back: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub drag: MouseButton,
    pub rotate: MouseButton,
    /// Degrees of yaw per pixel of mouse motion while `rotate` is held.
    pub rotate_sensitivity: f32,
}

impl Default for CameraInputBindings {
    fn default() -> Self {
        Self {
            move_forward: hotkeys::MOVE_FORWARD,
            move_back: hotkeys::MOVE_BACK,
            move_left: hotkeys::MOVE_LEFT,
            move_right: hotkeys::MOVE_RIGHT,
            turn_left: hotkeys::TURN_LEFT,
            turn_right: hotkeys::TURN_RIGHT,
            drag: hotkeys::DRAG_BUTTON,
            rotate: hotkeys::ROTATE_BUTTON,
            rotate_sensitivity: input::ROTATE_SENSITIVITY,
        }
    }
}

/// -1, 0 or 1 from a pair of opposing keys.
fn key_axis(keyboard: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut axis = 0.0;
    if keyboard.pressed(positive) {
        axis += 1.0;
    }
    if keyboard.pressed(negative) {
        axis -= 1.0;
    }
    axis
}

/// Wheel steps in lines, whatever unit the platform reports.
pub fn wheel_steps(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / input::PIXELS_PER_SCROLL_LINE,
    }
}

/// Translates this frame's device state into rig input callbacks.
///
/// Controls:
/// - WASD: Pan along the arm's forward/right axes
/// - Q/E: Turn left/right by one step
/// - Mouse wheel: Zoom in/out
/// - Right mouse + drag: Pan by dragging
/// - Middle mouse + move: Rotate
pub fn translate_camera_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mut mouse_motion: EventReader<MouseMotion>,
    bindings: Res<CameraInputBindings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut rigs: Query<&mut RTSCamera>,
) {
    let zoom_steps: Vec<f32> = mouse_wheel.read().map(wheel_steps).collect();

    let motion: f32 = mouse_motion.read().map(|event| event.delta.x).sum();
    let rotate = if mouse_buttons.pressed(bindings.rotate) {
        motion * bindings.rotate_sensitivity
    } else {
        0.0
    };

    let forward = key_axis(&keyboard, bindings.move_forward, bindings.move_back);
    let right = key_axis(&keyboard, bindings.move_right, bindings.move_left);
    let turn_left = keyboard.just_pressed(bindings.turn_left);
    let turn_right = keyboard.just_pressed(bindings.turn_right);

    let drag = if mouse_buttons.pressed(bindings.drag) {
        Some(true)
    } else if mouse_buttons.just_released(bindings.drag) {
        Some(false)
    } else {
        None
    };
    let viewport = window_viewport(windows.get_single().ok());

    for mut rig in rigs.iter_mut() {
        for steps in &zoom_steps {
            rig.on_zoom(*steps);
        }
        if rotate != 0.0 {
            rig.on_rotate(rotate);
        }
        if turn_left {
            rig.turn_left();
        }
        if turn_right {
            rig.turn_right();
        }
        if forward != 0.0 {
            rig.on_move_axis(MoveAxis::Forward, forward);
        }
        if right != 0.0 {
            rig.on_move_axis(MoveAxis::Right, right);
        }
        if let Some(active) = drag {
            rig.on_drag(active, &viewport);
        }
    }
}
