// Camera rig configuration constants
// Default values for every tunable in RtsCameraSettings, plus input defaults.

// === CAMERA MOVEMENT ===
pub mod camera {
    // Planar movement
    pub const MOVE_SPEED: f32 = 50.0; // World units per second at full axis input
    pub const ROTATE_SPEED: f32 = 45.0; // Degrees per discrete turn step

    // Zoom arm
    pub const ZOOM_SPEED: f32 = -200.0; // Negative so scrolling up shortens the arm
    pub const MIN_ZOOM_LENGTH: f32 = 500.0;
    pub const MAX_ZOOM_LENGTH: f32 = 5000.0;
    pub const ZOOM_CATCHUP_SPEED: f32 = 4.0;

    // Arm orientation at attach time
    pub const STARTING_PITCH_DEGREES: f32 = -45.0;
    pub const STARTING_YAW_DEGREES: f32 = 0.0;

    // Arm lag
    pub const CAMERA_LAG_SPEED: f32 = 10.0;
    pub const CAMERA_ROTATION_LAG_SPEED: f32 = 10.0;

    // Edge scrolling
    pub const EDGE_SCROLL_SPEED: f32 = 50.0;
    pub const EDGE_SCROLL_THRESHOLD: f32 = 0.05; // Fraction of viewport extent per edge

    // Drag panning
    pub const DRAG_EXTENT: f32 = 0.6; // Fraction of the viewport that maps to full speed

    // Ground following
    pub const GROUND_TRACE_LENGTH: f32 = 100000.0;

    // Boundary volume lookup
    pub const BOUNDARY_TAG: &str = "RtsCamera#CameraBounds";
}

// === INPUT ===
pub mod input {
    // Mouse wheel pixel deltas are divided by this to approximate line steps
    pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

    // Degrees of yaw per pixel of horizontal mouse motion while rotating
    pub const ROTATE_SENSITIVITY: f32 = 0.25;
}

// === INPUT HOTKEYS ===
pub mod hotkeys {
    use bevy::prelude::{KeyCode, MouseButton};

    // Panning
    pub const MOVE_FORWARD: KeyCode = KeyCode::KeyW;
    pub const MOVE_BACK: KeyCode = KeyCode::KeyS;
    pub const MOVE_LEFT: KeyCode = KeyCode::KeyA;
    pub const MOVE_RIGHT: KeyCode = KeyCode::KeyD;

    // Discrete turning
    pub const TURN_LEFT: KeyCode = KeyCode::KeyQ;
    pub const TURN_RIGHT: KeyCode = KeyCode::KeyE;

    // Mouse gestures
    pub const DRAG_BUTTON: MouseButton = MouseButton::Right;
    pub const ROTATE_BUTTON: MouseButton = MouseButton::Middle;

    // Demo-only follow controls
    pub const FOLLOW_SCOUT: KeyCode = KeyCode::KeyF;
    pub const UNFOLLOW: KeyCode = KeyCode::KeyU;
}
