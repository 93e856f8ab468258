use bevy::prelude::*;

/// Drag gesture state. Transitions are edge-triggered by the drag input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging since the pointer was at `origin` (viewport pixels).
    Dragging { origin: Vec2 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn origin(&self) -> Option<Vec2> {
        match self {
            Self::Dragging { origin } => Some(*origin),
            Self::Idle => None,
        }
    }
}

/// Pointer and viewport size in logical pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// `None` while the pointer is outside the viewport.
    pub pointer: Option<Vec2>,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(pointer: Option<Vec2>, size: Vec2) -> Self {
        Self { pointer, size }
    }
}

/// Everything the rig mutates while running.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRigState {
    /// Pivot position; `(x, z)` is the planar part, `y` the height.
    pub position: Vec3,
    /// Heading in degrees, clockwise from above.
    pub yaw: f32,
    pub current_zoom: f32,
    pub desired_zoom: f32,
    pub drag: DragState,
}

impl CameraRigState {
    pub fn new(position: Vec3, zoom: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            current_zoom: zoom,
            desired_zoom: zoom,
            drag: DragState::Idle,
        }
    }
}
