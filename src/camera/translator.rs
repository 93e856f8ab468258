//! Input-to-intent translation: turns raw axis, button and pointer samples
//! into move commands and drag-state transitions.

use bevy::prelude::*;

use crate::camera::commands::MoveCommand;
use crate::camera::state::{DragState, Viewport};
use crate::core::math::{heading_forward, heading_right};

/// Which planar axis of the zoom arm a move input drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAxis {
    Forward,
    Right,
}

impl MoveAxis {
    /// Planar direction of this axis for an arm heading.
    pub fn direction(self, heading: f32) -> Vec2 {
        match self {
            Self::Forward => heading_forward(heading),
            Self::Right => heading_right(heading),
        }
    }

    pub fn command(self, heading: f32, scalar: f32) -> MoveCommand {
        MoveCommand::new(self.direction(heading), scalar)
    }
}

/// Pointer travel since the drag began, as a fraction of `drag_extent` of the
/// viewport per axis, clamped to `[-1, 1]`. A zero-sized axis yields 0.
pub fn normalized_drag_delta(origin: Vec2, pointer: Vec2, viewport_size: Vec2, drag_extent: f32) -> Vec2 {
    let extents = viewport_size * drag_extent;
    let delta = pointer - origin;
    let axis = |delta: f32, extent: f32| {
        if extent <= 0.0 || !extent.is_finite() {
            return 0.0;
        }
        delta.clamp(-extent, extent) / extent
    };
    Vec2::new(axis(delta.x, extents.x), axis(delta.y, extents.y))
}

/// Outcome of one drag input sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub next: DragState,
    /// Normalized pointer travel to pan by, if the drag produced movement.
    pub pan: Option<Vec2>,
}

/// Drag transition table:
///
/// | state    | active | result                           |
/// |----------|--------|----------------------------------|
/// | Idle     | true   | Dragging from the current pointer |
/// | Dragging | true   | stay, pan by normalized delta    |
/// | Dragging | false  | Idle                             |
/// | Idle     | false  | Idle                             |
pub fn step_drag(state: DragState, active: bool, viewport: &Viewport, drag_extent: f32) -> DragStep {
    match (state, active) {
        (DragState::Idle, true) => DragStep {
            next: viewport
                .pointer
                .map_or(DragState::Idle, |origin| DragState::Dragging { origin }),
            pan: None,
        },
        (DragState::Dragging { origin }, true) => DragStep {
            next: state,
            pan: viewport
                .pointer
                .map(|pointer| normalized_drag_delta(origin, pointer, viewport.size, drag_extent)),
        },
        (DragState::Dragging { .. }, false) | (DragState::Idle, false) => DragStep {
            next: DragState::Idle,
            pan: None,
        },
    }
}

/// Move commands for a drag pan: pointer right pans right, pointer down
/// pans backward.
pub fn drag_commands(pan: Vec2, heading: f32) -> [MoveCommand; 2] {
    [
        MoveAxis::Right.command(heading, pan.x),
        MoveAxis::Forward.command(heading, -pan.y),
    ]
}
