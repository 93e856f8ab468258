use bevy::prelude::*;

/// "Move along this planar direction, scaled by this factor, this frame."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCommand {
    pub direction: Vec2,
    pub scale: f32,
}

impl MoveCommand {
    pub fn new(direction: Vec2, scale: f32) -> Self {
        Self { direction, scale }
    }
}

/// Move requests collected from input callbacks, applied once per tick.
#[derive(Debug, Clone, Default)]
pub struct MoveCommandQueue {
    pending: Vec<MoveCommand>,
}

impl MoveCommandQueue {
    pub fn enqueue(&mut self, command: MoveCommand) {
        self.pending.push(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[MoveCommand] {
        &self.pending
    }

    /// Applies every queued command to `planar` in arrival order, then empties
    /// the queue. Each command moves by its normalized direction times
    /// `move_speed * scale * dt`. Returns how many commands were applied.
    pub fn drain_into(&mut self, planar: &mut Vec2, move_speed: f32, dt: f32) -> usize {
        let applied = self.pending.len();
        for command in self.pending.drain(..) {
            let movement = command.direction.normalize_or_zero() * move_speed * command.scale * dt;
            *planar += movement;
        }
        applied
    }
}
