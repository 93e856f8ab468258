//! Edge scrolling: the closer the pointer sits to a viewport edge, the faster
//! the rig slides toward that edge.

use bevy::prelude::*;

use crate::camera::state::Viewport;
use crate::core::math::{heading_forward, heading_right, normalize_to_range};

/// Scroll intensity in `[0, 1]` for each viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeIntensities {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeIntensities {
    pub fn is_idle(&self) -> bool {
        self.left == 0.0 && self.right == 0.0 && self.top == 0.0 && self.bottom == 0.0
    }
}

/// Intensity for the edge at coordinate 0: 1 on the edge, 0 past the band.
pub fn near_edge_intensity(coordinate: f32, extent: f32, threshold: f32) -> f32 {
    normalize_to_range(coordinate, 0.0, extent * threshold)
        .map_or(0.0, |normalized| (1.0 - normalized).clamp(0.0, 1.0))
}

/// Intensity for the edge at coordinate `extent`.
pub fn far_edge_intensity(coordinate: f32, extent: f32, threshold: f32) -> f32 {
    normalize_to_range(coordinate, extent * (1.0 - threshold), extent)
        .map_or(0.0, |normalized| normalized.clamp(0.0, 1.0))
}

/// Samples all four edges. No pointer means no scrolling.
pub fn sample_edges(viewport: &Viewport, threshold: f32) -> EdgeIntensities {
    let Some(pointer) = viewport.pointer else {
        return EdgeIntensities::default();
    };
    let size = viewport.size;
    EdgeIntensities {
        left: near_edge_intensity(pointer.x, size.x, threshold),
        right: far_edge_intensity(pointer.x, size.x, threshold),
        top: near_edge_intensity(pointer.y, size.y, threshold),
        bottom: far_edge_intensity(pointer.y, size.y, threshold),
    }
}

/// Slides `planar` for every active edge. Left and right follow the rig's
/// right axis, top and bottom its forward axis; each edge applies on its own
/// so corners scroll diagonally.
pub fn apply_edge_scroll(
    planar: &mut Vec2,
    intensities: &EdgeIntensities,
    heading: f32,
    speed: f32,
    dt: f32,
) {
    let right = heading_right(heading);
    let forward = heading_forward(heading);
    let step = speed * dt;

    *planar += -right * intensities.left * step;
    *planar += right * intensities.right * step;
    *planar += forward * intensities.top * step;
    *planar += -forward * intensities.bottom * step;
}
