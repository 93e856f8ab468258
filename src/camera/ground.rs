//! Vertical ground probing for dynamic camera height.

use bevy::prelude::*;

use crate::core::config::CollisionChannel;

/// A vertical probe segment traced from `start` down to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub start: Vec3,
    pub end: Vec3,
    pub channel: CollisionChannel,
}

impl GroundProbe {
    /// Probe from `length` above `position` to `length` below it.
    pub fn through(position: Vec3, length: f32, channel: CollisionChannel) -> Self {
        Self {
            start: position + Vec3::Y * length,
            end: position - Vec3::Y * length,
            channel,
        }
    }
}

/// Something a ground probe can hit.
pub trait GroundSurface: Send + Sync + 'static {
    /// Returns the first point along the probe where it meets this surface.
    fn cast(&self, probe: &GroundProbe) -> Option<Vec3>;
}

/// Checks a probe segment against a surface height at its planar position.
fn hit_height(probe: &GroundProbe, height: f32) -> Option<Vec3> {
    let (low, high) = if probe.start.y >= probe.end.y {
        (probe.end.y, probe.start.y)
    } else {
        (probe.start.y, probe.end.y)
    };
    if !(low..=high).contains(&height) {
        return None;
    }
    Some(Vec3::new(probe.start.x, height, probe.start.z))
}

/// An infinite horizontal plane.
#[derive(Debug, Clone)]
pub struct FlatGround {
    pub height: f32,
    pub channels: Vec<CollisionChannel>,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            channels: vec![CollisionChannel::WorldStatic],
        }
    }
}

impl GroundSurface for FlatGround {
    fn cast(&self, probe: &GroundProbe) -> Option<Vec3> {
        if !self.channels.contains(&probe.channel) {
            return None;
        }
        hit_height(probe, self.height)
    }
}

/// A heightfield sampled by a closure, restricted to a planar rectangle.
pub struct HeightfieldGround {
    /// Planar `(x, z)` corners of the sampled area.
    pub min: Vec2,
    pub max: Vec2,
    pub channels: Vec<CollisionChannel>,
    sampler: Box<dyn Fn(f32, f32) -> f32 + Send + Sync>,
}

impl HeightfieldGround {
    pub fn new<F>(min: Vec2, max: Vec2, sampler: F) -> Self
    where
        F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
    {
        Self {
            min,
            max,
            channels: vec![CollisionChannel::WorldStatic],
            sampler: Box::new(sampler),
        }
    }

    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let inside = x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y;
        inside.then(|| (self.sampler)(x, z))
    }
}

impl GroundSurface for HeightfieldGround {
    fn cast(&self, probe: &GroundProbe) -> Option<Vec3> {
        if !self.channels.contains(&probe.channel) {
            return None;
        }
        let height = self.height_at(probe.start.x, probe.start.z)?;
        hit_height(probe, height)
    }
}

/// Every surface the camera's ground probe can hit.
#[derive(Resource, Default)]
pub struct GroundSurfaces {
    surfaces: Vec<Box<dyn GroundSurface>>,
}

impl GroundSurfaces {
    pub fn add(&mut self, surface: impl GroundSurface) -> &mut Self {
        self.surfaces.push(Box::new(surface));
        self
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Nearest hit to the probe start. Overlapping floors resolve to the
    /// topmost one when probing downward.
    pub fn cast(&self, probe: &GroundProbe) -> Option<Vec3> {
        self.surfaces
            .iter()
            .filter_map(|surface| surface.cast(probe))
            .min_by(|a, b| {
                a.distance_squared(probe.start)
                    .total_cmp(&b.distance_squared(probe.start))
            })
    }
}

/// Once-per-lifetime warning for a rig whose ground probe found nothing.
#[derive(Debug, Clone, Default)]
pub struct ProbeMissLatch {
    reported: bool,
}

impl ProbeMissLatch {
    pub fn is_set(&self) -> bool {
        self.reported
    }

    /// Records a miss. Returns true only for the first miss ever recorded.
    pub fn record_miss(&mut self) -> bool {
        if self.reported {
            return false;
        }
        self.reported = true;
        true
    }
}
