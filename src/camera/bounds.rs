use bevy::prelude::*;

/// World-space axis-aligned box of a scene volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl WorldBounds {
    /// World box enclosing a local box placed by `transform`.
    pub fn from_local(local_center: Vec3, local_half_extents: Vec3, transform: &GlobalTransform) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let sign = Vec3::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            );
            let corner = transform.transform_point(local_center + sign * local_half_extents);
            min = min.min(corner);
            max = max.max(corner);
        }
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }
}

/// Planar box the rig is kept inside. Heights are never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryRegion {
    /// Planar `(x, z)` centre.
    pub origin: Vec2,
    pub half_extents: Vec2,
}

impl BoundaryRegion {
    pub fn new(origin: Vec2, half_extents: Vec2) -> Self {
        Self {
            origin,
            half_extents,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.origin - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.half_extents
    }

    pub fn contains(&self, planar: Vec2) -> bool {
        planar.cmpge(self.min()).all() && planar.cmple(self.max()).all()
    }

    pub fn clamp(&self, planar: Vec2) -> Vec2 {
        planar.clamp(self.min(), self.max())
    }
}

impl From<WorldBounds> for BoundaryRegion {
    fn from(bounds: WorldBounds) -> Self {
        Self {
            origin: Vec2::new(bounds.center.x, bounds.center.z),
            half_extents: Vec2::new(bounds.half_extents.x, bounds.half_extents.z).abs(),
        }
    }
}

/// The first tagged volume becomes the rig's boundary.
pub fn resolve_boundary(candidates: &[WorldBounds]) -> Option<BoundaryRegion> {
    candidates.first().copied().map(BoundaryRegion::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> BoundaryRegion {
        BoundaryRegion::new(Vec2::ZERO, Vec2::new(100.0, 100.0))
    }

    #[test]
    fn clamps_outside_point_to_edges() {
        assert_eq!(
            region().clamp(Vec2::new(150.0, -200.0)),
            Vec2::new(100.0, -100.0)
        );
    }

    #[test]
    fn inside_point_is_unchanged() {
        let inside = Vec2::new(-40.0, 99.0);
        assert!(region().contains(inside));
        assert_eq!(region().clamp(inside), inside);
    }

    #[test]
    fn offset_region_clamps_around_origin() {
        let region = BoundaryRegion::new(Vec2::new(1000.0, -500.0), Vec2::new(10.0, 20.0));
        assert_eq!(region.clamp(Vec2::ZERO), Vec2::new(990.0, -480.0));
    }

    #[test]
    fn world_bounds_follow_translation_and_scale() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(50.0, 0.0, -20.0).with_scale(Vec3::new(2.0, 1.0, 3.0)),
        );
        let bounds = WorldBounds::from_local(Vec3::ZERO, Vec3::splat(10.0), &transform);
        assert!((bounds.center - Vec3::new(50.0, 0.0, -20.0)).length() < 1e-4);
        assert!((bounds.half_extents - Vec3::new(20.0, 10.0, 30.0)).length() < 1e-4);

        let region = BoundaryRegion::from(bounds);
        assert_eq!(region.origin, Vec2::new(50.0, -20.0));
        assert!((region.half_extents - Vec2::new(20.0, 30.0)).length() < 1e-4);
    }

    #[test]
    fn rotated_volume_grows_its_box() {
        let transform = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(
            std::f32::consts::FRAC_PI_4,
        )));
        let bounds = WorldBounds::from_local(Vec3::ZERO, Vec3::new(10.0, 1.0, 10.0), &transform);
        let expected = 10.0 * std::f32::consts::SQRT_2;
        assert!((bounds.half_extents.x - expected).abs() < 1e-3);
        assert!((bounds.half_extents.z - expected).abs() < 1e-3);
    }

    #[test]
    fn first_candidate_wins() {
        let a = WorldBounds {
            center: Vec3::new(1.0, 0.0, 2.0),
            half_extents: Vec3::splat(5.0),
        };
        let b = WorldBounds {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(50.0),
        };
        let region = resolve_boundary(&[a, b]).unwrap();
        assert_eq!(region.origin, Vec2::new(1.0, 2.0));
        assert_eq!(resolve_boundary(&[]), None);
    }
}
