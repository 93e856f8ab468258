//! Small geometry helpers shared by the camera pipeline.
//!
//! Planar positions are `(x, z)` pairs stored in a `Vec2`; the vertical axis is
//! Bevy's `y`. Headings are degrees, clockwise when seen from above, with 0
//! facing `-Z`.

use bevy::prelude::*;

/// Returns `value` normalized to the range `[min, max]` (20 in 10..50 gives
/// 0.25). An empty range yields `None` instead of an infinite or NaN ratio.
pub fn normalize_to_range(value: f32, min: f32, max: f32) -> Option<f32> {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return None;
    }
    Some((value - min) / span)
}

/// Splits a world position into its planar part.
#[inline]
pub fn planar(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Rebuilds a world position from a planar part and a height.
#[inline]
pub fn from_planar(planar: Vec2, height: f32) -> Vec3 {
    Vec3::new(planar.x, height, planar.y)
}

/// Rotation about the vertical axis for a heading in degrees.
#[inline]
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y(-heading.to_radians())
}

/// Planar forward direction for a heading.
pub fn heading_forward(heading: f32) -> Vec2 {
    planar(heading_rotation(heading) * Vec3::NEG_Z)
}

/// Planar right direction for a heading.
pub fn heading_right(heading: f32) -> Vec2 {
    planar(heading_rotation(heading) * Vec3::X)
}

/// Fraction of the remaining distance covered in `dt` at `speed`.
#[inline]
pub fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

/// Frame-rate independent exponential approach of `current` toward `target`.
/// A non-positive speed snaps straight to the target.
pub fn exp_interp(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let distance = target - current;
    if distance == 0.0 {
        return current;
    }
    current + distance * exp_lerp_factor(speed, dt)
}

/// Vector version of [`exp_interp`].
pub fn exp_interp_vec3(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }
    if current == target {
        return current;
    }
    current + (target - current) * exp_lerp_factor(speed, dt)
}

/// Signed smallest difference `to - from` in degrees, in `[-180, 180)`.
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Exponential approach between two headings along the shorter arc.
pub fn exp_interp_heading(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    let delta = shortest_angle_delta(current, target);
    exp_interp(current, current + delta, dt, speed)
}
