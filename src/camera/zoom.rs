use crate::core::math::exp_interp;

/// New desired zoom after `delta` units of zoom input, kept inside the range.
pub fn accumulate_zoom(desired: f32, delta: f32, zoom_speed: f32, min: f32, max: f32) -> f32 {
    (desired + delta * zoom_speed).clamp(min, max)
}

/// One smoothing step of the arm length toward the desired zoom.
pub fn smooth_zoom(current: f32, desired: f32, dt: f32, catchup_speed: f32) -> f32 {
    exp_interp(current, desired, dt, catchup_speed)
}
