//! Per-frame light placement: lights spread evenly on a ring and aimed at a
//! common axis.
//!
//! Every function here guards a zero light count explicitly; the ring formula
//! divides by the count and must never hand NaN to the uniform upload.

use std::f32::consts::TAU;

use cgmath::Vector3;

use crate::lighting::light::{DirectionalLight, LightArray, PointLight, Spotlight, normalize_or};

/// Vertical component of ring-aimed directional lights.
pub const DIRECTIONAL_VERTICAL: f32 = 1.0;
/// Vertical component of ring-aimed spotlights.
pub const SPOTLIGHT_VERTICAL: f32 = -1.0;

/// Circle the ring-placed lights sit on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub radius: f32,
    pub height: f32,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            radius: 5.0,
            height: 5.0,
        }
    }
}

/// Azimuth (radians) of light `index` out of `count`, `None` when `count` is
/// zero or `index` is out of range.
pub fn ring_azimuth(index: usize, count: usize) -> Option<f32> {
    if count == 0 || index >= count {
        return None;
    }
    Some(TAU * (index as f32 / count as f32))
}

/// Position of light `index` out of `count` on `layout`.
pub fn ring_position(index: usize, count: usize, layout: RingLayout) -> Option<Vector3<f32>> {
    let theta = ring_azimuth(index, count)?;
    Some(Vector3::new(
        layout.radius * theta.cos(),
        layout.height,
        layout.radius * theta.sin(),
    ))
}

/// Unit direction of light `index` out of `count`.
///
/// The horizontal part points along the ring azimuth scaled by
/// `sin(radians(-tilt_degrees))`; `vertical` is the fixed y component before
/// normalisation.
pub fn aim_direction(
    index: usize,
    count: usize,
    tilt_degrees: f32,
    vertical: f32,
) -> Option<Vector3<f32>> {
    let theta = ring_azimuth(index, count)?;
    let tilt = (-tilt_degrees).to_radians().sin();
    let raw = Vector3::new(theta.cos() * tilt, vertical, theta.sin() * tilt);
    Some(normalize_or(raw, Vector3::new(0.0, vertical.signum(), 0.0)))
}

/// Move every live point light onto the ring. Returns how many were placed.
pub fn place_point_lights<const N: usize>(
    lights: &mut LightArray<PointLight, N>,
    layout: RingLayout,
) -> usize {
    let count = lights.active_count();
    if count == 0 {
        return 0;
    }
    for (i, light) in lights.active_mut().iter_mut().enumerate() {
        if let Some(pos) = ring_position(i, count, layout) {
            light.pos = pos;
        }
    }
    count
}

/// Aim every live directional light from its ring azimuth.
pub fn aim_directional_lights<const N: usize>(
    lights: &mut LightArray<DirectionalLight, N>,
    tilt_degrees: f32,
) -> usize {
    let count = lights.active_count();
    if count == 0 {
        return 0;
    }
    for (i, light) in lights.active_mut().iter_mut().enumerate() {
        if let Some(dir) = aim_direction(i, count, tilt_degrees, DIRECTIONAL_VERTICAL) {
            light.dir = dir;
        }
    }
    count
}

/// Place every live spotlight on the ring and aim it.
pub fn place_spotlights<const N: usize>(
    lights: &mut LightArray<Spotlight, N>,
    layout: RingLayout,
    tilt_degrees: f32,
) -> usize {
    let count = lights.active_count();
    if count == 0 {
        return 0;
    }
    for (i, light) in lights.active_mut().iter_mut().enumerate() {
        if let (Some(pos), Some(dir)) = (
            ring_position(i, count, layout),
            aim_direction(i, count, tilt_degrees, SPOTLIGHT_VERTICAL),
        ) {
            light.pos = pos;
            light.dir = dir;
        }
    }
    count
}
