//! Light records and the fixed-capacity arrays holding them.

use cgmath::{InnerSpace, Vector3};

use crate::{
    error::InvalidLightCount,
    ui::inspect::{Inspectable, Inspector},
};

/// Capacity of each light kind.
pub const MAX_LIGHTS: usize = 8;
pub const MAX_POINT_LIGHTS: usize = MAX_LIGHTS;
pub const MAX_DIRECTIONAL_LIGHTS: usize = MAX_LIGHTS;
pub const MAX_SPOTLIGHTS: usize = MAX_LIGHTS;

/// Colours given to light `i` of every kind at startup.
pub const DEFAULT_COLORS: [[f32; 3]; MAX_LIGHTS] = [
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.5, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Normalise `v`, or return `fallback` for (near) zero vectors.
pub fn normalize_or(v: Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    let len2 = v.magnitude2();
    if len2 > f32::EPSILON && len2.is_finite() {
        v / len2.sqrt()
    } else {
        fallback
    }
}

/// Light records that carry a colour, an intensity and placement fields the
/// panel only exposes while lights are moved by hand.
pub trait Light: Inspectable {
    fn set_color(&mut self, color: Vector3<f32>);

    /// Position and/or direction fields.
    fn inspect_placement(&mut self, ui: &mut dyn Inspector);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub pos: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            pos: Vector3::new(0.0, 0.0, 0.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }
}

impl Inspectable for PointLight {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.color("Color", &mut self.color);
        ui.float("Intensity", &mut self.intensity, 0.0..=10.0);
    }
}

impl Light for PointLight {
    fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    fn inspect_placement(&mut self, ui: &mut dyn Inspector) {
        ui.vec3("Position", &mut self.pos, -30.0..=30.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit length at upload; the upload normalises whatever the panel left.
    pub dir: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub const DEFAULT_DIR: Vector3<f32> = Vector3 { x: 0.0, y: 1.0, z: 0.0 };
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            dir: Self::DEFAULT_DIR,
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }
}

impl Inspectable for DirectionalLight {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.color("Color", &mut self.color);
        ui.float("Intensity", &mut self.intensity, 0.0..=10.0);
    }
}

impl Light for DirectionalLight {
    fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    fn inspect_placement(&mut self, ui: &mut dyn Inspector) {
        ui.vec3("Direction", &mut self.dir, -1.0..=1.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub pos: Vector3<f32>,
    pub dir: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub range: f32,
    /// Degrees. Full intensity inside this half angle.
    pub inner_angle: f32,
    /// Degrees. Zero intensity outside this half angle.
    pub outer_angle: f32,
    pub angle_falloff: f32,
}

impl Spotlight {
    pub const DEFAULT_DIR: Vector3<f32> = Vector3 { x: 0.0, y: -1.0, z: 0.0 };

    /// `(cos(inner), cos(outer))`, the values the fragment stage compares
    /// dot products against. Always derived from the degree values.
    pub fn cone_cosines(&self) -> (f32, f32) {
        (
            self.inner_angle.to_radians().cos(),
            self.outer_angle.to_radians().cos(),
        )
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self {
            pos: Vector3::new(0.0, 0.0, 0.0),
            dir: Self::DEFAULT_DIR,
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            range: 20.0,
            inner_angle: 12.5,
            outer_angle: 17.5,
            angle_falloff: 1.0,
        }
    }
}

impl Inspectable for Spotlight {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.color("Color", &mut self.color);
        ui.float("Intensity", &mut self.intensity, 0.0..=10.0);
        ui.float("Range", &mut self.range, 0.0..=100.0);
        ui.float("Inner Angle", &mut self.inner_angle, 0.0..=180.0);
        ui.float("Outer Angle", &mut self.outer_angle, 0.0..=180.0);
        ui.float("Angle Falloff", &mut self.angle_falloff, 0.0..=10.0);
    }
}

impl Light for Spotlight {
    fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    fn inspect_placement(&mut self, ui: &mut dyn Inspector) {
        ui.vec3("Position", &mut self.pos, -30.0..=30.0);
        ui.vec3("Direction", &mut self.dir, -1.0..=1.0);
    }
}

/// Fixed array of `N` lights with a separately tracked active count.
///
/// Entries at or beyond the active count are inert but keep their state, so
/// raising the count again brings back the previous settings.
#[derive(Debug, Clone)]
pub struct LightArray<L, const N: usize> {
    lights: [L; N],
    active: usize,
}

impl<L: Light + Default, const N: usize> LightArray<L, N> {
    /// All lights default, coloured from [`DEFAULT_COLORS`], none active.
    pub fn new() -> Self {
        Self {
            lights: std::array::from_fn(|i| {
                let mut light = L::default();
                light.set_color(DEFAULT_COLORS[i % DEFAULT_COLORS.len()].into());
                light
            }),
            active: 0,
        }
    }
}

impl<L: Light + Default, const N: usize> Default for LightArray<L, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, const N: usize> LightArray<L, N> {
    pub const CAPACITY: usize = N;

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Set how many lights are live; rejects anything outside `0..=N`.
    pub fn set_active_count(&mut self, count: i64) -> Result<(), InvalidLightCount> {
        if count < 0 || count as u64 > N as u64 {
            return Err(InvalidLightCount {
                requested: count,
                max: N,
            });
        }
        self.active = count as usize;
        Ok(())
    }

    /// The live lights, in index order.
    pub fn active(&self) -> &[L] {
        &self.lights[..self.active]
    }

    pub fn active_mut(&mut self) -> &mut [L] {
        &mut self.lights[..self.active]
    }

    /// Any slot, live or not.
    pub fn get(&self, index: usize) -> Option<&L> {
        self.lights.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut L> {
        self.lights.get_mut(index)
    }
}

impl<L: Light, const N: usize> LightArray<L, N> {
    /// The "Light Count" slider.
    pub fn inspect_count(&mut self, ui: &mut dyn Inspector) {
        let mut count = self.active as i32;
        ui.int("Light Count", &mut count, 0..=N as i32);
        if let Err(e) = self.set_active_count(count as i64) {
            log::warn!("{e}");
        }
    }

    /// One group per live light, labelled "{name} {index}".
    pub fn inspect_entries(&mut self, ui: &mut dyn Inspector, name: &str, manual_placement: bool) {
        for (i, light) in self.lights[..self.active].iter_mut().enumerate() {
            ui.group(&format!("{name} {i}"), &mut |ui: &mut dyn Inspector| {
                light.inspect(ui);
                if manual_placement {
                    light.inspect_placement(ui);
                }
            });
        }
    }
}
