//! Serialises live lights into a [`ShaderUniforms`] sink.
//!
//! For each kind the active count is always written first, even when it is
//! zero, followed by the attribute set of every live light in index order.

use crate::lighting::{
    light::{DirectionalLight, Light, LightArray, PointLight, Spotlight, normalize_or},
    uniforms::{
        DIRECTIONAL_LIGHT, POINT_LIGHT, SPOTLIGHT, ShaderUniforms, USED_DIRECTIONAL_LIGHTS,
        USED_POINT_LIGHTS, USED_SPOTLIGHTS, indexed_name,
    },
};

/// A light kind that knows its uniform array and how to write one element.
pub trait UniformLight: Light {
    /// Uniform array name, e.g. `_PointLight`.
    const PREFIX: &'static str;
    /// Int uniform carrying the live count, e.g. `_UsedPointLights`.
    const COUNT_UNIFORM: &'static str;

    fn upload(&self, index: usize, uniforms: &mut dyn ShaderUniforms);
}

impl UniformLight for PointLight {
    const PREFIX: &'static str = POINT_LIGHT;
    const COUNT_UNIFORM: &'static str = USED_POINT_LIGHTS;

    fn upload(&self, index: usize, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "pos"), self.pos);
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "color"), self.color);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "intensity"), self.intensity);
    }
}

impl UniformLight for DirectionalLight {
    const PREFIX: &'static str = DIRECTIONAL_LIGHT;
    const COUNT_UNIFORM: &'static str = USED_DIRECTIONAL_LIGHTS;

    fn upload(&self, index: usize, uniforms: &mut dyn ShaderUniforms) {
        let dir = normalize_or(self.dir, Self::DEFAULT_DIR);
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "dir"), dir);
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "color"), self.color);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "intensity"), self.intensity);
    }
}

impl UniformLight for Spotlight {
    const PREFIX: &'static str = SPOTLIGHT;
    const COUNT_UNIFORM: &'static str = USED_SPOTLIGHTS;

    fn upload(&self, index: usize, uniforms: &mut dyn ShaderUniforms) {
        let dir = normalize_or(self.dir, Self::DEFAULT_DIR);
        let (min_angle, max_angle) = self.cone_cosines();
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "pos"), self.pos);
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "dir"), dir);
        uniforms.set_vec3(&indexed_name(Self::PREFIX, index, "color"), self.color);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "intensity"), self.intensity);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "range"), self.range);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "minAngle"), min_angle);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "maxAngle"), max_angle);
        uniforms.set_float(&indexed_name(Self::PREFIX, index, "falloff"), self.angle_falloff);
    }
}

/// Write the count and every live light of `lights`. Returns the count.
pub fn upload_lights<L: UniformLight, const N: usize>(
    lights: &LightArray<L, N>,
    uniforms: &mut dyn ShaderUniforms,
) -> usize {
    let count = lights.active_count();
    uniforms.set_int(L::COUNT_UNIFORM, count as i32);
    for (i, light) in lights.active().iter().enumerate() {
        light.upload(i, uniforms);
    }
    count
}
