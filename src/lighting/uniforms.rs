//! Name-addressed shader uniforms.
//!
//! The host side writes uniforms by name (`set_float("_Spotlight[2].range", ..)`)
//! through [`ShaderUniforms`]. [`LitUniforms`] is the GPU block of the lit
//! shader; it resolves those names to fields of a `bytemuck::Pod` struct whose
//! layout matches `lit.wgsl`. Indexed names address fixed-size light arrays
//! positionally.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::lighting::light::MAX_LIGHTS;

pub const PROJECTION: &str = "_Projection";
pub const VIEW: &str = "_View";
pub const CAM_POS: &str = "_CamPos";
pub const PHONG: &str = "_Phong";

pub const USED_POINT_LIGHTS: &str = "_UsedPointLights";
pub const USED_DIRECTIONAL_LIGHTS: &str = "_UsedDirectionalLights";
pub const USED_SPOTLIGHTS: &str = "_UsedSpotlights";

pub const POINT_LIGHT: &str = "_PointLight";
pub const DIRECTIONAL_LIGHT: &str = "_DirectionalLight";
pub const SPOTLIGHT: &str = "_Spotlight";

/// Name of field `field` of element `index` of the uniform array `prefix`,
/// e.g. `_PointLight[3].color`.
pub fn indexed_name(prefix: &str, index: usize, field: &str) -> String {
    format!("{prefix}[{index}].{field}")
}

/// Split `_PointLight[3].color` into (`_PointLight`, 3, `color`).
pub fn split_indexed_name(name: &str) -> Option<(&str, usize, &str)> {
    let open = name.find('[')?;
    let close = open + name[open..].find(']')?;
    let index = name[open + 1..close].parse().ok()?;
    let field = name[close + 1..].strip_prefix('.')?;
    Some((&name[..open], index, field))
}

/// Sink for named uniform values (`setInt`, `setFloat`, `setVec3`,
/// `setMat4`). Names that the program does not declare are ignored.
pub trait ShaderUniforms {
    fn set_int(&mut self, name: &str, value: i32);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub pos: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    // Uniform arrays need a 16 byte aligned stride
    pub _padding: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub dir: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _padding: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotlightRaw {
    pub pos: [f32; 3],
    pub range: f32,
    pub dir: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub min_angle: f32,
    pub max_angle: f32,
    pub falloff: f32,
    pub _padding: [u32; 2],
}

/// The lit shader's uniform block (`Frame` in `lit.wgsl`).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub cam_pos: [f32; 3],
    pub phong: i32,
    pub mat_color: [f32; 3],
    pub mat_ambient: f32,
    pub mat_diffuse: f32,
    pub mat_specular: f32,
    pub mat_shininess: f32,
    pub texture_scale: f32,
    pub attenuation_constant: f32,
    pub attenuation_linear: f32,
    pub attenuation_quadratic: f32,
    pub _padding: u32,
    pub used_point_lights: i32,
    pub used_directional_lights: i32,
    pub used_spotlights: i32,
    pub _padding2: u32,
    pub point_lights: [PointLightRaw; MAX_LIGHTS],
    pub directional_lights: [DirectionalLightRaw; MAX_LIGHTS],
    pub spotlights: [SpotlightRaw; MAX_LIGHTS],
}

impl LitUniforms {
    pub fn new() -> Self {
        Self {
            projection: Matrix4::identity().into(),
            view: Matrix4::identity().into(),
            texture_scale: 1.0,
            ..bytemuck::Zeroable::zeroed()
        }
    }

    fn unknown(name: &str) {
        log::debug!("Ignoring uniform {name}, the lit shader does not declare it.");
    }

    fn set_indexed_float(&mut self, name: &str, value: f32) -> bool {
        let Some((prefix, index, field)) = split_indexed_name(name) else {
            return false;
        };
        match prefix {
            POINT_LIGHT => match (self.point_lights.get_mut(index), field) {
                (Some(light), "intensity") => light.intensity = value,
                _ => return false,
            },
            DIRECTIONAL_LIGHT => match (self.directional_lights.get_mut(index), field) {
                (Some(light), "intensity") => light.intensity = value,
                _ => return false,
            },
            SPOTLIGHT => {
                let Some(light) = self.spotlights.get_mut(index) else {
                    return false;
                };
                match field {
                    "intensity" => light.intensity = value,
                    "range" => light.range = value,
                    "minAngle" => light.min_angle = value,
                    "maxAngle" => light.max_angle = value,
                    "falloff" => light.falloff = value,
                    _ => return false,
                }
            }
            _ => return false,
        }
        true
    }

    fn set_indexed_vec3(&mut self, name: &str, value: [f32; 3]) -> bool {
        let Some((prefix, index, field)) = split_indexed_name(name) else {
            return false;
        };
        match prefix {
            POINT_LIGHT => match (self.point_lights.get_mut(index), field) {
                (Some(light), "pos") => light.pos = value,
                (Some(light), "color") => light.color = value,
                _ => return false,
            },
            DIRECTIONAL_LIGHT => match (self.directional_lights.get_mut(index), field) {
                (Some(light), "dir") => light.dir = value,
                (Some(light), "color") => light.color = value,
                _ => return false,
            },
            SPOTLIGHT => match (self.spotlights.get_mut(index), field) {
                (Some(light), "pos") => light.pos = value,
                (Some(light), "dir") => light.dir = value,
                (Some(light), "color") => light.color = value,
                _ => return false,
            },
            _ => return false,
        }
        true
    }
}

impl Default for LitUniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderUniforms for LitUniforms {
    fn set_int(&mut self, name: &str, value: i32) {
        let max = MAX_LIGHTS as i32;
        match name {
            PHONG => self.phong = value,
            USED_POINT_LIGHTS => self.used_point_lights = value.clamp(0, max),
            USED_DIRECTIONAL_LIGHTS => self.used_directional_lights = value.clamp(0, max),
            USED_SPOTLIGHTS => self.used_spotlights = value.clamp(0, max),
            _ => Self::unknown(name),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            "_Mat.ambientCoefficient" => self.mat_ambient = value,
            "_Mat.diffuseCoefficient" => self.mat_diffuse = value,
            "_Mat.specularCoefficient" => self.mat_specular = value,
            "_Mat.shininess" => self.mat_shininess = value,
            "_Mat.textureScale" => self.texture_scale = value,
            "_Attenuation.constant" => self.attenuation_constant = value,
            "_Attenuation.linear" => self.attenuation_linear = value,
            "_Attenuation.quadratic" => self.attenuation_quadratic = value,
            _ => {
                if !self.set_indexed_float(name, value) {
                    Self::unknown(name)
                }
            }
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        let value: [f32; 3] = value.into();
        match name {
            CAM_POS => self.cam_pos = value,
            "_Mat.color" => self.mat_color = value,
            _ => {
                if !self.set_indexed_vec3(name, value) {
                    Self::unknown(name)
                }
            }
        }
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        match name {
            PROJECTION => self.projection = value.into(),
            VIEW => self.view = value.into(),
            _ => Self::unknown(name),
        }
    }
}
