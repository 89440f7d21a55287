//! Surface material shared by every lit object.

use cgmath::Vector3;

use crate::{
    lighting::uniforms::ShaderUniforms,
    ui::inspect::{Inspectable, Inspector},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vector3<f32>,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vector3::new(1.0, 1.0, 1.0),
            ambient: 0.1,
            diffuse: 0.5,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

impl Material {
    pub fn upload(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_vec3("_Mat.color", self.color);
        uniforms.set_float("_Mat.ambientCoefficient", self.ambient);
        uniforms.set_float("_Mat.diffuseCoefficient", self.diffuse);
        uniforms.set_float("_Mat.specularCoefficient", self.specular);
        uniforms.set_float("_Mat.shininess", self.shininess);
    }
}

impl Inspectable for Material {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.color("Color", &mut self.color);
        ui.float("Ambient K", &mut self.ambient, 0.0..=1.0);
        ui.float("Diffuse K", &mut self.diffuse, 0.0..=1.0);
        ui.float("Specular K", &mut self.specular, 0.0..=1.0);
        ui.float("Shininess", &mut self.shininess, 1.0..=512.0);
    }
}
