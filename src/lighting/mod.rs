//! Light records, ring placement and the uniform upload.

pub mod light;
pub mod placement;
pub mod uniforms;
pub mod upload;

use crate::{
    lighting::uniforms::ShaderUniforms,
    ui::inspect::{Inspectable, Inspector},
};

/// Distance attenuation shared by point lights and spotlights:
/// `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.35,
            quadratic: 0.44,
        }
    }
}

impl Attenuation {
    pub fn upload(&self, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_float("_Attenuation.constant", self.constant);
        uniforms.set_float("_Attenuation.linear", self.linear);
        uniforms.set_float("_Attenuation.quadratic", self.quadratic);
    }
}

impl Inspectable for Attenuation {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.float("Constant", &mut self.constant, 0.0..=2.0);
        ui.float("Linear", &mut self.linear, 0.0014..=1.0);
        ui.float("Quadratic", &mut self.quadratic, 0.000007..=2.0);
    }
}
