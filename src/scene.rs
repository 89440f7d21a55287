//! Everything the demo renders and tunes, in one explicit state struct.

use cgmath::{EuclideanSpace, Vector3};

use crate::{
    camera::{Camera, Projection},
    data_structures::{instance::Instance, material::Material, texture::TextureManager},
    lighting::{
        Attenuation,
        light::{
            DirectionalLight, LightArray, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOTLIGHTS,
            PointLight, Spotlight,
        },
        placement::{RingLayout, aim_directional_lights, place_point_lights, place_spotlights},
        uniforms::{CAM_POS, PHONG, PROJECTION, ShaderUniforms, VIEW},
        upload::upload_lights,
    },
    ui::inspect::{Inspectable, Inspector, Sections},
};

/// The meshes the demo builds at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Cube,
    Sphere,
    Cylinder,
    Plane,
}

impl Primitive {
    pub const ALL: [Primitive; 4] = [
        Primitive::Cube,
        Primitive::Sphere,
        Primitive::Cylinder,
        Primitive::Plane,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Cube => "cube",
            Primitive::Sphere => "sphere",
            Primitive::Cylinder => "cylinder",
            Primitive::Plane => "plane",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub primitive: Primitive,
    pub transform: Instance,
}

pub const SECTIONS: [&str; 6] = [
    "Settings",
    "Material",
    "Point Lights",
    "Directional Lights",
    "Spotlights",
    "Textures",
];

#[derive(Debug)]
pub struct Scene {
    pub point_lights: LightArray<PointLight, MAX_POINT_LIGHTS>,
    pub directional_lights: LightArray<DirectionalLight, MAX_DIRECTIONAL_LIGHTS>,
    pub spotlights: LightArray<Spotlight, MAX_SPOTLIGHTS>,
    pub point_ring: RingLayout,
    pub spot_ring: RingLayout,
    /// Degrees; 0 points straight down the vertical axis.
    pub directional_tilt: f32,
    pub spot_tilt: f32,
    pub attenuation: Attenuation,
    pub material: Material,
    /// While set, lights keep the positions/directions edited in the panel.
    pub manual_placement: bool,
    /// Phong when set, Blinn-Phong otherwise.
    pub phong: bool,
    pub wireframe: bool,
    pub light_scale: f32,
    pub clear_colour: Vector3<f32>,
    pub objects: Vec<SceneObject>,
    pub textures: TextureManager,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let objects = vec![
            SceneObject {
                primitive: Primitive::Cube,
                transform: Vector3::new(-2.0, 0.0, 0.0).into(),
            },
            SceneObject {
                primitive: Primitive::Sphere,
                transform: Vector3::new(0.0, 0.0, 0.0).into(),
            },
            SceneObject {
                primitive: Primitive::Cylinder,
                transform: Vector3::new(2.0, 0.0, 0.0).into(),
            },
            SceneObject {
                primitive: Primitive::Plane,
                transform: Instance::from(Vector3::new(0.0, -1.0, 0.0)).with_uniform_scale(10.0),
            },
        ];
        Self {
            point_lights: LightArray::new(),
            directional_lights: LightArray::new(),
            spotlights: LightArray::new(),
            point_ring: RingLayout::default(),
            spot_ring: RingLayout::default(),
            directional_tilt: 180.0,
            spot_tilt: 0.0,
            attenuation: Attenuation::default(),
            material: Material::default(),
            manual_placement: false,
            phong: true,
            wireframe: false,
            light_scale: 0.5,
            clear_colour: Vector3::new(0.0, 0.0, 0.0),
            objects,
            textures: TextureManager::new(),
        }
    }

    /// Ring placement and aiming of all live lights, skipped while lights are
    /// moved by hand.
    pub fn update_lights(&mut self) {
        if self.manual_placement {
            return;
        }
        place_point_lights(&mut self.point_lights, self.point_ring);
        aim_directional_lights(&mut self.directional_lights, self.directional_tilt);
        place_spotlights(&mut self.spotlights, self.spot_ring, self.spot_tilt);
    }

    /// Every uniform the lit shader reads this frame.
    pub fn upload(&self, camera: &Camera, projection: &Projection, uniforms: &mut dyn ShaderUniforms) {
        uniforms.set_mat4(PROJECTION, projection.calc_matrix());
        uniforms.set_mat4(VIEW, camera.calc_matrix());

        self.attenuation.upload(uniforms);
        upload_lights(&self.point_lights, uniforms);
        upload_lights(&self.directional_lights, uniforms);
        upload_lights(&self.spotlights, uniforms);

        self.material.upload(uniforms);
        uniforms.set_float("_Mat.textureScale", self.texture_scale());
        uniforms.set_vec3(CAM_POS, camera.position.to_vec());
        uniforms.set_int(PHONG, self.phong as i32);
    }

    /// UV scale of the texture bound to the first unit, 1 without one.
    pub fn texture_scale(&self) -> f32 {
        self.textures.get(0).map_or(1.0, |texture| texture.scale_factor)
    }

    /// Small spheres at live point lights and cylinders along live
    /// spotlights, tinted with the light colour.
    pub fn gizmos(&self) -> (Vec<Instance>, Vec<Instance>) {
        let spheres = self
            .point_lights
            .active()
            .iter()
            .map(|light| {
                Instance::from(light.pos)
                    .with_uniform_scale(self.light_scale)
                    .with_color(light.color)
            })
            .collect();
        let cylinders = self
            .spotlights
            .active()
            .iter()
            .map(|light| {
                Instance::from(light.pos)
                    .aligned_to(light.dir)
                    .with_uniform_scale(self.light_scale)
                    .with_color(light.color)
            })
            .collect();
        (spheres, cylinders)
    }

    fn inspect_settings(&mut self, ui: &mut dyn Inspector) {
        ui.toggle("Phong Lighting", &mut self.phong);
        ui.toggle("Manually Move Lights", &mut self.manual_placement);
        ui.text("Manual placement exposes position/direction of every light");
        ui.toggle("Wireframe", &mut self.wireframe);
        ui.float("Light Scale", &mut self.light_scale, 0.05..=2.0);
        ui.color("Background", &mut self.clear_colour);
        let attenuation = &mut self.attenuation;
        ui.group("Attenuation", &mut |ui: &mut dyn Inspector| attenuation.inspect(ui));
    }

    fn inspect_ring(ui: &mut dyn Inspector, ring: &mut RingLayout) {
        ui.float("Light Array Radius", &mut ring.radius, 0.0..=100.0);
        ui.float("Light Array Height", &mut ring.height, -5.0..=30.0);
    }
}

impl Sections for Scene {
    fn section_names(&self) -> &'static [&'static str] {
        &SECTIONS
    }

    fn inspect_section(&mut self, section: usize, ui: &mut dyn Inspector) {
        let manual = self.manual_placement;
        match section {
            0 => self.inspect_settings(ui),
            1 => self.material.inspect(ui),
            2 => {
                self.point_lights.inspect_count(ui);
                if !manual {
                    Self::inspect_ring(ui, &mut self.point_ring);
                }
                self.point_lights.inspect_entries(ui, "Point Light", manual);
            }
            3 => {
                self.directional_lights.inspect_count(ui);
                if !manual {
                    ui.float("Light Array Angle", &mut self.directional_tilt, 90.0..=270.0);
                }
                self.directional_lights
                    .inspect_entries(ui, "Directional Light", manual);
            }
            4 => {
                self.spotlights.inspect_count(ui);
                if !manual {
                    Self::inspect_ring(ui, &mut self.spot_ring);
                    ui.float("Light Array Angle", &mut self.spot_tilt, -60.0..=60.0);
                }
                self.spotlights.inspect_entries(ui, "Spotlight", manual);
            }
            5 => {
                if self.textures.is_empty() {
                    ui.text("No textures loaded");
                }
                self.textures.inspect(ui);
            }
            _ => {}
        }
    }
}
