use std::collections::BTreeSet;

use lit_ngin::{
    backend::WrapMode,
    scene::{SECTIONS, Scene},
    ui::{
        inspect::{Inspector, Sections},
        windows::{EguiInspector, show_sections},
    },
};

use crate::common::test_utils::{Edit, RecordingBackend, edit, fields, scratch_dir, write_png};

mod common;

const SETTINGS: usize = 0;
const MATERIAL: usize = 1;
const POINT_LIGHTS: usize = 2;
const SPOTLIGHTS: usize = 4;
const TEXTURES: usize = 5;

/// Out of range values and a log of the sections that were drawn.
struct Items {
    count: i32,
    value: f32,
    tint: cgmath::Vector3<f32>,
    enabled: bool,
    drawn: BTreeSet<usize>,
}

impl Items {
    fn new() -> Self {
        Self {
            count: 12,
            value: 3.0,
            tint: cgmath::Vector3::new(0.25, 0.5, 0.75),
            enabled: true,
            drawn: BTreeSet::new(),
        }
    }
}

impl Sections for Items {
    fn section_names(&self) -> &'static [&'static str] {
        &["First", "Second", "Third"]
    }

    fn inspect_section(&mut self, section: usize, ui: &mut dyn Inspector) {
        self.drawn.insert(section);
        ui.int("Count", &mut self.count, 0..=5);
        ui.float("Value", &mut self.value, 0.0..=1.0);
        ui.color("Tint", &mut self.tint);
        ui.toggle("Enabled", &mut self.enabled);
    }
}

fn egui_frame(ctx: &egui::Context, target: &mut dyn Sections) -> egui::FullOutput {
    ctx.run_ui(egui::RawInput::default(), |ui| show_sections(ui.ctx(), target))
}

#[test]
fn scene_sections_are_the_debug_windows() {
    let scene = Scene::new();
    assert_eq!(scene.section_names(), &SECTIONS);
    assert_eq!(
        SECTIONS,
        ["Settings", "Material", "Point Lights", "Directional Lights", "Spotlights", "Textures"]
    );
}

#[test]
fn only_the_first_window_starts_expanded() {
    let ctx = egui::Context::default();
    let mut items = Items::new();
    let output = egui_frame(&ctx, &mut items);

    assert!(!output.shapes.is_empty());
    assert_eq!(items.drawn.into_iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn sliders_clamp_values_into_their_range() {
    let ctx = egui::Context::default();
    let mut items = Items::new();
    egui_frame(&ctx, &mut items);

    assert_eq!(items.count, 5);
    assert_eq!(items.value, 1.0);
    // widgets without a range leave untouched values alone
    assert_eq!(items.tint, cgmath::Vector3::new(0.25, 0.5, 0.75));
    assert!(items.enabled);
}

#[test]
fn scene_windows_draw_without_input() {
    let ctx = egui::Context::default();
    let mut scene = Scene::new();
    scene.point_lights.set_active_count(2).unwrap();
    scene.spotlights.set_active_count(1).unwrap();
    let output = ctx.run_ui(egui::RawInput::default(), |ui| {
        egui::CentralPanel::default().show(ui, |ui| {
            let mut inspector = EguiInspector::new(ui);
            for section in 0..SECTIONS.len() {
                scene.inspect_section(section, &mut inspector);
            }
        });
    });

    assert!(!output.shapes.is_empty());
    assert!(scene.phong);
    assert_eq!(scene.point_lights.active_count(), 2);
    assert_eq!(scene.spotlights.get(0).unwrap().inner_angle, 12.5);
    assert_eq!(scene.attenuation.linear, 0.35);
}

#[test]
fn toggles_and_sliders_edit_the_scene() {
    let mut scene = Scene::new();
    assert_eq!(edit(&mut scene, SETTINGS, "Phong Lighting", Edit::Flip), 1);
    assert!(!scene.phong);

    edit(&mut scene, SETTINGS, "Light Scale", Edit::Float(0.75));
    assert_eq!(scene.light_scale, 0.75);

    edit(&mut scene, SETTINGS, "Light Scale", Edit::Float(50.0));
    assert_eq!(scene.light_scale, 2.0);
}

#[test]
fn nested_fields_carry_their_group_path() {
    let mut scene = Scene::new();
    let lines = fields(&mut scene, SETTINGS);
    assert_eq!(lines[0], "Phong Lighting = true");
    assert!(lines.contains(&"Attenuation / Linear = 0.3500".to_string()));
    assert!(lines.contains(&"Background r = 0.0000".to_string()));
    assert_eq!(lines.last().unwrap(), "Attenuation / Quadratic = 0.4400");
}

#[test]
fn material_values_are_clamped_to_their_range() {
    let mut scene = Scene::new();
    edit(&mut scene, MATERIAL, "Ambient K", Edit::Float(-1.0));
    assert_eq!(scene.material.ambient, 0.0);

    edit(&mut scene, MATERIAL, "Shininess", Edit::Float(0.0));
    assert_eq!(scene.material.shininess, 1.0);
}

#[test]
fn light_count_slider_adds_light_entries() {
    let mut scene = Scene::new();
    assert_eq!(fields(&mut scene, POINT_LIGHTS).len(), 3);

    edit(&mut scene, POINT_LIGHTS, "Light Count", Edit::Int(1));
    assert_eq!(scene.point_lights.active_count(), 1);

    let lines = fields(&mut scene, POINT_LIGHTS);
    assert_eq!(lines[0], "Light Count = 1");
    assert!(lines.contains(&"Point Light 0 / Color r = 1.0000".to_string()));
    assert!(lines.contains(&"Point Light 0 / Intensity = 1.0000".to_string()));
    assert_eq!(lines.len(), 7);

    // the slider stops at capacity
    edit(&mut scene, POINT_LIGHTS, "Light Count", Edit::Int(20));
    assert_eq!(scene.point_lights.active_count(), scene.point_lights.capacity());
}

#[test]
fn manual_placement_swaps_ring_fields_for_positions() {
    let mut scene = Scene::new();
    scene.spotlights.set_active_count(1).unwrap();
    let ring = fields(&mut scene, SPOTLIGHTS);
    assert!(ring.iter().any(|line| line.starts_with("Light Array Angle")));
    assert!(!ring.iter().any(|line| line.contains("Position")));

    scene.manual_placement = true;
    let manual = fields(&mut scene, SPOTLIGHTS);
    assert!(!manual.iter().any(|line| line.starts_with("Light Array")));
    assert!(manual.contains(&"Spotlight 0 / Direction y = -1.0000".to_string()));
    assert!(manual.contains(&"Spotlight 0 / Inner Angle = 12.5000".to_string()));
}

#[test]
fn lowering_the_count_hides_light_entries() {
    let mut scene = Scene::new();
    scene.point_lights.set_active_count(3).unwrap();
    assert_eq!(edit(&mut scene, POINT_LIGHTS, "Intensity", Edit::Float(2.0)), 3);

    edit(&mut scene, POINT_LIGHTS, "Light Count", Edit::Int(1));
    let lines = fields(&mut scene, POINT_LIGHTS);
    assert!(!lines.iter().any(|line| line.starts_with("Point Light 1")));
    // hidden lights keep their settings
    assert_eq!(scene.point_lights.get(2).unwrap().intensity, 2.0);
}

#[test]
fn texture_sampling_edits_are_applied_once() {
    let dir = scratch_dir("windows");
    let path = write_png(&dir, "checker.png", 4, 4, 3);
    let mut backend = RecordingBackend::new();
    let mut scene = Scene::new();
    let handle = scene
        .textures
        .add_texture(&path, &mut backend)
        .unwrap()
        .handle()
        .unwrap();

    let lines = fields(&mut scene, TEXTURES);
    assert!(lines[0].starts_with("TEXTURE0"));
    assert!(!scene.textures.get(0).unwrap().has_pending_sampling());

    edit(&mut scene, TEXTURES, "Horizontal Wrap", Edit::Pick(3));
    let lines = fields(&mut scene, TEXTURES);
    assert!(lines[0].ends_with("Horizontal Wrap = Clamp To Border"));
    assert!(scene.textures.get(0).unwrap().has_pending_sampling());

    scene.textures.apply_pending(&mut backend);
    scene.textures.apply_pending(&mut backend);

    let updates = backend.sampling_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, handle);
    assert_eq!(updates[0].1.wrap_horizontal, WrapMode::ClampToBorder);
}

#[test]
fn texture_scale_feeds_the_material() {
    let dir = scratch_dir("scale");
    let path = write_png(&dir, "tile.png", 2, 2, 4);
    let mut scene = Scene::new();
    assert_eq!(scene.texture_scale(), 1.0);
    scene
        .textures
        .add_texture(&path, &mut RecordingBackend::new())
        .unwrap();

    edit(&mut scene, TEXTURES, "Scale", Edit::Float(2.5));
    assert_eq!(scene.texture_scale(), 2.5);
}
