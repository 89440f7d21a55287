//! egui rendition of the [`Inspector`] capability.
//!
//! Every [`Sections`] entry becomes its own window. Fields map onto the usual
//! egui widgets: sliders for numbers, a colour button for colours, a checkbox
//! for toggles, a combo box for choices and a collapsing header per group.

use std::ops::RangeInclusive;

use cgmath::Vector3;

use crate::ui::inspect::{Inspector, Sections};

/// Draws the fields an [`Inspectable`](crate::ui::inspect::Inspectable)
/// reports into an [`egui::Ui`], editing them in place.
pub struct EguiInspector<'a> {
    ui: &'a mut egui::Ui,
}

impl<'a> EguiInspector<'a> {
    pub fn new(ui: &'a mut egui::Ui) -> Self {
        Self { ui }
    }
}

impl Inspector for EguiInspector<'_> {
    fn float(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) {
        self.ui.add(egui::Slider::new(value, range).text(label));
    }

    fn int(&mut self, label: &str, value: &mut i32, range: RangeInclusive<i32>) {
        self.ui.add(egui::Slider::new(value, range).text(label));
    }

    fn color(&mut self, label: &str, value: &mut Vector3<f32>) {
        let mut rgb: [f32; 3] = (*value).into();
        self.ui.horizontal(|ui| {
            ui.color_edit_button_rgb(&mut rgb);
            ui.label(label);
        });
        *value = rgb.into();
    }

    fn vec3(&mut self, label: &str, value: &mut Vector3<f32>, range: RangeInclusive<f32>) {
        self.ui.horizontal(|ui| {
            for component in [&mut value.x, &mut value.y, &mut value.z] {
                ui.add(
                    egui::DragValue::new(component)
                        .range(range.clone())
                        .speed(0.05),
                );
            }
            ui.label(label);
        });
    }

    fn toggle(&mut self, label: &str, value: &mut bool) {
        self.ui.checkbox(value, label);
    }

    fn choice(&mut self, label: &str, selected: &mut usize, options: &[&str]) {
        let Some(current) = options.get(*selected) else {
            return;
        };
        egui::ComboBox::from_label(label)
            .selected_text(*current)
            .show_ui(self.ui, |ui| {
                for (i, option) in options.iter().enumerate() {
                    ui.selectable_value(selected, i, *option);
                }
            });
    }

    fn group(&mut self, label: &str, body: &mut dyn FnMut(&mut dyn Inspector)) {
        egui::CollapsingHeader::new(label)
            .default_open(true)
            .show(self.ui, |ui| body(&mut EguiInspector::new(ui)));
    }

    fn text(&mut self, text: &str) {
        self.ui.label(text);
    }
}

/// One window per section of `target`, the first one expanded.
pub fn show_sections(ctx: &egui::Context, target: &mut dyn Sections) {
    for (i, name) in target.section_names().iter().enumerate() {
        egui::Window::new(*name)
            .default_open(i == 0)
            .default_pos([12.0, 12.0 + 28.0 * i as f32])
            .resizable(false)
            .show(ctx, |ui| target.inspect_section(i, &mut EguiInspector::new(ui)));
    }
}
