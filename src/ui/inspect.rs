//! Capability interface between editable state and a debug panel.
//!
//! Types expose their tunable fields by implementing [`Inspectable`]; a panel
//! implements [`Inspector`] and decides how to show and change them. Values
//! are mutated in place, between frames.

use std::ops::RangeInclusive;

use cgmath::Vector3;

/// Receives named, mutable fields from an [`Inspectable`].
pub trait Inspector {
    fn float(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>);

    fn int(&mut self, label: &str, value: &mut i32, range: RangeInclusive<i32>);

    /// RGB colour, each channel in 0..=1.
    fn color(&mut self, label: &str, value: &mut Vector3<f32>);

    fn vec3(&mut self, label: &str, value: &mut Vector3<f32>, range: RangeInclusive<f32>);

    fn toggle(&mut self, label: &str, value: &mut bool);

    /// Index into `options`.
    fn choice(&mut self, label: &str, selected: &mut usize, options: &[&str]);

    /// Nest the fields `body` reports under `label`.
    fn group(&mut self, label: &str, body: &mut dyn FnMut(&mut dyn Inspector));

    /// Plain text line without a value.
    fn text(&mut self, _text: &str) {}
}

/// State that can be edited through an [`Inspector`].
pub trait Inspectable {
    fn inspect(&mut self, ui: &mut dyn Inspector);
}

/// Named groups of inspectable state, one debug window each.
pub trait Sections {
    fn section_names(&self) -> &'static [&'static str];

    fn inspect_section(&mut self, section: usize, ui: &mut dyn Inspector);
}
