//! Debug UI: the [`inspect::Inspectable`] capability and its egui windows.

pub mod inspect;
pub mod overlay;
pub mod windows;
