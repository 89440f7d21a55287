use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU32, Ordering},
};

use cgmath::{Matrix4, Vector3};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use lit_ngin::{
    backend::{DecodedImage, PixelFormat, SamplerParams, TextureBackend, TextureHandle, TextureUnit},
    lighting::uniforms::ShaderUniforms,
    ui::inspect::{Inspector, Sections},
};

/// One call the texture pool made on its backend.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Create {
        label: String,
        width: u32,
        height: u32,
        format: PixelFormat,
        source_channels: u8,
        sampling: SamplerParams,
    },
    SetSampling {
        handle: TextureHandle,
        sampling: SamplerParams,
    },
    Bind {
        unit: TextureUnit,
        handle: TextureHandle,
    },
}

/// Texture backend that only records what it is asked to do.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    pub fail_uploads: bool,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<&BackendCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::Create { .. }))
            .collect()
    }

    pub fn binds(&self) -> Vec<(TextureUnit, TextureHandle)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Bind { unit, handle } => Some((*unit, *handle)),
                _ => None,
            })
            .collect()
    }

    pub fn sampling_updates(&self) -> Vec<(TextureHandle, SamplerParams)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetSampling { handle, sampling } => Some((*handle, *sampling)),
                _ => None,
            })
            .collect()
    }
}

impl TextureBackend for RecordingBackend {
    fn create_texture_2d(
        &mut self,
        label: &str,
        image: &DecodedImage,
        sampling: &SamplerParams,
    ) -> Result<TextureHandle, String> {
        if self.fail_uploads {
            return Err("out of video memory".to_string());
        }
        self.calls.push(BackendCall::Create {
            label: label.to_string(),
            width: image.width,
            height: image.height,
            format: image.format,
            source_channels: image.source_channels,
            sampling: *sampling,
        });
        self.next_handle += 1;
        Ok(TextureHandle::new(self.next_handle))
    }

    fn set_sampling(&mut self, handle: TextureHandle, sampling: &SamplerParams) {
        self.calls.push(BackendCall::SetSampling {
            handle,
            sampling: *sampling,
        });
    }

    fn bind_texture(&mut self, unit: TextureUnit, handle: TextureHandle) {
        self.calls.push(BackendCall::Bind { unit, handle });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
    Mat4(Matrix4<f32>),
}

/// Uniform sink that keeps every write in call order.
#[derive(Debug, Default)]
pub(crate) struct RecordingUniforms {
    pub calls: Vec<(String, UniformValue)>,
}

impl RecordingUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.calls.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Last value written under `name`.
    pub fn last(&self, name: &str) -> Option<&UniformValue> {
        self.calls
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.last(name)? {
            UniformValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.last(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.last(name)? {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

impl ShaderUniforms for RecordingUniforms {
    fn set_int(&mut self, name: &str, value: i32) {
        self.calls.push((name.to_string(), UniformValue::Int(value)));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls.push((name.to_string(), UniformValue::Float(value)));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.calls.push((name.to_string(), UniformValue::Vec3(value)));
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.calls.push((name.to_string(), UniformValue::Mat4(value)));
    }
}

/// Fresh directory under the system temp dir, unique per call.
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("lit-ngin-{}-{}-{}", name, std::process::id(), n));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Write a `width`x`height` PNG with `channels` channels to `dir/name`.
pub(crate) fn write_png(dir: &Path, name: &str, width: u32, height: u32, channels: u8) -> PathBuf {
    let img = match channels {
        1 => DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, image::Luma([200]))),
        2 => DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(
            width,
            height,
            image::LumaA([200, 255]),
        )),
        3 => DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([255, 128, 0]))),
        _ => DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([255, 128, 0, 255]),
        )),
    };
    let path = dir.join(name);
    img.save(&path).expect("write test png");
    path
}

/// New value for the field a [`FieldScript`] targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Edit {
    Float(f32),
    Int(i32),
    Flip,
    Pick(usize),
}

/// Inspector that lists every field as "group / label = value" and can set
/// the fields whose path ends in a given label, clamped like a slider.
#[derive(Debug, Default)]
pub(crate) struct FieldScript {
    pub lines: Vec<String>,
    pub edits_applied: usize,
    prefix: Vec<String>,
    edit: Option<(String, Edit)>,
}

impl FieldScript {
    pub fn editing(target: &str, edit: Edit) -> Self {
        Self {
            edit: Some((target.to_string(), edit)),
            ..Self::default()
        }
    }

    fn path(&self, label: &str) -> String {
        let mut path = self.prefix.join(" / ");
        if !path.is_empty() {
            path.push_str(" / ");
        }
        path.push_str(label);
        path
    }

    fn edit_for(&mut self, path: &str) -> Option<Edit> {
        let (target, edit) = self.edit.as_ref()?;
        if path == target || path.ends_with(&format!(" / {target}")) {
            self.edits_applied += 1;
            Some(*edit)
        } else {
            None
        }
    }

    fn component(&mut self, label: &str, axis: &str, value: &mut f32, range: RangeInclusive<f32>) {
        self.float(&format!("{label} {axis}"), value, range);
    }
}

impl Inspector for FieldScript {
    fn float(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) {
        let path = self.path(label);
        if let Some(Edit::Float(v)) = self.edit_for(&path) {
            *value = v.clamp(*range.start(), *range.end());
        }
        self.lines.push(format!("{path} = {value:.4}"));
    }

    fn int(&mut self, label: &str, value: &mut i32, range: RangeInclusive<i32>) {
        let path = self.path(label);
        if let Some(Edit::Int(v)) = self.edit_for(&path) {
            *value = v.clamp(*range.start(), *range.end());
        }
        self.lines.push(format!("{path} = {value}"));
    }

    fn color(&mut self, label: &str, value: &mut Vector3<f32>) {
        self.component(label, "r", &mut value.x, 0.0..=1.0);
        self.component(label, "g", &mut value.y, 0.0..=1.0);
        self.component(label, "b", &mut value.z, 0.0..=1.0);
    }

    fn vec3(&mut self, label: &str, value: &mut Vector3<f32>, range: RangeInclusive<f32>) {
        self.component(label, "x", &mut value.x, range.clone());
        self.component(label, "y", &mut value.y, range.clone());
        self.component(label, "z", &mut value.z, range);
    }

    fn toggle(&mut self, label: &str, value: &mut bool) {
        let path = self.path(label);
        if let Some(Edit::Flip) = self.edit_for(&path) {
            *value = !*value;
        }
        self.lines.push(format!("{path} = {value}"));
    }

    fn choice(&mut self, label: &str, selected: &mut usize, options: &[&str]) {
        let path = self.path(label);
        if let Some(Edit::Pick(i)) = self.edit_for(&path) {
            if i < options.len() {
                *selected = i;
            }
        }
        let name = options.get(*selected).copied().unwrap_or("?");
        self.lines.push(format!("{path} = {name}"));
    }

    fn group(&mut self, label: &str, body: &mut dyn FnMut(&mut dyn Inspector)) {
        self.prefix.push(label.to_string());
        body(self);
        self.prefix.pop();
    }
}

/// Every field of `section` as "path = value" lines.
pub(crate) fn fields(target: &mut dyn Sections, section: usize) -> Vec<String> {
    let mut script = FieldScript::default();
    target.inspect_section(section, &mut script);
    script.lines
}

/// Set the fields of `section` ending in `label`; returns how many matched.
pub(crate) fn edit(target: &mut dyn Sections, section: usize, label: &str, edit: Edit) -> usize {
    let mut script = FieldScript::editing(label, edit);
    target.inspect_section(section, &mut script);
    script.edits_applied
}
