//! Graphics backend seam for texture resources.
//!
//! [`TextureBackend`] is everything the texture pool needs from the GPU side:
//! create an image resource from decoded pixels, re-apply sampling state and
//! bind a resource to a texture unit. [`gpu::WgpuTextures`] is the wgpu
//! implementation used by the demo; tests drive the pool with a recording
//! backend instead.

pub mod gpu;

use std::fmt;

/// Opaque handle of a GPU image resource, handed out by a [`TextureBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Index of a hardware-style texture binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    /// First unit handed out by the texture pool.
    pub const BASE: TextureUnit = TextureUnit(0);

    /// Unit bound to pool slot `slot`.
    pub fn for_slot(slot: usize) -> Self {
        Self(Self::BASE.0 + slot as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TextureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TEXTURE{}", self.0)
    }
}

/// 8-bit pixel layout of decoded image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    /// Layout matching a channel count, `None` outside of 1..=4.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(Self::R8),
            2 => Some(Self::Rg8),
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            Self::R8 => 1,
            Self::Rg8 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Pixels produced by the image decoder, tightly packed rows, top row first.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count stored in the source file.
    pub source_channels: u8,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

/// Texture coordinate wrapping, one per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

impl WrapMode {
    pub const ALL: [WrapMode; 4] = [
        WrapMode::Repeat,
        WrapMode::MirroredRepeat,
        WrapMode::ClampToEdge,
        WrapMode::ClampToBorder,
    ];
    pub const LABELS: [&'static str; 4] = ["Repeat", "Mirrored Repeat", "Clamp To Edge", "Clamp To Border"];

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

/// Texel filtering; linear interpolates, nearest pixelates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Linear,
    Nearest,
}

impl FilterMode {
    pub const ALL: [FilterMode; 2] = [FilterMode::Linear, FilterMode::Nearest];
    pub const LABELS: [&'static str; 2] = ["Linear", "Nearest"];

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

/// Sampling state applied to a texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerParams {
    pub wrap_horizontal: WrapMode,
    pub wrap_vertical: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
}

/// Resource creation and binding calls the texture pool issues.
///
/// Implementations are synchronous sinks; the only value the pool interprets
/// is the handle returned on creation.
pub trait TextureBackend {
    /// Allocate a 2D image sized to `image`, upload its pixels, generate the
    /// mip chain and apply `sampling`.
    fn create_texture_2d(
        &mut self,
        label: &str,
        image: &DecodedImage,
        sampling: &SamplerParams,
    ) -> Result<TextureHandle, String>;

    /// Replace the sampling state of an existing resource.
    fn set_sampling(&mut self, handle: TextureHandle, sampling: &SamplerParams);

    /// Make `unit` the active unit and bind `handle` to it.
    fn bind_texture(&mut self, unit: TextureUnit, handle: TextureHandle);
}
