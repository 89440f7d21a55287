//! Managed textures and the fixed-size pool handing out texture units.
//!
//! A [`Texture`] is one image resource plus the sampling state it is drawn
//! with. The [`TextureManager`] owns [`MAX_TEXTURES`] of them, each with its
//! texture unit assigned at construction, and fills them in append-only order.
//! Assigning units per slot instead of per bind keeps the unit of a texture
//! stable while several textures are bound for multi-texture shaders.

use std::path::{Path, PathBuf};

use crate::{
    backend::{FilterMode, SamplerParams, TextureBackend, TextureHandle, TextureUnit, WrapMode},
    error::{TextureLoadError, TextureManagerError},
    resources::texture::decode_image,
    ui::inspect::{Inspectable, Inspector},
};

/// Number of texture slots (and units) in the pool.
pub const MAX_TEXTURES: usize = 32;

/// One image resource and its sampling configuration.
#[derive(Clone, Debug)]
pub struct Texture {
    handle: Option<TextureHandle>,
    dimensions: (u32, u32),
    source_channels: u8,
    /// Channel count to decode into, `None` keeps what the file stores.
    pub desired_channels: Option<u8>,
    pub sampling: SamplerParams,
    unit: TextureUnit,
    /// UV multiplier exposed to the material.
    pub scale_factor: f32,
    path: Option<PathBuf>,
    sampling_dirty: bool,
}

impl Texture {
    pub fn new(unit: TextureUnit) -> Self {
        Self {
            handle: None,
            dimensions: (0, 0),
            source_channels: 0,
            desired_channels: None,
            sampling: SamplerParams::default(),
            unit,
            scale_factor: 1.0,
            path: None,
            sampling_dirty: false,
        }
    }

    /// Decode `path` and upload it through `backend`.
    ///
    /// Decoding happens before any backend call, so a missing or corrupt file
    /// creates no GPU resource and leaves the texture unpopulated.
    pub fn load<B>(
        &mut self,
        path: impl AsRef<Path>,
        backend: &mut B,
    ) -> Result<TextureHandle, TextureLoadError>
    where
        B: TextureBackend + ?Sized,
    {
        if self.handle.is_some() {
            return Err(TextureLoadError::AlreadyLoaded { unit: self.unit.0 });
        }
        let path = path.as_ref();
        let image = decode_image(path, self.desired_channels)?;
        let label = path.display().to_string();
        let handle = backend
            .create_texture_2d(&label, &image, &self.sampling)
            .map_err(|reason| TextureLoadError::Upload {
                path: path.to_path_buf(),
                reason,
            })?;

        log::info!(
            "Loaded texture {:?} ({}x{}, {} channels in file, uploaded as {:?}) for {}",
            path,
            image.width,
            image.height,
            image.source_channels,
            image.format,
            self.unit
        );
        self.handle = Some(handle);
        self.dimensions = (image.width, image.height);
        self.source_channels = image.source_channels;
        self.path = Some(path.to_path_buf());
        self.sampling_dirty = false;
        Ok(handle)
    }

    /// Push sampling changes made since the last upload to the backend.
    pub fn apply_sampling<B>(&mut self, backend: &mut B)
    where
        B: TextureBackend + ?Sized,
    {
        if let (true, Some(handle)) = (self.sampling_dirty, self.handle) {
            backend.set_sampling(handle, &self.sampling);
        }
        self.sampling_dirty = false;
    }

    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// (width, height) in pixels, (0, 0) until loaded.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn source_channels(&self) -> u8 {
        self.source_channels
    }

    pub fn unit(&self) -> TextureUnit {
        self.unit
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn has_pending_sampling(&self) -> bool {
        self.sampling_dirty
    }
}

impl Inspectable for Texture {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        let before = self.sampling;

        let mut horizontal = self.sampling.wrap_horizontal.position();
        ui.choice("Horizontal Wrap", &mut horizontal, &WrapMode::LABELS);
        let mut vertical = self.sampling.wrap_vertical.position();
        ui.choice("Vertical Wrap", &mut vertical, &WrapMode::LABELS);
        let mut mag = self.sampling.mag_filter.position();
        ui.choice("Magnification Filter", &mut mag, &FilterMode::LABELS);
        let mut min = self.sampling.min_filter.position();
        ui.choice("Minification Filter", &mut min, &FilterMode::LABELS);
        ui.float("Scale", &mut self.scale_factor, 0.1..=10.0);

        self.sampling = SamplerParams {
            wrap_horizontal: WrapMode::ALL[horizontal.min(WrapMode::ALL.len() - 1)],
            wrap_vertical: WrapMode::ALL[vertical.min(WrapMode::ALL.len() - 1)],
            mag_filter: FilterMode::ALL[mag.min(FilterMode::ALL.len() - 1)],
            min_filter: FilterMode::ALL[min.min(FilterMode::ALL.len() - 1)],
        };
        if self.sampling != before {
            self.sampling_dirty = true;
        }
    }
}

/// Fixed pool of [`MAX_TEXTURES`] texture slots.
///
/// Slot `i` always uses unit `TextureUnit::BASE + i`. Slots are filled in
/// order and never reused or compacted.
#[derive(Debug)]
pub struct TextureManager {
    textures: [Texture; MAX_TEXTURES],
    count: usize,
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: std::array::from_fn(|slot| Texture::new(TextureUnit::for_slot(slot))),
            count: 0,
        }
    }

    /// Load `path` into the next free slot and bind it to that slot's unit.
    ///
    /// Fails with [`TextureManagerError::Capacity`] when every slot is taken
    /// and with [`TextureManagerError::Load`] when the file cannot be loaded.
    /// Neither failure changes the pool.
    pub fn add_texture<B>(
        &mut self,
        path: impl AsRef<Path>,
        backend: &mut B,
    ) -> Result<&Texture, TextureManagerError>
    where
        B: TextureBackend + ?Sized,
    {
        if self.count >= MAX_TEXTURES {
            return Err(TextureManagerError::Capacity {
                capacity: MAX_TEXTURES,
            });
        }
        let slot = &mut self.textures[self.count];
        let handle = slot.load(path, backend)?;
        backend.bind_texture(slot.unit, handle);
        self.count += 1;
        Ok(&self.textures[self.count - 1])
    }

    /// Re-apply sampling of every texture edited through the debug panel.
    pub fn apply_pending<B>(&mut self, backend: &mut B)
    where
        B: TextureBackend + ?Sized,
    {
        for texture in self.textures[..self.count].iter_mut() {
            texture.apply_sampling(backend);
        }
    }

    /// Populated slots, in the order they were added.
    pub fn textures(&self) -> &[Texture] {
        &self.textures[..self.count]
    }

    pub fn get(&self, slot: usize) -> Option<&Texture> {
        self.textures().get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Texture> {
        self.textures[..self.count].get_mut(slot)
    }

    /// Slot (populated or not) at `slot`, including its preassigned unit.
    pub fn slot(&self, slot: usize) -> Option<&Texture> {
        self.textures.get(slot)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        MAX_TEXTURES
    }

    pub fn is_full(&self) -> bool {
        self.count == MAX_TEXTURES
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspectable for TextureManager {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        for texture in self.textures[..self.count].iter_mut() {
            let label = match texture.path() {
                Some(path) => format!("{} ({})", texture.unit, path.display()),
                None => texture.unit.to_string(),
            };
            ui.group(&label, &mut |ui: &mut dyn Inspector| texture.inspect(ui));
        }
    }
}
