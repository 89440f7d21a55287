//! wgpu implementation of [`TextureBackend`].
//!
//! wgpu has no global texture units, so every unit owns a bind group (texture
//! view + sampler) that the lit pipeline binds at draw time. Units that were
//! never bound fall back to a 1x1 white texture.

use image::imageops::FilterType;

use crate::backend::{
    DecodedImage, FilterMode, PixelFormat, SamplerParams, TextureBackend, TextureHandle,
    TextureUnit, WrapMode,
};

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl GpuTexture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// Solid single-colour texture, used where a unit has nothing bound.
    pub fn create_solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        colour: [u8; 4],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &colour,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_sampler(device, &SamplerParams::default(), false));
        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Bind group layout of a single texture unit: texture at 0, sampler at 1.
pub fn texture_unit_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_unit_bind_group_layout"),
    })
}

pub fn create_sampler(
    device: &wgpu::Device,
    params: &SamplerParams,
    clamp_to_border: bool,
) -> wgpu::Sampler {
    let address_mode = |mode: WrapMode| match mode {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        WrapMode::ClampToBorder if clamp_to_border => wgpu::AddressMode::ClampToBorder,
        WrapMode::ClampToBorder => {
            log::warn!("Adapter lacks clamp-to-border addressing, clamping to edge instead.");
            wgpu::AddressMode::ClampToEdge
        }
    };
    let filter = |mode: FilterMode| match mode {
        FilterMode::Linear => wgpu::FilterMode::Linear,
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
    };
    let uses_border = clamp_to_border
        && (params.wrap_horizontal == WrapMode::ClampToBorder
            || params.wrap_vertical == WrapMode::ClampToBorder);

    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: address_mode(params.wrap_horizontal),
        address_mode_v: address_mode(params.wrap_vertical),
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: filter(params.mag_filter),
        min_filter: filter(params.min_filter),
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        border_color: uses_border.then_some(wgpu::SamplerBorderColor::TransparentBlack),
        ..Default::default()
    })
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Texture resources created through the [`TextureBackend`] interface.
#[derive(Debug)]
pub struct WgpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    textures: Vec<GpuTexture>,
    units: Vec<Option<(TextureHandle, wgpu::BindGroup)>>,
    fallback_bind_group: wgpu::BindGroup,
    clamp_to_border: bool,
}

impl WgpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, unit_count: usize) -> Self {
        let layout = texture_unit_layout(device);
        let fallback = GpuTexture::create_solid(device, queue, [255; 4], "white fallback");
        let fallback_bind_group = mk_bind_group(device, &layout, &fallback, "fallback unit");
        let clamp_to_border = device
            .features()
            .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            textures: Vec::new(),
            units: (0..unit_count).map(|_| None).collect(),
            fallback_bind_group,
            clamp_to_border,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group of `unit`, or the white fallback when nothing is bound.
    pub fn bind_group(&self, unit: TextureUnit) -> &wgpu::BindGroup {
        match self.units.get(unit.index()) {
            Some(Some((_, group))) => group,
            _ => &self.fallback_bind_group,
        }
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&GpuTexture> {
        self.textures.get(handle.0 as usize)
    }

    fn upload(&self, label: &str, image: &DecodedImage) -> Result<wgpu::Texture, String> {
        let max = self.device.limits().max_texture_dimension_2d;
        if image.width == 0 || image.height == 0 || image.width > max || image.height > max {
            return Err(format!(
                "{}x{} does not fit into 1..={max}",
                image.width, image.height
            ));
        }
        let expected = image.width as usize * image.height as usize * image.format.channels() as usize;
        if image.pixels.len() != expected {
            return Err(format!(
                "expected {expected} bytes of pixel data, got {}",
                image.pixels.len()
            ));
        }

        let levels = mip_level_count(image.width, image.height);
        let rgba = expand_to_rgba(image.format, &image.pixels);
        let chain = mip_chain::<image::Rgba<u8>>(image.width, image.height, rgba, levels);
        if chain.is_empty() {
            return Err("pixel buffer does not match its dimensions".to_string());
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, (width, height, data)) in chain.iter().enumerate() {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(*height),
                },
                wgpu::Extent3d {
                    width: *width,
                    height: *height,
                    depth_or_array_layers: 1,
                },
            );
        }
        Ok(texture)
    }

    fn rebuild_units_of(&mut self, handle: TextureHandle) {
        let Some(texture) = self.textures.get(handle.0 as usize) else {
            return;
        };
        for (unit, entry) in self.units.iter_mut().enumerate() {
            if let Some((bound, group)) = entry {
                if *bound == handle {
                    *group = mk_bind_group(
                        &self.device,
                        &self.layout,
                        texture,
                        &format!("texture unit {unit}"),
                    );
                }
            }
        }
    }
}

impl TextureBackend for WgpuTextures {
    fn create_texture_2d(
        &mut self,
        label: &str,
        image: &DecodedImage,
        sampling: &SamplerParams,
    ) -> Result<TextureHandle, String> {
        let texture = self.upload(label, image)?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_sampler(&self.device, sampling, self.clamp_to_border));
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(GpuTexture {
            texture,
            view,
            sampler,
        });
        Ok(handle)
    }

    fn set_sampling(&mut self, handle: TextureHandle, sampling: &SamplerParams) {
        let clamp_to_border = self.clamp_to_border;
        match self.textures.get_mut(handle.0 as usize) {
            Some(texture) => {
                texture.sampler = Some(create_sampler(&self.device, sampling, clamp_to_border));
            }
            None => {
                log::warn!("Ignoring sampler update for unknown texture {:?}", handle);
                return;
            }
        }
        self.rebuild_units_of(handle);
    }

    fn bind_texture(&mut self, unit: TextureUnit, handle: TextureHandle) {
        let Some(texture) = self.textures.get(handle.0 as usize) else {
            log::warn!("Cannot bind unknown texture {:?} to {}", handle, unit);
            return;
        };
        let group = mk_bind_group(&self.device, &self.layout, texture, &format!("texture unit {}", unit.0));
        match self.units.get_mut(unit.index()) {
            Some(entry) => *entry = Some((handle, group)),
            None => log::warn!("{} is outside of the {} available units", unit, self.units.len()),
        }
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &GpuTexture,
    label: &str,
) -> wgpu::BindGroup {
    let fallback_sampler;
    let sampler = match &texture.sampler {
        Some(sampler) => sampler,
        None => {
            fallback_sampler = create_sampler(device, &SamplerParams::default(), false);
            &fallback_sampler
        }
    };
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(label),
    })
}

/// Widen decoded pixels to RGBA8. wgpu has no three channel formats, and
/// the single and two channel ones sample as red / red-green, so luma is
/// replicated into RGB and a missing alpha becomes opaque.
pub fn expand_to_rgba(format: PixelFormat, pixels: &[u8]) -> Vec<u8> {
    match format {
        PixelFormat::R8 => pixels.iter().flat_map(|&l| [l, l, l, 255]).collect(),
        PixelFormat::Rg8 => pixels
            .chunks_exact(2)
            .flat_map(|la| [la[0], la[0], la[0], la[1]])
            .collect(),
        PixelFormat::Rgb8 => pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        PixelFormat::Rgba8 => pixels.to_vec(),
    }
}

/// Box-filtered mip levels, each as (width, height, pixels), base level first.
/// Empty when `pixels` does not match the dimensions.
fn mip_chain<P>(width: u32, height: u32, pixels: Vec<u8>, levels: u32) -> Vec<(u32, u32, Vec<u8>)>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    let Some(base) = image::ImageBuffer::<P, Vec<u8>>::from_raw(width, height, pixels) else {
        return Vec::new();
    };
    let mut chain = Vec::with_capacity(levels as usize);
    let mut previous = base;
    for level in 1..levels {
        let w = (width >> level).max(1);
        let h = (height >> level).max(1);
        let next = image::imageops::resize(&previous, w, h, FilterType::Triangle);
        let done = std::mem::replace(&mut previous, next);
        let (pw, ph) = done.dimensions();
        chain.push((pw, ph, done.into_raw()));
    }
    let (pw, ph) = previous.dimensions();
    chain.push((pw, ph, previous.into_raw()));
    chain
}
