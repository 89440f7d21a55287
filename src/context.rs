use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    backend::gpu::{GpuTexture, WgpuTextures},
    camera::{Camera, CameraController, Projection},
    data_structures::{instance::InstanceRaw, texture::MAX_TEXTURES},
    lighting::light::{MAX_POINT_LIGHTS, MAX_SPOTLIGHTS},
    pipelines::{basic::mk_lit_pipeline, light::FrameResources, light::mk_gizmo_pipeline},
    resources::mesh::Meshes,
    scene::Primitive,
};

pub const CAMERA_MOVE_SPEED: f32 = 5.0;
pub const MOUSE_SENSITIVITY: f32 = 0.1;
pub const CAMERA_ZOOM_SPEED: f32 = 3.0;

/// Instances drawn per frame at most: the objects plus one gizmo per light.
pub const MAX_INSTANCES: usize = Primitive::ALL.len() + MAX_POINT_LIGHTS + MAX_SPOTLIGHTS;

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
}

#[derive(Debug)]
pub struct Pipelines {
    pub lit: wgpu::RenderPipeline,
    /// Only present when the adapter supports line polygon mode.
    pub lit_wireframe: Option<wgpu::RenderPipeline>,
    pub gizmo: wgpu::RenderPipeline,
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: GpuTexture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub frame: FrameResources,
    pub textures: WgpuTextures,
    pub pipelines: Pipelines,
    pub meshes: Meshes,
    pub instance_buffer: wgpu::Buffer,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;

        // wireframe and border clamping are nice to have, not required
        let optional = wgpu::Features::POLYGON_MODE_LINE | wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER;
        let required_features = adapter.features() & optional;
        log::info!("device and queue ({:?})", required_features);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features,
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .context("cannot open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an sRGB surface, anything else comes out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = CameraResources {
            camera: Camera::home(),
            controller: CameraController::new(CAMERA_MOVE_SPEED, MOUSE_SENSITIVITY, CAMERA_ZOOM_SPEED),
        };
        let projection = Projection::new(config.width, config.height, cgmath::Deg(60.0), 0.1, 100.0);

        let depth_texture =
            GpuTexture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        let frame = FrameResources::new(&device);
        let textures = WgpuTextures::new(&device, &queue, MAX_TEXTURES);

        let pipelines = Pipelines {
            lit: mk_lit_pipeline(
                &device,
                &config,
                &frame.bind_group_layout,
                textures.layout(),
                wgpu::PolygonMode::Fill,
            ),
            lit_wireframe: required_features
                .contains(wgpu::Features::POLYGON_MODE_LINE)
                .then(|| {
                    mk_lit_pipeline(
                        &device,
                        &config,
                        &frame.bind_group_layout,
                        textures.layout(),
                        wgpu::PolygonMode::Line,
                    )
                }),
            gizmo: mk_gizmo_pipeline(&device, &config, &frame.bind_group_layout),
        };

        let meshes = Meshes::new(&device);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            frame,
            textures,
            pipelines,
            meshes,
            instance_buffer,
            clear_colour: wgpu::Color::BLACK,
        })
    }

    pub fn supports_wireframe(&self) -> bool {
        self.pipelines.lit_wireframe.is_some()
    }
}
