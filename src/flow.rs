//! Application event loop.
//!
//! [`run`] opens the window and drives [`App`] through winit's
//! [`ApplicationHandler`]. Device creation is async and resolved once on a
//! tokio runtime when the window is first resumed.
//!
//! # Frame
//!
//! Every `RedrawRequested`:
//! 1. Lay out the debug windows, applying their edits
//! 2. Advance the camera from the accumulated input
//! 3. Place and aim the lights (unless they are moved by hand)
//! 4. Push texture sampling edited in the windows
//! 5. Upload all frame uniforms
//! 6. Draw the lit objects, the light gizmos, then the debug windows
//! 7. Present

use std::{iter, ops::Range, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

use crate::{
    backend::{TextureUnit, gpu::GpuTexture},
    config::DemoConfig,
    context::{Context, MAX_INSTANCES},
    data_structures::{instance::InstanceRaw, model::DrawMesh},
    scene::{Primitive, Scene},
    ui::overlay::DebugOverlay,
};

pub const WINDOW_TITLE: &str = "Lighting";

/// Window, GPU context and everything the demo tunes.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene,
    overlay: DebugOverlay,
    cursor_locked: bool,
    wireframe_warned: bool,
    frames: u64,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &DemoConfig) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window).await?;
        let mut scene = Scene::new();
        let overlay = DebugOverlay::new(&ctx.device, &ctx.window, ctx.config.format);

        for path in config.texture_paths() {
            match scene.textures.add_texture(&path, &mut ctx.textures) {
                Ok(texture) => log::info!("{:?} bound to {}", path, texture.unit()),
                Err(e) => log::error!("Skipping texture {:?}: {}", path, e),
            }
        }

        Ok(Self {
            ctx,
            scene,
            overlay,
            cursor_locked: false,
            wireframe_warned: false,
            frames: 0,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = GpuTexture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn set_cursor_lock(&mut self, locked: bool) {
        let window = &self.ctx.window;
        if locked {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("Cannot lock the cursor: {}", e);
                return;
            }
        } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Cannot release the cursor: {}", e);
        }
        window.set_cursor_visible(!locked);
        self.ctx.camera.controller.clear_mouse();
        self.cursor_locked = locked;
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, state: ElementState) {
        if self.ctx.camera.controller.handle_key(code, state) || state != ElementState::Pressed {
            return;
        }
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Digit1 => {
                self.scene.wireframe = !self.scene.wireframe;
                log::info!("Wireframe {}", if self.scene.wireframe { "on" } else { "off" });
            }
            _ => {}
        }
    }

    /// Everything that changes between frames, up to the uniform upload.
    fn update(&mut self, dt: instant::Duration) {
        self.overlay.run(&self.ctx.window, &mut self.scene);

        let camera = &mut self.ctx.camera;
        camera
            .controller
            .update(&mut camera.camera, &mut self.ctx.projection, dt);

        self.scene.update_lights();
        self.scene.textures.apply_pending(&mut self.ctx.textures);

        if self.scene.wireframe && !self.ctx.supports_wireframe() {
            if !self.wireframe_warned {
                log::warn!("Wireframe needs POLYGON_MODE_LINE, which this adapter lacks");
                self.wireframe_warned = true;
            }
            self.scene.wireframe = false;
        }

        let clear = self.scene.clear_colour;
        self.ctx.clear_colour = wgpu::Color {
            r: clear.x as f64,
            g: clear.y as f64,
            b: clear.z as f64,
            a: 1.0,
        };

        self.scene.upload(
            &self.ctx.camera.camera,
            &self.ctx.projection,
            &mut self.ctx.frame.uniforms,
        );
        self.ctx.frame.write(&self.ctx.queue);
    }

    /// Object instances followed by the point light spheres and spotlight
    /// cylinders, with the instance range of each group.
    fn instances(&self) -> (Vec<InstanceRaw>, Range<u32>, Range<u32>) {
        let (spheres, cylinders) = self.scene.gizmos();
        let mut raw: Vec<InstanceRaw> = self
            .scene
            .objects
            .iter()
            .map(|object| object.transform.to_raw())
            .collect();
        let sphere_start = raw.len() as u32;
        raw.extend(spheres.iter().map(|instance| instance.to_raw()));
        let cylinder_start = raw.len() as u32;
        raw.extend(cylinders.iter().map(|instance| instance.to_raw()));
        let end = raw.len() as u32;
        (raw, sphere_start..cylinder_start, cylinder_start..end)
    }

    fn render(&mut self) {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return;
        }

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            // Reconfigure the surface if it's lost or outdated
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                let size = self.ctx.window.inner_size();
                self.resize(size.width, size.height);
                return;
            }
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => return,
            wgpu::CurrentSurfaceTexture::Validation => {
                log::error!("Unable to render, the surface texture failed validation");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (instances, spheres, cylinders) = self.instances();
        if instances.len() > MAX_INSTANCES {
            log::warn!(
                "{} instances requested, only the first {} are drawn",
                instances.len(),
                MAX_INSTANCES
            );
        }
        let drawn = &instances[..instances.len().min(MAX_INSTANCES)];
        let limit = drawn.len() as u32;
        self.ctx
            .queue
            .write_buffer(&self.ctx.instance_buffer, 0, bytemuck::cast_slice(drawn));

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            let lit = match (&self.ctx.pipelines.lit_wireframe, self.scene.wireframe) {
                (Some(wireframe), true) => wireframe,
                _ => &self.ctx.pipelines.lit,
            };
            render_pass.set_pipeline(lit);
            render_pass.set_bind_group(0, &self.ctx.frame.bind_group, &[]);
            render_pass.set_bind_group(1, self.ctx.textures.bind_group(TextureUnit::BASE), &[]);
            render_pass.set_vertex_buffer(1, self.ctx.instance_buffer.slice(..));
            for (i, object) in self.scene.objects.iter().enumerate() {
                let i = i as u32;
                if i >= limit {
                    break;
                }
                render_pass.draw_mesh_instanced(self.ctx.meshes.get(object.primitive), i..i + 1);
            }

            render_pass.set_pipeline(&self.ctx.pipelines.gizmo);
            render_pass.set_bind_group(0, &self.ctx.frame.bind_group, &[]);
            render_pass.set_vertex_buffer(1, self.ctx.instance_buffer.slice(..));
            for (primitive, range) in [(Primitive::Sphere, spheres), (Primitive::Cylinder, cylinders)] {
                let range = range.start.min(limit)..range.end.min(limit);
                if !range.is_empty() {
                    render_pass.draw_mesh_instanced(self.ctx.meshes.get(primitive), range);
                }
            }
        }

        let overlay = self.overlay.paint(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &view,
            [self.ctx.config.width, self.ctx.config.height],
        );

        self.ctx
            .queue
            .submit(overlay.into_iter().chain(iter::once(encoder.finish())));
        output.present();
        self.frames += 1;
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: DemoConfig,
    state: Option<AppState>,
    last_time: Instant,
}

impl App {
    fn new(config: DemoConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            last_time: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                // the cursor starts locked, right click releases it for the windows
                state.set_cursor_lock(true);
                state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("App initialization failed, cannot create the main context: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.cursor_locked {
                state.ctx.camera.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // while the cursor is locked all input belongs to the camera
        let consumed =
            !state.cursor_locked && state.overlay.on_window_event(&state.ctx.window, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed && !state.overlay.wants_keyboard_input() => {
                state.handle_key(event_loop, code, key_state);
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                state.ctx.camera.controller.handle_scroll(&delta);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } if !consumed => {
                let locked = !state.cursor_locked;
                state.set_cursor_lock(locked);
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                state.update(dt);
                state.render();

                if self
                    .config
                    .max_frames
                    .is_some_and(|max| state.frames >= max)
                {
                    log::info!("Rendered {} frames, exiting", state.frames);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run the demo until it is closed.
pub fn run(config: DemoConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
