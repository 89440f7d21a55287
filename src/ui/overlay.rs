//! egui on top of the lit scene: winit input in, wgpu draw calls out.

use std::fmt;

use egui_wgpu::ScreenDescriptor;
use winit::{event::WindowEvent, window::Window};

use crate::ui::{inspect::Sections, windows::show_sections};

/// Debug windows drawn over the rendered frame.
pub struct DebugOverlay {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    /// Tessellated output of the last [`DebugOverlay::run`].
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

impl fmt::Debug for DebugOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOverlay")
            .field("paint_jobs", &self.paint_jobs.len())
            .field("pixels_per_point", &self.pixels_per_point)
            .finish_non_exhaustive()
    }
}

impl DebugOverlay {
    pub fn new(device: &wgpu::Device, window: &Window, output_format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let pixels_per_point = window.scale_factor() as f32;
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(pixels_per_point),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer =
            egui_wgpu::Renderer::new(device, output_format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            winit_state,
            renderer,
            paint_jobs: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
            pixels_per_point,
        }
    }

    /// Feed a window event to egui. Returns true when egui used it, e.g. a
    /// click on one of the windows, so the camera should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.egui_wants_keyboard_input()
    }

    /// Lay out one frame of debug windows, applying the edits made in them.
    pub fn run(&mut self, window: &Window, target: &mut dyn Sections) {
        let raw_input = self.winit_state.take_egui_input(window);
        let full_output = self.ctx.run_ui(raw_input, |ui| show_sections(ui.ctx(), target));
        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        self.paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.pixels_per_point = full_output.pixels_per_point;
        self.textures_delta.append(full_output.textures_delta);
    }

    /// Record the overlay into `encoder`, loading what is already in `view`.
    ///
    /// Returns the command buffers egui prepared on the side; they have to be
    /// submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: self.pixels_per_point,
        };

        for (id, image_delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let prepared = self
            .renderer
            .update_buffers(device, queue, encoder, &self.paint_jobs, &screen);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Debug Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut render_pass, &self.paint_jobs, &screen);
        }

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
        self.textures_delta.clear();
        prepared
    }
}
