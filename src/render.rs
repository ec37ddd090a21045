use crate::constants::FOG_HEX;
use skyline_core::{Camera, CameraPose, CityLayout, LightingSnapshot, Rgb, SceneTarget};
use web_sys as web;

mod city;
mod helpers;
mod targets;
use city::{create_city_pass, CityPass, CityUniforms};
use targets::{DepthTarget, DEPTH_FORMAT};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    city: CityPass,
    uniforms: CityUniforms,
    camera: Camera,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    // false between a lost surface and the next successful reconfigure
    surface_ok: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        city: &CityLayout,
        pose: CameraPose,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, width, height);
        let city = create_city_pass(&device, format, DEPTH_FORMAT, city);
        log::info!("[render] surface {}x{} {:?}", width, height, format);
        // same as the fog so distant geometry fades into the background
        let [r, g, b] = Rgb::from_hex(FOG_HEX).0;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            city,
            uniforms: CityUniforms::new(),
            camera: Camera::new(pose, width as f32 / height as f32),
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            surface_ok: true,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.surface_ok = true;
    }

    pub fn mark_lost(&mut self) {
        self.surface_ok = false;
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.uniforms.view_proj = self.camera.view_projection().to_cols_array_2d();
        self.uniforms.eye = self.camera.eye.extend(1.0).to_array();
        self.queue.write_buffer(
            &self.city.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("city_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.city.pipeline);
            rpass.set_bind_group(0, &self.city.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.city.cube_vb.slice(..));
            rpass.set_vertex_buffer(1, self.city.instance_vb.slice(..));
            rpass.set_index_buffer(self.city.cube_ib.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.city.index_count, 0, 0..self.city.instance_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneTarget for GpuState<'_> {
    fn is_ready(&self) -> bool {
        self.surface_ok && self.width > 0 && self.height > 0
    }

    fn apply_camera(&mut self, pose: CameraPose) {
        self.camera.set_pose(pose);
    }

    fn apply_glow(&mut self, slot: usize, intensity: f32) {
        self.uniforms.set_glow(slot, intensity);
    }

    fn apply_lighting(&mut self, lighting: &LightingSnapshot) {
        self.uniforms.set_lighting(lighting);
    }
}
