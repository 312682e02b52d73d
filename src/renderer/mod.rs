pub mod slide_quad;

use crate::animation::math::{lerp, normalize};
use crate::config::{parse_hex_color, Config};
use crate::stage::Stage;
use anyhow::{Context, Result};
use slide_quad::{slide_quad_vertices, Scissor, SlideQuadRenderer, SlideVertex};
use std::sync::Arc;
use wgpu::SurfaceError;
use winit::window::Window;

const DEFAULT_BACKGROUND: [f32; 4] = [0.043, 0.043, 0.07, 1.0];

/// A rectangle in physical pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Integer clip rect, clamped to a `surface_w` x `surface_h` target.
    pub fn to_scissor(&self, surface_w: u32, surface_h: u32) -> Scissor {
        let x0 = (self.x.max(0.0) as u32).min(surface_w);
        let y0 = (self.y.max(0.0) as u32).min(surface_h);
        let x1 = ((self.x + self.width).max(0.0).ceil() as u32).min(surface_w);
        let y1 = ((self.y + self.height).max(0.0).ceil() as u32).min(surface_h);
        Scissor { x: x0, y: y0, width: x1.saturating_sub(x0), height: y1.saturating_sub(y0) }
    }
}

/// Background colour for a given force: `background` at rest, `accent` at |force| = 1.
pub fn tinted_background(background: [f32; 4], accent: [f32; 4], force: f64) -> [f32; 4] {
    let t = normalize(force.abs(), 0.0, 1.0, true);
    let mut out = [0.0f32; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = lerp(background[i] as f64, accent[i] as f64, t) as f32;
    }
    out
}

/// Quads for every slide in the stage, placed inside `content` (physical px).
pub fn build_slide_vertices(
    stage: &Stage,
    content: Rect,
    scale: f32,
    shear: f32,
    surface_w: f32,
    surface_h: f32,
) -> Vec<SlideVertex> {
    let slide_h = stage.slide_height() as f32 * scale;
    let y = content.y + (content.height - slide_h) * 0.5;
    stage
        .slide_rects()
        .iter()
        .zip(&stage.slides)
        .filter_map(|(rect, slide)| {
            let x = content.x + rect.x as f32 * scale;
            let w = rect.width as f32 * scale;
            // Skip slides that are entirely outside the content rect
            if x + w + shear.abs() < content.x || x - shear.abs() > content.x + content.width {
                return None;
            }
            Some(slide_quad_vertices(x, y, w, slide_h, shear, slide.colors, surface_w, surface_h))
        })
        .flatten()
        .collect()
}

pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,

    slide_renderer: SlideQuadRenderer,
    vertices: Vec<SlideVertex>,

    pub scale_factor: f32,
    pub app_config: Config,
}

impl Renderer {
    pub fn new(window: Arc<Window>, app_config: Config) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("request adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            },
        ))
        .context("request device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let slide_renderer = SlideQuadRenderer::new(&device, surface_format);
        let scale_factor = window.scale_factor() as f32;
        log::info!("renderer ready: {:?}, {}x{}", surface_format, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            surface_format,
            slide_renderer,
            vertices: Vec::new(),
            scale_factor,
            app_config,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn apply_config(&mut self, new_config: Config, scale_factor: f32) {
        self.app_config = new_config;
        self.scale_factor = scale_factor;
    }

    /// Draw the stage inside `content` (physical px), tinted and bent by `force`.
    pub fn render(&mut self, stage: &Stage, content: Rect, force: f64) -> Result<(), SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let surface_w = self.config.width as f32;
        let surface_h = self.config.height as f32;

        let colors = &self.app_config.colors;
        let background = parse_hex_color(&colors.background).unwrap_or(DEFAULT_BACKGROUND);
        let accent = parse_hex_color(&colors.accent).unwrap_or(background);
        let clear = tinted_background(background, accent, force);

        let mut encoder =
            self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        // Clear pass
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: clear[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        let shear = -(force as f32) * self.app_config.slides.bend * self.scale_factor;
        self.vertices = build_slide_vertices(stage, content, self.scale_factor, shear, surface_w, surface_h);
        let scissor = stage
            .clip
            .then(|| content.to_scissor(self.config.width, self.config.height));
        self.slide_renderer
            .render(&mut encoder, &view, &self.queue, &self.vertices, scissor);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::host::{SlideContainer, SlideLayout};
    use crate::config::SlidesConfig;

    #[test]
    fn background_at_rest_and_full_force() {
        let bg = [0.0, 0.0, 0.0, 1.0];
        let accent = [1.0, 0.5, 0.0, 1.0];
        assert_eq!(tinted_background(bg, accent, 0.0), bg);
        assert_eq!(tinted_background(bg, accent, -1.0), accent);
        let half = tinted_background(bg, accent, 0.5);
        assert!((half[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scissor_is_clamped_to_surface() {
        let s = Rect::new(-10.0, 20.0, 500.0, 100.0).to_scissor(400, 300);
        assert_eq!(s, Scissor { x: 0, y: 20, width: 400, height: 100 });
    }

    #[test]
    fn offscreen_slides_are_culled() {
        let slides = SlidesConfig { count: 3, ..SlidesConfig::default() };
        let mut stage = Stage::new(&slides, 300.0, 200.0);
        for i in 0..3 {
            stage.set_slide_layout(i, SlideLayout { width: Some(100.0), flex_shrink: 0.0, margin_right: 0.0 });
        }
        stage.set_slide_offset(2, 1000.0);
        let content = Rect::new(0.0, 0.0, 300.0, 200.0);
        let verts = build_slide_vertices(&stage, content, 1.0, 0.0, 300.0, 200.0);
        assert_eq!(verts.len(), 8);
    }

    #[test]
    fn slides_are_vertically_centered() {
        let slides = SlidesConfig { count: 1, height_ratio: 0.5, ..SlidesConfig::default() };
        let stage = Stage::new(&slides, 300.0, 200.0);
        let content = Rect::new(0.0, 0.0, 300.0, 200.0);
        let verts = build_slide_vertices(&stage, content, 1.0, 0.0, 300.0, 200.0);
        // slide spans y 50..150 of 200 => NDC 0.5..-0.5
        assert!((verts[0].position[1] - 0.5).abs() < 1e-6);
        assert!((verts[2].position[1] + 0.5).abs() < 1e-6);
    }
}
