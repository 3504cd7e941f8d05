// Rendering system using wgpu

mod camera;
mod sprite;
mod surface;
pub mod texture;
mod vertex;

pub use camera::Camera;
pub use sprite::{Sprite, SpriteRenderer};
pub use surface::RenderSurface;
pub use texture::{Texture, TextureHandle, TextureManager};
pub use vertex::Vertex;

#[cfg(test)]
pub use surface::{DrawCall, RecordingSurface};

use crate::core::math::{Color, Rect, Vec2};
use crate::engine::assets::{AssetError, ImageLoader};
use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

/// Main renderer responsible for initializing wgpu and presenting frames
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    /// 1x1 white texture tinted by `fill_rect`
    white: TextureHandle,
    clear_color: wgpu::Color,
    base_title: String,
    debug_text: Option<String>,
    shown_debug_text: Option<String>,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
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
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, &config)?;

        let mut texture_manager = TextureManager::new();
        let white = texture_manager.insert(Texture::from_color(
            &device,
            &queue,
            sprite_renderer.texture_layout(),
            [255, 255, 255, 255],
            Some("White"),
        ));

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            base_title: window.title(),
            window,
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            texture_manager,
            white,
            clear_color: wgpu::Color::BLACK,
            debug_text: None,
            shown_debug_text: None,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Present everything drawn since the last call
    pub fn end_frame(&mut self) -> Result<()> {
        self.sprite_renderer.prepare(
            &self.device,
            &self.queue,
            &self.texture_manager,
            self.config.width as f32,
            self.config.height as f32,
        );
        self.apply_debug_text();

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Mirror the debug text into the window title, only touching it on change
    fn apply_debug_text(&mut self) {
        let text = self.debug_text.take();
        if text == self.shown_debug_text {
            return;
        }

        match &text {
            Some(text) => self
                .window
                .set_title(&format!("{} | {}", self.base_title, text.replace('\n', " | "))),
            None => self.window.set_title(&self.base_title),
        }
        self.shown_debug_text = text;
    }
}

impl RenderSurface for Renderer {
    fn screen_size(&self) -> Vec2 {
        Vec2::new(self.config.width as f64, self.config.height as f64)
    }

    fn fill_background(&mut self, color: Color) {
        self.clear_color = wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        };
    }

    fn blit(&mut self, texture: TextureHandle, source: Rect, destination: Rect) {
        self.sprite_renderer.add_sprite(Sprite {
            texture,
            source,
            destination,
            color: Color::WHITE,
        });
    }

    fn fill_rect(&mut self, destination: Rect, color: Color) {
        self.sprite_renderer.add_sprite(Sprite {
            texture: self.white,
            source: Rect::new(0.0, 0.0, 1.0, 1.0),
            destination,
            color,
        });
    }

    fn draw_debug_text(&mut self, text: &str) {
        log::trace!("{text}");
        match &mut self.debug_text {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(text);
            }
            None => self.debug_text = Some(text.to_string()),
        }
    }
}

impl ImageLoader for Renderer {
    fn load_image(&mut self, name: &str, bytes: &[u8]) -> Result<TextureHandle, AssetError> {
        let texture = Texture::from_bytes(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_layout(),
            bytes,
            name,
        )?;
        info!("Loaded texture {} ({}x{})", name, texture.width, texture.height);
        Ok(self.texture_manager.insert(texture))
    }
}
