// Rendering system using wgpu

mod camera;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use sprite::{Sprite, SpriteRenderer};
pub use texture::{Texture, TextureHandle, TextureManager};
pub use vertex::Vertex;

use crate::engine::assets::{AssetError, LoadedSheet};
use anyhow::Result;
use glam::Vec2;
use log::info;
use std::sync::Arc;
use winit::window::Window;

/// Main renderer responsible for initializing wgpu and drawing each frame
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a renderer for the given window, sized to it once
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
            // Fifo paces presentation to the display refresh
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let camera = Camera::new(config.width as f32, config.height as f32);
        let sprite_renderer = SpriteRenderer::new(&device, surface_format, camera.view_proj_matrix());
        let texture_manager = TextureManager::new(&device, &queue);

        info!(
            "Renderer initialized with {}x{} resolution",
            config.width, config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            texture_manager,
            camera,
        })
    }

    /// Decode and upload a sprite sheet
    pub fn upload_texture(&mut self, bytes: &[u8], label: &str) -> Result<LoadedSheet, AssetError> {
        let texture = self
            .texture_manager
            .load_texture_bytes(&self.device, &self.queue, bytes, label)?;
        let size = self
            .texture_manager
            .get(texture)
            .map(|t| (t.width, t.height));
        sheet_from_upload(texture, size, label)
    }

    /// Reconfigure the surface at its original size after it was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear the surface and draw one frame of sprites
    pub fn render(&mut self, sprites: &[Sprite]) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            self.sprite_renderer.camera_buffer(),
            0,
            bytemuck::cast_slice(&[CameraUniform::new(&self.camera)]),
        );
        self.sprite_renderer
            .prepare(&self.device, &self.texture_manager, sprites);

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
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Size of the drawing surface in pixels
    pub fn viewport(&self) -> Vec2 {
        self.camera.viewport()
    }
}

/// Pair an uploaded texture with its size. A handle the manager cannot
/// resolve is a failed load, never a zero-sized sheet.
fn sheet_from_upload(
    texture: TextureHandle,
    size: Option<(u32, u32)>,
    label: &str,
) -> Result<LoadedSheet, AssetError> {
    let (width, height) =
        size.ok_or_else(|| AssetError::LoadError(format!("Texture for {} was not stored", label)))?;
    Ok(LoadedSheet {
        texture,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_sheet_keeps_texture_size() {
        let sheet = sheet_from_upload(texture::test_handle(1), Some((480, 64)), "Attack.png").unwrap();
        assert_eq!(sheet.width, 480);
        assert_eq!(sheet.height, 64);
        assert_eq!(sheet.texture, texture::test_handle(1));
    }

    #[test]
    fn test_unresolved_upload_is_an_error() {
        let err = sheet_from_upload(texture::test_handle(7), None, "Jump.png").unwrap_err();
        assert!(matches!(err, AssetError::LoadError(_)));
        assert!(err.to_string().contains("Jump.png"));
    }
}
