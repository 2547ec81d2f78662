// Sprite rendering system

use super::{CameraUniform, TextureHandle, TextureManager, Vertex};
use crate::core::Rect;
use glam::{Mat4, Vec2, Vec4};
use std::collections::HashMap;
use std::ops::Range;
use wgpu::util::DeviceExt;

/// A screen-space textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Destination rectangle on screen, in pixels
    pub dest: Rect,
    /// Top-left texture coordinate (0..1)
    pub uv_min: Vec2,
    /// Bottom-right texture coordinate (0..1)
    pub uv_max: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
    /// Texture handle (None = white texture)
    pub texture: Option<TextureHandle>,
}

impl Sprite {
    /// A flat colored quad
    pub fn solid(dest: Rect, color: Vec4) -> Self {
        Self {
            dest,
            uv_min: Vec2::ZERO,
            uv_max: Vec2::ONE,
            color,
            texture: None,
        }
    }

    /// A quad showing `source` (in texel coordinates) of a texture sized `texture_size`
    pub fn from_sheet(texture: TextureHandle, texture_size: Vec2, source: Rect, dest: Rect) -> Self {
        Self {
            dest,
            uv_min: source.min() / texture_size,
            uv_max: source.max() / texture_size,
            color: Vec4::ONE,
            texture: Some(texture),
        }
    }

    /// Four corners, clockwise from the top-left
    pub fn vertices(&self) -> [Vertex; 4] {
        let min = self.dest.min();
        let max = self.dest.max();
        [
            Vertex::new(min, self.uv_min, self.color),
            Vertex::new(
                Vec2::new(max.x, min.y),
                Vec2::new(self.uv_max.x, self.uv_min.y),
                self.color,
            ),
            Vertex::new(max, self.uv_max, self.color),
            Vertex::new(
                Vec2::new(min.x, max.y),
                Vec2::new(self.uv_min.x, self.uv_max.y),
                self.color,
            ),
        ]
    }
}

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// One draw call: a texture and the index range of its quad
struct DrawBatch {
    texture: TextureHandle,
    indices: Range<u32>,
}

/// Sprite renderer
///
/// Sprites are queued with [`SpriteRenderer::prepare`], which rebuilds the
/// vertex/index buffers for this frame, and drawn with [`SpriteRenderer::render`].
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_groups: HashMap<TextureHandle, wgpu::BindGroup>,
    batches: Vec<DrawBatch>,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, view_proj: Mat4) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
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
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Screen space flips y, so winding is not reliable here
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self {
            render_pipeline,
            vertex_buffer: None,
            index_buffer: None,
            camera_buffer,
            camera_bind_group,
            bind_group_layout: texture_bind_group_layout,
            texture_bind_groups: HashMap::new(),
            batches: Vec::new(),
        }
    }

    /// Build this frame's buffers and batches
    pub fn prepare(&mut self, device: &wgpu::Device, textures: &TextureManager, sprites: &[Sprite]) {
        self.batches.clear();

        let mut vertices = Vec::with_capacity(sprites.len() * 4);
        let mut indices = Vec::with_capacity(sprites.len() * 6);

        for sprite in sprites.iter().filter(|s| !s.dest.is_empty()) {
            let texture = sprite.texture.unwrap_or_else(|| textures.white());
            if !self.ensure_bind_group(device, textures, texture) {
                log::warn!("Skipping sprite with unknown texture {:?}", texture);
                continue;
            }

            let base = vertices.len() as u16;
            let first = indices.len() as u32;
            vertices.extend_from_slice(&sprite.vertices());
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));

            self.batches.push(DrawBatch {
                texture,
                indices: first..first + QUAD_INDICES.len() as u32,
            });
        }

        if self.batches.is_empty() {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_bind_group(
        &mut self,
        device: &wgpu::Device,
        textures: &TextureManager,
        handle: TextureHandle,
    ) -> bool {
        if self.texture_bind_groups.contains_key(&handle) {
            return true;
        }
        let Some(texture) = textures.get(handle) else {
            return false;
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Texture Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });
        self.texture_bind_groups.insert(handle, bind_group);
        true
    }

    /// Draw everything queued by the last `prepare`
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for batch in &self.batches {
            if let Some(bind_group) = self.texture_bind_groups.get(&batch.texture) {
                render_pass.set_bind_group(1, bind_group, &[]);
                render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
            }
        }
    }

    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }
}
