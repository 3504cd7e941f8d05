// Sprite rendering system
//
// Every blit becomes one textured quad in screen pixels. Quads are drawn in
// submission order; consecutive quads sharing a texture are drawn with one
// indexed draw call.

use super::texture::{TextureHandle, TextureManager};
use super::Vertex;
use crate::core::math::{Color, Rect};
use crate::engine::assets::uv_rect;
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// One queued blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Region of the texture in texels
    pub source: Rect,
    /// Region of the screen in pixels
    pub destination: Rect,
    pub color: Color,
}

/// Screen projection uniform for the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ScreenUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl ScreenUniform {
    /// Map pixel coordinates (top-left origin, y down) to clip space
    pub fn for_screen(width: f32, height: f32) -> Self {
        let projection = Mat4::orthographic_rh(0.0, width.max(1.0), height.max(1.0), 0.0, -1.0, 1.0);
        Self {
            view_proj: projection.to_cols_array_2d(),
        }
    }
}

/// A run of indices drawn with a single texture
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    texture: TextureHandle,
    indices: Range<u32>,
}

/// CPU-side geometry for one frame
#[derive(Debug, Default)]
struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    batches: Vec<Batch>,
}

/// Build quads for `sprites`, skipping any whose texture size is unknown
fn build_geometry(
    sprites: &[Sprite],
    texture_size: impl Fn(TextureHandle) -> Option<(u32, u32)>,
) -> Geometry {
    let mut geometry = Geometry::default();

    for sprite in sprites {
        let Some((width, height)) = texture_size(sprite.texture) else {
            continue;
        };

        let [u_min, v_min, u_max, v_max] = uv_rect(sprite.source, width, height);
        let min = sprite.destination.min.as_vec2();
        let max = sprite.destination.max().as_vec2();
        let color = Vec4::from_array(sprite.color.to_array());

        let base = geometry.vertices.len() as u32;
        geometry.vertices.extend_from_slice(&[
            Vertex::new(Vec2::new(min.x, min.y), Vec2::new(u_min, v_min), color),
            Vertex::new(Vec2::new(max.x, min.y), Vec2::new(u_max, v_min), color),
            Vertex::new(Vec2::new(max.x, max.y), Vec2::new(u_max, v_max), color),
            Vertex::new(Vec2::new(min.x, max.y), Vec2::new(u_min, v_max), color),
        ]);

        let start = geometry.indices.len() as u32;
        geometry
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = geometry.indices.len() as u32;

        match geometry.batches.last_mut() {
            Some(batch) if batch.texture == sprite.texture => batch.indices.end = end,
            _ => geometry.batches.push(Batch {
                texture: sprite.texture,
                indices: start..end,
            }),
        }
    }

    geometry
}

/// Sprite renderer
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sprites: Vec<Sprite>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    batches: Vec<Batch>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let screen_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Screen Bind Group Layout"),
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
            bind_group_layouts: &[&screen_bind_group_layout, &texture_bind_group_layout],
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
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding
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

        let screen_uniform = ScreenUniform::for_screen(config.width as f32, config.height as f32);

        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Buffer"),
            contents: bytemuck::cast_slice(&[screen_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Screen Bind Group"),
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            screen_buffer,
            screen_bind_group,
            texture_bind_group_layout,
            sprites: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
            batches: Vec::new(),
        })
    }

    /// Layout every texture bind group must match
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }

    /// Queue a sprite for this frame
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    /// Upload this frame's geometry and screen projection
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        textures: &TextureManager,
        screen_width: f32,
        screen_height: f32,
    ) {
        let uniform = ScreenUniform::for_screen(screen_width, screen_height);
        queue.write_buffer(&self.screen_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let geometry = build_geometry(&self.sprites, |handle| {
            textures.get(handle).map(|t| (t.width, t.height))
        });
        self.sprites.clear();

        if geometry.indices.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            self.batches.clear();
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        self.batches = geometry.batches;
    }

    /// Draw the prepared geometry
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, textures: &'a TextureManager) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.screen_bind_group, &[]);

        for batch in &self.batches {
            let Some(texture) = textures.get(batch.texture) else {
                continue;
            };
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }
}
