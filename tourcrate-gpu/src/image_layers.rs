//! Photograph overlay pass
//!
//! Draws the primary and secondary photographs as textured quads on top of
//! the point cloud, each blended with its layer opacity. Photos keep their
//! aspect ratio and are letterboxed inside the surface.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use tourcrate_io::Photo;

use crate::device::GpuContext;

/// Which of the two cross-fade layers a photo is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSlot {
    Primary,
    Secondary,
}

impl LayerSlot {
    pub fn other(self) -> Self {
        match self {
            LayerSlot::Primary => LayerSlot::Secondary,
            LayerSlot::Secondary => LayerSlot::Primary,
        }
    }

    fn index(self) -> usize {
        match self {
            LayerSlot::Primary => 0,
            LayerSlot::Secondary => 1,
        }
    }
}

/// Per-layer uniform data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LayerUniform {
    pub opacity: f32,
    pub _padding: f32,
    pub scale: [f32; 2],
}

/// Quad scale in NDC that fits an image of `image_aspect` inside a surface of
/// `surface_aspect` without cropping
pub fn contain_scale(image_aspect: f32, surface_aspect: f32) -> [f32; 2] {
    if image_aspect <= 0.0 || surface_aspect <= 0.0 {
        return [1.0, 1.0];
    }
    if image_aspect > surface_aspect {
        [1.0, surface_aspect / image_aspect]
    } else {
        [image_aspect / surface_aspect, 1.0]
    }
}

struct PhotoTexture {
    label: String,
    aspect_ratio: f32,
    view: wgpu::TextureView,
    _texture: wgpu::Texture,
}

struct SlotState {
    uniform_buffer: wgpu::Buffer,
    bound: Option<(Rc<PhotoTexture>, wgpu::BindGroup)>,
}

/// GPU state for the two photograph layers
pub struct ImageLayerPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    slots: [SlotState; 2],
}

impl ImageLayerPass {
    pub fn new(ctx: &GpuContext, color_format: wgpu::TextureFormat, depth_format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("image_layer_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Image Layer Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let shader = ctx.create_shader_module("Image Layer Shader", include_str!("shaders/image_layer.wgsl"));

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Image Layer Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Image Layer Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Overlays ignore depth but must match the pass attachment
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let slots = [
            SlotState::new(ctx, "Primary Layer Uniform"),
            SlotState::new(ctx, "Secondary Layer Uniform"),
        ];

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            slots,
        }
    }

    /// Label of the photo currently bound to `slot`
    pub fn bound_label(&self, slot: LayerSlot) -> Option<&str> {
        self.slots[slot.index()]
            .bound
            .as_ref()
            .map(|(photo, _)| photo.label.as_str())
    }

    /// Upload `photo` into `slot`, or clear the slot
    pub fn set_photo(&mut self, ctx: &GpuContext, slot: LayerSlot, photo: Option<&Photo>) {
        match photo {
            Some(photo) => {
                let texture = Rc::new(upload_photo(ctx, photo));
                self.bind(ctx, slot, texture);
            }
            None => self.slots[slot.index()].bound = None,
        }
    }

    /// Bind the texture already held by `from` to `to` without re-uploading.
    ///
    /// Returns false when `from` is empty.
    pub fn share(&mut self, ctx: &GpuContext, from: LayerSlot, to: LayerSlot) -> bool {
        let Some((texture, _)) = &self.slots[from.index()].bound else {
            return false;
        };
        let texture = Rc::clone(texture);
        self.bind(ctx, to, texture);
        true
    }

    fn bind(&mut self, ctx: &GpuContext, slot: LayerSlot, texture: Rc<PhotoTexture>) {
        let state = &self.slots[slot.index()];
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image_layer_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: state.uniform_buffer.as_entire_binding(),
                },
            ],
        });
        self.slots[slot.index()].bound = Some((texture, bind_group));
    }

    /// Write this frame's opacities and letterbox scales
    pub fn prepare(&self, ctx: &GpuContext, opacities: [f32; 2], surface_aspect: f32) {
        for (slot, opacity) in self.slots.iter().zip(opacities) {
            if let Some((photo, _)) = &slot.bound {
                let uniform = LayerUniform {
                    opacity: opacity.clamp(0.0, 1.0),
                    _padding: 0.0,
                    scale: contain_scale(photo.aspect_ratio, surface_aspect),
                };
                ctx.queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
            }
        }
    }

    /// Draw primary then secondary into an open render pass
    pub fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>, opacities: [f32; 2]) {
        render_pass.set_pipeline(&self.pipeline);
        for (slot, opacity) in self.slots.iter().zip(opacities) {
            if let Some((_, bind_group)) = &slot.bound {
                if opacity > 0.0 {
                    render_pass.set_bind_group(0, bind_group, &[]);
                    render_pass.draw(0..6, 0..1);
                }
            }
        }
    }
}

impl SlotState {
    fn new(ctx: &GpuContext, label: &str) -> Self {
        let uniform_buffer = ctx.create_buffer_init(
            label,
            &[LayerUniform {
                opacity: 0.0,
                _padding: 0.0,
                scale: [1.0, 1.0],
            }],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        Self {
            uniform_buffer,
            bound: None,
        }
    }
}

fn upload_photo(ctx: &GpuContext, photo: &Photo) -> PhotoTexture {
    let size = wgpu::Extent3d {
        width: photo.width.max(1),
        height: photo.height.max(1),
        depth_or_array_layers: 1,
    };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&photo.label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    if photo.pixels.len() as u64 >= 4 * size.width as u64 * size.height as u64 {
        ctx.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &photo.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );
    }

    PhotoTexture {
        label: photo.label.clone(),
        aspect_ratio: photo.aspect_ratio(),
        view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
        _texture: texture,
    }
}
