//! wgpu implementation of the GPU backend seam
//!
//! wgpu has no global "texture unit" state, so the backend keeps one slot per
//! auxiliary unit and assembles a bind group on request. The host's offscreen
//! pass asks for [`WgpuBackend::bind_group`] while the corner shader is pushed
//! and supplies the window content view for unit 0.
//!
//! Every bind group owns a uniform buffer initialized with the uniforms of
//! its own draw, so several window draws may be recorded before one submit.

use std::borrow::Cow;
use std::sync::Arc;

use rounder_raster::CornerImage;
use tracing::{trace, warn};
use wgpu::util::DeviceExt;

use crate::backend::{GpuBackend, TextureUnit};
use crate::shader::{ShaderProgram, SAMPLER_BINDING, UNIFORMS_BINDING};
use crate::texture::GpuTexture;
use crate::uniforms::CornerUniforms;

/// Corner backend on a wgpu device
pub struct WgpuBackend {
    /// GPU device
    device: Arc<wgpu::Device>,
    /// Command queue
    queue: Arc<wgpu::Queue>,
    /// Shader module, `None` when the source failed validation
    module: Option<wgpu::ShaderModule>,
    /// Layout of the corner bind group
    bind_group_layout: wgpu::BindGroupLayout,
    /// Sampler shared by content and atlases
    sampler: wgpu::Sampler,
    /// Atlases, uniforms and shader depth of the draw being recorded
    draw: DrawState<Arc<wgpu::TextureView>>,
}

/// Inputs of one corner draw, gathered between `push_shader` and `pop_shader`
#[derive(Debug)]
struct DrawState<V> {
    /// Views bound to units 1..=3
    slots: [Option<V>; 3],
    uniforms: CornerUniforms,
    shader_depth: u32,
}

impl<V> Default for DrawState<V> {
    fn default() -> Self {
        Self {
            slots: [None, None, None],
            uniforms: CornerUniforms::default(),
            shader_depth: 0,
        }
    }
}

impl<V: Clone> DrawState<V> {
    /// Mask, light and dark views plus the uniforms, when ready to draw
    fn snapshot(&self) -> Option<([V; 3], CornerUniforms)> {
        if self.shader_depth == 0 {
            return None;
        }
        let [mask, light, dark] = &self.slots;
        Some(([mask.clone()?, light.clone()?, dark.clone()?], self.uniforms))
    }

    fn slot(unit: TextureUnit) -> Option<usize> {
        match unit {
            TextureUnit::Content => None,
            TextureUnit::Mask => Some(0),
            TextureUnit::LightOutline => Some(1),
            TextureUnit::DarkOutline => Some(2),
        }
    }

    fn bind(&mut self, unit: TextureUnit, view: V) -> bool {
        match Self::slot(unit) {
            Some(i) => {
                self.slots[i] = Some(view);
                true
            }
            None => false,
        }
    }

    fn unbind(&mut self, unit: TextureUnit) {
        if let Some(i) = Self::slot(unit) {
            self.slots[i] = None;
        }
    }
}

impl WgpuBackend {
    /// Create the backend and validate the shader source
    ///
    /// An invalid or missing source is logged and leaves the backend with
    /// [`GpuBackend::is_shader_valid`] returning false.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, shader_source: Option<&str>) -> Self {
        let module = match ShaderProgram::load(shader_source) {
            Ok(program) => Some(device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Corner Shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Owned(program.source().to_owned())),
            })),
            Err(e) => {
                warn!("corner shader unavailable: {e}");
                None
            }
        };

        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Corner Bind Group Layout"),
            entries: &[
                texture_entry(TextureUnit::Content.index()),
                texture_entry(TextureUnit::Mask.index()),
                texture_entry(TextureUnit::LightOutline.index()),
                texture_entry(TextureUnit::DarkOutline.index()),
                wgpu::BindGroupLayoutEntry {
                    binding: SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: UNIFORMS_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Corner Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            device,
            queue,
            module,
            bind_group_layout,
            sampler,
            draw: DrawState::default(),
        }
    }

    /// Shader module for the host's pipeline
    pub fn shader_module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }

    /// Layout the host's pipeline must use for group 0
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Bind group for the current draw, with `content` on unit 0
    ///
    /// `None` unless the shader is pushed and all three atlases are bound.
    /// The uniforms set for this draw are copied into a buffer owned by the
    /// returned group.
    pub fn bind_group(&self, content: &wgpu::TextureView) -> Option<wgpu::BindGroup> {
        let ([mask, light, dark], uniforms) = self.draw.snapshot()?;
        let uniform_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Corner Uniforms"),
            contents: uniforms.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Corner Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TextureUnit::Content.index(),
                    resource: wgpu::BindingResource::TextureView(content),
                },
                wgpu::BindGroupEntry {
                    binding: TextureUnit::Mask.index(),
                    resource: wgpu::BindingResource::TextureView(&mask),
                },
                wgpu::BindGroupEntry {
                    binding: TextureUnit::LightOutline.index(),
                    resource: wgpu::BindingResource::TextureView(&light),
                },
                wgpu::BindGroupEntry {
                    binding: TextureUnit::DarkOutline.index(),
                    resource: wgpu::BindingResource::TextureView(&dark),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: UNIFORMS_BINDING,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        }))
    }
}

impl GpuBackend for WgpuBackend {
    type Texture = GpuTexture;

    fn is_shader_valid(&self) -> bool {
        self.module.is_some()
    }

    fn upload_texture(&mut self, label: &str, image: &CornerImage) -> GpuTexture {
        GpuTexture::from_image(&self.device, &self.queue, label, image)
    }

    fn push_shader(&mut self) {
        self.draw.shader_depth += 1;
    }

    fn set_uniforms(&mut self, uniforms: &CornerUniforms) {
        self.draw.uniforms = *uniforms;
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: &GpuTexture) {
        if !self.draw.bind(unit, Arc::clone(&texture.view)) {
            trace!("content unit is owned by the host, ignoring bind");
        }
    }

    fn unbind_texture(&mut self, unit: TextureUnit) {
        self.draw.unbind(unit);
    }

    fn pop_shader(&mut self) {
        self.draw.shader_depth = self.draw.shader_depth.saturating_sub(1);
    }
}
