//! GPU backend seam
//!
//! The render driver treats textures and the shader as opaque handles. A
//! backend turns these calls into real GPU work (see
//! [`WgpuBackend`](crate::WgpuBackend)); tests use a recording backend.

use rounder_raster::CornerImage;

use crate::uniforms::CornerUniforms;

/// Fixed texture units shared with the shader source
///
/// Renumbering any of these requires the matching change in the shader.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureUnit {
    /// The window's own content sampler
    Content = 0,
    Mask = 1,
    LightOutline = 2,
    DarkOutline = 3,
}

impl TextureUnit {
    /// Auxiliary units bound by the corner pass, highest first
    pub const AUXILIARY: [TextureUnit; 3] = [
        TextureUnit::DarkOutline,
        TextureUnit::LightOutline,
        TextureUnit::Mask,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// GPU operations issued by the screen cache and the render driver
///
/// Calls are made in strict sequence from the render thread and never read
/// results back. Dropping a `Texture` releases it.
pub trait GpuBackend {
    /// Handle to an uploaded texture
    type Texture;

    /// Whether the corner shader compiled and exposes the expected bindings
    fn is_shader_valid(&self) -> bool;

    /// Upload a rasterized atlas as a new texture
    fn upload_texture(&mut self, label: &str, image: &CornerImage) -> Self::Texture;

    /// Make the corner shader current
    fn push_shader(&mut self);

    /// Upload the per-window uniform block to the current shader
    fn set_uniforms(&mut self, uniforms: &CornerUniforms);

    /// Bind `texture` to `unit`. Unit 0 stays the active unit afterwards.
    fn bind_texture(&mut self, unit: TextureUnit, texture: &Self::Texture);

    /// Clear whatever is bound to `unit`
    fn unbind_texture(&mut self, unit: TextureUnit);

    /// Restore the shader that was current before [`GpuBackend::push_shader`]
    fn pop_shader(&mut self);
}
