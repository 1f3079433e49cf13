//! Corner shader uniform block
//!
//! `#[repr(C)]` + `bytemuck::Pod` so the block can be copied straight into a
//! uniform buffer. Field names match the shader's uniform names.

/// Per-window uniforms for the corner shader (matches shader `CornerUniforms`)
///
/// Memory layout (WGSL uniform rules):
/// - frame_size: `vec2<f32>`           (offset 0)
/// - expanded_size: `vec2<f32>`        (offset 8)
/// - csd_shadow_offset: `vec3<f32>`    (offset 16)
/// - radius: `f32`                     (offset 28)
/// - content_size: `vec2<f32>`         (offset 32)
/// - shadow_tex_size: `vec2<i32>`      (offset 40)
/// - shadow_sample_offset: `f32`       (offset 48)
/// - outline_strength: `f32`           (offset 52)
/// - scale: `f32`                      (offset 56)
/// - is_wayland: `u32`                 (offset 60)
/// - has_decoration: `u32`             (offset 64)
/// - draw_outline: `u32`               (offset 68)
/// - dark_theme: `u32`                 (offset 72)
/// - _padding: `u32`                   (offset 76)
/// Total: 80 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CornerUniforms {
    /// Frame size in device pixels
    pub frame_size: [f32; 2],
    /// Expanded (frame + shadow) size in device pixels
    pub expanded_size: [f32; 2],
    /// (left, top, bottom) distance between expanded and frame geometry,
    /// used to align client-side shadow bitmaps
    pub csd_shadow_offset: [f32; 3],
    /// Corner radius in device pixels
    pub radius: f32,
    /// Content size in device pixels
    pub content_size: [f32; 2],
    /// Size of the decoration's shadow bitmap, 0 when there is none
    pub shadow_tex_size: [i32; 2],
    /// Shadow offset constant
    pub shadow_sample_offset: f32,
    /// Outline strength in `0.0..=1.0`
    pub outline_strength: f32,
    /// Device scale factor
    pub scale: f32,
    pub is_wayland: u32,
    pub has_decoration: u32,
    pub draw_outline: u32,
    pub dark_theme: u32,
    pub _padding: u32,
}

impl CornerUniforms {
    /// Uniform names, in declaration order
    pub const NAMES: [&'static str; 13] = [
        "frame_size",
        "expanded_size",
        "csd_shadow_offset",
        "radius",
        "content_size",
        "shadow_tex_size",
        "shadow_sample_offset",
        "outline_strength",
        "scale",
        "is_wayland",
        "has_decoration",
        "draw_outline",
        "dark_theme",
    ];

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_size() {
        assert_eq!(std::mem::size_of::<CornerUniforms>(), 80);
        assert_eq!(CornerUniforms::default().as_bytes().len(), 80);
    }

    #[test]
    fn test_radius_follows_shadow_offset_vector() {
        let uniforms = CornerUniforms {
            radius: 20.0,
            ..Default::default()
        };
        let bytes = uniforms.as_bytes();
        assert_eq!(&bytes[28..32], &20.0f32.to_ne_bytes());
    }
}
