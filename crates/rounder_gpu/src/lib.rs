//! Rounder GPU layer
//!
//! Everything between the CPU rasterizer and the host's offscreen window
//! paint:
//!
//! - **Backend seam**: [`GpuBackend`], the opaque texture/shader operations the
//!   render driver issues each frame, with a `wgpu` implementation
//! - **Uniforms**: [`CornerUniforms`], the Pod uniform block matching the
//!   corner shader
//! - **Shader contract**: WGSL validation and binding checks via `naga`
//! - **Screen cache**: per-output mask/outline textures and corner regions,
//!   rebuilt whenever the radius or the scale factor changes

pub mod backend;
pub mod error;
pub mod screen;
pub mod shader;
pub mod texture;
pub mod uniforms;
pub mod wgpu_backend;

pub use backend::{GpuBackend, TextureUnit};
pub use error::GpuError;
pub use screen::{CornerTextures, ScreenAddressing, ScreenCache, ScreenKey, ScreenState};
pub use shader::ShaderProgram;
pub use texture::GpuTexture;
pub use uniforms::CornerUniforms;
pub use wgpu_backend::WgpuBackend;
