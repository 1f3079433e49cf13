//! GPU error types

use thiserror::Error;

/// Errors raised while preparing the corner shader
#[derive(Error, Debug)]
pub enum GpuError {
    /// The shader source was not provided
    #[error("corner shader source is missing")]
    MissingShader,

    /// WGSL parsing error
    #[error("shader parse error: {0}")]
    Parse(String),

    /// naga validation error
    #[error("shader validation error: {0}")]
    Validation(String),

    /// A binding required by the texture-unit contract is absent or misplaced
    #[error("shader binding `{name}` must be declared at @group(0) @binding({binding})")]
    Binding { name: &'static str, binding: u32 },

    /// The uniform block lacks a field the render driver writes
    #[error("shader uniform block has no `{0}` field")]
    Uniform(&'static str),
}
