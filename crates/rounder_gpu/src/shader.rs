//! Corner shader contract
//!
//! The fragment program is compiled from a resource file outside this crate.
//! Before the effect trusts it, the WGSL is parsed and validated with naga and
//! checked for the bindings the render driver relies on: the texture units
//! (content=0, mask=1, light outline=2, dark outline=3), the shared sampler
//! and the uniform block with every field of [`CornerUniforms`].

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Module, TypeInner};
use tracing::debug;

use crate::backend::TextureUnit;
use crate::error::GpuError;
use crate::uniforms::CornerUniforms;

/// Binding index of the sampler shared by all four textures
pub const SAMPLER_BINDING: u32 = 4;

/// Binding index of the uniform block
pub const UNIFORMS_BINDING: u32 = 5;

/// Global names and binding indices required in `@group(0)`
pub const REQUIRED_BINDINGS: [(&str, u32); 6] = [
    ("content_texture", TextureUnit::Content as u32),
    ("mask_texture", TextureUnit::Mask as u32),
    ("light_outline_texture", TextureUnit::LightOutline as u32),
    ("dark_outline_texture", TextureUnit::DarkOutline as u32),
    ("corner_sampler", SAMPLER_BINDING),
    ("uniforms", UNIFORMS_BINDING),
];

/// A validated corner shader
#[derive(Debug)]
pub struct ShaderProgram {
    source: String,
    module: Module,
}

impl ShaderProgram {
    /// Parse, validate and check the binding contract of a WGSL source
    pub fn from_wgsl(source: &str) -> Result<Self, GpuError> {
        let module =
            naga::front::wgsl::parse_str(source).map_err(|e| GpuError::Parse(e.emit_to_string(source)))?;

        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|e| GpuError::Validation(e.emit_to_string(source)))?;

        check_bindings(&module)?;
        debug!(globals = module.global_variables.len(), "corner shader validated");

        Ok(Self {
            source: source.to_owned(),
            module,
        })
    }

    /// Validate an optional source; a missing resource is an error too
    pub fn load(source: Option<&str>) -> Result<Self, GpuError> {
        Self::from_wgsl(source.ok_or(GpuError::MissingShader)?)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &Module {
        &self.module
    }
}

fn check_bindings(module: &Module) -> Result<(), GpuError> {
    for (name, binding) in REQUIRED_BINDINGS {
        let global = module
            .global_variables
            .iter()
            .map(|(_, g)| g)
            .find(|g| g.name.as_deref() == Some(name))
            .filter(|g| {
                g.binding
                    .as_ref()
                    .is_some_and(|b| b.group == 0 && b.binding == binding)
            })
            .ok_or(GpuError::Binding { name, binding })?;

        if name == "uniforms" {
            let TypeInner::Struct { members, .. } = &module.types[global.ty].inner else {
                return Err(GpuError::Binding { name, binding });
            };
            for field in CornerUniforms::NAMES {
                if !members.iter().any(|m| m.name.as_deref() == Some(field)) {
                    return Err(GpuError::Uniform(field));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEST_SHADER: &str = r#"
struct CornerUniforms {
    frame_size: vec2<f32>,
    expanded_size: vec2<f32>,
    csd_shadow_offset: vec3<f32>,
    radius: f32,
    content_size: vec2<f32>,
    shadow_tex_size: vec2<i32>,
    shadow_sample_offset: f32,
    outline_strength: f32,
    scale: f32,
    is_wayland: u32,
    has_decoration: u32,
    draw_outline: u32,
    dark_theme: u32,
    _padding: u32,
}

@group(0) @binding(0) var content_texture: texture_2d<f32>;
@group(0) @binding(1) var mask_texture: texture_2d<f32>;
@group(0) @binding(2) var light_outline_texture: texture_2d<f32>;
@group(0) @binding(3) var dark_outline_texture: texture_2d<f32>;
@group(0) @binding(4) var corner_sampler: sampler;
@group(0) @binding(5) var<uniform> uniforms: CornerUniforms;

@fragment
fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    let color = textureSample(content_texture, corner_sampler, uv);
    let mask = textureSample(mask_texture, corner_sampler, uv);
    let light = textureSample(light_outline_texture, corner_sampler, uv);
    let dark = textureSample(dark_outline_texture, corner_sampler, uv);
    let outline = (light.a + dark.a) * uniforms.outline_strength;
    return color * (1.0 - mask.a) + vec4<f32>(outline);
}
"#;

    #[test]
    fn test_valid_shader_passes_contract() {
        let program = ShaderProgram::from_wgsl(TEST_SHADER).unwrap();
        assert_eq!(program.source(), TEST_SHADER);
    }

    #[test]
    fn test_missing_source() {
        assert!(matches!(
            ShaderProgram::load(None),
            Err(GpuError::MissingShader)
        ));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        assert!(matches!(
            ShaderProgram::from_wgsl("fn broken( {"),
            Err(GpuError::Parse(_))
        ));
    }

    #[test]
    fn test_renumbered_unit_is_rejected() {
        let source = TEST_SHADER.replace(
            "@group(0) @binding(1) var mask_texture",
            "@group(0) @binding(7) var mask_texture",
        );
        assert!(matches!(
            ShaderProgram::from_wgsl(&source),
            Err(GpuError::Binding {
                name: "mask_texture",
                binding: 1
            })
        ));
    }

    #[test]
    fn test_missing_uniform_field_is_rejected() {
        let source = TEST_SHADER
            .replace("    dark_theme: u32,\n", "    theme: u32,\n");
        assert!(matches!(
            ShaderProgram::from_wgsl(&source),
            Err(GpuError::Uniform("dark_theme"))
        ));
    }
}
