//! Rounder CLI
//!
//! Render corner atlases to PNG, resolve settings files, and check corner
//! shaders against the binding contract.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rounder_core::{shadow_offset_for, Corner, CornerStyle, MAX_CORNER_RADIUS};
use rounder_effect::{SettingsProvider, TomlSettingsProvider};
use rounder_gpu::ShaderProgram;
use rounder_raster::{corner_regions, CornerImage, CornerKind, CornerShape};

#[derive(Parser)]
#[command(name = "rounder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rounded corner atlas and settings tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Rounded,
    Squircle,
}

impl From<Style> for CornerStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Rounded => CornerStyle::Rounded,
            Style::Squircle => CornerStyle::Squircle,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize the mask and outline atlases and write them as PNG
    Render {
        /// Corner radius in logical pixels
        #[arg(
            short,
            long,
            default_value = "10",
            value_parser = clap::value_parser!(i32).range(0..=i64::from(MAX_CORNER_RADIUS))
        )]
        radius: i32,

        /// Device scale factor
        #[arg(short, long, default_value = "1.0")]
        scale: f64,

        /// Corner style
        #[arg(long, value_enum, default_value = "rounded")]
        style: Style,

        /// Squircle ratio (0-100)
        #[arg(long, default_value = "50")]
        ratio: u8,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Resolve the settings a window would get from a settings file
    Settings {
        /// Settings file (TOML)
        file: PathBuf,

        /// Window class to resolve for
        #[arg(long)]
        class: Option<String>,

        /// Window caption to resolve for
        #[arg(long, default_value = "")]
        caption: String,
    },

    /// Check a WGSL corner shader against the binding contract
    Shader {
        /// Shader source file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            radius,
            scale,
            style,
            ratio,
            output,
        } => cmd_render(radius, scale, style, ratio, &output),

        Commands::Settings {
            file,
            class,
            caption,
        } => cmd_settings(&file, class.as_deref(), &caption),

        Commands::Shader { file } => cmd_shader(&file),
    }
}

fn cmd_render(radius: i32, scale: f64, style: Style, ratio: u8, output: &Path) -> Result<()> {
    if scale <= 0.0 {
        anyhow::bail!("Scale factor must be positive, got {}", scale);
    }

    let offset = shadow_offset_for(radius);
    let shape = match CornerStyle::from(style) {
        CornerStyle::Rounded => CornerShape::rounded(offset),
        CornerStyle::Squircle => CornerShape::squircle(ratio, offset),
    };
    let scaled = rounder_gpu::screen::scaled_radius(radius, scale);
    let device_tile = scaled
        .checked_add(offset)
        .and_then(|tile| u32::try_from(tile).ok())
        .context("Scaled corner radius is out of range")?;
    let logical_tile = u32::try_from(radius + offset).context("Corner radius must not be negative")?;

    info!(
        "Rendering {}px corners at scale {} ({}px device, offset {})",
        radius, scale, scaled, offset
    );

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    for (name, kind) in [
        ("mask.png", CornerKind::Mask),
        ("light_outline.png", CornerKind::LightOutline),
        ("dark_outline.png", CornerKind::DarkOutline),
    ] {
        let atlas = CornerImage::generate(device_tile, kind, &shape)
            .with_context(|| format!("Failed to rasterize {}", name))?;
        let path = output.join(name);
        save_png(&atlas, &path)?;
        info!("Wrote {} ({}x{})", path.display(), atlas.side(), atlas.side());
    }

    let logical_mask =
        CornerImage::generate(logical_tile, CornerKind::Mask, &shape).context("Failed to rasterize logical mask")?;
    let regions = corner_regions(&logical_mask);
    println!("Corner regions ({}px tile):", logical_tile);
    for corner in Corner::ALL {
        let region = &regions[corner];
        let bounds = region.bounding_rect();
        println!(
            "  {:<12} {:>3} rects, area {:>5}, bounds {}x{} at ({}, {})",
            format!("{:?}", corner),
            region.rects().len(),
            region.area(),
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );
    }

    Ok(())
}

/// Write a premultiplied atlas as a straight-alpha PNG
fn save_png(atlas: &CornerImage, path: &Path) -> Result<()> {
    let pixels = atlas
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            let a = px[3];
            let unpremultiply = |c: u8| {
                if a == 0 {
                    0
                } else {
                    ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
                }
            };
            [unpremultiply(px[0]), unpremultiply(px[1]), unpremultiply(px[2]), a]
        })
        .collect::<Vec<u8>>();

    let img = image::RgbaImage::from_raw(atlas.side(), atlas.side(), pixels)
        .context("Atlas pixel buffer has the wrong size")?;
    img.save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

fn cmd_settings(file: &Path, class: Option<&str>, caption: &str) -> Result<()> {
    let provider = TomlSettingsProvider::load(file)
        .with_context(|| format!("Failed to load settings from {}", file.display()))?;

    info!(
        "Loaded {} with {} active exception(s)",
        file.display(),
        provider.exception_count()
    );

    let settings = match class {
        Some(class) => provider.resolve(class, caption),
        None => provider.default_settings(),
    };

    let rendered = toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_shader(file: &Path) -> Result<()> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let program = ShaderProgram::from_wgsl(&source)
        .with_context(|| format!("{} does not satisfy the corner shader contract", file.display()))?;

    println!(
        "{}: ok ({} globals, {} entry points)",
        file.display(),
        program.module().global_variables.len(),
        program.module().entry_points.len()
    );
    Ok(())
}
