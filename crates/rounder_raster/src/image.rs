//! Corner atlas images
//!
//! CPU rasterization with tiny-skia. The output is premultiplied RGBA, which
//! is what the corner shader samples; only the alpha channel matters for the
//! mask, while the outline rings carry white (light) or black (dark) color.

use rounder_core::Corner;
use tiny_skia::{BlendMode, Color, FillRule, Paint, Pixmap, Transform};
use tracing::trace;

use crate::error::RasterError;
use crate::shape::CornerShape;

/// Largest tile size accepted by [`CornerImage::generate`]
pub const MAX_TILE_SIZE: u32 = 2048;

/// Which stencil to generate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CornerKind {
    /// Opaque outside the corner boundary, transparent inside
    Mask,
    /// Inner ring, drawn in white
    LightOutline,
    /// Outer ring, one pixel further out, drawn in black
    DarkOutline,
}

/// A rasterized square corner atlas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CornerImage {
    /// RGBA pixel data (premultiplied alpha), row-major
    pixels: Vec<u8>,
    /// Width and height in pixels
    side: u32,
}

impl CornerImage {
    /// Rasterize a `2 * size` square atlas of the given kind
    ///
    /// For [`CornerKind::Mask`] the tile is filled opaque and the centered
    /// shape, inset by the shadow offset, is erased. For the outline kinds a
    /// shape inset by the offset (one less for the dark ring) is filled and a
    /// concentric shape one pixel smaller is erased, leaving a thin ring.
    ///
    /// When the inset leaves no room for the erase shape, the atlas is fully
    /// transparent, so the effect becomes invisible rather than blacking out
    /// the whole tile.
    pub fn generate(size: u32, kind: CornerKind, shape: &CornerShape) -> Result<Self, RasterError> {
        if size == 0 {
            return Err(RasterError::EmptyTile);
        }
        if size > MAX_TILE_SIZE {
            return Err(RasterError::TooLarge {
                size,
                max: MAX_TILE_SIZE,
            });
        }
        let side = size * 2;
        let mut pixmap = Pixmap::new(side, side).ok_or(RasterError::Allocation { side })?;
        let side_f = side as f32;

        match kind {
            CornerKind::Mask => {
                let inset = shape.shadow_offset as f32;
                match shape.path(side_f, inset) {
                    Some(cutout) => {
                        pixmap.fill(Color::BLACK);
                        pixmap.fill_path(
                            &cutout,
                            &erase_paint(),
                            FillRule::Winding,
                            Transform::identity(),
                            None,
                        );
                    }
                    None => trace!(size, "corner mask degenerate, leaving transparent"),
                }
            }
            CornerKind::LightOutline | CornerKind::DarkOutline => {
                let (inset, color) = if kind == CornerKind::DarkOutline {
                    (shape.shadow_offset - 1, Color::BLACK)
                } else {
                    (shape.shadow_offset, Color::WHITE)
                };
                let outer = shape.path(side_f, inset as f32);
                let inner = shape.path(side_f, (inset + 1) as f32);

                if let Some(outer) = outer {
                    let mut paint = Paint::default();
                    paint.set_color(color);
                    paint.anti_alias = true;
                    pixmap.fill_path(&outer, &paint, FillRule::Winding, Transform::identity(), None);
                }
                if let Some(inner) = inner {
                    pixmap.fill_path(
                        &inner,
                        &erase_paint(),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
        }

        Ok(Self {
            pixels: pixmap.take(),
            side,
        })
    }

    /// Width and height in pixels
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Side of one corner quadrant (the `size` the atlas was generated for)
    pub fn quadrant_size(&self) -> u32 {
        self.side / 2
    }

    /// Pixel data as a slice (premultiplied RGBA)
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha at `(x, y)`. Out-of-bounds reads are transparent.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |p| p[3])
    }

    /// RGBA at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let i = ((y * self.side + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Top-left pixel of a corner's quadrant
    pub fn quadrant_origin(&self, corner: Corner) -> (u32, u32) {
        let q = self.quadrant_size();
        let x = if corner.is_left() { 0 } else { q };
        let y = if corner.is_top() { 0 } else { q };
        (x, y)
    }
}

/// Paint that removes destination coverage where the shape is drawn
fn erase_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;
    paint.blend_mode = BlendMode::DestinationOut;
    paint
}
