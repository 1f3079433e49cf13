//! Corner rasterization for Rounder
//!
//! Produces the raster stencils the corner shader samples: a mask atlas used
//! to erase window content outside the rounded boundary, and two thin ring
//! atlases (light and dark) used to draw the outline. Each atlas is a square
//! of side `2 * size` holding all four corner quadrants of one centered shape.
//!
//! Rendering is done on the CPU with `tiny-skia`, with anti-aliasing on for
//! both the base shape and the erase pass.
//!
//! # Example
//!
//! ```rust
//! use rounder_raster::{CornerImage, CornerKind, CornerShape};
//!
//! let shape = CornerShape::rounded(2);
//! let mask = CornerImage::generate(10, CornerKind::Mask, &shape).unwrap();
//! assert_eq!(mask.side(), 20);
//! assert_eq!(mask.alpha(0, 0), 255);
//! assert_eq!(mask.alpha(10, 10), 0);
//! ```

mod error;
mod image;
mod regions;
mod shape;

pub use error::RasterError;
pub use image::{CornerImage, CornerKind, MAX_TILE_SIZE};
pub use regions::{corner_regions, OPAQUE_THRESHOLD};
pub use shape::CornerShape;
