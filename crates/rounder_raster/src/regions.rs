//! Corner clip regions
//!
//! Converts the opaque part of each mask quadrant into a [`Region`]. The
//! regions are used purely for geometric subtraction (blur and opaque hints),
//! so they are built from a logical-radius mask independent of any texture
//! scale.

use rounder_core::{Corner, CornerSet, Region, RegionBuilder};

use crate::image::CornerImage;

/// Alpha at or above which a mask pixel counts as part of the corner region
pub const OPAQUE_THRESHOLD: u8 = 128;

/// Per-corner regions of a mask atlas, each relative to its own quadrant's
/// top-left pixel.
pub fn corner_regions(mask: &CornerImage) -> CornerSet<Region> {
    CornerSet::from_fn(|corner| quadrant_region(mask, corner))
}

fn quadrant_region(mask: &CornerImage, corner: Corner) -> Region {
    let size = mask.quadrant_size();
    let (ox, oy) = mask.quadrant_origin(corner);
    let mut builder = RegionBuilder::new();

    for y in 0..size {
        let mut run_start = None;
        for x in 0..size {
            let opaque = mask.alpha(ox + x, oy + y) >= OPAQUE_THRESHOLD;
            match (opaque, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    builder.push_run(y as i32, start as i32, x as i32);
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            builder.push_run(y as i32, start as i32, size as i32);
        }
    }

    builder.finish()
}
