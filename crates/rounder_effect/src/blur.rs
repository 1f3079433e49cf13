//! Corner-aware blur and opaque regions
//!
//! Both calculations take the four per-corner clip regions of a screen
//! (quadrant-relative, logical pixels) and move them onto the corners of a
//! window before subtracting them.

use rounder_core::{Corner, CornerSet, IRect, Rect, Region};

/// Bytes per `x, y, w, h` quadruple of 32-bit cardinals
const BLUR_RECT_BYTES: usize = 16;

/// Decode the platform blur-behind property
///
/// The value is a list of `x, y, w, h` 32-bit cardinals in native byte order,
/// reinterpreted as signed pixels. An empty value, or one whose length is not
/// a multiple of 16 bytes, means no blur was requested. Rects whose far edge
/// does not fit in an `i32` are dropped.
pub fn parse_blur_property(bytes: &[u8]) -> Option<Region> {
    if bytes.is_empty() || bytes.len() % BLUR_RECT_BYTES != 0 {
        return None;
    }

    let cardinal = |chunk: &[u8]| -> i32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(chunk);
        u32::from_ne_bytes(word) as i32
    };

    let region = Region::from_rects(bytes.chunks_exact(BLUR_RECT_BYTES).filter_map(|rect| {
        let (x, y) = (cardinal(&rect[0..4]), cardinal(&rect[4..8]));
        let (w, h) = (cardinal(&rect[8..12]), cardinal(&rect[12..16]));
        x.checked_add(w)?;
        y.checked_add(h)?;
        Some(IRect::new(x, y, w, h))
    }));
    Some(region)
}

/// Window geometry the blur calculation needs
#[derive(Clone, Copy, Debug)]
pub struct BlurGeometry {
    /// Frame size in logical pixels
    pub frame: Rect,
    /// Content area relative to the frame
    pub content: Rect,
    /// Logical corner radius
    pub radius: i32,
    /// Clamped shadow offset
    pub shadow_offset: i32,
}

impl BlurGeometry {
    /// Where each quadrant region lands, relative to the content origin
    pub fn corner_offsets(&self) -> CornerSet<(i32, i32)> {
        let frame_w = self.frame.width().round() as i32;
        let content_h = self.content.height().round() as i32;
        let deco_top = (self.frame.height() - self.content.height()).round() as i32;
        let (r, off) = (self.radius, self.shadow_offset);

        let left = 1 - off;
        let right = frame_w - r - 1;
        let top = 1 - deco_top - off;
        let bottom = content_h - r - 1;

        CornerSet::from_fn(|corner| match corner {
            Corner::TopLeft => (left, top),
            Corner::TopRight => (right, top),
            Corner::BottomRight => (right, bottom),
            Corner::BottomLeft => (left, bottom),
        })
    }

    /// Region covering the whole content area
    pub fn content_region(&self) -> Region {
        Region::from_rect(IRect::new(
            0,
            0,
            self.content.width().round() as i32,
            self.content.height().round() as i32,
        ))
    }
}

/// Compute the blur-behind region with the corners cut out
///
/// Terminal classes always blur their whole content. Otherwise the declared
/// region is used when present and non-empty. `None` means no blur request
/// should be made.
pub fn blur_region(
    declared: Option<Region>,
    is_terminal: bool,
    geometry: &BlurGeometry,
    corner_regions: &CornerSet<Region>,
) -> Option<Region> {
    let mut region = if is_terminal {
        geometry.content_region()
    } else {
        declared.filter(|r| !r.is_empty())?
    };

    let offsets = geometry.corner_offsets();
    for (corner, clip) in corner_regions.iter() {
        let (dx, dy) = offsets[corner];
        region.subtract_region(&clip.translated(dx, dy));
    }
    Some(region)
}

/// Corner clip boxes anchored to the corners of `frame`, in frame coordinates
///
/// Each box is the bounding rect of a corner region scaled to device pixels,
/// pushed outward by the shadow offset so it covers the transparent corner.
pub fn opaque_clip(frame: Rect, corner_regions: &CornerSet<Region>, scale: f64, shadow_offset: i32) -> Region {
    let frame = frame.to_irect();
    let mut clip = Region::new();
    for (corner, region) in corner_regions.iter() {
        if region.is_empty() {
            continue;
        }
        let bounds = region.bounding_rect().scaled(scale);
        let x = if corner.is_left() {
            frame.x - shadow_offset
        } else {
            frame.right() + shadow_offset - bounds.width
        };
        let y = if corner.is_top() {
            frame.y - shadow_offset
        } else {
            frame.bottom() + shadow_offset - bounds.height
        };
        clip.add_rect(IRect::new(x, y, bounds.width, bounds.height));
    }
    clip
}
