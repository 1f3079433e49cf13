//! Corner shape geometry
//!
//! The shape drawn into an atlas is a single centered figure spanning the
//! whole tile minus an inset. Cutting the tile into quarters gives the four
//! corners.

use std::f32::consts::TAU;

use rounder_core::{CornerStyle, Settings};
use tiny_skia::{Path, PathBuilder, Rect};

/// Segments used to approximate a superellipse with a polygon
const SQUIRCLE_SEGMENTS: usize = 256;

/// Superellipse exponent at ratio 0 (an ellipse)
const MIN_EXPONENT: f32 = 2.0;

/// Superellipse exponent at ratio 100
const MAX_EXPONENT: f32 = 5.0;

/// Everything that determines the pixels of a corner atlas besides its size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerShape {
    pub style: CornerStyle,
    /// 0..=100
    pub squircle_ratio: u8,
    /// Clamped shadow offset, see [`rounder_core::shadow_offset_for`]
    pub shadow_offset: i32,
}

impl CornerShape {
    /// Elliptical corners with the given shadow offset
    pub fn rounded(shadow_offset: i32) -> Self {
        Self {
            style: CornerStyle::Rounded,
            squircle_ratio: 0,
            shadow_offset,
        }
    }

    /// Superellipse corners with the given ratio and shadow offset
    pub fn squircle(squircle_ratio: u8, shadow_offset: i32) -> Self {
        Self {
            style: CornerStyle::Squircle,
            squircle_ratio: squircle_ratio.min(100),
            shadow_offset,
        }
    }

    /// Shape described by a settings snapshot
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            style: settings.corner_style,
            squircle_ratio: settings.squircle_ratio.min(100),
            shadow_offset: settings.shadow_offset(),
        }
    }

    /// Path of the shape inside a `side` x `side` tile, inset by `inset` on
    /// every edge. `None` when the inset leaves nothing to draw.
    pub(crate) fn path(&self, side: f32, inset: f32) -> Option<Path> {
        let half_extent = side / 2.0 - inset;
        if half_extent <= 0.0 {
            return None;
        }
        match self.style {
            CornerStyle::Rounded => {
                let bounds = Rect::from_ltrb(inset, inset, side - inset, side - inset)?;
                PathBuilder::from_oval(bounds)
            }
            CornerStyle::Squircle => squircle_path(side / 2.0, half_extent, self.exponent()),
        }
    }

    /// Superellipse exponent interpolated from the ratio
    fn exponent(&self) -> f32 {
        let t = f32::from(self.squircle_ratio.min(100)) / 100.0;
        MIN_EXPONENT + (MAX_EXPONENT - MIN_EXPONENT) * t
    }
}

/// Closed polygon approximating `|x/a|^n + |y/a|^n = 1` around `(c, c)`
fn squircle_path(center: f32, half_extent: f32, exponent: f32) -> Option<Path> {
    let power = 2.0 / exponent;
    let mut builder = PathBuilder::new();
    for i in 0..SQUIRCLE_SEGMENTS {
        let theta = TAU * i as f32 / SQUIRCLE_SEGMENTS as f32;
        let (sin, cos) = theta.sin_cos();
        let x = center + half_extent * cos.signum() * cos.abs().powf(power);
        let y = center + half_extent * sin.signum() * sin.abs().powf(power);
        if i == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }
    builder.close();
    builder.finish()
}
