//! Corner settings snapshot
//!
//! A [`Settings`] value is resolved once per window (by class and caption)
//! and once globally. Consumers hold a copy; a new snapshot replaces the old
//! one on reconfiguration rather than being mutated in place.

use serde::{Deserialize, Serialize};

/// Fixed inset, in logical pixels, between the visual corner boundary and
/// the edge of the window's drop-shadow bitmap
pub const SHADOW_OFFSET: i32 = 2;

/// Largest accepted corner radius in logical pixels
pub const MAX_CORNER_RADIUS: u32 = 256;

/// Shape used for the corner cut-out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    /// Elliptical quadrants
    #[default]
    Rounded,
    /// Superellipse quadrants, see [`Settings::squircle_ratio`]
    Squircle,
}

/// Resolved corner settings for one window (or the global default)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub corner_style: CornerStyle,
    /// 0 = plain rounded corner, 100 = full superellipse
    pub squircle_ratio: u8,
    /// Corner radius in logical pixels
    pub corner_radius: u32,
    pub draw_outline: bool,
    /// Outline opacity in percent
    pub outline_strength: u8,
    pub dark_theme_outline: bool,
    pub disable_for_maximized: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corner_style: CornerStyle::Rounded,
            squircle_ratio: 50,
            corner_radius: 5,
            draw_outline: true,
            outline_strength: 15,
            dark_theme_outline: false,
            disable_for_maximized: false,
        }
    }
}

impl Settings {
    /// Clamp percentages into `0..=100` and the radius to [`MAX_CORNER_RADIUS`]
    pub fn sanitized(mut self) -> Self {
        self.corner_radius = self.corner_radius.min(MAX_CORNER_RADIUS);
        self.squircle_ratio = self.squircle_ratio.min(100);
        self.outline_strength = self.outline_strength.min(100);
        self
    }

    /// Outline strength normalized to `0.0..=1.0`
    pub fn outline_alpha(&self) -> f32 {
        f32::from(self.outline_strength.min(100)) / 100.0
    }

    /// Corner radius as a signed pixel count, at most [`MAX_CORNER_RADIUS`]
    pub fn radius(&self) -> i32 {
        self.corner_radius.min(MAX_CORNER_RADIUS) as i32
    }

    /// Effective shadow offset for this snapshot's radius
    pub fn shadow_offset(&self) -> i32 {
        shadow_offset_for(self.radius())
    }
}

/// Shadow offset clamped so that it always stays below the corner radius
/// and never goes negative.
pub fn shadow_offset_for(radius: i32) -> i32 {
    if SHADOW_OFFSET >= radius {
        (radius - 1).max(0)
    } else {
        SHADOW_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_offset_clamp() {
        assert_eq!(shadow_offset_for(10), 2);
        assert_eq!(shadow_offset_for(3), 2);
        assert_eq!(shadow_offset_for(2), 1);
        assert_eq!(shadow_offset_for(1), 0);
        assert_eq!(shadow_offset_for(0), 0);
    }

    #[test]
    fn test_sanitized_clamps_percentages() {
        let settings = Settings {
            squircle_ratio: 180,
            outline_strength: 101,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.squircle_ratio, 100);
        assert_eq!(settings.outline_strength, 100);
        assert_eq!(settings.outline_alpha(), 1.0);
    }

    #[test]
    fn test_radius_is_bounded() {
        let settings = Settings {
            corner_radius: u32::MAX,
            ..Settings::default()
        };
        assert_eq!(settings.radius(), MAX_CORNER_RADIUS as i32);
        assert_eq!(settings.shadow_offset(), SHADOW_OFFSET);
        assert_eq!(settings.sanitized().corner_radius, MAX_CORNER_RADIUS);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.corner_style, CornerStyle::Rounded);
        assert_eq!(settings.corner_radius, 5);
        assert!(settings.draw_outline);
        assert!((settings.outline_alpha() - 0.15).abs() < f32::EPSILON);
    }
}
