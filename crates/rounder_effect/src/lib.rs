//! Rounder Effect
//!
//! The compositor-facing half of Rounder. [`CornersEffect`] is driven by a
//! host compositor through the [`EffectHost`] and [`EffectWindow`] seams and
//! paints anti-aliased rounded corners, an optional outline, and a
//! corner-clipped blur-behind region for every managed window.
//!
//! # Lifecycle
//!
//! ```text
//! window added -> classify -> Unmanaged
//!                          -> Managed (Active) <-> Managed (Skipped while maximized)
//! window deleted -> state purged
//! ```
//!
//! # Per frame
//!
//! 1. [`CornersEffect::paint_screen`] rebuilds the screen's corner textures
//!    if the render target's scale changed
//! 2. [`CornersEffect::pre_paint_window`] cuts the corners out of the opaque
//!    hint and submits the blur region
//! 3. [`CornersEffect::draw_window`] binds the corner textures and uniforms
//!    around the host's offscreen paint

pub mod blur;
pub mod classify;
pub mod config;
pub mod effect;
pub mod error;
pub mod host;
pub mod state;
pub mod window;

pub use blur::{blur_region, opaque_clip, parse_blur_property, BlurGeometry};
pub use classify::{Classification, ClassificationRules, ClassRule, RuleCondition, SkipReason};
pub use config::{SettingsProvider, StaticSettings, TomlSettingsProvider};
pub use effect::{corner_uniforms, CornersEffect};
pub use error::ConfigError;
pub use host::{EffectHost, PaintMask, Platform, WindowPrePaintData};
pub use state::{WindowMode, WindowState};
pub use window::{Borders, Decoration, EffectWindow, WindowId, WindowType};
