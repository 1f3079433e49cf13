//! Rounder Core
//!
//! Shared primitives for the rounded-corner compositor effect:
//!
//! - **Geometry**: logical/device rectangles and integer pixel rectangles
//! - **Regions**: integer pixel regions with subtraction, used for blur and
//!   opaque-area clipping
//! - **Corners**: the four corner positions and a fixed per-corner container
//! - **Settings**: the resolved, immutable settings snapshot for a window
//!
//! # Example
//!
//! ```rust
//! use rounder_core::{IRect, Region};
//!
//! let mut region = Region::from_rect(IRect::new(0, 0, 100, 50));
//! region.subtract_rect(IRect::new(0, 0, 10, 10));
//! assert_eq!(region.area(), 100 * 50 - 100);
//! assert!(!region.contains(5, 5));
//! ```

pub mod corner;
pub mod geometry;
pub mod region;
pub mod settings;

pub use corner::{Corner, CornerSet};
pub use geometry::{IRect, Point, Rect, ScreenId, Size};
pub use region::{Region, RegionBuilder};
pub use settings::{shadow_offset_for, CornerStyle, Settings, MAX_CORNER_RADIUS, SHADOW_OFFSET};
