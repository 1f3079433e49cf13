//! Compositor host seam
//!
//! The host delivers lifecycle callbacks and paint hooks to
//! [`CornersEffect`](crate::CornersEffect), answers geometry queries, and
//! performs the default (unmodified) painting the effect delegates to.

use bitflags::bitflags;
use rounder_core::{Rect, Region, ScreenId};

use crate::window::WindowId;

/// Windowing platform the compositor runs on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Outputs are individually addressable
    Wayland,
    /// One shared render target for all outputs
    X11,
}

bitflags! {
    /// Flags passed along with a window paint
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PaintMask: u32 {
        /// The window is painted with a transformation (e.g. an overview)
        const WINDOW_TRANSFORMED = 1 << 0;
        /// The screen pass contains transformed windows
        const SCREEN_WITH_TRANSFORMED_WINDOWS = 1 << 1;
    }
}

/// Pre-paint data the effect may adjust
#[derive(Clone, Debug, Default)]
pub struct WindowPrePaintData {
    /// Area the compositor may treat as fully opaque, global coordinates
    pub opaque: Region,
    /// Area that will be repainted
    pub paint: Region,
}

/// Services the compositor provides to the effect
pub trait EffectHost {
    fn platform(&self) -> Platform;

    /// Outputs currently present
    fn screens(&self) -> Vec<ScreenId>;

    fn is_gpu_compositing(&self) -> bool;

    fn supports_offscreen_rendering(&self) -> bool;

    /// Device scale of the render target being painted
    fn render_target_scale(&self) -> f64;

    /// Logical rect of the render target being painted
    fn render_target_rect(&self) -> Rect;

    /// Area a maximized window would occupy
    fn maximize_area(&self, window: WindowId) -> Rect;

    /// Whether the platform blur-behind property can be read
    fn supports_blur_property(&self) -> bool;

    /// Ask the platform to blur behind `region` (window-local coordinates)
    fn set_blur_behind(&mut self, window: WindowId, region: &Region);

    /// Subscribe to decoration-settings reconfiguration of `window`
    fn watch_decoration_settings(&mut self, window: WindowId);

    /// Route the window through the offscreen paint path
    fn redirect(&mut self, window: WindowId);

    /// Default screen paint
    fn paint_screen(&mut self, screen: Option<ScreenId>);

    /// Default window pre-paint
    fn pre_paint_window(&mut self, window: WindowId, data: &mut WindowPrePaintData);

    /// Default, unmodified window paint
    fn draw_window(&mut self, window: WindowId, mask: PaintMask, region: &Region);

    /// Offscreen window paint that samples the bound corner textures
    fn draw_window_offscreen(&mut self, window: WindowId, mask: PaintMask, region: &Region);
}
