//! Window seam
//!
//! The compositor's window object model stays outside this crate. The effect
//! only sees windows through [`EffectWindow`], which exposes the attributes the
//! classifier, the blur calculator and the render driver read.

use std::borrow::Cow;

use rounder_core::{Rect, Region, ScreenId};

/// Identity of a window, stable for its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Window role as announced by the client or shell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowType {
    #[default]
    Normal,
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Dialog,
    Utility,
    Splash,
    DropdownMenu,
    PopupMenu,
    Tooltip,
    Notification,
    ComboBox,
    DndIcon,
    OnScreenDisplay,
    CriticalNotification,
    AppletPopup,
}

/// Decoration border widths in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Borders {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Borders {
    /// True when there is chrome on the sides or bottom that the corner cut
    /// must not eat into
    pub fn has_side_chrome(&self) -> bool {
        self.left > 0 || self.right > 0 || self.bottom > 0
    }
}

/// Server-side decoration attached to a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    pub borders: Borders,
    /// Size of the decoration's drop-shadow bitmap, if it has one
    pub shadow_size: Option<(u32, u32)>,
}

/// A window as seen by the effect
pub trait EffectWindow {
    fn id(&self) -> WindowId;

    fn window_type(&self) -> WindowType;

    /// Window class (application id)
    fn window_class(&self) -> &str;

    fn caption(&self) -> &str;

    /// Output the window is on, if known
    fn screen(&self) -> Option<ScreenId>;

    /// Frame geometry in global logical coordinates
    fn frame_geometry(&self) -> Rect;

    /// Frame plus drop shadow, in global logical coordinates
    fn expanded_geometry(&self) -> Rect;

    /// Content area relative to the frame's top-left corner
    fn contents_rect(&self) -> Rect;

    fn decoration(&self) -> Option<Decoration>;

    fn is_fullscreen(&self) -> bool;

    fn is_special_window(&self) -> bool;

    fn is_modal(&self) -> bool {
        false
    }

    fn is_lock_screen(&self) -> bool {
        false
    }

    fn is_popup_window(&self) -> bool {
        matches!(
            self.window_type(),
            WindowType::PopupMenu
                | WindowType::DropdownMenu
                | WindowType::Tooltip
                | WindowType::ComboBox
                | WindowType::Menu
                | WindowType::Notification
                | WindowType::CriticalNotification
                | WindowType::OnScreenDisplay
                | WindowType::AppletPopup
        )
    }

    fn is_deleted(&self) -> bool {
        false
    }

    /// Raw value of the platform blur-behind property, if set
    fn blur_property(&self) -> Option<Cow<'_, [u8]>> {
        None
    }

    /// Blur region hinted by an internal (compositor-owned) window
    fn internal_blur_region(&self) -> Option<Region> {
        None
    }

    fn has_decoration(&self) -> bool {
        self.decoration().is_some()
    }

    /// True when the expanded geometry differs in size from the frame
    fn has_shadow(&self) -> bool {
        self.expanded_geometry().size != self.frame_geometry().size
    }

    fn is_normal_window(&self) -> bool {
        self.window_type() == WindowType::Normal
    }

    fn is_dialog(&self) -> bool {
        self.window_type() == WindowType::Dialog
    }

    fn is_desktop(&self) -> bool {
        self.window_type() == WindowType::Desktop
    }

    fn is_popup_menu(&self) -> bool {
        self.window_type() == WindowType::PopupMenu
    }

    fn is_dropdown_menu(&self) -> bool {
        self.window_type() == WindowType::DropdownMenu
    }

    fn is_tooltip(&self) -> bool {
        self.window_type() == WindowType::Tooltip
    }

    fn is_splash(&self) -> bool {
        self.window_type() == WindowType::Splash
    }
}
