//! Per-window effect state

use rounder_core::Settings;

use crate::window::EffectWindow;

/// Lifecycle mode derived from [`WindowState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMode {
    /// Classified as unmanaged, never painted by the effect
    Unmanaged,
    /// Managed and currently rounded
    Active,
    /// Managed but skipped while maximized
    Skipped,
}

/// What the effect remembers about one window
#[derive(Clone, Debug)]
pub struct WindowState {
    pub is_managed: bool,
    pub skip_effect: bool,
    /// Maximized both horizontally and vertically, tracked regardless of policy
    pub maximized: bool,
    pub has_decoration: bool,
    /// Size of the decoration's shadow bitmap, zero when there is none
    pub shadow_texture_size: [i32; 2],
    /// Settings resolved for this window
    pub settings: Settings,
    /// Class and caption at resolve time, used to re-resolve on reconfigure
    pub window_class: String,
    pub caption: String,
}

impl WindowState {
    /// Fresh, unmanaged state for a window
    pub fn new<W: EffectWindow + ?Sized>(window: &W, settings: Settings) -> Self {
        let mut state = Self {
            is_managed: false,
            skip_effect: false,
            maximized: false,
            has_decoration: false,
            shadow_texture_size: [0, 0],
            settings,
            window_class: window.window_class().to_owned(),
            caption: window.caption().to_owned(),
        };
        state.update_decoration(window);
        state
    }

    pub fn mode(&self) -> WindowMode {
        match (self.is_managed, self.skip_effect) {
            (false, _) => WindowMode::Unmanaged,
            (true, false) => WindowMode::Active,
            (true, true) => WindowMode::Skipped,
        }
    }

    /// Refresh decoration presence and shadow bitmap size
    ///
    /// Returns true when anything changed.
    pub fn update_decoration<W: EffectWindow + ?Sized>(&mut self, window: &W) -> bool {
        let decoration = window.decoration();
        let shadow = decoration
            .and_then(|d| d.shadow_size)
            .map(|(w, h)| [clamp_i32(w), clamp_i32(h)])
            .unwrap_or([0, 0]);
        let has_decoration = decoration.is_some();

        let changed = has_decoration != self.has_decoration || shadow != self.shadow_texture_size;
        self.has_decoration = has_decoration;
        self.shadow_texture_size = shadow;
        changed
    }

    /// Apply a maximize-state change
    ///
    /// The maximized flag is always recorded; `skip_effect` only follows it for
    /// managed windows whose settings disable the effect while maximized.
    /// Returns true when `skip_effect` flipped.
    pub fn set_maximized(&mut self, horizontal: bool, vertical: bool) -> bool {
        self.maximized = horizontal && vertical;
        if !self.is_managed || !self.settings.disable_for_maximized {
            return false;
        }
        self.refresh_skip()
    }

    /// Replace the settings snapshot and re-apply the maximize policy
    ///
    /// Returns true when `skip_effect` flipped.
    pub fn apply_settings(&mut self, settings: Settings) -> bool {
        self.settings = settings;
        self.refresh_skip()
    }

    fn refresh_skip(&mut self) -> bool {
        let skip = self.is_managed && self.settings.disable_for_maximized && self.maximized;
        let changed = skip != self.skip_effect;
        self.skip_effect = skip;
        changed
    }
}

fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn managed(disable_for_maximized: bool) -> WindowState {
        WindowState {
            is_managed: true,
            skip_effect: false,
            maximized: false,
            has_decoration: true,
            shadow_texture_size: [0, 0],
            settings: Settings {
                disable_for_maximized,
                ..Settings::default()
            },
            window_class: "dolphin".into(),
            caption: String::new(),
        }
    }

    #[test]
    fn test_maximize_toggles_when_policy_on() {
        let mut state = managed(true);
        assert!(state.set_maximized(true, true));
        assert_eq!(state.mode(), WindowMode::Skipped);

        assert!(!state.set_maximized(true, true));
        assert!(state.set_maximized(true, false));
        assert_eq!(state.mode(), WindowMode::Active);
    }

    #[test]
    fn test_maximize_ignored_when_policy_off() {
        let mut state = managed(false);
        assert!(!state.set_maximized(true, true));
        assert_eq!(state.mode(), WindowMode::Active);
    }

    #[test]
    fn test_policy_change_follows_maximized_flag() {
        let mut state = managed(false);
        assert!(!state.set_maximized(true, true));
        assert!(state.maximized);

        let enabled = Settings {
            disable_for_maximized: true,
            ..Settings::default()
        };
        assert!(state.apply_settings(enabled));
        assert_eq!(state.mode(), WindowMode::Skipped);

        assert!(state.apply_settings(Settings::default()));
        assert_eq!(state.mode(), WindowMode::Active);
    }

    #[test]
    fn test_unmanaged_never_skips() {
        let mut state = WindowState {
            is_managed: false,
            ..managed(true)
        };
        assert!(!state.set_maximized(true, true));
        assert_eq!(state.mode(), WindowMode::Unmanaged);
    }
}
