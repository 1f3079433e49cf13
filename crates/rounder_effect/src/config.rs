//! Settings providers
//!
//! The effect never reads configuration itself. It asks a [`SettingsProvider`]
//! for the global default and for a per-window snapshot resolved from the
//! window's class and caption, and re-asks on reconfiguration.
//!
//! [`TomlSettingsProvider`] reads a file of this shape:
//!
//! ```toml
//! [defaults]
//! corner_radius = 8
//! corner_style = "squircle"
//!
//! [[exception]]
//! window_class = "firefox"
//! caption = "Private Browsing"
//! draw_outline = false
//!
//! [[exception]]
//! window_class = "^steam$"
//! enabled = false
//! ```
//!
//! Exceptions are checked in file order and the first match wins. Entries
//! with `enabled = false` are skipped; `enabled` defaults to true.

use std::path::{Path, PathBuf};

use regex::Regex;
use rounder_core::{CornerStyle, Settings};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Source of resolved settings snapshots
pub trait SettingsProvider {
    /// Global default snapshot
    fn default_settings(&self) -> Settings;

    /// Snapshot for a specific window
    fn resolve(&self, window_class: &str, caption: &str) -> Settings;

    /// Re-read the backing store. On error the previous snapshot stays.
    fn reload(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Provider that hands out one fixed snapshot
#[derive(Clone, Debug, Default)]
pub struct StaticSettings {
    settings: Settings,
}

impl StaticSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn default_settings(&self) -> Settings {
        self.settings.clone()
    }

    fn resolve(&self, _window_class: &str, _caption: &str) -> Settings {
        self.settings.clone()
    }
}

/// Partial settings an exception overrides
#[derive(Clone, Debug, Default, Deserialize)]
struct SettingsOverrides {
    corner_style: Option<CornerStyle>,
    squircle_ratio: Option<u8>,
    corner_radius: Option<u32>,
    draw_outline: Option<bool>,
    outline_strength: Option<u8>,
    dark_theme_outline: Option<bool>,
    disable_for_maximized: Option<bool>,
}

impl SettingsOverrides {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(v) = self.corner_style {
            settings.corner_style = v;
        }
        if let Some(v) = self.squircle_ratio {
            settings.squircle_ratio = v;
        }
        if let Some(v) = self.corner_radius {
            settings.corner_radius = v;
        }
        if let Some(v) = self.draw_outline {
            settings.draw_outline = v;
        }
        if let Some(v) = self.outline_strength {
            settings.outline_strength = v;
        }
        if let Some(v) = self.dark_theme_outline {
            settings.dark_theme_outline = v;
        }
        if let Some(v) = self.disable_for_maximized {
            settings.disable_for_maximized = v;
        }
        settings.sanitized()
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ExceptionEntry {
    window_class: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(flatten)]
    overrides: SettingsOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    defaults: Settings,
    #[serde(default, rename = "exception")]
    exceptions: Vec<ExceptionEntry>,
}

/// Compiled exception
#[derive(Clone, Debug)]
struct Exception {
    window_class: Regex,
    caption: Option<Regex>,
    overrides: SettingsOverrides,
}

impl Exception {
    fn matches(&self, window_class: &str, caption: &str) -> bool {
        self.window_class.is_match(window_class)
            && self.caption.as_ref().map_or(true, |c| c.is_match(caption))
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Settings loaded from a TOML file with per-window exceptions
#[derive(Clone, Debug)]
pub struct TomlSettingsProvider {
    path: Option<PathBuf>,
    defaults: Settings,
    exceptions: Vec<Exception>,
}

impl TomlSettingsProvider {
    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)?;
        let exceptions = file
            .exceptions
            .into_iter()
            .filter(|entry| entry.enabled)
            .map(|entry| {
                Ok(Exception {
                    window_class: compile(&entry.window_class)?,
                    caption: entry.caption.as_deref().map(compile).transpose()?,
                    overrides: entry.overrides,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            path: None,
            defaults: file.defaults.sanitized(),
            exceptions,
        })
    }

    /// Load settings from a file, remembering the path for [`reload`](SettingsProvider::reload)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut provider = Self::parse(&content)?;
        provider.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            exceptions = provider.exceptions.len(),
            "loaded corner settings"
        );
        Ok(provider)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of enabled exceptions
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }
}

impl SettingsProvider for TomlSettingsProvider {
    fn default_settings(&self) -> Settings {
        self.defaults.clone()
    }

    fn resolve(&self, window_class: &str, caption: &str) -> Settings {
        self.exceptions
            .iter()
            .find(|e| e.matches(window_class, caption))
            .map(|e| e.overrides.apply(self.defaults.clone()))
            .unwrap_or_else(|| self.defaults.clone())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        *self = Self::load(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[defaults]
corner_radius = 10
outline_strength = 40

[[exception]]
window_class = "firefox"
caption = "Private"
draw_outline = false

[[exception]]
window_class = "firefox"
dark_theme_outline = true

[[exception]]
window_class = "steam"
enabled = false
corner_radius = 0
"#;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let provider = TomlSettingsProvider::parse("[defaults]\ncorner_radius = 12\n").unwrap();
        let settings = provider.default_settings();
        assert_eq!(settings.corner_radius, 12);
        assert_eq!(settings.outline_strength, Settings::default().outline_strength);
        assert_eq!(settings.corner_style, CornerStyle::Rounded);
    }

    #[test]
    fn test_empty_file_is_default() {
        let provider = TomlSettingsProvider::parse("").unwrap();
        assert_eq!(provider.default_settings(), Settings::default());
        assert_eq!(provider.exception_count(), 0);
    }

    #[test]
    fn test_first_matching_exception_wins() {
        let provider = TomlSettingsProvider::parse(SAMPLE).unwrap();

        let private = provider.resolve("firefox", "Mozilla Firefox Private Browsing");
        assert!(!private.draw_outline);
        assert!(!private.dark_theme_outline);
        assert_eq!(private.corner_radius, 10);

        let normal = provider.resolve("firefox", "Mozilla Firefox");
        assert!(normal.draw_outline);
        assert!(normal.dark_theme_outline);
    }

    #[test]
    fn test_disabled_exception_is_ignored() {
        let provider = TomlSettingsProvider::parse(SAMPLE).unwrap();
        assert_eq!(provider.exception_count(), 2);
        assert_eq!(provider.resolve("steam", "Steam").corner_radius, 10);
    }

    #[test]
    fn test_unmatched_window_gets_defaults() {
        let provider = TomlSettingsProvider::parse(SAMPLE).unwrap();
        assert_eq!(provider.resolve("dolphin", "Home"), provider.default_settings());
    }

    #[test]
    fn test_percentages_are_clamped() {
        let provider =
            TomlSettingsProvider::parse("[defaults]\noutline_strength = 250\nsquircle_ratio = 180\n").unwrap();
        let settings = provider.default_settings();
        assert_eq!(settings.outline_strength, 100);
        assert_eq!(settings.squircle_ratio, 100);
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = TomlSettingsProvider::parse("[[exception]]\nwindow_class = \"(unclosed\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }

    #[test]
    fn test_reload_keeps_previous_on_error() {
        let path = std::env::temp_dir().join(format!("rounder-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "[defaults]\ncorner_radius = 7\n").unwrap();

        let mut provider = TomlSettingsProvider::load(&path).unwrap();
        assert_eq!(provider.default_settings().corner_radius, 7);

        std::fs::write(&path, "[defaults]\ncorner_radius = 9\n").unwrap();
        provider.reload().unwrap();
        assert_eq!(provider.default_settings().corner_radius, 9);

        std::fs::write(&path, "[defaults\n").unwrap();
        assert!(provider.reload().is_err());
        assert_eq!(provider.default_settings().corner_radius, 9);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = TomlSettingsProvider::load("/nonexistent/rounder.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_static_settings() {
        let provider = StaticSettings::new(Settings {
            corner_radius: 3,
            ..Settings::default()
        });
        assert_eq!(provider.resolve("anything", "at all").corner_radius, 3);
    }
}
