//! Window classification
//!
//! Decides once, when a window appears, whether the effect manages it. The
//! decision is a pure function of the window's attributes, evaluated against
//! an ordered [`ClassificationRules`] table: excluded window types first, then
//! class rules in table order, then window-state flags.

use regex::Regex;

use crate::window::{EffectWindow, WindowType};

/// Outcome of classifying a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Managed,
    Unmanaged(SkipReason),
}

impl Classification {
    pub fn is_managed(&self) -> bool {
        matches!(self, Classification::Managed)
    }
}

/// Why a window was left alone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Role is never rounded (OSD, dock, menus, tooltips, splash)
    ExcludedType(WindowType),
    /// Undecorated shell component or launcher
    ShellComponent,
    /// IDE tool pane
    IdePane,
    /// Shell surface that is not a normal, dialog or modal window
    ShellAuxiliary,
    /// Desktop, fullscreen, popup, lock screen or other special window
    WindowState,
}

/// Extra condition a class rule needs besides the class match
#[derive(Clone, Debug)]
pub enum RuleCondition {
    /// Window has no server-side decoration
    NoDecoration,
    /// Window has neither a decoration nor a drop shadow
    NoDecorationOrShadow,
    /// Caption matches the pattern
    CaptionMatches(Regex),
    /// Window is not a normal, dialog or modal window
    NotNormalDialogOrModal,
}

/// A window-class rule
#[derive(Clone, Debug)]
pub struct ClassRule {
    /// Lowercase substring matched case-insensitively against the class
    pub class_contains: String,
    pub condition: RuleCondition,
    pub reason: SkipReason,
}

impl ClassRule {
    pub fn new(class_contains: &str, condition: RuleCondition, reason: SkipReason) -> Self {
        Self {
            class_contains: class_contains.to_lowercase(),
            condition,
            reason,
        }
    }

    fn matches<W: EffectWindow + ?Sized>(&self, window: &W, class: &str) -> bool {
        if !class.contains(&self.class_contains) {
            return false;
        }
        match &self.condition {
            RuleCondition::NoDecoration => !window.has_decoration(),
            RuleCondition::NoDecorationOrShadow => !window.has_decoration() && !window.has_shadow(),
            RuleCondition::CaptionMatches(pattern) => pattern.is_match(window.caption()),
            RuleCondition::NotNormalDialogOrModal => {
                !(window.is_normal_window() || window.is_dialog() || window.is_modal())
            }
        }
    }
}

/// Shell components and launchers that draw their own shape
const SHELL_CLASSES: &[&str] = &[
    "plasma",
    "krunner",
    "latte-dock",
    "lattedock",
    "plank",
    "cairo-dock",
    "albert",
    "ulauncher",
    "ksplash",
    "ksmserver",
];

/// Floating tool panes of JetBrains IDEs carry captions like `win12`
const IDE_PANE_CAPTION: &str = r"win[0-9]+";

/// Ordered classification table
#[derive(Clone, Debug)]
pub struct ClassificationRules {
    pub excluded_types: Vec<WindowType>,
    pub class_rules: Vec<ClassRule>,
    /// Classes whose blur region always covers the whole content
    pub terminal_classes: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        let mut class_rules: Vec<ClassRule> = SHELL_CLASSES
            .iter()
            .map(|class| ClassRule::new(class, RuleCondition::NoDecoration, SkipReason::ShellComponent))
            .collect();
        class_rules.push(ClassRule::new(
            "reaper",
            RuleCondition::NoDecorationOrShadow,
            SkipReason::ShellComponent,
        ));
        if let Ok(pattern) = Regex::new(IDE_PANE_CAPTION) {
            class_rules.push(ClassRule::new(
                "jetbrains",
                RuleCondition::CaptionMatches(pattern),
                SkipReason::IdePane,
            ));
        }
        class_rules.push(ClassRule::new(
            "plasma",
            RuleCondition::NotNormalDialogOrModal,
            SkipReason::ShellAuxiliary,
        ));

        Self {
            excluded_types: vec![
                WindowType::OnScreenDisplay,
                WindowType::Dock,
                WindowType::Menu,
                WindowType::DropdownMenu,
                WindowType::Tooltip,
                WindowType::ComboBox,
                WindowType::Splash,
            ],
            class_rules,
            terminal_classes: vec!["konsole".into(), "yakuake".into()],
        }
    }
}

impl ClassificationRules {
    /// Classify a window. Pure: the same attributes always give the same answer.
    pub fn classify<W: EffectWindow + ?Sized>(&self, window: &W) -> Classification {
        let window_type = window.window_type();
        if self.excluded_types.contains(&window_type) {
            return Classification::Unmanaged(SkipReason::ExcludedType(window_type));
        }

        let class = window.window_class().to_lowercase();
        if let Some(rule) = self.class_rules.iter().find(|rule| rule.matches(window, &class)) {
            return Classification::Unmanaged(rule.reason);
        }

        if window.is_desktop()
            || window.is_fullscreen()
            || window.is_popup_menu()
            || window.is_tooltip()
            || window.is_special_window()
            || window.is_dropdown_menu()
            || window.is_popup_window()
            || window.is_lock_screen()
            || window.is_splash()
        {
            return Classification::Unmanaged(SkipReason::WindowState);
        }

        Classification::Managed
    }

    /// Whether the class belongs to a terminal emulator
    pub fn is_terminal(&self, window_class: &str) -> bool {
        let class = window_class.to_lowercase();
        self.terminal_classes.iter().any(|t| class.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Decoration, WindowId};
    use rounder_core::{Rect, ScreenId};

    #[derive(Clone)]
    struct TestWindow {
        window_type: WindowType,
        class: String,
        caption: String,
        decorated: bool,
        shadow: bool,
        fullscreen: bool,
        modal: bool,
    }

    impl TestWindow {
        fn new(class: &str) -> Self {
            Self {
                window_type: WindowType::Normal,
                class: class.into(),
                caption: String::new(),
                decorated: true,
                shadow: true,
                fullscreen: false,
                modal: false,
            }
        }
    }

    impl EffectWindow for TestWindow {
        fn id(&self) -> WindowId {
            WindowId(1)
        }
        fn window_type(&self) -> WindowType {
            self.window_type
        }
        fn window_class(&self) -> &str {
            &self.class
        }
        fn caption(&self) -> &str {
            &self.caption
        }
        fn screen(&self) -> Option<ScreenId> {
            None
        }
        fn frame_geometry(&self) -> Rect {
            Rect::new(0.0, 0.0, 100.0, 100.0)
        }
        fn expanded_geometry(&self) -> Rect {
            if self.shadow {
                Rect::new(-10.0, -10.0, 120.0, 120.0)
            } else {
                self.frame_geometry()
            }
        }
        fn contents_rect(&self) -> Rect {
            self.frame_geometry()
        }
        fn decoration(&self) -> Option<Decoration> {
            self.decorated.then(Decoration::default)
        }
        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }
        fn is_special_window(&self) -> bool {
            false
        }
        fn is_modal(&self) -> bool {
            self.modal
        }
    }

    #[test]
    fn test_normal_app_is_managed() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify(&TestWindow::new("org.kde.dolphin")), Classification::Managed);
    }

    #[test]
    fn test_excluded_types() {
        let rules = ClassificationRules::default();
        for window_type in [WindowType::OnScreenDisplay, WindowType::Dock, WindowType::Splash] {
            let window = TestWindow { window_type, ..TestWindow::new("dolphin") };
            assert_eq!(
                rules.classify(&window),
                Classification::Unmanaged(SkipReason::ExcludedType(window_type))
            );
        }
    }

    #[test]
    fn test_undecorated_shell_component() {
        let rules = ClassificationRules::default();
        let window = TestWindow { decorated: false, ..TestWindow::new("plasmashell") };
        assert_eq!(
            rules.classify(&window),
            Classification::Unmanaged(SkipReason::ShellComponent)
        );

        // Decorated plasma windows fall through to the normal/dialog rule
        let settings = TestWindow::new("systemsettings plasma");
        assert!(rules.classify(&settings).is_managed());
    }

    #[test]
    fn test_class_match_is_case_insensitive() {
        let rules = ClassificationRules::default();
        let window = TestWindow { decorated: false, ..TestWindow::new("KRunner") };
        assert!(!rules.classify(&window).is_managed());
    }

    #[test]
    fn test_reaper_needs_missing_shadow() {
        let rules = ClassificationRules::default();
        let with_shadow = TestWindow { decorated: false, ..TestWindow::new("REAPER") };
        assert!(rules.classify(&with_shadow).is_managed());

        let bare = TestWindow { shadow: false, ..with_shadow };
        assert!(!rules.classify(&bare).is_managed());
    }

    #[test]
    fn test_ide_pane_caption() {
        let rules = ClassificationRules::default();
        let pane = TestWindow { caption: "win42".into(), ..TestWindow::new("jetbrains-idea") };
        assert_eq!(rules.classify(&pane), Classification::Unmanaged(SkipReason::IdePane));

        let editor = TestWindow { caption: "project - main.rs".into(), ..TestWindow::new("jetbrains-idea") };
        assert!(rules.classify(&editor).is_managed());
    }

    #[test]
    fn test_plasma_utility_window() {
        let rules = ClassificationRules::default();
        let utility = TestWindow { window_type: WindowType::Utility, ..TestWindow::new("plasma-discover") };
        assert_eq!(
            rules.classify(&utility),
            Classification::Unmanaged(SkipReason::ShellAuxiliary)
        );

        let modal = TestWindow { modal: true, ..utility };
        assert!(rules.classify(&modal).is_managed());
    }

    #[test]
    fn test_window_state_flags() {
        let rules = ClassificationRules::default();
        let fullscreen = TestWindow { fullscreen: true, ..TestWindow::new("mpv") };
        assert_eq!(
            rules.classify(&fullscreen),
            Classification::Unmanaged(SkipReason::WindowState)
        );

        let desktop = TestWindow { window_type: WindowType::Desktop, ..TestWindow::new("dolphin") };
        assert!(!rules.classify(&desktop).is_managed());

        let popup = TestWindow { window_type: WindowType::PopupMenu, ..TestWindow::new("firefox") };
        assert!(!rules.classify(&popup).is_managed());
    }

    #[test]
    fn test_classification_is_pure() {
        let rules = ClassificationRules::default();
        let window = TestWindow { caption: "win7".into(), ..TestWindow::new("jetbrains-clion") };
        let first = rules.classify(&window);
        for _ in 0..3 {
            assert_eq!(rules.classify(&window.clone()), first);
        }
    }

    #[test]
    fn test_terminal_classes() {
        let rules = ClassificationRules::default();
        assert!(rules.is_terminal("org.kde.konsole"));
        assert!(rules.is_terminal("Yakuake"));
        assert!(!rules.is_terminal("alacritty"));
    }
}
