//! Per-frame corner effect driver
//!
//! [`CornersEffect`] owns the per-window and per-screen state and is driven by
//! the host's lifecycle callbacks and paint hooks. Every failure is absorbed
//! here: a window the effect cannot handle is painted unmodified.

use rounder_core::{Rect, Region, ScreenId, Settings};
use rounder_gpu::{CornerUniforms, GpuBackend, ScreenAddressing, ScreenCache, ScreenKey, ScreenState, TextureUnit};
use rounder_raster::CornerShape;
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::blur::{blur_region, opaque_clip, parse_blur_property, BlurGeometry};
use crate::classify::{Classification, ClassificationRules};
use crate::config::SettingsProvider;
use crate::host::{EffectHost, PaintMask, Platform, WindowPrePaintData};
use crate::state::WindowState;
use crate::window::{EffectWindow, WindowId};

/// Rounded-corner effect
pub struct CornersEffect<B: GpuBackend> {
    backend: B,
    provider: Box<dyn SettingsProvider>,
    rules: ClassificationRules,
    /// Global default snapshot
    settings: Settings,
    shape: CornerShape,
    platform: Platform,
    screens: ScreenCache<B::Texture>,
    windows: FxHashMap<WindowId, WindowState>,
    /// False once the shader turned out to be unusable
    active: bool,
}

impl<B: GpuBackend> CornersEffect<B> {
    /// Whether the host can run the effect at all
    pub fn supported<H: EffectHost + ?Sized>(host: &H) -> bool {
        host.is_gpu_compositing() && host.supports_offscreen_rendering()
    }

    /// Whether the effect should be on without explicit user opt-in
    pub fn enabled_by_default<H: EffectHost + ?Sized>(host: &H) -> bool {
        Self::supported(host)
    }

    /// Start the effect
    ///
    /// Loads the default settings, builds textures for every known screen and
    /// classifies the windows that already exist. When the backend's shader
    /// is invalid the effect stays inactive for the whole session.
    pub fn new<H, W>(
        backend: B,
        provider: Box<dyn SettingsProvider>,
        rules: ClassificationRules,
        host: &mut H,
        existing: &[W],
    ) -> Self
    where
        H: EffectHost + ?Sized,
        W: EffectWindow,
    {
        let platform = host.platform();
        let addressing = match platform {
            Platform::Wayland => ScreenAddressing::PerScreen,
            Platform::X11 => ScreenAddressing::SingleShared,
        };
        let settings = provider.default_settings().sanitized();

        let mut effect = Self {
            shape: CornerShape::from_settings(&settings),
            active: backend.is_shader_valid(),
            backend,
            provider,
            rules,
            settings,
            platform,
            screens: ScreenCache::new(addressing),
            windows: FxHashMap::default(),
        };

        if !effect.active {
            warn!("corner shader is invalid, rounded corners disabled for this session");
            return effect;
        }

        effect.rebuild_screens(&*host);
        for window in existing {
            effect.window_added(host, window);
        }
        info!(
            ?platform,
            radius = effect.settings.corner_radius,
            windows = effect.windows.len(),
            "rounded corners active"
        );
        effect
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn window_state(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    pub fn screen_state(&self, key: ScreenKey) -> Option<&ScreenState<B::Texture>> {
        self.screens.get(key)
    }

    pub fn screens(&self) -> &ScreenCache<B::Texture> {
        &self.screens
    }

    /// Re-read settings, re-resolve managed windows and rebuild every screen
    pub fn reconfigure<H: EffectHost + ?Sized>(&mut self, host: &H) {
        if let Err(e) = self.provider.reload() {
            warn!("keeping previous corner settings: {e}");
        }
        self.settings = self.provider.default_settings().sanitized();
        self.shape = CornerShape::from_settings(&self.settings);

        for state in self.windows.values_mut().filter(|s| s.is_managed) {
            let settings = self
                .provider
                .resolve(&state.window_class, &state.caption)
                .sanitized();
            if state.apply_settings(settings) {
                trace!(window_class = %state.window_class, skip = state.skip_effect, "maximize policy reapplied");
            }
        }

        if self.active {
            self.rebuild_screens(host);
        }
        debug!(radius = self.settings.corner_radius, "corner settings reconfigured");
    }

    /// Decoration settings of some window changed
    pub fn decoration_settings_reconfigured<H: EffectHost + ?Sized>(&mut self, host: &H) {
        self.reconfigure(host);
    }

    fn rebuild_screens<H: EffectHost + ?Sized>(&mut self, host: &H) {
        let mut keys: Vec<ScreenKey> = match self.screens.addressing() {
            ScreenAddressing::PerScreen => host.screens().into_iter().map(ScreenKey::Output).collect(),
            ScreenAddressing::SingleShared => vec![ScreenKey::Shared],
        };
        for key in self.screens.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        let radius = self.settings.radius();
        for key in keys {
            self.screens.set_roundness(key, radius, &self.shape, &mut self.backend);
        }
    }

    /// A window appeared
    pub fn window_added<H, W>(&mut self, host: &mut H, window: &W)
    where
        H: EffectHost + ?Sized,
        W: EffectWindow + ?Sized,
    {
        if !self.active {
            return;
        }
        let id = window.id();
        let mut state = WindowState::new(window, self.settings.clone());

        if let Classification::Unmanaged(reason) = self.rules.classify(window) {
            trace!(?id, class = window.window_class(), ?reason, "window not managed");
            self.windows.insert(id, state);
            return;
        }

        state.settings = self
            .provider
            .resolve(window.window_class(), window.caption())
            .sanitized();
        state.is_managed = true;
        state.maximized = host.maximize_area(id) == window.frame_geometry();
        state.skip_effect = state.settings.disable_for_maximized && state.maximized;
        trace!(?id, class = window.window_class(), skip = state.skip_effect, "window managed");
        self.windows.insert(id, state);

        if window.has_decoration() {
            host.watch_decoration_settings(id);
        }
        host.redirect(id);
    }

    /// A window went away
    pub fn window_deleted(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            trace!(?id, "window state dropped");
        }
    }

    /// A window's maximize state changed
    pub fn window_maximized_changed(&mut self, id: WindowId, horizontal: bool, vertical: bool) {
        if let Some(state) = self.windows.get_mut(&id) {
            if state.set_maximized(horizontal, vertical) {
                debug!(?id, skip = state.skip_effect, "maximize state changed");
            }
        }
    }

    /// A window gained, lost or replaced its decoration
    pub fn window_decoration_changed<H, W>(&mut self, host: &mut H, window: &W)
    where
        H: EffectHost + ?Sized,
        W: EffectWindow + ?Sized,
    {
        let id = window.id();
        let Some(state) = self.windows.get_mut(&id) else {
            return;
        };
        state.update_decoration(window);
        if state.is_managed && state.has_decoration {
            host.watch_decoration_settings(id);
        }
    }

    /// An output was unplugged
    pub fn screen_removed(&mut self, screen: ScreenId) {
        if self.screens.addressing() == ScreenAddressing::PerScreen
            && self.screens.remove(ScreenKey::Output(screen))
        {
            debug!(?screen, "screen corner cache dropped");
        }
    }

    /// Screen paint hook: bring the screen's textures up to the target scale
    pub fn paint_screen<H: EffectHost + ?Sized>(&mut self, host: &mut H, screen: Option<ScreenId>) {
        if self.active {
            if let Some(key) = self.screens.key(screen) {
                let scale = host.render_target_scale();
                let radius = self.settings.radius();
                if self.screens.ensure_scale(key, scale, radius, &self.shape, &mut self.backend) {
                    debug!(?key, scale, "corner textures rebuilt for new scale");
                }
            }
        }
        host.paint_screen(screen);
    }

    /// Whether the effect paints this window right now
    pub fn is_valid_window<H, W>(&self, host: &H, window: &W, mask: PaintMask) -> bool
    where
        H: EffectHost + ?Sized,
        W: EffectWindow + ?Sized,
    {
        if !self.active || !self.backend.is_shader_valid() {
            return false;
        }
        let Some(state) = self.windows.get(&window.id()) else {
            return false;
        };
        if !state.is_managed
            || window.is_fullscreen()
            || window.is_desktop()
            || window.is_special_window()
            || state.skip_effect
        {
            return false;
        }
        if !mask.contains(PaintMask::WINDOW_TRANSFORMED)
            && !host.render_target_rect().intersects(&window.frame_geometry())
        {
            return false;
        }
        if let Some(decoration) = window.decoration() {
            if decoration.borders.has_side_chrome() {
                return false;
            }
        }
        true
    }

    /// Window pre-paint hook
    ///
    /// Cuts the corners out of the opaque hint, tracks decoration and shadow
    /// changes, and requests a corner-clipped blur-behind region.
    pub fn pre_paint_window<H, W>(&mut self, host: &mut H, window: &W, data: &mut WindowPrePaintData)
    where
        H: EffectHost + ?Sized,
        W: EffectWindow + ?Sized,
    {
        let id = window.id();
        if let Some(state) = self.windows.get_mut(&id).filter(|_| !window.is_deleted()) {
            if state.update_decoration(window) {
                trace!(?id, shadow = ?state.shadow_texture_size, "decoration shadow changed");
            }
        }

        if self.is_valid_window(&*host, window, PaintMask::empty()) {
            let screen = self
                .screens
                .key(window.screen())
                .and_then(|key| self.screens.get(key));
            if let Some(screen) = screen {
                let frame = window.frame_geometry();
                let clip = opaque_clip(frame, screen.regions(), screen.scale_factor(), screen.shadow_offset());
                data.opaque.subtract_region(&clip);

                let mut declared = None;
                if host.supports_blur_property() {
                    declared = window.blur_property().and_then(|bytes| parse_blur_property(&bytes));
                }
                if let Some(hint) = window.internal_blur_region() {
                    declared = Some(hint);
                }

                let geometry = BlurGeometry {
                    frame: Rect::new(0.0, 0.0, frame.width(), frame.height()),
                    content: window.contents_rect(),
                    radius: screen.logical_radius(),
                    shadow_offset: screen.shadow_offset(),
                };
                let is_terminal = self.rules.is_terminal(window.window_class());
                if let Some(region) = blur_region(declared, is_terminal, &geometry, screen.regions()) {
                    host.set_blur_behind(id, &region);
                }
            }
        }

        host.pre_paint_window(id, data);
    }

    /// Window draw hook
    ///
    /// Leaves texture unit 0 active and no shader pushed on every path.
    pub fn draw_window<H, W>(&mut self, host: &mut H, window: &W, mask: PaintMask, region: &Region)
    where
        H: EffectHost + ?Sized,
        W: EffectWindow + ?Sized,
    {
        let id = window.id();
        if !self.is_valid_window(&*host, window, mask) {
            host.draw_window(id, mask, region);
            return;
        }

        let screen = self
            .screens
            .key(window.screen())
            .and_then(|key| self.screens.get(key));
        let (Some(screen), Some(state)) = (screen, self.windows.get(&id)) else {
            host.draw_window(id, mask, region);
            return;
        };
        let Some(textures) = screen.textures() else {
            host.draw_window(id, mask, region);
            return;
        };

        let uniforms = corner_uniforms(window, state, screen, self.platform);
        self.backend.push_shader();
        self.backend.set_uniforms(&uniforms);
        self.backend.bind_texture(TextureUnit::DarkOutline, &textures.dark_outline);
        self.backend.bind_texture(TextureUnit::LightOutline, &textures.light_outline);
        self.backend.bind_texture(TextureUnit::Mask, &textures.mask);

        host.draw_window_offscreen(id, mask, region);

        for unit in TextureUnit::AUXILIARY {
            self.backend.unbind_texture(unit);
        }
        self.backend.pop_shader();
    }
}

impl<B: GpuBackend> Drop for CornersEffect<B> {
    fn drop(&mut self) {
        self.windows.clear();
        self.screens.clear();
        trace!("rounded corners unloaded");
    }
}

/// Uniform values for one window draw
///
/// Geometry is scaled by the screen's factor; the shadow offset vector aligns
/// an external drop-shadow bitmap with the frame.
pub fn corner_uniforms<W, T>(window: &W, state: &WindowState, screen: &ScreenState<T>, platform: Platform) -> CornerUniforms
where
    W: EffectWindow + ?Sized,
{
    let scale = screen.scale_factor();
    let geo = window.frame_geometry().scaled(scale);
    let exp = window.expanded_geometry().scaled(scale);
    let content = window.contents_rect().scaled(scale);

    CornerUniforms {
        frame_size: [geo.width() as f32, geo.height() as f32],
        expanded_size: [exp.width() as f32, exp.height() as f32],
        csd_shadow_offset: [
            (geo.x() - exp.x()) as f32,
            (geo.y() - exp.y()) as f32,
            (exp.height() - geo.height() - geo.y() + exp.y()) as f32,
        ],
        radius: screen.scaled_radius() as f32,
        content_size: [content.width() as f32, content.height() as f32],
        shadow_tex_size: state.shadow_texture_size,
        shadow_sample_offset: screen.shadow_offset() as f32,
        outline_strength: state.settings.outline_alpha(),
        scale: scale as f32,
        is_wayland: u32::from(platform == Platform::Wayland),
        has_decoration: u32::from(state.has_decoration),
        draw_outline: u32::from(state.settings.draw_outline),
        dark_theme: u32::from(state.settings.dark_theme_outline),
        _padding: 0,
    }
}
