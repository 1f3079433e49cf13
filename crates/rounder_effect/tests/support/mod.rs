//! Recording host, window, backend and settings doubles

#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use rounder_core::{Rect, Region, ScreenId, Settings};
use rounder_effect::{
    ConfigError, Decoration, EffectHost, EffectWindow, PaintMask, Platform, SettingsProvider, WindowId,
    WindowPrePaintData, WindowType,
};
use rounder_gpu::{CornerUniforms, GpuBackend, TextureUnit};
use rounder_raster::CornerImage;

/// GPU state shared between the backend and the host double
#[derive(Debug, Default)]
pub struct GpuLog {
    pub valid: bool,
    pub shader_depth: u32,
    pub bound: Vec<TextureUnit>,
    pub uploads: usize,
    pub uniforms: Vec<CornerUniforms>,
}

pub struct MockTexture {
    pub side: u32,
    live: Rc<Cell<usize>>,
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct MockBackend {
    pub log: Rc<RefCell<GpuLog>>,
    pub live: Rc<Cell<usize>>,
}

impl MockBackend {
    pub fn new(valid: bool) -> Self {
        Self {
            log: Rc::new(RefCell::new(GpuLog {
                valid,
                ..GpuLog::default()
            })),
            live: Rc::new(Cell::new(0)),
        }
    }
}

impl GpuBackend for MockBackend {
    type Texture = MockTexture;

    fn is_shader_valid(&self) -> bool {
        self.log.borrow().valid
    }

    fn upload_texture(&mut self, _label: &str, image: &CornerImage) -> MockTexture {
        self.log.borrow_mut().uploads += 1;
        self.live.set(self.live.get() + 1);
        MockTexture {
            side: image.side(),
            live: Rc::clone(&self.live),
        }
    }

    fn push_shader(&mut self) {
        self.log.borrow_mut().shader_depth += 1;
    }

    fn set_uniforms(&mut self, uniforms: &CornerUniforms) {
        self.log.borrow_mut().uniforms.push(*uniforms);
    }

    fn bind_texture(&mut self, unit: TextureUnit, _texture: &MockTexture) {
        self.log.borrow_mut().bound.push(unit);
    }

    fn unbind_texture(&mut self, unit: TextureUnit) {
        self.log.borrow_mut().bound.retain(|u| *u != unit);
    }

    fn pop_shader(&mut self) {
        let mut log = self.log.borrow_mut();
        log.shader_depth = log.shader_depth.saturating_sub(1);
    }
}

/// GPU state seen by the host during an offscreen draw
#[derive(Clone, Debug, PartialEq)]
pub struct OffscreenDraw {
    pub window: WindowId,
    pub shader_depth: u32,
    pub bound: Vec<TextureUnit>,
}

pub struct MockHost {
    pub platform: Platform,
    pub screens: Vec<ScreenId>,
    pub scale: f64,
    pub target: Rect,
    pub maximize_area: Rect,
    pub blur_property_supported: bool,
    pub gpu: Rc<RefCell<GpuLog>>,

    pub blur: HashMap<WindowId, Region>,
    pub watched: Vec<WindowId>,
    pub redirected: Vec<WindowId>,
    pub screen_paints: usize,
    pub pre_paints: Vec<WindowId>,
    pub default_draws: Vec<WindowId>,
    pub offscreen_draws: Vec<OffscreenDraw>,
}

impl MockHost {
    pub fn new(platform: Platform, backend: &MockBackend) -> Self {
        Self {
            platform,
            screens: vec![ScreenId(0)],
            scale: 1.0,
            target: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            maximize_area: Rect::new(0.0, 0.0, 1920.0, 1040.0),
            blur_property_supported: true,
            gpu: Rc::clone(&backend.log),
            blur: HashMap::new(),
            watched: Vec::new(),
            redirected: Vec::new(),
            screen_paints: 0,
            pre_paints: Vec::new(),
            default_draws: Vec::new(),
            offscreen_draws: Vec::new(),
        }
    }
}

impl EffectHost for MockHost {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn screens(&self) -> Vec<ScreenId> {
        self.screens.clone()
    }

    fn is_gpu_compositing(&self) -> bool {
        true
    }

    fn supports_offscreen_rendering(&self) -> bool {
        true
    }

    fn render_target_scale(&self) -> f64 {
        self.scale
    }

    fn render_target_rect(&self) -> Rect {
        self.target
    }

    fn maximize_area(&self, _window: WindowId) -> Rect {
        self.maximize_area
    }

    fn supports_blur_property(&self) -> bool {
        self.blur_property_supported
    }

    fn set_blur_behind(&mut self, window: WindowId, region: &Region) {
        self.blur.insert(window, region.clone());
    }

    fn watch_decoration_settings(&mut self, window: WindowId) {
        self.watched.push(window);
    }

    fn redirect(&mut self, window: WindowId) {
        self.redirected.push(window);
    }

    fn paint_screen(&mut self, _screen: Option<ScreenId>) {
        self.screen_paints += 1;
    }

    fn pre_paint_window(&mut self, window: WindowId, _data: &mut WindowPrePaintData) {
        self.pre_paints.push(window);
    }

    fn draw_window(&mut self, window: WindowId, _mask: PaintMask, _region: &Region) {
        self.default_draws.push(window);
    }

    fn draw_window_offscreen(&mut self, window: WindowId, _mask: PaintMask, _region: &Region) {
        let gpu = self.gpu.borrow();
        self.offscreen_draws.push(OffscreenDraw {
            window,
            shader_depth: gpu.shader_depth,
            bound: gpu.bound.clone(),
        });
    }
}

#[derive(Clone, Debug)]
pub struct MockWindow {
    pub id: WindowId,
    pub window_type: WindowType,
    pub class: String,
    pub caption: String,
    pub screen: Option<ScreenId>,
    pub frame: Rect,
    pub expanded: Rect,
    pub content: Rect,
    pub decoration: Option<Decoration>,
    pub fullscreen: bool,
    pub blur: Option<Vec<u8>>,
    pub blur_hint: Option<Region>,
}

impl MockWindow {
    /// Undecorated normal window with content filling the frame
    pub fn new(id: u64, class: &str) -> Self {
        let frame = Rect::new(100.0, 100.0, 400.0, 300.0);
        Self {
            id: WindowId(id),
            window_type: WindowType::Normal,
            class: class.into(),
            caption: String::new(),
            screen: Some(ScreenId(0)),
            frame,
            expanded: frame,
            content: Rect::new(0.0, 0.0, 400.0, 300.0),
            decoration: None,
            fullscreen: false,
            blur: None,
            blur_hint: None,
        }
    }

    /// Decorated window with a 30px title bar and a drop shadow
    pub fn decorated(id: u64, class: &str) -> Self {
        Self {
            expanded: Rect::new(90.0, 95.0, 420.0, 320.0),
            content: Rect::new(0.0, 30.0, 400.0, 270.0),
            decoration: Some(Decoration {
                borders: rounder_effect::Borders {
                    top: 30,
                    ..Default::default()
                },
                shadow_size: Some((64, 64)),
            }),
            ..Self::new(id, class)
        }
    }

    pub fn with_blur_rects(mut self, rects: &[[u32; 4]]) -> Self {
        self.blur = Some(
            rects
                .iter()
                .flat_map(|r| r.iter().flat_map(|v| v.to_ne_bytes()))
                .collect(),
        );
        self
    }

    pub fn with_blur_hint(mut self, hint: Region) -> Self {
        self.blur_hint = Some(hint);
        self
    }
}

impl EffectWindow for MockWindow {
    fn id(&self) -> WindowId {
        self.id
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
        self.screen
    }

    fn frame_geometry(&self) -> Rect {
        self.frame
    }

    fn expanded_geometry(&self) -> Rect {
        self.expanded
    }

    fn contents_rect(&self) -> Rect {
        self.content
    }

    fn decoration(&self) -> Option<Decoration> {
        self.decoration
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn is_special_window(&self) -> bool {
        false
    }

    fn blur_property(&self) -> Option<Cow<'_, [u8]>> {
        self.blur.as_deref().map(Cow::Borrowed)
    }

    fn internal_blur_region(&self) -> Option<Region> {
        self.blur_hint.clone()
    }
}

/// Provider whose snapshot the test can swap between reconfigures
#[derive(Clone, Default)]
pub struct SharedSettings {
    pub settings: Rc<RefCell<Settings>>,
    pub reloads: Rc<Cell<usize>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Rc::new(RefCell::new(settings)),
            reloads: Rc::new(Cell::new(0)),
        }
    }
}

impl SettingsProvider for SharedSettings {
    fn default_settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    fn resolve(&self, _window_class: &str, _caption: &str) -> Settings {
        self.settings.borrow().clone()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }
}

pub fn radius(corner_radius: u32) -> Settings {
    Settings {
        corner_radius,
        ..Settings::default()
    }
}
