//! Per-screen texture cache
//!
//! Each output carries its own scale factor, so each gets its own generation
//! of mask and outline textures plus the four logical corner regions. A
//! generation is rebuilt whenever the radius or the scale factor changes;
//! the previous generation is released before the new one is built, so at
//! most one is alive per screen.
//!
//! Texture sizes follow the scaled radius. Corner regions follow the logical
//! radius (with the clamped shadow offset) and are only used for geometry.

use rounder_core::{CornerSet, Region, ScreenId};
use rounder_raster::{corner_regions, CornerImage, CornerKind, CornerShape, RasterError, MAX_TILE_SIZE};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::backend::GpuBackend;

/// How screens are addressed, selected once at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenAddressing {
    /// One cache per output
    PerScreen,
    /// One cache shared by every output (no multi-output addressing)
    SingleShared,
}

impl ScreenAddressing {
    /// Cache key for a window's screen. `None` when addressing per screen and
    /// the window has no screen.
    pub fn key(self, screen: Option<ScreenId>) -> Option<ScreenKey> {
        match self {
            ScreenAddressing::PerScreen => screen.map(ScreenKey::Output),
            ScreenAddressing::SingleShared => Some(ScreenKey::Shared),
        }
    }
}

/// Key of a cache entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenKey {
    Output(ScreenId),
    Shared,
}

/// One generation of uploaded atlases
pub struct CornerTextures<T> {
    pub mask: T,
    pub light_outline: T,
    pub dark_outline: T,
}

/// Cached state for one screen
pub struct ScreenState<T> {
    scale_factor: f64,
    logical_radius: i32,
    scaled_radius: i32,
    shadow_offset: i32,
    regions: CornerSet<Region>,
    textures: Option<CornerTextures<T>>,
    generation: u64,
}

impl<T> ScreenState<T> {
    fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            logical_radius: 0,
            scaled_radius: 0,
            shadow_offset: 0,
            regions: CornerSet::default(),
            textures: None,
            generation: 0,
        }
    }

    /// Rebuild textures and regions for `radius` at the current scale
    pub fn set_roundness<B>(&mut self, radius: i32, shape: &CornerShape, backend: &mut B)
    where
        B: GpuBackend<Texture = T>,
    {
        // Release the previous generation first.
        self.textures = None;
        self.regions = CornerSet::default();

        self.logical_radius = radius;
        self.scaled_radius = scaled_radius(radius, self.scale_factor);
        self.shadow_offset = shape.shadow_offset;
        self.generation += 1;

        match build(self.scaled_radius, radius, shape, backend) {
            Ok((textures, regions)) => {
                self.textures = Some(textures);
                self.regions = regions;
            }
            Err(e) => warn!(radius, scale = self.scale_factor, "corner atlas not built: {e}"),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn logical_radius(&self) -> i32 {
        self.logical_radius
    }

    pub fn scaled_radius(&self) -> i32 {
        self.scaled_radius
    }

    pub fn shadow_offset(&self) -> i32 {
        self.shadow_offset
    }

    /// Logical corner regions, relative to each quadrant's origin
    pub fn regions(&self) -> &CornerSet<Region> {
        &self.regions
    }

    /// Current textures, `None` when the last rebuild produced nothing
    pub fn textures(&self) -> Option<&CornerTextures<T>> {
        self.textures.as_ref()
    }

    /// Number of rebuilds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Side of the mask/outline textures in device pixels
    pub fn texture_side(&self) -> u32 {
        let tile = self.scaled_radius.saturating_add(self.shadow_offset).max(0) as u32;
        tile.saturating_mul(2)
    }
}

/// `radius * scale`, rounded to whole device pixels
pub fn scaled_radius(radius: i32, scale: f64) -> i32 {
    (radius as f64 * scale).round() as i32
}

type Generation<T> = (CornerTextures<T>, CornerSet<Region>);

fn build<B: GpuBackend>(
    scaled_radius: i32,
    logical_radius: i32,
    shape: &CornerShape,
    backend: &mut B,
) -> Result<Generation<B::Texture>, RasterError> {
    let tile = |radius: i32| -> Result<u32, RasterError> {
        let size = radius.checked_add(shape.shadow_offset).ok_or(RasterError::TooLarge {
            size: u32::MAX,
            max: MAX_TILE_SIZE,
        })?;
        Ok(u32::try_from(size).unwrap_or(0))
    };

    let device_size = tile(scaled_radius)?;
    let logical_size = tile(logical_radius)?;
    let mask = CornerImage::generate(device_size, CornerKind::Mask, shape)?;
    let light = CornerImage::generate(device_size, CornerKind::LightOutline, shape)?;
    let dark = CornerImage::generate(device_size, CornerKind::DarkOutline, shape)?;
    let logical_mask = CornerImage::generate(logical_size, CornerKind::Mask, shape)?;

    let textures = CornerTextures {
        mask: backend.upload_texture("Corner Mask", &mask),
        light_outline: backend.upload_texture("Corner Light Outline", &light),
        dark_outline: backend.upload_texture("Corner Dark Outline", &dark),
    };
    Ok((textures, corner_regions(&logical_mask)))
}

/// Screen states keyed by [`ScreenKey`]
pub struct ScreenCache<T> {
    addressing: ScreenAddressing,
    screens: FxHashMap<ScreenKey, ScreenState<T>>,
}

impl<T> ScreenCache<T> {
    pub fn new(addressing: ScreenAddressing) -> Self {
        Self {
            addressing,
            screens: FxHashMap::default(),
        }
    }

    pub fn addressing(&self) -> ScreenAddressing {
        self.addressing
    }

    pub fn key(&self, screen: Option<ScreenId>) -> Option<ScreenKey> {
        self.addressing.key(screen)
    }

    pub fn get(&self, key: ScreenKey) -> Option<&ScreenState<T>> {
        self.screens.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ScreenKey> + '_ {
        self.screens.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Rebuild one screen for `radius`, creating it at scale 1.0 if new
    pub fn set_roundness<B>(&mut self, key: ScreenKey, radius: i32, shape: &CornerShape, backend: &mut B)
    where
        B: GpuBackend<Texture = T>,
    {
        let state = self.screens.entry(key).or_insert_with(|| ScreenState::new(1.0));
        state.set_roundness(radius, shape, backend);
        debug!(
            ?key,
            radius,
            scale = state.scale_factor,
            generation = state.generation,
            "corner cache rebuilt"
        );
    }

    /// Make sure the screen's textures match `scale`
    ///
    /// Returns true when a rebuild happened.
    pub fn ensure_scale<B>(
        &mut self,
        key: ScreenKey,
        scale: f64,
        radius: i32,
        shape: &CornerShape,
        backend: &mut B,
    ) -> bool
    where
        B: GpuBackend<Texture = T>,
    {
        let state = self.screens.entry(key).or_insert_with(|| ScreenState::new(scale));
        let fresh = state.generation == 0;
        if !fresh && (state.scale_factor - scale).abs() <= f64::EPSILON {
            return false;
        }
        state.scale_factor = scale;
        self.set_roundness(key, radius, shape, backend);
        true
    }

    /// Rebuild every known screen for a new radius or shape
    pub fn rebuild_all<B>(&mut self, radius: i32, shape: &CornerShape, backend: &mut B)
    where
        B: GpuBackend<Texture = T>,
    {
        let keys: Vec<_> = self.keys().collect();
        for key in keys {
            self.set_roundness(key, radius, shape, backend);
        }
    }

    /// Drop a screen's state, releasing its textures
    pub fn remove(&mut self, key: ScreenKey) -> bool {
        self.screens.remove(&key).is_some()
    }

    /// Drop every screen's state
    pub fn clear(&mut self) {
        self.screens.clear();
    }
}
