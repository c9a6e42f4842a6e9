// this_file: backends/quadfont-core/src/system.rs

//! The caller-owned font system tying registry, state, atlas and cache together.

use crate::atlas::AtlasPacker;
use crate::cache::{CacheStats, GlyphCache, GlyphRecord, ShapeCache, ShapeKey};
use crate::config::SystemConfig;
use crate::diagnostics::SystemDiagnostics;
use crate::iter::TextIter;
use crate::registry::{ColorSupport, FontRegistry, ShapingStatus};
use crate::shaped::ShapedTextIter;
use crate::state::{RenderState, StateStack};
use crate::surface::pad_pixels;
use crate::traits::{Collaborators, RasterRequest, ShapeRequest};
use crate::types::{
    AtlasUpload, Direction, Feature, FieldMode, FontId, FontSource, GlyphId, GlyphKey, HAlign,
    LineBounds, PixelFormat, RenderMode, ShapedGlyph, TextBounds, VAlign, Variation,
    VariationId, VerticalMetrics,
};
use crate::Result;
use log::{debug, trace, warn};
use quadfont_sdf::{FieldKind, FieldParams, GlyphSource, Outline};
use std::path::PathBuf;
use std::sync::Arc;

/// Receives every atlas region written while filling cache misses.
pub type UploadCallback = Box<dyn FnMut(&AtlasUpload<'_>) + Send>;

/// Maximum number of OpenType feature toggles kept at once.
pub const MAX_FEATURES: usize = 32;

/// A rendered glyph before it is packed.
struct RasterImage {
    width: u32,
    height: u32,
    bearing_x: f32,
    bearing_y: f32,
    advance: f32,
    format: PixelFormat,
    color: bool,
    pixels: Vec<u8>,
}

impl RasterImage {
    fn empty(advance: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            bearing_x: 0.0,
            bearing_y: 0.0,
            advance,
            format: PixelFormat::Alpha8,
            color: false,
            pixels: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn has_complete_pixels(&self) -> bool {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(self.format.bytes_per_pixel()))
            .is_some_and(|needed| self.pixels.len() >= needed)
    }
}

/// Text engine instance: fonts, render state stack, atlas and glyph cache.
///
/// All state is owned by the instance. Iterators borrow it mutably, so only
/// one iteration can be in flight at a time.
pub struct FontSystem {
    config: SystemConfig,
    collaborators: Collaborators,
    registry: FontRegistry,
    states: StateStack,
    atlas: AtlasPacker,
    cache: GlyphCache,
    shape_cache: ShapeCache,
    features: Vec<Feature>,
    language: String,
    upload: Option<UploadCallback>,
    overflowed: bool,
}

impl FontSystem {
    pub fn new(config: SystemConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        debug!(
            target: "quadfont::system",
            "creating font system atlas={}x{} {}",
            config.atlas_width,
            config.atlas_height,
            collaborators.describe()
        );
        Ok(Self {
            registry: FontRegistry::new(config.max_fonts),
            states: StateStack::new(config.max_states),
            atlas: AtlasPacker::new(config.atlas_width, config.atlas_height, config.max_rows),
            cache: GlyphCache::new(config.max_glyphs),
            shape_cache: ShapeCache::new(config.shape_cache_size),
            features: Vec::new(),
            language: config.language.clone(),
            upload: None,
            overflowed: false,
            collaborators,
            config,
        })
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    // Fonts

    pub fn add_font(&mut self, name: &str, source: impl Into<FontSource>) -> Result<FontId> {
        self.registry.register(name, source.into())
    }

    pub fn add_font_file(&mut self, name: &str, path: impl Into<PathBuf>) -> Result<FontId> {
        self.registry.register(name, FontSource::File(path.into()))
    }

    pub fn add_font_memory(&mut self, name: &str, data: impl Into<Arc<[u8]>>) -> Result<FontId> {
        self.registry.register(name, FontSource::Memory(data.into()))
    }

    pub fn find_font(&self, name: &str) -> Result<FontId> {
        self.registry.find(name)
    }

    pub fn add_fallback(&mut self, base: FontId, fallback: FontId) -> Result<()> {
        self.registry.set_fallback(base, fallback)
    }

    pub fn reset_fallback(&mut self, base: FontId) -> Result<()> {
        self.registry.clear_fallback(base)
    }

    /// Switch a font between bitmap and distance field rendering.
    ///
    /// Records already cached for the font are dropped so the next lookup
    /// renders through the new path.
    pub fn set_font_field_mode(&mut self, font: FontId, mode: FieldMode) -> Result<()> {
        self.registry.set_field_mode(font, mode)?;
        self.cache.remove_font(font);
        Ok(())
    }

    /// Select a variable font instance by design coordinates.
    ///
    /// Glyphs and shaped runs are cached per instance, so switching back to
    /// an earlier coordinate set reuses what was rendered for it.
    pub fn set_font_variations(&mut self, font: FontId, coords: &[Variation]) -> Result<VariationId> {
        self.registry.set_variations(font, coords)
    }

    pub fn font_variations(&self, font: FontId) -> Result<&[Variation]> {
        self.registry.variations(font)
    }

    // Render state

    pub fn state(&self) -> &RenderState {
        self.states.current()
    }

    pub fn set_font(&mut self, font: FontId) {
        self.states.current_mut().font = Some(font);
    }

    pub fn set_size(&mut self, size: f32) {
        self.states.current_mut().size = size;
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.states.current_mut().spacing = spacing;
    }

    pub fn set_blur(&mut self, blur: f32) {
        self.states.current_mut().blur = blur.max(0.0);
    }

    pub fn set_align(&mut self, h_align: HAlign, v_align: VAlign) {
        let state = self.states.current_mut();
        state.h_align = h_align;
        state.v_align = v_align;
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.states.current_mut().mode = mode;
    }

    pub fn set_hinting(&mut self, hinting: bool) {
        self.states.current_mut().hinting = hinting;
    }

    pub fn set_kerning(&mut self, kerning: bool) {
        self.states.current_mut().kerning = kerning;
    }

    pub fn push_state(&mut self) -> Result<()> {
        self.states.push()
    }

    pub fn pop_state(&mut self) -> Result<()> {
        self.states.pop()
    }

    pub fn reset_state(&mut self) {
        self.states.reset();
    }

    pub fn state_depth(&self) -> usize {
        self.states.depth()
    }

    // Shaping options

    /// Enable or disable an OpenType feature for shaped iteration.
    ///
    /// Setting a tag again overwrites its value. Tags beyond the first
    /// [`MAX_FEATURES`] are ignored.
    pub fn set_feature(&mut self, tag: [u8; 4], enabled: bool) {
        if let Some(existing) = self.features.iter_mut().find(|f| f.tag == tag) {
            *existing = Feature::new(tag, enabled);
        } else if self.features.len() < MAX_FEATURES {
            self.features.push(Feature::new(tag, enabled));
        } else {
            warn!(
                target: "quadfont::shape",
                "feature limit reached, ignoring {}",
                String::from_utf8_lossy(&tag)
            );
        }
    }

    pub fn reset_features(&mut self) {
        self.features.clear();
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    // Iteration

    /// Iterate quads for `text`, one glyph per decoded codepoint.
    pub fn text_iter<'a, T>(&'a mut self, x: f32, y: f32, text: &'a T) -> TextIter<'a>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        TextIter::new(self, x, y, text.as_ref())
    }

    /// Iterate quads for `text` after bidi reordering and shaping.
    pub fn shaped_text_iter<'a, T>(
        &'a mut self,
        x: f32,
        y: f32,
        text: &'a T,
        direction: Direction,
    ) -> ShapedTextIter<'a>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        ShapedTextIter::new(self, x, y, text.as_ref(), direction)
    }

    // Measurement

    /// Bounding box of the quads `text_iter` would emit.
    pub fn text_bounds<T>(&mut self, x: f32, y: f32, text: &T) -> TextBounds
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let mut iter = self.text_iter(x, y, text);
        let (origin_x, origin_y) = iter.origin();
        let mut bounds = TextBounds::at(origin_x, origin_y);
        for quad in iter.by_ref() {
            if !quad.is_degenerate() {
                bounds.include(&quad);
            }
        }
        let (end_x, _) = iter.cursor();
        bounds.max_x = bounds.max_x.max(end_x);
        bounds.advance = end_x - origin_x;
        bounds
    }

    /// Bounding box of the quads `shaped_text_iter` would emit.
    pub fn shaped_text_bounds<T>(
        &mut self,
        x: f32,
        y: f32,
        text: &T,
        direction: Direction,
    ) -> TextBounds
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let mut iter = self.shaped_text_iter(x, y, text, direction);
        let (origin_x, origin_y) = iter.origin();
        let mut bounds = TextBounds::at(origin_x, origin_y);
        for quad in iter.by_ref() {
            if !quad.is_degenerate() {
                bounds.include(&quad);
            }
        }
        let (end_x, _) = iter.cursor();
        bounds.max_x = bounds.max_x.max(end_x);
        bounds.advance = end_x - origin_x;
        bounds
    }

    /// Vertical metrics of the active font at the active size.
    pub fn vert_metrics(&self) -> Option<VerticalMetrics> {
        self.metrics_for(self.states.current())
    }

    /// Vertical extent of a line whose origin is at `y`, honoring vertical alignment.
    pub fn line_bounds(&self, y: f32) -> Option<LineBounds> {
        let state = self.states.current();
        let metrics = self.metrics_for(state)?;
        let baseline = y + self.baseline_shift(state);
        Some(LineBounds {
            min_y: baseline - metrics.ascender,
            max_y: baseline - metrics.descender,
        })
    }

    // Atlas

    pub fn atlas_size(&self) -> (u32, u32) {
        self.atlas.size()
    }

    /// Clear the atlas and every cached glyph and shaped run.
    ///
    /// All previously returned quads become invalid.
    pub fn reset_atlas(&mut self, width: u32, height: u32) -> Result<()> {
        self.atlas.reset(width, height)?;
        self.cache.clear();
        self.shape_cache.clear();
        self.overflowed = false;
        Ok(())
    }

    /// Grow the atlas, keeping packed glyphs at their texel positions.
    ///
    /// The caller must grow its texture preserving existing content. Cached
    /// records get new normalized coordinates, so previously returned quads
    /// are invalid.
    pub fn expand_atlas(&mut self, width: u32, height: u32) -> Result<()> {
        self.atlas.expand(width, height)?;
        self.cache.remap_uvs(width, height);
        self.overflowed = false;
        Ok(())
    }

    /// Whether a glyph failed to fit the atlas since the last reset or expand.
    pub fn atlas_overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn atlas(&self) -> &AtlasPacker {
        &self.atlas
    }

    pub fn set_texture_upload_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&AtlasUpload<'_>) + Send + 'static,
    {
        self.upload = Some(Box::new(callback));
    }

    pub fn clear_texture_upload_callback(&mut self) {
        self.upload = None;
    }

    // Introspection

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn shaped_runs_cached(&self) -> usize {
        self.shape_cache.len()
    }

    pub fn diagnostics(&self) -> SystemDiagnostics<'_> {
        SystemDiagnostics::new(self)
    }

    // Internals used by the iterators

    /// Cache key for a glyph of `font` in the font's current variation instance.
    pub(crate) fn glyph_key(&self, glyph: GlyphId, font: FontId, size: u32) -> GlyphKey {
        GlyphKey::new(glyph, font, size).with_variation(self.registry.variation_of(font))
    }

    /// Glyph index for `ch` in `font`, or in its single fallback.
    pub(crate) fn resolve_codepoint(&self, font: FontId, ch: char) -> Option<(FontId, u32)> {
        let rasterizer = &self.collaborators.rasterizer;
        let record = self.registry.get(font)?;
        if let Some(index) = rasterizer.glyph_index(record.handle(), ch) {
            return Some((font, index));
        }
        let fallback = self.registry.fallback_of(font)?;
        let record = self.registry.get(fallback)?;
        rasterizer
            .glyph_index(record.handle(), ch)
            .map(|index| (fallback, index))
    }

    pub(crate) fn kerning(&self, font: FontId, left: u32, right: u32, size: u32) -> f32 {
        let (Some(kerning), Some(record)) = (&self.collaborators.kerning, self.registry.get(font))
        else {
            return 0.0;
        };
        kerning.kerning(record.handle(), left, right, size)
    }

    pub(crate) fn metrics_for(&self, state: &RenderState) -> Option<VerticalMetrics> {
        let record = self.registry.get(state.font?)?;
        self.collaborators
            .rasterizer
            .vertical_metrics(record.handle(), state.pixel_size())
    }

    /// Offset from the requested y to the baseline for the state's vertical alignment.
    pub(crate) fn baseline_shift(&self, state: &RenderState) -> f32 {
        if state.v_align == VAlign::Baseline {
            return 0.0;
        }
        let Some(metrics) = self.metrics_for(state) else {
            return 0.0;
        };
        match state.v_align {
            VAlign::Top => metrics.ascender,
            VAlign::Middle => (metrics.ascender + metrics.descender) / 2.0,
            VAlign::Baseline => 0.0,
            VAlign::Bottom => metrics.descender,
        }
    }

    /// Cached record for `key`, rendering and packing it on a miss.
    pub(crate) fn glyph(
        &mut self,
        key: GlyphKey,
        glyph_index: u32,
        state: &RenderState,
    ) -> Option<GlyphRecord> {
        if let Some(record) = self.cache.find(&key) {
            return Some(record);
        }
        self.populate(key, glyph_index, state)
    }

    fn populate(
        &mut self,
        key: GlyphKey,
        glyph_index: u32,
        state: &RenderState,
    ) -> Option<GlyphRecord> {
        if self.cache.is_full() {
            debug!(target: "quadfont::cache", "glyph cache full, skipping {key:?}");
            return None;
        }

        let image = self.render_image(key, glyph_index, state)?;
        if image.is_empty() {
            return self.cache.insert(key, GlyphRecord::empty(image.advance)).copied();
        }
        if !image.has_complete_pixels() {
            warn!(
                target: "quadfont::iter",
                "bitmap for {key:?} is shorter than {}x{}, skipping",
                image.width,
                image.height
            );
            return None;
        }

        let padding = self.config.glyph_padding;
        let (Some(cell_width), Some(cell_height)) = (
            padded_extent(image.width, padding),
            padded_extent(image.height, padding),
        ) else {
            warn!(
                target: "quadfont::atlas",
                "glyph {key:?} of {}x{} cannot be placed",
                image.width,
                image.height
            );
            self.overflowed = true;
            return None;
        };
        let (cell_x, cell_y) = match self.atlas.pack(cell_width, cell_height) {
            Ok(position) => position,
            Err(err) => {
                if !self.overflowed {
                    warn!(target: "quadfont::atlas", "glyph {key:?} skipped: {err}");
                }
                self.overflowed = true;
                return None;
            }
        };

        let record = GlyphRecord::placed(
            cell_x + padding,
            cell_y + padding,
            image.width,
            image.height,
            image.bearing_x,
            image.bearing_y,
            image.advance,
            image.color,
            self.atlas.size(),
        );
        let record = *self.cache.insert(key, record)?;

        if let Some(upload) = self.upload.as_mut() {
            let data = pad_pixels(
                &image.pixels,
                image.width,
                image.height,
                image.format.bytes_per_pixel(),
                padding,
            );
            upload(&AtlasUpload {
                x: cell_x,
                y: cell_y,
                width: cell_width,
                height: cell_height,
                format: image.format,
                data: &data,
            });
        }
        debug!(
            target: "quadfont::cache",
            "cached {key:?} at ({}, {}) {}x{} color={}",
            record.x,
            record.y,
            record.width,
            record.height,
            record.color
        );
        Some(record)
    }

    /// Distance field first, then color, then grayscale.
    fn render_image(
        &mut self,
        key: GlyphKey,
        glyph_index: u32,
        state: &RenderState,
    ) -> Option<RasterImage> {
        let field_mode = self.registry.get(key.font)?.field_mode;
        if field_mode != FieldMode::Off {
            if let Some(image) = self.render_field(key, glyph_index, field_mode) {
                return Some(image);
            }
        }
        if self.has_color(key.font) {
            if let Some(image) = self.render_color(key, glyph_index) {
                return Some(image);
            }
        }
        self.render_gray(key, glyph_index, state)
    }

    fn has_color(&mut self, font: FontId) -> bool {
        let Some(compositor) = &self.collaborators.color else {
            return false;
        };
        let Some(record) = self.registry.get_mut(font) else {
            return false;
        };
        match record.color {
            ColorSupport::Yes => true,
            ColorSupport::No => false,
            ColorSupport::Unknown => {
                let has_color = compositor.has_color_table(record.handle());
                record.color = if has_color {
                    ColorSupport::Yes
                } else {
                    ColorSupport::No
                };
                debug!(target: "quadfont::registry", "font {font:?} color tables: {has_color}");
                has_color
            }
        }
    }

    fn render_field(&self, key: GlyphKey, glyph_index: u32, mode: FieldMode) -> Option<RasterImage> {
        let outlines = self.collaborators.outlines.as_ref()?;
        let record = self.registry.get(key.font)?;
        let kind = match mode {
            FieldMode::Sdf => FieldKind::Sdf,
            FieldMode::Msdf => FieldKind::Msdf,
            FieldMode::Off => return None,
        };

        let glyph = match outlines.decompose(record.handle(), glyph_index, key.size) {
            Ok(glyph) => glyph,
            Err(err) => {
                debug!(target: "quadfont::sdf", "outline for {key:?} unavailable: {err}");
                return None;
            }
        };
        if glyph.shape.as_ref().is_some_and(Outline::is_empty) {
            return Some(RasterImage::empty(glyph.advance_x));
        }

        let padding = self.config.field.padding;
        let (inner_width, inner_height) = match glyph.shape.as_ref().and_then(Outline::bounds) {
            Some(bounds) => (
                (bounds.width().ceil() as u32).max(1),
                (bounds.height().ceil() as u32).max(1),
            ),
            None => (key.size, key.size),
        };
        let (atlas_width, atlas_height) = self.atlas.size();
        let (width, height) = match (
            padded_extent(inner_width, padding),
            padded_extent(inner_height, padding),
        ) {
            (Some(width), Some(height)) if width <= atlas_width && height <= atlas_height => {
                (width, height)
            }
            _ => {
                warn!(
                    target: "quadfont::sdf",
                    "field for {key:?} ({inner_width}x{inner_height} + padding {padding}) exceeds the atlas"
                );
                return None;
            }
        };
        let params = FieldParams {
            width,
            height,
            padding,
            range: self.config.field.range,
            scale: Some(1.0),
        };
        let source = match &glyph.shape {
            Some(outline) => GlyphSource::Outline(outline),
            None => GlyphSource::Bitmap,
        };

        let field = match quadfont_sdf::generate(kind, source, &params) {
            Ok(field) => field,
            Err(err) => {
                warn!(target: "quadfont::sdf", "field for {key:?} failed: {err}");
                return None;
            }
        };
        if field.is_placeholder() {
            debug!(target: "quadfont::sdf", "{key:?} has no outline, using bitmap path");
            return None;
        }

        Some(RasterImage {
            width: field.width,
            height: field.height,
            bearing_x: -field.origin_x,
            bearing_y: field.origin_y,
            advance: glyph.advance_x,
            format: match kind {
                FieldKind::Sdf => PixelFormat::Alpha8,
                FieldKind::Msdf => PixelFormat::Rgba8,
            },
            color: false,
            pixels: field.data,
        })
    }

    fn render_color(&self, key: GlyphKey, glyph_index: u32) -> Option<RasterImage> {
        let compositor = self.collaborators.color.as_ref()?;
        let record = self.registry.get(key.font)?;
        match compositor.render_color_glyph(record.handle(), glyph_index, key.size) {
            Ok(bitmap) => Some(RasterImage {
                width: bitmap.width,
                height: bitmap.height,
                bearing_x: bitmap.left,
                bearing_y: bitmap.top,
                advance: bitmap.advance_x,
                format: PixelFormat::Rgba8,
                color: true,
                pixels: bitmap.pixels,
            }),
            Err(err) => {
                trace!(target: "quadfont::iter", "no color glyph for {key:?}: {err}");
                None
            }
        }
    }

    fn render_gray(
        &self,
        key: GlyphKey,
        glyph_index: u32,
        state: &RenderState,
    ) -> Option<RasterImage> {
        let record = self.registry.get(key.font)?;
        let request = RasterRequest {
            size: key.size,
            mode: state.mode,
            hinting: state.hinting,
            blur: state.blur,
        };
        match self
            .collaborators
            .rasterizer
            .rasterize(record.handle(), glyph_index, &request)
        {
            Ok(bitmap) => Some(RasterImage {
                width: bitmap.width,
                height: bitmap.height,
                bearing_x: bitmap.bearing_x,
                bearing_y: bitmap.bearing_y,
                advance: bitmap.advance_x,
                format: PixelFormat::Alpha8,
                color: false,
                pixels: bitmap.pixels,
            }),
            Err(err) => {
                debug!(target: "quadfont::iter", "rasterizer failed for {key:?}: {err}");
                None
            }
        }
    }

    /// Shape `text` (already in visual order) with one font, through the LRU.
    pub(crate) fn shape_run(
        &mut self,
        font: FontId,
        text: &str,
        size: u32,
        direction: Direction,
    ) -> Option<Arc<[ShapedGlyph]>> {
        let Some(shaper) = self.collaborators.shaper.as_ref() else {
            warn!(target: "quadfont::shape", "no shaper configured, shaped text is empty");
            return None;
        };
        let key = ShapeKey {
            text: text.to_string(),
            font,
            variation: self.registry.variation_of(font),
            size,
            direction,
            language: self.language.clone(),
            features: self.features.clone(),
        };
        if let Some(glyphs) = self.shape_cache.get(&key) {
            trace!(target: "quadfont::shape", "shape cache hit for {} chars", text.len());
            return Some(glyphs);
        }

        let record = self.registry.get_mut(font)?;
        match record.shaping {
            ShapingStatus::Failed => return None,
            ShapingStatus::Ready => {}
            ShapingStatus::Unprepared => match shaper.prepare(record.handle()) {
                Ok(()) => record.shaping = ShapingStatus::Ready,
                Err(err) => {
                    warn!(target: "quadfont::shape", "cannot shape with font {font:?}: {err}");
                    record.shaping = ShapingStatus::Failed;
                    return None;
                }
            },
        }

        let request = ShapeRequest {
            text,
            size,
            direction,
            language: &self.language,
            features: &self.features,
        };
        let glyphs = match shaper.shape(record.handle(), &request) {
            Ok(glyphs) => glyphs,
            Err(err) => {
                warn!(target: "quadfont::shape", "shaping failed: {err}");
                return None;
            }
        };
        debug!(
            target: "quadfont::shape",
            "shaped {} bytes into {} glyphs with font {font:?}",
            text.len(),
            glyphs.len()
        );
        Some(self.shape_cache.put(key, glyphs))
    }
}

impl std::fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSystem")
            .field("fonts", &self.registry.len())
            .field("atlas", &self.atlas.size())
            .field("glyphs", &self.cache.len())
            .field("collaborators", &self.collaborators)
            .finish()
    }
}

/// `extent` plus `padding` on both sides, `None` on overflow.
fn padded_extent(extent: u32, padding: u32) -> Option<u32> {
    padding.checked_mul(2)?.checked_add(extent)
}

/// Horizontal offset applied to the origin for an alignment and measured width.
pub(crate) fn align_offset(align: HAlign, width: f32) -> f32 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => width / 2.0,
        HAlign::Right => width,
    }
}
