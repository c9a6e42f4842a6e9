// this_file: backends/quadfont-core/src/traits.rs

//! Collaborator traits the core delegates font work to.
//!
//! The core never parses fonts. Every glyph lookup, raster, shaping run,
//! bidi pass and outline decomposition goes through one of these narrow
//! interfaces, so a concrete engine (see `quadfont-hb`) or a test double
//! can be plugged in without touching the iterators.

use crate::types::{
    ColorBitmap, Direction, Feature, FontId, FontSource, GlyphBitmap, RenderMode, ShapedGlyph,
    Variation, VerticalMetrics,
};
use crate::Result;
use quadfont_sdf::Outline;
use std::sync::Arc;

/// Borrowed view of a registered font handed to collaborators.
#[derive(Debug, Clone, Copy)]
pub struct FontHandle<'a> {
    pub id: FontId,
    pub name: &'a str,
    pub source: &'a FontSource,
    /// Design coordinates to apply before any glyph work, empty for the default instance
    pub variations: &'a [Variation],
}

/// Parameters of a bitmap raster request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterRequest {
    /// Pixel size (em height)
    pub size: u32,
    pub mode: RenderMode,
    pub hinting: bool,
    /// Blur radius in pixels, 0 for none
    pub blur: f32,
}

/// Parameters of a shaping run.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRequest<'a> {
    pub text: &'a str,
    pub size: u32,
    pub direction: Direction,
    /// BCP-47 language tag
    pub language: &'a str,
    pub features: &'a [Feature],
}

/// Outline of one glyph in pixel units with y pointing up.
#[derive(Debug, Clone, Default)]
pub struct OutlineGlyph {
    /// `None` when the glyph only exists as a bitmap
    pub shape: Option<Outline>,
    pub advance_x: f32,
}

/// Maps characters to glyphs and renders grayscale coverage bitmaps.
pub trait GlyphRasterizer: Send + Sync {
    fn name(&self) -> &str;

    /// Glyph index for a character, `None` when the font lacks it.
    fn glyph_index(&self, font: FontHandle<'_>, codepoint: char) -> Option<u32>;

    fn rasterize(
        &self,
        font: FontHandle<'_>,
        glyph: u32,
        request: &RasterRequest,
    ) -> Result<GlyphBitmap>;

    fn vertical_metrics(&self, font: FontHandle<'_>, size: u32) -> Option<VerticalMetrics>;
}

/// Renders color glyphs (emoji strikes, layered glyphs) into RGBA.
pub trait ColorCompositor: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the font carries any color glyph table.
    fn has_color_table(&self, font: FontHandle<'_>) -> bool;

    /// Fails for glyphs without color data; the core then falls back to grayscale.
    fn render_color_glyph(&self, font: FontHandle<'_>, glyph: u32, size: u32)
        -> Result<ColorBitmap>;
}

/// Turns a run of text into positioned glyph indices.
pub trait TextShaper: Send + Sync {
    fn name(&self) -> &str;

    /// Create whatever per-font shaping state the engine needs.
    ///
    /// Called once per font before its first shaping run.
    fn prepare(&self, font: FontHandle<'_>) -> Result<()>;

    fn shape(&self, font: FontHandle<'_>, request: &ShapeRequest<'_>) -> Result<Vec<ShapedGlyph>>;
}

/// Reorders logical text into visual order.
pub trait BidiReorderer: Send + Sync {
    fn name(&self) -> &str;

    fn reorder(&self, text: &[char], direction: Direction) -> Result<Vec<char>>;
}

/// Decomposes glyphs into line and quadratic contours.
pub trait OutlineSource: Send + Sync {
    fn name(&self) -> &str;

    fn decompose(&self, font: FontHandle<'_>, glyph: u32, size: u32) -> Result<OutlineGlyph>;
}

/// Pair kerning between adjacent glyphs.
pub trait KerningSource: Send + Sync {
    fn name(&self) -> &str;

    /// Horizontal adjustment in pixels, 0 when the pair is not kerned.
    fn kerning(&self, font: FontHandle<'_>, left: u32, right: u32, size: u32) -> f32;
}

/// The set of collaborators a [`FontSystem`](crate::FontSystem) works with.
///
/// Only the rasterizer is mandatory. Without a shaper, shaped iteration
/// yields nothing; without the other collaborators their features are
/// simply skipped.
#[derive(Clone)]
pub struct Collaborators {
    pub rasterizer: Arc<dyn GlyphRasterizer>,
    pub color: Option<Arc<dyn ColorCompositor>>,
    pub shaper: Option<Arc<dyn TextShaper>>,
    pub bidi: Option<Arc<dyn BidiReorderer>>,
    pub outlines: Option<Arc<dyn OutlineSource>>,
    pub kerning: Option<Arc<dyn KerningSource>>,
}

impl Collaborators {
    pub fn new(rasterizer: Arc<dyn GlyphRasterizer>) -> Self {
        Self {
            rasterizer,
            color: None,
            shaper: None,
            bidi: None,
            outlines: None,
            kerning: None,
        }
    }

    pub fn with_color(mut self, color: Arc<dyn ColorCompositor>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_shaper(mut self, shaper: Arc<dyn TextShaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub fn with_bidi(mut self, bidi: Arc<dyn BidiReorderer>) -> Self {
        self.bidi = Some(bidi);
        self
    }

    pub fn with_outlines(mut self, outlines: Arc<dyn OutlineSource>) -> Self {
        self.outlines = Some(outlines);
        self
    }

    pub fn with_kerning(mut self, kerning: Arc<dyn KerningSource>) -> Self {
        self.kerning = Some(kerning);
        self
    }

    /// Names of the configured collaborators, for diagnostics.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("raster={}", self.rasterizer.name())];
        if let Some(color) = &self.color {
            parts.push(format!("color={}", color.name()));
        }
        if let Some(shaper) = &self.shaper {
            parts.push(format!("shaper={}", shaper.name()));
        }
        if let Some(bidi) = &self.bidi {
            parts.push(format!("bidi={}", bidi.name()));
        }
        if let Some(outlines) = &self.outlines {
            parts.push(format!("outlines={}", outlines.name()));
        }
        if let Some(kerning) = &self.kerning {
            parts.push(format!("kerning={}", kerning.name()));
        }
        parts.join(" ")
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("names", &self.describe())
            .finish()
    }
}
