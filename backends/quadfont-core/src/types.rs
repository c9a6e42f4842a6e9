// this_file: backends/quadfont-core/src/types.rs

//! Core types shared by the registry, cache, iterators and collaborators.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

/// Handle of a registered font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontId(pub usize);

/// Glyph identity as seen by the cache.
///
/// Codepoint-driven iteration keys glyphs by Unicode scalar value, shaped
/// iteration by the glyph index the shaper produced. The two never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphId {
    Codepoint(u32),
    Index(u32),
}

impl GlyphId {
    pub fn value(self) -> u32 {
        match self {
            GlyphId::Codepoint(value) | GlyphId::Index(value) => value,
        }
    }
}

/// Identifier of one set of variation coordinates. `0` is the default instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariationId(pub u32);

/// Cache lookup identity: glyph, owning font, integer pixel size and the
/// font's variation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphKey {
    pub glyph: GlyphId,
    pub font: FontId,
    pub size: u32,
    pub variation: VariationId,
}

impl GlyphKey {
    pub fn new(glyph: GlyphId, font: FontId, size: u32) -> Self {
        Self {
            glyph,
            font,
            size,
            variation: VariationId::default(),
        }
    }

    pub fn with_variation(mut self, variation: VariationId) -> Self {
        self.variation = variation;
        self
    }
}

impl Hash for GlyphKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Spread size and font into the otherwise low-entropy glyph bits.
        let mode = matches!(self.glyph, GlyphId::Index(_)) as u64;
        let mixed = (self.glyph.value() as u64)
            ^ ((self.size as u64) << 21)
            ^ ((self.font.0 as u64) << 42)
            ^ ((self.variation.0 as u64) << 53)
            ^ (mode << 63);
        state.write_u64(mixed);
    }
}

/// Rasterization mode requested from the bitmap rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Normal,
    Light,
    Mono,
    LcdHorizontal,
    LcdVertical,
}

/// Per-font distance field rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldMode {
    #[default]
    Off,
    Sdf,
    Msdf,
}

/// Horizontal text alignment relative to the iteration origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the iteration origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Middle,
    #[default]
    Baseline,
    Bottom,
}

/// Paragraph direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    #[default]
    Auto,
}

/// OpenType feature toggle passed to the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub tag: [u8; 4],
    pub value: u32,
}

impl Feature {
    pub fn new(tag: [u8; 4], enabled: bool) -> Self {
        Self {
            tag,
            value: enabled as u32,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.value != 0
    }
}

/// Design coordinate on one variation axis of a variable font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Axis tag such as `wght` or `wdth`
    pub tag: [u8; 4],
    pub value: f32,
}

impl Variation {
    pub fn new(tag: [u8; 4], value: f32) -> Self {
        Self { tag, value }
    }
}

/// Where a font's bytes come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// File loaded lazily by the backend
    File(PathBuf),
    /// Buffer shared with the system, freed with the last reference
    Memory(Arc<[u8]>),
    /// Caller-owned buffer that outlives the system
    Static(&'static [u8]),
}

impl FontSource {
    /// In-memory bytes, if the source is not a file.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            FontSource::File(_) => None,
            FontSource::Memory(data) => Some(&data[..]),
            FontSource::Static(data) => Some(*data),
        }
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(data: Vec<u8>) -> Self {
        FontSource::Memory(data.into())
    }
}

impl From<&'static [u8]> for FontSource {
    fn from(data: &'static [u8]) -> Self {
        FontSource::Static(data)
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        FontSource::File(path)
    }
}

/// Grayscale coverage bitmap returned by a rasterizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Pen position to left edge of the bitmap
    pub bearing_x: f32,
    /// Baseline to top edge of the bitmap, y up
    pub bearing_y: f32,
    pub advance_x: f32,
    /// One byte per pixel, row-major
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight (unpremultiplied) RGBA bitmap returned by a color compositor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorBitmap {
    pub width: u32,
    pub height: u32,
    pub left: f32,
    pub top: f32,
    pub advance_x: f32,
    pub pixels: Vec<u8>,
}

/// One glyph of a shaped run, in pixels.
///
/// Offsets and advances follow the shaper's y-up convention.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapedGlyph {
    pub glyph_index: u32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
    pub y_advance: f32,
    pub cluster: u32,
}

/// Textured rectangle emitted by the iterators.
///
/// Screen coordinates have y pointing down; texture coordinates are
/// normalized to the atlas size at emission time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
    pub glyph: GlyphId,
    pub font: FontId,
    /// Byte offset (codepoint mode) or shaper cluster (shaped mode)
    pub cluster: usize,
    /// Texels are RGBA color rather than coverage
    pub color: bool,
}

impl Quad {
    pub fn is_degenerate(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Vertical metrics of a font at a pixel size (y up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalMetrics {
    pub ascender: f32,
    /// Usually negative
    pub descender: f32,
    pub line_height: f32,
}

/// Extent of a measured string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Horizontal distance the cursor moved
    pub advance: f32,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl TextBounds {
    /// Zero-size box at a point.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            advance: 0.0,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn include(&mut self, quad: &Quad) {
        self.min_x = self.min_x.min(quad.x0);
        self.min_y = self.min_y.min(quad.y0);
        self.max_x = self.max_x.max(quad.x1);
        self.max_y = self.max_y.max(quad.y1);
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Vertical extent of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineBounds {
    pub min_y: f32,
    pub max_y: f32,
}

/// Texel layout of an atlas upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Alpha8,
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha8 => 1,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Region of the atlas written during cache-miss handling.
#[derive(Debug, Clone, Copy)]
pub struct AtlasUpload<'a> {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Tightly packed rows of `width * bytes_per_pixel` bytes
    pub data: &'a [u8],
}
