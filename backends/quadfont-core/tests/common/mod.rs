// this_file: backends/quadfont-core/tests/common/mod.rs

//! Scripted collaborators for driving the font system without font files.

#![allow(dead_code)]

pub use quadfont_core::FontSource;
use quadfont_core::{
    AtlasUpload, BidiReorderer, Collaborators, ColorBitmap, ColorCompositor, Direction, Feature,
    FontHandle, FontSystem, GlyphBitmap, GlyphRasterizer, KerningSource, OutlineGlyph,
    OutlineSource, PixelFormat, QuadfontError, RasterRequest, Result, ShapeRequest,
    ShapedGlyph, SystemConfig, TextShaper, Variation, VerticalMetrics,
};
use quadfont_sdf::{Contour, Outline, Point};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const GLYPH_WIDTH: u32 = 8;
pub const GLYPH_HEIGHT: u32 = 10;
pub const BEARING_X: f32 = 1.0;
pub const BEARING_Y: f32 = 9.0;
pub const ADVANCE: f32 = 10.0;
pub const SPACE_ADVANCE: f32 = 5.0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Rasterizer whose fonts are defined by the characters they cover.
///
/// Glyph indices equal the codepoint; every glyph is an 8x10 box, spaces
/// are empty.
#[derive(Default)]
pub struct MockRasterizer {
    coverage: HashMap<String, Vec<char>>,
    pub raster_calls: AtomicUsize,
    /// Design coordinates seen by each raster call
    pub variations: Mutex<Vec<Vec<Variation>>>,
}

impl MockRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, name: &str, chars: &str) -> Self {
        self.coverage.insert(name.to_string(), chars.chars().collect());
        self
    }

    fn covers(&self, font: &str, glyph: u32) -> bool {
        self.coverage
            .get(font)
            .is_some_and(|chars| chars.iter().any(|&ch| ch as u32 == glyph))
    }
}

impl GlyphRasterizer for MockRasterizer {
    fn name(&self) -> &str {
        "mock-raster"
    }

    fn glyph_index(&self, font: FontHandle<'_>, codepoint: char) -> Option<u32> {
        self.covers(font.name, codepoint as u32)
            .then_some(codepoint as u32)
    }

    fn rasterize(
        &self,
        font: FontHandle<'_>,
        glyph: u32,
        _request: &RasterRequest,
    ) -> Result<GlyphBitmap> {
        self.raster_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.variations.lock() {
            seen.push(font.variations.to_vec());
        }
        if !self.covers(font.name, glyph) {
            return Err(QuadfontError::glyph_missing(font.id, glyph));
        }
        if glyph == ' ' as u32 {
            return Ok(GlyphBitmap {
                advance_x: SPACE_ADVANCE,
                ..GlyphBitmap::default()
            });
        }
        Ok(GlyphBitmap {
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
            bearing_x: BEARING_X,
            bearing_y: BEARING_Y,
            advance_x: ADVANCE,
            pixels: vec![255; (GLYPH_WIDTH * GLYPH_HEIGHT) as usize],
        })
    }

    fn vertical_metrics(&self, font: FontHandle<'_>, size: u32) -> Option<VerticalMetrics> {
        self.coverage.contains_key(font.name).then(|| VerticalMetrics {
            ascender: size as f32 * 0.75,
            descender: -(size as f32) * 0.25,
            line_height: size as f32 * 1.25,
        })
    }
}

/// Kerning table keyed by font name and glyph pair.
#[derive(Default)]
pub struct MockKerning {
    pairs: HashMap<(String, u32, u32), f32>,
}

impl MockKerning {
    pub fn with_pair(mut self, font: &str, left: char, right: char, value: f32) -> Self {
        self.pairs
            .insert((font.to_string(), left as u32, right as u32), value);
        self
    }
}

impl KerningSource for MockKerning {
    fn name(&self) -> &str {
        "mock-kern"
    }

    fn kerning(&self, font: FontHandle<'_>, left: u32, right: u32, _size: u32) -> f32 {
        self.pairs
            .get(&(font.name.to_string(), left, right))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Color compositor that knows one color font and one color glyph.
pub struct MockColor {
    pub font: String,
    pub glyph: char,
    pub table_checks: AtomicUsize,
}

impl MockColor {
    pub fn new(font: &str, glyph: char) -> Self {
        Self {
            font: font.to_string(),
            glyph,
            table_checks: AtomicUsize::new(0),
        }
    }
}

impl ColorCompositor for MockColor {
    fn name(&self) -> &str {
        "mock-color"
    }

    fn has_color_table(&self, font: FontHandle<'_>) -> bool {
        self.table_checks.fetch_add(1, Ordering::SeqCst);
        font.name == self.font
    }

    fn render_color_glyph(
        &self,
        font: FontHandle<'_>,
        glyph: u32,
        _size: u32,
    ) -> Result<ColorBitmap> {
        if font.name != self.font || glyph != self.glyph as u32 {
            return Err(QuadfontError::collaborator("color", "no color glyph"));
        }
        Ok(ColorBitmap {
            width: 12,
            height: 12,
            left: 0.0,
            top: 11.0,
            advance_x: 14.0,
            pixels: [255, 0, 0, 255].repeat(144),
        })
    }
}

/// Outline source returning an 8x10 box for every glyph but spaces.
pub struct MockOutlines {
    pub bitmap_only: bool,
}

impl OutlineSource for MockOutlines {
    fn name(&self) -> &str {
        "mock-outline"
    }

    fn decompose(&self, _font: FontHandle<'_>, glyph: u32, _size: u32) -> Result<OutlineGlyph> {
        if self.bitmap_only {
            return Ok(OutlineGlyph {
                shape: None,
                advance_x: ADVANCE,
            });
        }
        if glyph == ' ' as u32 {
            return Ok(OutlineGlyph {
                shape: Some(Outline::default()),
                advance_x: SPACE_ADVANCE,
            });
        }
        let square = Contour::polygon(&[
            kurbo_point(1.0, 0.0),
            kurbo_point(9.0, 0.0),
            kurbo_point(9.0, 10.0),
            kurbo_point(1.0, 10.0),
        ]);
        Ok(OutlineGlyph {
            shape: Some(Outline::new(vec![square])),
            advance_x: ADVANCE,
        })
    }
}

fn kurbo_point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// What the mock shaper was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCall {
    pub text: String,
    pub direction: Direction,
    pub language: String,
    pub features: Vec<Feature>,
    pub variations: Vec<Variation>,
}

/// Shaper emitting one glyph per char with a fixed advance.
#[derive(Default)]
pub struct MockShaper {
    pub calls: Mutex<Vec<ShapeCall>>,
    pub prepares: AtomicUsize,
    pub failing_font: Option<String>,
    pub y_offset: f32,
}

impl TextShaper for MockShaper {
    fn name(&self) -> &str {
        "mock-shaper"
    }

    fn prepare(&self, font: FontHandle<'_>) -> Result<()> {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        if self.failing_font.as_deref() == Some(font.name) {
            return Err(QuadfontError::InvalidFontData);
        }
        Ok(())
    }

    fn shape(&self, font: FontHandle<'_>, request: &ShapeRequest<'_>) -> Result<Vec<ShapedGlyph>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ShapeCall {
                text: request.text.to_string(),
                direction: request.direction,
                language: request.language.to_string(),
                features: request.features.to_vec(),
                variations: font.variations.to_vec(),
            });
        }
        Ok(request
            .text
            .chars()
            .enumerate()
            .map(|(cluster, ch)| ShapedGlyph {
                glyph_index: ch as u32,
                x_offset: 0.0,
                y_offset: self.y_offset,
                x_advance: ADVANCE,
                y_advance: 0.0,
                cluster: cluster as u32,
            })
            .collect())
    }
}

impl MockShaper {
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn last_call(&self) -> Option<ShapeCall> {
        self.calls.lock().ok().and_then(|calls| calls.last().cloned())
    }
}

/// Bidi reorderer that either reverses the text or always fails.
pub struct MockBidi {
    pub fail: bool,
}

impl BidiReorderer for MockBidi {
    fn name(&self) -> &str {
        "mock-bidi"
    }

    fn reorder(&self, text: &[char], _direction: Direction) -> Result<Vec<char>> {
        if self.fail {
            return Err(QuadfontError::collaborator("bidi", "reorder refused"));
        }
        Ok(text.iter().rev().copied().collect())
    }
}

/// Recorded atlas upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

pub type UploadLog = Arc<Mutex<Vec<Upload>>>;

/// Install an upload callback that records every upload.
pub fn record_uploads(system: &mut FontSystem) -> UploadLog {
    let log: UploadLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    system.set_texture_upload_callback(move |upload: &AtlasUpload<'_>| {
        if let Ok(mut uploads) = sink.lock() {
            uploads.push(Upload {
                x: upload.x,
                y: upload.y,
                width: upload.width,
                height: upload.height,
                format: upload.format,
                data: upload.data.to_vec(),
            });
        }
    });
    log
}

pub fn upload_count(log: &UploadLog) -> usize {
    log.lock().map(|uploads| uploads.len()).unwrap_or(0)
}

/// System with a single font "sans" covering `chars`.
pub fn system_with(chars: &str, config: SystemConfig) -> FontSystem {
    init_logging();
    let rasterizer = Arc::new(MockRasterizer::new().with_font("sans", chars));
    let mut system =
        FontSystem::new(config, Collaborators::new(rasterizer)).expect("valid config");
    let sans = system
        .add_font("sans", FontSource::Static(b"sans"))
        .expect("font registered");
    system.set_font(sans);
    system.set_size(16.0);
    system
}
