// this_file: backends/quadfont-hb/src/raster.rs

//! Grayscale glyph rasterization with ttf-parser outlines and tiny-skia.

use crate::fonts::{scale_for, FontStore};
use log::{debug, trace};
use quadfont_core::surface::{box_blur, threshold};
use quadfont_core::{
    FontHandle, GlyphBitmap, GlyphRasterizer, QuadfontError, RasterRequest, RenderMode, Result,
    VerticalMetrics,
};
use std::sync::Arc;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Outline builder for converting TrueType outlines to tiny-skia paths (y down).
pub(crate) struct SkiaOutlineBuilder {
    builder: PathBuilder,
    scale: f32,
}

impl SkiaOutlineBuilder {
    pub(crate) fn new(scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            scale,
        }
    }

    pub(crate) fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for SkiaOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x * self.scale, -y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x * self.scale, -y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            x1 * self.scale,
            -y1 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            x1 * self.scale,
            -y1 * self.scale,
            x2 * self.scale,
            -y2 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Coverage rasterizer over the shared font store.
pub struct SkiaRasterizer {
    store: Arc<FontStore>,
}

impl SkiaRasterizer {
    pub fn new(store: Arc<FontStore>) -> Self {
        Self { store }
    }
}

/// Horizontal advance of a glyph in pixels.
pub(crate) fn advance(face: &Face<'_>, glyph: GlyphId, scale: f32, hinting: bool) -> f32 {
    let advance = face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    if hinting {
        advance.round()
    } else {
        advance
    }
}

fn render(face: &Face<'_>, glyph: u32, request: &RasterRequest) -> Result<GlyphBitmap> {
    let gid = u16::try_from(glyph)
        .map(GlyphId)
        .map_err(|_| QuadfontError::collaborator("raster", format!("glyph {glyph} out of range")))?;
    let scale = scale_for(face, request.size);
    let advance_x = advance(face, gid, scale, request.hinting);

    let mut builder = SkiaOutlineBuilder::new(scale);
    let path = match face.outline_glyph(gid, &mut builder) {
        Some(_) => builder.finish(),
        None => None,
    };
    let Some(path) = path else {
        trace!(target: "quadfont::raster", "glyph {glyph} has no outline");
        return Ok(GlyphBitmap {
            advance_x,
            ..GlyphBitmap::default()
        });
    };

    let margin = request.blur.ceil().max(0.0) as i32;
    let bounds = path.bounds();
    let left = bounds.left().floor() as i32 - margin;
    let top = bounds.top().floor() as i32 - margin;
    let right = bounds.right().ceil() as i32 + margin;
    let bottom = bounds.bottom().ceil() as i32 + margin;
    let (width, height) = ((right - left).max(1) as u32, (bottom - top).max(1) as u32);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| QuadfontError::collaborator("raster", "failed to create pixmap"))?;
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = request.mode != RenderMode::Mono;
    pixmap.fill_path(
        &path,
        &paint,
        FillRule::Winding,
        Transform::from_translate(-left as f32, -top as f32),
        None,
    );

    let mut pixels: Vec<u8> = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    if request.mode == RenderMode::Mono {
        threshold(&mut pixels, 128);
    }
    if margin > 0 {
        box_blur(&mut pixels, width, height, margin as u32);
    }

    Ok(GlyphBitmap {
        width,
        height,
        bearing_x: left as f32,
        bearing_y: -top as f32,
        advance_x,
        pixels,
    })
}

impl GlyphRasterizer for SkiaRasterizer {
    fn name(&self) -> &str {
        "tiny-skia"
    }

    fn glyph_index(&self, font: FontHandle<'_>, codepoint: char) -> Option<u32> {
        match self.store.with_face(font, |face| face.glyph_index(codepoint)) {
            Ok(index) => index.map(|gid| gid.0 as u32),
            Err(err) => {
                debug!(target: "quadfont::raster", "font {} unusable: {err}", font.name);
                None
            }
        }
    }

    fn rasterize(
        &self,
        font: FontHandle<'_>,
        glyph: u32,
        request: &RasterRequest,
    ) -> Result<GlyphBitmap> {
        self.store
            .with_face(font, |face| render(face, glyph, request))?
    }

    fn vertical_metrics(&self, font: FontHandle<'_>, size: u32) -> Option<VerticalMetrics> {
        self.store
            .with_face(font, |face| {
                let scale = scale_for(face, size);
                let ascender = face.ascender() as f32 * scale;
                let descender = face.descender() as f32 * scale;
                VerticalMetrics {
                    ascender,
                    descender,
                    line_height: ascender - descender + face.line_gap() as f32 * scale,
                }
            })
            .ok()
    }
}
