// this_file: backends/quadfont-hb/src/outline.rs

//! Glyph outlines for the distance field path.

use crate::fonts::{scale_for, FontStore};
use crate::raster::advance;
use kurbo::{CubicBez, Point};
use quadfont_core::{FontHandle, OutlineGlyph, OutlineSource, QuadfontError, Result};
use quadfont_sdf::{Outline, OutlinePen};
use std::sync::Arc;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Tolerance in pixels when splitting cubic curves into quadratics.
const CUBIC_TOLERANCE: f64 = 0.1;

/// Records ttf-parser outline commands into a distance field outline,
/// scaled to pixels with y up.
pub(crate) struct PenBuilder {
    pen: OutlinePen,
    scale: f64,
    current: Point,
}

impl PenBuilder {
    pub(crate) fn new(scale: f32) -> Self {
        Self {
            pen: OutlinePen::new(),
            scale: scale as f64,
            current: Point::ZERO,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(x as f64 * self.scale, y as f64 * self.scale)
    }

    pub(crate) fn finish(self) -> Outline {
        self.pen.finish()
    }
}

impl OutlineBuilder for PenBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.pen.move_to(p.x, p.y);
        self.current = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.pen.line_to(p.x, p.y);
        self.current = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.point(x1, y1), self.point(x, y));
        self.pen.quad_to(c.x, c.y, p.x, p.y);
        self.current = p;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let cubic = CubicBez::new(
            self.current,
            self.point(x1, y1),
            self.point(x2, y2),
            self.point(x, y),
        );
        for (_, _, quad) in cubic.to_quads(CUBIC_TOLERANCE) {
            self.pen.quad_to(quad.p1.x, quad.p1.y, quad.p2.x, quad.p2.y);
        }
        self.current = cubic.p3;
    }

    fn close(&mut self) {
        self.pen.close();
    }
}

/// Outline source over the shared font store.
pub struct GlyphOutlines {
    store: Arc<FontStore>,
}

impl GlyphOutlines {
    pub fn new(store: Arc<FontStore>) -> Self {
        Self { store }
    }
}

fn decompose(face: &Face<'_>, glyph: u32, size: u32) -> Result<OutlineGlyph> {
    let gid = u16::try_from(glyph)
        .map(GlyphId)
        .map_err(|_| QuadfontError::collaborator("outline", format!("glyph {glyph} out of range")))?;
    let scale = scale_for(face, size);
    let advance_x = advance(face, gid, scale, false);

    let mut builder = PenBuilder::new(scale);
    if face.outline_glyph(gid, &mut builder).is_some() {
        return Ok(OutlineGlyph {
            shape: Some(builder.finish()),
            advance_x,
        });
    }

    // Strike-only glyphs have pixels but no contours; blank glyphs have neither.
    let shape = if face.glyph_raster_image(gid, size.min(u16::MAX as u32) as u16).is_some() {
        None
    } else {
        Some(Outline::default())
    };
    Ok(OutlineGlyph { shape, advance_x })
}

impl OutlineSource for GlyphOutlines {
    fn name(&self) -> &str {
        "ttf-outlines"
    }

    fn decompose(&self, font: FontHandle<'_>, glyph: u32, size: u32) -> Result<OutlineGlyph> {
        self.store.with_face(font, |face| decompose(face, glyph, size))?
    }
}
