// this_file: backends/quadfont-core/src/shaped.rs

//! Shaping-run-driven quad iteration.

use crate::iter::emit_quad;
use crate::state::RenderState;
use crate::system::{align_offset, FontSystem};
use crate::types::{Direction, FontId, GlyphId, Quad, ShapedGlyph};
use crate::utils::decode_all;
use log::warn;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Pull iterator over the glyphs of one shaping run.
///
/// Construction decodes the span, reorders it into visual order with the
/// bidi collaborator and shapes it against the active font. Iteration then
/// walks the shaped glyph list; fallback fonts are never consulted.
pub struct ShapedTextIter<'a> {
    system: &'a mut FontSystem,
    glyphs: Arc<[ShapedGlyph]>,
    index: usize,
    font: Option<FontId>,
    state: RenderState,
    size: u32,
    origin: (f32, f32),
    x: f32,
    y: f32,
}

impl<'a> ShapedTextIter<'a> {
    pub(crate) fn new(
        system: &'a mut FontSystem,
        x: f32,
        y: f32,
        text: &[u8],
        direction: Direction,
    ) -> Self {
        let state = *system.state();
        let size = state.pixel_size();
        let glyphs = match state.font {
            Some(font) => shape_text(system, font, text, size, direction),
            None => Arc::from(Vec::new()),
        };

        // Shaped advances are final; letter spacing only applies per codepoint.
        let width: f32 = glyphs.iter().map(|glyph| glyph.x_advance).sum();
        let x = x - align_offset(state.h_align, width);
        let y = y + system.baseline_shift(&state);

        Self {
            system,
            glyphs,
            index: 0,
            font: state.font,
            state,
            size,
            origin: (x, y),
            x,
            y,
        }
    }

    /// Pen position after alignment, before the first glyph.
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Current pen position.
    pub fn cursor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// The shaped glyphs this iterator walks.
    pub fn glyphs(&self) -> &[ShapedGlyph] {
        &self.glyphs
    }
}

/// Decode, reorder and shape a span. Failures yield an empty run.
fn shape_text(
    system: &mut FontSystem,
    font: FontId,
    text: &[u8],
    size: u32,
    direction: Direction,
) -> Arc<[ShapedGlyph]> {
    let logical: Vec<char> = decode_all(text).into_iter().map(|(_, ch)| ch).collect();
    if logical.is_empty() {
        return Arc::from(Vec::new());
    }

    // A reordered run is already in visual order and is shaped left to right.
    let (visual, shaping_direction) = match system.collaborators().bidi.as_ref() {
        Some(bidi) => match bidi.reorder(&logical, direction) {
            Ok(visual) => (visual, Direction::LeftToRight),
            Err(err) => {
                warn!(target: "quadfont::shape", "bidi reorder failed, keeping logical order: {err}");
                (logical, direction)
            }
        },
        None => (logical, direction),
    };

    let visual: String = visual.into_iter().collect();
    system
        .shape_run(font, &visual, size, shaping_direction)
        .unwrap_or_else(|| Arc::from(Vec::new()))
}

impl Iterator for ShapedTextIter<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        let font = self.font?;
        while let Some(glyph) = self.glyphs.get(self.index).copied() {
            self.index += 1;

            // Shaper offsets are y-up; the screen is y-down.
            let pen_x = self.x + glyph.x_offset;
            let pen_y = self.y - glyph.y_offset;
            self.x += glyph.x_advance;
            self.y -= glyph.y_advance;

            let key = self
                .system
                .glyph_key(GlyphId::Index(glyph.glyph_index), font, self.size);
            if let Some(record) = self.system.glyph(key, glyph.glyph_index, &self.state) {
                return Some(emit_quad(&record, key, pen_x, pen_y, glyph.cluster as usize));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.glyphs.len() - self.index))
    }
}

impl FusedIterator for ShapedTextIter<'_> {}
