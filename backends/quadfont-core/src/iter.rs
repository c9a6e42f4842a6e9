// this_file: backends/quadfont-core/src/iter.rs

//! Codepoint-driven quad iteration.

use crate::cache::GlyphRecord;
use crate::state::RenderState;
use crate::system::{align_offset, FontSystem};
use crate::types::{FontId, GlyphId, GlyphKey, HAlign, Quad};
use crate::utils::decode_utf8;
use log::trace;
use std::iter::FusedIterator;

/// Build the screen and texture rectangle for a record drawn at a pen position.
///
/// Empty records produce a zero-area quad at the pen.
pub(crate) fn emit_quad(record: &GlyphRecord, key: GlyphKey, x: f32, y: f32, cluster: usize) -> Quad {
    let (x0, y0) = if record.is_empty() {
        (x, y)
    } else {
        (x + record.bearing_x, y - record.bearing_y)
    };
    Quad {
        x0,
        y0,
        x1: x0 + record.width as f32,
        y1: y0 + record.height as f32,
        s0: record.s0,
        t0: record.t0,
        s1: record.s1,
        t1: record.t1,
        glyph: key.glyph,
        font: key.font,
        cluster,
        color: record.color,
    }
}

/// Pull iterator emitting one quad per resolvable codepoint of a byte span.
///
/// Each step decodes one codepoint, resolves it in the active font or its
/// fallback, fills the glyph cache on a miss, applies kerning and advances
/// the pen. Codepoints without a glyph are skipped; the loop only ever moves
/// forward through the span, so it ends on any input.
pub struct TextIter<'a> {
    system: &'a mut FontSystem,
    text: &'a [u8],
    pos: usize,
    state: RenderState,
    size: u32,
    origin: (f32, f32),
    x: f32,
    y: f32,
    prev: Option<(FontId, u32)>,
}

impl<'a> TextIter<'a> {
    pub(crate) fn new(system: &'a mut FontSystem, x: f32, y: f32, text: &'a [u8]) -> Self {
        let state = *system.state();
        let y = y + system.baseline_shift(&state);
        let x = if state.h_align == HAlign::Left {
            x
        } else {
            let width = TextIter::unaligned(&mut *system, 0.0, 0.0, text, state).run_to_end();
            x - align_offset(state.h_align, width)
        };
        TextIter::unaligned(system, x, y, text, state)
    }

    fn unaligned(
        system: &'a mut FontSystem,
        x: f32,
        y: f32,
        text: &'a [u8],
        state: RenderState,
    ) -> Self {
        Self {
            system,
            text,
            pos: 0,
            size: state.pixel_size(),
            state,
            origin: (x, y),
            x,
            y,
            prev: None,
        }
    }

    /// Consume the iterator and return the final pen x.
    fn run_to_end(mut self) -> f32 {
        while self.next().is_some() {}
        self.x
    }

    /// Pen position after alignment, before the first glyph.
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Current pen position.
    pub fn cursor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Byte offset of the next codepoint to decode.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for TextIter<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        let font = self.state.font?;
        while let Some((ch, len)) = decode_utf8(&self.text[self.pos..]) {
            let cluster = self.pos;
            self.pos += len;

            let Some((glyph_font, index)) = self.system.resolve_codepoint(font, ch) else {
                trace!(target: "quadfont::iter", "no glyph for {ch:?}, skipping");
                self.prev = None;
                continue;
            };
            let key = self
                .system
                .glyph_key(GlyphId::Codepoint(ch as u32), glyph_font, self.size);
            let Some(record) = self.system.glyph(key, index, &self.state) else {
                self.prev = None;
                continue;
            };

            if self.state.kerning {
                if let Some((prev_font, prev_index)) = self.prev {
                    if prev_font == glyph_font {
                        self.x += self.system.kerning(glyph_font, prev_index, index, self.size);
                    }
                }
            }

            let quad = emit_quad(&record, key, self.x, self.y, cluster);
            self.x += record.advance + self.state.spacing;
            self.prev = Some((glyph_font, index));
            return Some(quad);
        }
        None
    }
}

impl FusedIterator for TextIter<'_> {}
