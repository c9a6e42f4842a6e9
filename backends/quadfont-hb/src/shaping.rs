// this_file: backends/quadfont-hb/src/shaping.rs

//! HarfBuzz text shaping.

use crate::fonts::FontStore;
use harfbuzz_rs::{
    Face as HbFace, Feature as HbFeature, Font as HbFont, Language, Tag, UnicodeBuffer,
    Variation as HbVariation,
};
use log::trace;
use quadfont_core::{
    Direction, Feature, FontHandle, QuadfontError, Result, ShapeRequest, ShapedGlyph, TextShaper,
    Variation,
};
use std::str::FromStr;
use std::sync::Arc;

/// HarfBuzz positions are 26.6 fixed point at a scale of `size * 64`.
const POSITION_SCALE: f32 = 64.0;

/// Shaper creating a HarfBuzz font over the stored bytes for each run.
pub struct HarfBuzzShaper {
    store: Arc<FontStore>,
}

impl HarfBuzzShaper {
    pub fn new(store: Arc<FontStore>) -> Self {
        Self { store }
    }
}

fn hb_direction(direction: Direction) -> Option<harfbuzz_rs::Direction> {
    match direction {
        Direction::LeftToRight => Some(harfbuzz_rs::Direction::Ltr),
        Direction::RightToLeft => Some(harfbuzz_rs::Direction::Rtl),
        Direction::Auto => None,
    }
}

fn hb_tag([a, b, c, d]: [u8; 4]) -> Tag {
    Tag::new(a as char, b as char, c as char, d as char)
}

fn hb_feature(feature: &Feature) -> HbFeature {
    HbFeature::new(hb_tag(feature.tag), feature.value, ..)
}

fn shape_bytes(
    bytes: &[u8],
    variations: &[Variation],
    request: &ShapeRequest<'_>,
) -> Vec<ShapedGlyph> {
    let face = HbFace::from_bytes(bytes, 0);
    let mut font = HbFont::new(face);
    let scale = (request.size as f32 * POSITION_SCALE) as i32;
    font.set_scale(scale, scale);
    if !variations.is_empty() {
        let variations: Vec<HbVariation> = variations
            .iter()
            .map(|variation| HbVariation::new(hb_tag(variation.tag), variation.value))
            .collect();
        font.set_variations(&variations);
    }

    let mut buffer = UnicodeBuffer::new()
        .add_str(request.text)
        .set_language(Language::from_str(request.language).unwrap_or_default());
    if let Some(direction) = hb_direction(request.direction) {
        buffer = buffer.set_direction(direction);
    }
    let buffer = buffer.guess_segment_properties();

    let features: Vec<HbFeature> = request.features.iter().map(hb_feature).collect();
    let output = harfbuzz_rs::shape(&font, buffer, &features);

    output
        .get_glyph_infos()
        .iter()
        .zip(output.get_glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_index: info.codepoint,
            x_offset: pos.x_offset as f32 / POSITION_SCALE,
            y_offset: pos.y_offset as f32 / POSITION_SCALE,
            x_advance: pos.x_advance as f32 / POSITION_SCALE,
            y_advance: pos.y_advance as f32 / POSITION_SCALE,
            cluster: info.cluster,
        })
        .collect()
}

impl TextShaper for HarfBuzzShaper {
    fn name(&self) -> &str {
        "harfbuzz"
    }

    fn prepare(&self, font: FontHandle<'_>) -> Result<()> {
        let glyphs = self.store.with_face(font, |face| face.number_of_glyphs())?;
        if glyphs == 0 {
            return Err(QuadfontError::InvalidFontData);
        }
        trace!(target: "quadfont::shape", "prepared {} with {glyphs} glyphs", font.name);
        Ok(())
    }

    fn shape(&self, font: FontHandle<'_>, request: &ShapeRequest<'_>) -> Result<Vec<ShapedGlyph>> {
        self.store
            .with_bytes(font, |bytes| shape_bytes(bytes, font.variations, request))
    }
}
