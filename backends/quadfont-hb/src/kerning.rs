// this_file: backends/quadfont-hb/src/kerning.rs

//! Pair kerning from the legacy `kern` table.

use crate::fonts::{scale_for, FontStore};
use quadfont_core::{FontHandle, KerningSource};
use std::sync::Arc;
use ttf_parser::{Face, GlyphId};

/// Reads horizontal, non-variable `kern` subtables.
///
/// GPOS kerning is only applied by the shaper, so codepoint iteration
/// sees no kerning for fonts without a `kern` table.
pub struct KernTable {
    store: Arc<FontStore>,
}

impl KernTable {
    pub fn new(store: Arc<FontStore>) -> Self {
        Self { store }
    }
}

fn pair_units(face: &Face<'_>, left: GlyphId, right: GlyphId) -> Option<i16> {
    let kern = face.tables().kern?;
    kern.subtables
        .into_iter()
        .filter(|subtable| subtable.horizontal && !subtable.variable)
        .find_map(|subtable| subtable.glyphs_kerning(left, right))
}

impl KerningSource for KernTable {
    fn name(&self) -> &str {
        "kern-table"
    }

    fn kerning(&self, font: FontHandle<'_>, left: u32, right: u32, size: u32) -> f32 {
        let (Ok(left), Ok(right)) = (u16::try_from(left), u16::try_from(right)) else {
            return 0.0;
        };
        self.store
            .with_face(font, |face| {
                pair_units(face, GlyphId(left), GlyphId(right))
                    .map_or(0.0, |units| units as f32 * scale_for(face, size))
            })
            .unwrap_or(0.0)
    }
}
