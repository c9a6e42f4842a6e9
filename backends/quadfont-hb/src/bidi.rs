// this_file: backends/quadfont-hb/src/bidi.rs

//! Visual reordering with the Unicode bidirectional algorithm.

use quadfont_core::{BidiReorderer, Direction, Result};
use unicode_bidi::{BidiInfo, Level};

/// Reorders each paragraph of a span into visual order.
///
/// Mirrored characters are left as they are; the run is shaped left to right
/// afterwards, so brackets inside right-to-left text keep their logical glyph.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeBidi;

fn paragraph_level(direction: Direction) -> Option<Level> {
    match direction {
        Direction::LeftToRight => Some(Level::ltr()),
        Direction::RightToLeft => Some(Level::rtl()),
        Direction::Auto => None,
    }
}

impl BidiReorderer for UnicodeBidi {
    fn name(&self) -> &str {
        "unicode-bidi"
    }

    fn reorder(&self, text: &[char], direction: Direction) -> Result<Vec<char>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let text: String = text.iter().collect();
        let bidi = BidiInfo::new(&text, paragraph_level(direction));

        let mut visual = String::with_capacity(text.len());
        for paragraph in &bidi.paragraphs {
            visual.push_str(&bidi.reorder_line(paragraph, paragraph.range.clone()));
        }
        Ok(visual.chars().collect())
    }
}
