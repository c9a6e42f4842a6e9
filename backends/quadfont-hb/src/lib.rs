// this_file: backends/quadfont-hb/src/lib.rs

//! HarfBuzz backend for the quadfont text engine.
//!
//! Provides every collaborator the core needs over one shared [`FontStore`]:
//! ttf-parser for cmap lookups, metrics, outlines, strikes and `kern`;
//! tiny-skia for coverage rasterization and strike resampling; HarfBuzz for
//! shaping; unicode-bidi for visual reordering.

pub mod bidi;
pub mod color;
pub mod fonts;
pub mod kerning;
pub mod outline;
pub mod raster;
pub mod shaping;

pub use bidi::UnicodeBidi;
pub use color::StrikeCompositor;
pub use fonts::{FontData, FontStore};
pub use kerning::KernTable;
pub use outline::GlyphOutlines;
pub use raster::SkiaRasterizer;
pub use shaping::HarfBuzzShaper;

use quadfont_core::Collaborators;
use std::sync::Arc;

/// Bundle of HarfBuzz-based collaborators sharing one font store.
///
/// Fonts are cached by registry id, so use one backend per font system.
pub struct HarfBuzzBackend {
    store: Arc<FontStore>,
}

impl HarfBuzzBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(FontStore::new()),
        }
    }

    pub fn store(&self) -> &Arc<FontStore> {
        &self.store
    }

    pub fn name(&self) -> &str {
        "HarfBuzz+tiny-skia"
    }

    /// All six collaborators wired to this backend's store.
    pub fn collaborators(&self) -> Collaborators {
        let store = &self.store;
        Collaborators::new(Arc::new(SkiaRasterizer::new(store.clone())))
            .with_color(Arc::new(StrikeCompositor::new(store.clone())))
            .with_shaper(Arc::new(HarfBuzzShaper::new(store.clone())))
            .with_bidi(Arc::new(UnicodeBidi))
            .with_outlines(Arc::new(GlyphOutlines::new(store.clone())))
            .with_kerning(Arc::new(KernTable::new(store.clone())))
    }

    pub fn into_collaborators(self) -> Collaborators {
        self.collaborators()
    }

    pub fn clear_cache(&self) {
        self.store.clear();
    }
}

impl Default for HarfBuzzBackend {
    fn default() -> Self {
        Self::new()
    }
}
