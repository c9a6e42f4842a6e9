// this_file: src/lib.rs

//! quadfont: glyph atlas caching and quad emission for GPU text rendering.
//!
//! Re-exports the engine core, the distance field generator and the
//! HarfBuzz backend, and wires them together in [`font_system`].

pub use quadfont_core::*;
pub use quadfont_hb::HarfBuzzBackend;

pub mod sdf {
    pub use quadfont_sdf::*;
}

pub mod backend {
    pub use quadfont_hb::*;
}

/// Font system backed by HarfBuzz, ttf-parser and tiny-skia.
pub fn font_system(config: SystemConfig) -> Result<FontSystem> {
    FontSystem::new(config, HarfBuzzBackend::new().into_collaborators())
}
