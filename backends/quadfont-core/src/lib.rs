// this_file: backends/quadfont-core/src/lib.rs

//! Core of the quadfont text engine.
//!
//! A [`FontSystem`] owns the font registry, the render state stack, the
//! atlas packer and the glyph cache. Text is turned into textured quads by
//! pulling from [`TextIter`] (one glyph per codepoint) or [`ShapedTextIter`]
//! (one glyph per shaped glyph). Font parsing, rasterization, shaping and
//! bidi reordering are delegated to the collaborators in [`traits`].

pub mod atlas;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod iter;
pub mod registry;
pub mod shaped;
pub mod state;
pub mod surface;
pub mod system;
pub mod traits;
pub mod types;
pub mod utils;

pub use atlas::{AtlasPacker, AtlasRow};
pub use cache::{CacheStats, GlyphCache, GlyphRecord, ShapeCache, ShapeKey};
pub use config::{FieldConfig, SystemConfig};
pub use diagnostics::SystemDiagnostics;
pub use error::QuadfontError;
pub use iter::TextIter;
pub use registry::{ColorSupport, FontRecord, FontRegistry, ShapingStatus};
pub use shaped::ShapedTextIter;
pub use state::{RenderState, StateStack};
pub use system::FontSystem;
pub use traits::{
    BidiReorderer, Collaborators, ColorCompositor, FontHandle, GlyphRasterizer, KerningSource,
    OutlineGlyph, OutlineSource, RasterRequest, ShapeRequest, TextShaper,
};
pub use types::{
    AtlasUpload, ColorBitmap, Direction, Feature, FieldMode, FontId, FontSource, GlyphBitmap,
    GlyphId, GlyphKey, HAlign, LineBounds, PixelFormat, Quad, RenderMode, ShapedGlyph,
    TextBounds, VAlign, Variation, VariationId, VerticalMetrics,
};

/// Result type for quadfont operations
pub type Result<T> = std::result::Result<T, QuadfontError>;
