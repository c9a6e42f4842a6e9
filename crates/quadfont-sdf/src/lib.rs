// this_file: crates/quadfont-sdf/src/lib.rs

//! Distance field generation from glyph outlines.
//!
//! Outlines are sets of closed contours made of line and quadratic edges.
//! The generator produces either a single channel signed distance field
//! (SDF) or a multi-channel field (MSDF) whose three color channels each
//! track the nearest edge among the edges assigned to that channel.

pub mod distance;
pub mod generator;
pub mod outline;

pub use distance::{signed_distance, winding_number};
pub use generator::{
    generate, generate_msdf, generate_sdf, DistanceField, FieldError, FieldKind, FieldParams,
    FieldStatus, GlyphSource,
};
pub use outline::{ChannelMask, Contour, Edge, Outline, OutlinePen};

pub use kurbo::{Point, Rect};

/// Result type for distance field operations
pub type Result<T> = std::result::Result<T, FieldError>;
