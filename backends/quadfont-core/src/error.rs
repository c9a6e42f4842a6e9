// this_file: backends/quadfont-core/src/error.rs

//! Error types for quadfont.
//!
//! Only explicit management calls (font registration, fallback links, state
//! stack, atlas resizing, configuration) surface these errors. Glyph
//! iteration logs failures and skips the affected glyph instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FontId;

/// Main error type for quadfont operations.
#[derive(Error, Debug)]
pub enum QuadfontError {
    /// Font registry reached its fixed capacity
    #[error("Font registry is full ({capacity} fonts)")]
    RegistryFull { capacity: usize },

    /// No font registered under this name
    #[error("Font not found: {name}")]
    FontNotFound { name: String },

    /// Font id that was never handed out by the registry
    #[error("Unknown font id {id}")]
    UnknownFont { id: usize },

    /// No row of the atlas can hold the requested rectangle
    #[error("Atlas {width}x{height} has no room for a {requested_width}x{requested_height} glyph")]
    AtlasFull {
        width: u32,
        height: u32,
        requested_width: u32,
        requested_height: u32,
    },

    /// Atlas row table is exhausted
    #[error("Atlas row limit of {max_rows} reached")]
    RowLimit { max_rows: usize },

    /// Atlas dimensions rejected by reset or expand
    #[error("Invalid atlas size {width}x{height}: {reason}")]
    InvalidAtlasSize {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Render state stack is at its maximum depth
    #[error("Render state stack overflow (max depth {depth})")]
    StateOverflow { depth: usize },

    /// Pop attempted on the base render state
    #[error("Render state stack underflow")]
    StateUnderflow,

    /// Glyph absent from the font
    #[error("Glyph {glyph} missing from font {font}")]
    GlyphMissing { font: usize, glyph: u32 },

    /// A rasterizer, shaper, bidi or outline collaborator failed
    #[error("{stage} failed: {reason}")]
    Collaborator { stage: &'static str, reason: String },

    /// Font file could not be read
    #[error("Failed to load font from {path}: {source}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font bytes could not be parsed
    #[error("Invalid font data")]
    InvalidFontData,

    /// Configuration values out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl QuadfontError {
    pub fn collaborator(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            stage,
            reason: reason.into(),
        }
    }

    pub fn font_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FontLoad {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_font(font: FontId) -> Self {
        Self::UnknownFont { id: font.0 }
    }

    pub fn glyph_missing(font: FontId, glyph: u32) -> Self {
        Self::GlyphMissing {
            font: font.0,
            glyph,
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether the error reports exhausted capacity that a reset can recover.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::RegistryFull { .. }
                | Self::AtlasFull { .. }
                | Self::RowLimit { .. }
        )
    }
}
