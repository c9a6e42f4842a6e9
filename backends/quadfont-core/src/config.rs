// this_file: backends/quadfont-core/src/config.rs

//! Construction-time limits and defaults of a [`FontSystem`](crate::FontSystem).

use crate::{QuadfontError, Result};
use serde::{Deserialize, Serialize};

/// Distance field defaults used when a font renders through the field path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Distance in pixels mapped onto the full value range
    pub range: f32,
    /// Empty border around the outline inside each field cell
    pub padding: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            range: 4.0,
            padding: 4,
        }
    }
}

/// Limits and defaults of a font system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub max_fonts: usize,
    pub max_rows: usize,
    pub max_states: usize,
    /// Upper bound on cached glyph records; `None` leaves the atlas as the only limit
    pub max_glyphs: Option<usize>,
    /// Empty texels kept around every packed glyph
    pub glyph_padding: u32,
    pub shape_cache_size: usize,
    pub field: FieldConfig,
    /// Default shaping language (BCP-47)
    pub language: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            atlas_width: 512,
            atlas_height: 512,
            max_fonts: 32,
            max_rows: 256,
            max_states: 20,
            max_glyphs: None,
            glyph_padding: 1,
            shape_cache_size: 256,
            field: FieldConfig::default(),
            language: "en".to_string(),
        }
    }
}

impl SystemConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SystemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_atlas_size(mut self, width: u32, height: u32) -> Self {
        self.atlas_width = width;
        self.atlas_height = height;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.atlas_width == 0 || self.atlas_height == 0 {
            return Err(QuadfontError::InvalidAtlasSize {
                width: self.atlas_width,
                height: self.atlas_height,
                reason: "atlas dimensions must be non-zero".to_string(),
            });
        }
        if self.max_fonts == 0 {
            return Err(QuadfontError::invalid_config("max_fonts must be at least 1"));
        }
        if self.max_rows == 0 {
            return Err(QuadfontError::invalid_config("max_rows must be at least 1"));
        }
        if self.max_states == 0 {
            return Err(QuadfontError::invalid_config("max_states must be at least 1"));
        }
        if !(self.field.range.is_finite() && self.field.range > 0.0) {
            return Err(QuadfontError::invalid_config(format!(
                "field.range must be positive, got {}",
                self.field.range
            )));
        }
        Ok(())
    }
}
