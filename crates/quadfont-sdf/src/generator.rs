// this_file: crates/quadfont-sdf/src/generator.rs

//! SDF and MSDF bitmap generation.

use crate::distance::{edge_distance, is_inside};
use crate::outline::{ChannelMask, Outline};
use crate::Result;
use kurbo::{Point, Rect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Neutral value written into placeholder fields.
pub const PLACEHOLDER_VALUE: u8 = 128;

/// Largest number of pixels a single field may have.
pub const MAX_FIELD_PIXELS: u64 = 4096 * 4096;

/// Errors raised for unusable generation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Invalid distance field parameters: {reason}")]
    InvalidParams { reason: String },
}

impl FieldError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Output geometry and normalization for a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Empty border kept around the outline, in pixels
    pub padding: u32,
    /// Distance (in output pixels) mapped to the full `[0, 1]` value range
    pub range: f32,
    /// Fixed outline-to-pixel scale; `None` fits the outline into the cell
    #[serde(default)]
    pub scale: Option<f32>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            padding: 4,
            range: 4.0,
            scale: None,
        }
    }
}

impl FieldParams {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Pixel count of a validated field.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::invalid("field must have a non-zero size"));
        }
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(FieldError::invalid(format!(
                "range must be positive, got {}",
                self.range
            )));
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_FIELD_PIXELS {
            return Err(FieldError::invalid(format!(
                "{}x{} field exceeds {MAX_FIELD_PIXELS} pixels",
                self.width, self.height
            )));
        }
        let border = self.padding.saturating_mul(2);
        if border >= self.width || border >= self.height {
            return Err(FieldError::invalid(format!(
                "padding {} leaves no room in a {}x{} field",
                self.padding, self.width, self.height
            )));
        }
        if let Some(scale) = self.scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(FieldError::invalid(format!(
                    "scale must be positive, got {scale}"
                )));
            }
        }
        Ok(())
    }
}

/// Which kind of field to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single channel signed distance field
    Sdf,
    /// Three distance channels plus opaque alpha
    Msdf,
}

impl FieldKind {
    /// Bytes per pixel of the generated bitmap.
    pub fn channels(self) -> usize {
        match self {
            FieldKind::Sdf => 1,
            FieldKind::Msdf => 4,
        }
    }
}

/// Whether a field holds real distances or a neutral stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Generated,
    /// The glyph had no outline; the field is filled with mid-gray.
    Placeholder,
}

/// Glyph shape handed to the generator.
#[derive(Debug, Clone, Copy)]
pub enum GlyphSource<'a> {
    Outline(&'a Outline),
    /// Pre-rendered bitmap glyph (color strike, bitmap-only font)
    Bitmap,
}

/// A generated distance field bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    pub width: u32,
    pub height: u32,
    pub kind: FieldKind,
    pub status: FieldStatus,
    /// Pixel position (y down, from the top-left corner) of the outline origin
    pub origin_x: f32,
    pub origin_y: f32,
    /// Outline units to pixels
    pub scale: f32,
    pub data: Vec<u8>,
}

impl DistanceField {
    /// Neutral field used when the source cannot be distance-fielded.
    pub fn placeholder(kind: FieldKind, params: &FieldParams) -> Self {
        let pixels = params.pixel_count();
        let data = match kind {
            FieldKind::Sdf => vec![PLACEHOLDER_VALUE; pixels],
            FieldKind::Msdf => [PLACEHOLDER_VALUE, PLACEHOLDER_VALUE, PLACEHOLDER_VALUE, 255]
                .repeat(pixels),
        };
        Self {
            width: params.width,
            height: params.height,
            kind,
            status: FieldStatus::Placeholder,
            origin_x: params.padding as f32,
            origin_y: params.height.saturating_sub(params.padding) as f32,
            scale: 1.0,
            data,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.status == FieldStatus::Placeholder
    }

    pub fn channels(&self) -> usize {
        self.kind.channels()
    }

    /// Bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.channels();
        let start = (y * self.width + x) as usize * channels;
        &self.data[start..start + channels]
    }
}

/// Mapping from output pixels into outline space.
#[derive(Debug, Clone, Copy)]
struct Placement {
    bounds: Rect,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Placement {
    fn fit(bounds: Rect, params: &FieldParams) -> Self {
        let inner_w = (params.width - 2 * params.padding) as f64;
        let inner_h = (params.height - 2 * params.padding) as f64;
        let scale = match params.scale {
            Some(scale) => scale as f64,
            None => {
                let sx = if bounds.width() > 0.0 {
                    inner_w / bounds.width()
                } else {
                    f64::MAX
                };
                let sy = if bounds.height() > 0.0 {
                    inner_h / bounds.height()
                } else {
                    f64::MAX
                };
                let fitted = sx.min(sy);
                if fitted == f64::MAX {
                    1.0
                } else {
                    fitted
                }
            }
        };
        // Center the outline inside the padded cell.
        let offset_x = params.padding as f64 + (inner_w - bounds.width() * scale) / 2.0;
        let offset_y = params.padding as f64 + (inner_h - bounds.height() * scale) / 2.0;
        Self {
            bounds,
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Outline-space position of the center of pixel `(x, y)`.
    fn to_outline(&self, x: u32, y: u32) -> Point {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        Point::new(
            self.bounds.x0 + (px - self.offset_x) / self.scale,
            self.bounds.y1 - (py - self.offset_y) / self.scale,
        )
    }

    fn origin(&self) -> (f32, f32) {
        (
            (self.offset_x - self.bounds.x0 * self.scale) as f32,
            (self.offset_y + self.bounds.y1 * self.scale) as f32,
        )
    }
}

/// Map a signed pixel distance onto a byte, 0.5 at the outline boundary.
fn encode(distance_px: f64, range: f64) -> u8 {
    let value = (0.5 + 0.5 * (distance_px / range)).clamp(0.0, 1.0);
    (value * 255.0).round() as u8
}

/// Generate a single channel signed distance field.
pub fn generate_sdf(source: GlyphSource<'_>, params: &FieldParams) -> Result<DistanceField> {
    generate(FieldKind::Sdf, source, params)
}

/// Generate a multi-channel signed distance field (RGB distances, opaque alpha).
pub fn generate_msdf(source: GlyphSource<'_>, params: &FieldParams) -> Result<DistanceField> {
    generate(FieldKind::Msdf, source, params)
}

/// Generate a field of the requested kind.
pub fn generate(
    kind: FieldKind,
    source: GlyphSource<'_>,
    params: &FieldParams,
) -> Result<DistanceField> {
    params.validate()?;

    let outline = match source {
        GlyphSource::Outline(outline) => outline,
        GlyphSource::Bitmap => {
            warn!(
                target: "quadfont::sdf",
                "bitmap glyph source cannot be distance-fielded, emitting placeholder"
            );
            return Ok(DistanceField::placeholder(kind, params));
        }
    };

    let Some(bounds) = outline.bounds() else {
        // No contours: every pixel is outside at maximum distance.
        let (origin_x, origin_y) = (params.padding as f32, (params.height - params.padding) as f32);
        let mut data = vec![0u8; params.pixel_count() * kind.channels()];
        if kind == FieldKind::Msdf {
            data.chunks_exact_mut(4).for_each(|px| px[3] = 255);
        }
        return Ok(DistanceField {
            width: params.width,
            height: params.height,
            kind,
            status: FieldStatus::Generated,
            origin_x,
            origin_y,
            scale: params.scale.unwrap_or(1.0),
            data,
        });
    };

    let placement = Placement::fit(bounds, params);
    let range = params.range as f64;
    let channels = kind.channels();
    let mut data = vec![0u8; params.pixel_count() * channels];

    // Channel membership is fixed per edge; compute it once.
    let edges: Vec<_> = outline.edges().map(|edge| (*edge, edge.channels())).collect();

    for y in 0..params.height {
        for x in 0..params.width {
            let p = placement.to_outline(x, y);
            let sign = if is_inside(outline, p) { 1.0 } else { -1.0 };
            let offset = (y * params.width + x) as usize * channels;

            match kind {
                FieldKind::Sdf => {
                    let nearest = edges
                        .iter()
                        .map(|(edge, _)| edge_distance(edge, p))
                        .fold(f64::MAX, f64::min);
                    data[offset] = encode(sign * nearest * placement.scale, range);
                }
                FieldKind::Msdf => {
                    let mut per_channel = [f64::MAX; 3];
                    let mut nearest = f64::MAX;
                    for (edge, mask) in &edges {
                        let d = edge_distance(edge, p);
                        nearest = nearest.min(d);
                        for (slot, channel) in ChannelMask::all().into_iter().enumerate() {
                            if mask.contains(channel) {
                                per_channel[slot] = per_channel[slot].min(d);
                            }
                        }
                    }
                    for (slot, distance) in per_channel.into_iter().enumerate() {
                        // Channels without edges fall back to the true distance.
                        let distance = if distance == f64::MAX { nearest } else { distance };
                        data[offset + slot] = encode(sign * distance * placement.scale, range);
                    }
                    data[offset + 3] = 255;
                }
            }
        }
    }

    let (origin_x, origin_y) = placement.origin();
    debug!(
        target: "quadfont::sdf",
        "generated {kind:?} {w}x{h} edges={edges} scale={scale:.3}",
        w = params.width,
        h = params.height,
        edges = edges.len(),
        scale = placement.scale,
    );

    Ok(DistanceField {
        width: params.width,
        height: params.height,
        kind,
        status: FieldStatus::Generated,
        origin_x,
        origin_y,
        scale: placement.scale as f32,
        data,
    })
}
