// this_file: backends/quadfont-hb/src/color.rs

//! Color glyphs from embedded PNG strikes (CBDT and sbix).

use crate::fonts::{scale_for, FontStore};
use crate::raster::advance;
use log::debug;
use quadfont_core::surface::{premultiply, unpremultiply};
use quadfont_core::{ColorBitmap, ColorCompositor, FontHandle, QuadfontError, Result};
use std::sync::Arc;
use tiny_skia::{FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};
use ttf_parser::{Face, GlyphId, RasterImageFormat};

/// Color compositor scaling the nearest bitmap strike to the requested size.
///
/// Layered (COLR) glyphs are reported as color-capable fonts but have no
/// image here, so the core renders them through the grayscale path.
pub struct StrikeCompositor {
    store: Arc<FontStore>,
}

impl StrikeCompositor {
    pub fn new(store: Arc<FontStore>) -> Self {
        Self { store }
    }
}

fn color_error(reason: impl Into<String>) -> QuadfontError {
    QuadfontError::collaborator("color", reason)
}

/// Decode a PNG into straight RGBA8.
pub(crate) fn decode_png(data: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| color_error(format!("PNG decoding error: {e}")))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| color_error(format!("PNG frame error: {e}")))?;
    let data = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => return Err(color_error("unexpanded palette image")),
    };
    Ok((info.width, info.height, rgba))
}

/// Resample straight RGBA to `scale` with bilinear filtering.
fn resample(width: u32, height: u32, mut rgba: Vec<u8>, scale: f32) -> Result<(u32, u32, Vec<u8>)> {
    if (scale - 1.0).abs() < f32::EPSILON {
        return Ok((width, height, rgba));
    }
    let target_width = ((width as f32 * scale).round() as u32).max(1);
    let target_height = ((height as f32 * scale).round() as u32).max(1);

    premultiply(&mut rgba);
    let size = IntSize::from_wh(width, height).ok_or_else(|| color_error("empty strike image"))?;
    let source = Pixmap::from_vec(rgba, size).ok_or_else(|| color_error("bad strike buffer"))?;
    let mut target = Pixmap::new(target_width, target_height)
        .ok_or_else(|| color_error("failed to create pixmap"))?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, Transform::from_scale(scale, scale), None);

    let mut out = target.take();
    unpremultiply(&mut out);
    Ok((target_width, target_height, out))
}

fn render(face: &Face<'_>, glyph: u32, size: u32) -> Result<ColorBitmap> {
    let gid = u16::try_from(glyph)
        .map(GlyphId)
        .map_err(|_| color_error(format!("glyph {glyph} out of range")))?;
    let image = face
        .glyph_raster_image(gid, size.min(u16::MAX as u32) as u16)
        .ok_or_else(|| color_error(format!("glyph {glyph} has no strike image")))?;
    if image.format != RasterImageFormat::PNG {
        return Err(color_error(format!("unsupported strike format {:?}", image.format)));
    }

    let (width, height, rgba) = decode_png(image.data)?;
    let scale = size as f32 / image.pixels_per_em.max(1) as f32;
    let (width, height, pixels) = resample(width, height, rgba, scale)?;

    Ok(ColorBitmap {
        width,
        height,
        left: image.x as f32 * scale,
        top: (image.y as f32 + image.height as f32) * scale,
        advance_x: advance(face, gid, scale_for(face, size), false),
        pixels,
    })
}

impl ColorCompositor for StrikeCompositor {
    fn name(&self) -> &str {
        "png-strikes"
    }

    fn has_color_table(&self, font: FontHandle<'_>) -> bool {
        self.store
            .with_face(font, |face| {
                let tables = face.tables();
                tables.colr.is_some() || tables.cbdt.is_some() || tables.sbix.is_some()
            })
            .unwrap_or_else(|err| {
                debug!(target: "quadfont::color", "font {} unusable: {err}", font.name);
                false
            })
    }

    fn render_color_glyph(
        &self,
        font: FontHandle<'_>,
        glyph: u32,
        size: u32,
    ) -> Result<ColorBitmap> {
        self.store.with_face(font, |face| render(face, glyph, size))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_decode_rgb_png_adds_alpha() {
        let png = encode_png(2, 1, png::ColorType::Rgb, &[255, 0, 0, 0, 0, 255]);
        let (width, height, rgba) = decode_png(&png).unwrap();
        assert_eq!((width, height), (2, 1));
        assert_eq!(rgba, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_gray_alpha_png() {
        let png = encode_png(1, 1, png::ColorType::GrayscaleAlpha, &[100, 50]);
        let (_, _, rgba) = decode_png(&png).unwrap();
        assert_eq!(rgba, vec![100, 100, 100, 50]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[test]
    fn test_resample_halves_opaque_image() {
        let rgba = [0u8, 255, 0, 255].repeat(16);
        let (width, height, out) = resample(4, 4, rgba, 0.5).unwrap();
        assert_eq!((width, height), (2, 2));
        assert_eq!(out.len(), 16);
        assert!(out.chunks_exact(4).all(|px| px[1] > 200 && px[3] > 200));
    }

    #[test]
    fn test_resample_identity_is_untouched() {
        let rgba = vec![1, 2, 3, 4];
        let (_, _, out) = resample(1, 1, rgba.clone(), 1.0).unwrap();
        assert_eq!(out, rgba);
    }
}
