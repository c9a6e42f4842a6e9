// this_file: fuzz/fuzz_targets/text_iter.rs

#![no_main]

use libfuzzer_sys::fuzz_target;
use quadfont_core::utils::decode_all;
use quadfont_core::{
    Collaborators, FontHandle, FontSource, FontSystem, GlyphBitmap, GlyphRasterizer, HAlign,
    RasterRequest, Result, SystemConfig, VAlign, VerticalMetrics,
};
use std::sync::Arc;

/// Covers even codepoints only, so spans mix hits and misses.
struct EvenRasterizer;

impl GlyphRasterizer for EvenRasterizer {
    fn name(&self) -> &str {
        "even"
    }

    fn glyph_index(&self, _font: FontHandle<'_>, codepoint: char) -> Option<u32> {
        (codepoint as u32 % 2 == 0).then_some(codepoint as u32)
    }

    fn rasterize(&self, _font: FontHandle<'_>, glyph: u32, _request: &RasterRequest) -> Result<GlyphBitmap> {
        let side = 1 + glyph % 7;
        Ok(GlyphBitmap {
            width: side,
            height: side,
            bearing_x: 0.0,
            bearing_y: side as f32,
            advance_x: side as f32,
            pixels: vec![255; (side * side) as usize],
        })
    }

    fn vertical_metrics(&self, _font: FontHandle<'_>, size: u32) -> Option<VerticalMetrics> {
        Some(VerticalMetrics {
            ascender: size as f32,
            descender: 0.0,
            line_height: size as f32,
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let decoded = decode_all(data);
    assert!(decoded.windows(2).all(|pair| pair[0].0 < pair[1].0));

    let config = SystemConfig::default().with_atlas_size(64, 64);
    let Ok(mut system) = FontSystem::new(config, Collaborators::new(Arc::new(EvenRasterizer)))
    else {
        return;
    };
    let Ok(font) = system.add_font("even", FontSource::Static(b"even")) else {
        return;
    };
    system.set_font(font);
    system.set_align(HAlign::Center, VAlign::Middle);

    let quads = system.text_iter(0.0, 0.0, data).count();
    assert!(quads <= decoded.len());
});
