// this_file: backends/quadfont-core/tests/shaped_iter.rs

//! Shaped iteration: bidi, shaping cache, features and failure handling.

mod common;

use common::*;
use quadfont_core::{
    Collaborators, Direction, Feature, FontSystem, GlyphId, HAlign, Quad, SystemConfig, VAlign,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

struct Harness {
    system: FontSystem,
    shaper: Arc<MockShaper>,
}

fn harness(shaper: MockShaper, bidi: Option<MockBidi>) -> Harness {
    init_logging();
    let shaper = Arc::new(shaper);
    let rasterizer = Arc::new(
        MockRasterizer::new()
            .with_font("sans", "ABCabc")
            .with_font("broken", "AB"),
    );
    let mut collaborators = Collaborators::new(rasterizer).with_shaper(shaper.clone());
    if let Some(bidi) = bidi {
        collaborators = collaborators.with_bidi(Arc::new(bidi));
    }
    let mut system = FontSystem::new(SystemConfig::default(), collaborators).unwrap();
    let sans = system.add_font("sans", FontSource::Static(b"sans")).unwrap();
    system.add_font("broken", FontSource::Static(b"broken")).unwrap();
    system.set_font(sans);
    system.set_size(16.0);
    Harness { system, shaper }
}

fn shaped(system: &mut FontSystem, x: f32, y: f32, text: &str, direction: Direction) -> Vec<Quad> {
    system.shaped_text_iter(x, y, text, direction).collect()
}

#[test]
fn test_shaped_quads_use_glyph_indices() {
    let Harness { mut system, .. } = harness(MockShaper::default(), None);
    let uploads = record_uploads(&mut system);

    let out = shaped(&mut system, 10.0, 30.0, "AB", Direction::LeftToRight);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].glyph, GlyphId::Index('A' as u32));
    assert_eq!((out[0].x0, out[0].y0), (10.0 + BEARING_X, 30.0 - BEARING_Y));
    assert_eq!(out[1].x0, 10.0 + ADVANCE + BEARING_X);
    assert_eq!((out[0].cluster, out[1].cluster), (0, 1));

    // Index and codepoint keys never alias.
    let _: Vec<Quad> = system.text_iter(0.0, 0.0, "A").collect();
    assert_eq!(upload_count(&uploads), 3);
}

#[test]
fn test_shaped_advance_ignores_spacing() {
    let Harness { mut system, .. } = harness(MockShaper::default(), None);
    system.set_spacing(5.0);

    let out = shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight);
    assert_eq!(out[1].x0, ADVANCE + BEARING_X);

    system.set_align(HAlign::Right, VAlign::Baseline);
    let out = shaped(&mut system, 100.0, 0.0, "AB", Direction::LeftToRight);
    assert_eq!(out[0].x0, 100.0 - 2.0 * ADVANCE + BEARING_X);
}

#[test]
fn test_bidi_reorder_shapes_left_to_right() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), Some(MockBidi { fail: false }));

    let out = shaped(&mut system, 0.0, 0.0, "abc", Direction::Auto);
    let call = shaper.last_call().unwrap();
    assert_eq!(call.text, "cba");
    assert_eq!(call.direction, Direction::LeftToRight);
    assert_eq!(out[0].glyph, GlyphId::Index('c' as u32));
    assert_eq!(out[2].glyph, GlyphId::Index('a' as u32));
}

#[test]
fn test_bidi_failure_keeps_logical_order() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), Some(MockBidi { fail: true }));

    let out = shaped(&mut system, 0.0, 0.0, "abc", Direction::RightToLeft);
    assert_eq!(out.len(), 3);
    let call = shaper.last_call().unwrap();
    assert_eq!(call.text, "abc");
    assert_eq!(call.direction, Direction::RightToLeft);
}

#[test]
fn test_vertical_offsets_point_up() {
    let shaper = MockShaper {
        y_offset: 2.0,
        ..MockShaper::default()
    };
    let Harness { mut system, .. } = harness(shaper, None);
    let out = shaped(&mut system, 0.0, 40.0, "A", Direction::LeftToRight);
    assert_eq!(out[0].y0, 40.0 - 2.0 - BEARING_Y);
}

#[test]
fn test_missing_shaped_glyph_still_advances() {
    let Harness { mut system, .. } = harness(MockShaper::default(), None);
    let out = shaped(&mut system, 0.0, 0.0, "AZB", Direction::LeftToRight);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].x0, 2.0 * ADVANCE + BEARING_X);
    assert_eq!(out[1].cluster, 2);
}

#[test]
fn test_shape_cache_reuses_runs() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), None);

    shaped(&mut system, 0.0, 0.0, "ABC", Direction::LeftToRight);
    shaped(&mut system, 5.0, 5.0, "ABC", Direction::LeftToRight);
    assert_eq!(shaper.call_count(), 1);
    assert_eq!(system.shaped_runs_cached(), 1);

    system.set_size(20.0);
    shaped(&mut system, 0.0, 0.0, "ABC", Direction::LeftToRight);
    assert_eq!(shaper.call_count(), 2);

    system.set_language("tr");
    shaped(&mut system, 0.0, 0.0, "ABC", Direction::LeftToRight);
    assert_eq!(shaper.call_count(), 3);

    system.reset_atlas(512, 512).unwrap();
    assert_eq!(system.shaped_runs_cached(), 0);
    shaped(&mut system, 0.0, 0.0, "ABC", Direction::LeftToRight);
    assert_eq!(shaper.call_count(), 4);
}

#[test]
fn test_features_and_language_reach_the_shaper() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), None);
    system.set_language("ar");
    system.set_feature(*b"liga", false);
    system.set_feature(*b"kern", true);
    system.set_feature(*b"liga", true);

    shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight);
    let call = shaper.last_call().unwrap();
    assert_eq!(call.language, "ar");
    assert_eq!(
        call.features,
        vec![Feature::new(*b"liga", true), Feature::new(*b"kern", true)]
    );

    system.reset_features();
    shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight);
    assert!(shaper.last_call().unwrap().features.is_empty());
}

#[test]
fn test_prepare_runs_once_per_font() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), None);
    shaped(&mut system, 0.0, 0.0, "A", Direction::LeftToRight);
    shaped(&mut system, 0.0, 0.0, "B", Direction::LeftToRight);
    assert_eq!(shaper.prepares.load(Ordering::SeqCst), 1);
    assert_eq!(shaper.call_count(), 2);
}

#[test]
fn test_failed_prepare_is_remembered() {
    let shaper = MockShaper {
        failing_font: Some("broken".to_string()),
        ..MockShaper::default()
    };
    let Harness { mut system, shaper } = harness(shaper, None);
    let broken = system.find_font("broken").unwrap();
    system.set_font(broken);

    assert!(shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight).is_empty());
    assert!(shaped(&mut system, 0.0, 0.0, "BA", Direction::LeftToRight).is_empty());
    assert_eq!(shaper.prepares.load(Ordering::SeqCst), 1);
    assert_eq!(shaper.call_count(), 0);

    // Codepoint iteration is unaffected.
    assert_eq!(system.text_iter(0.0, 0.0, "AB").count(), 2);
}

#[test]
fn test_without_shaper_output_is_empty() {
    let mut system = system_with("AB", SystemConfig::default());
    assert!(shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight).is_empty());
    assert_eq!(system.shaped_runs_cached(), 0);
}

#[test]
fn test_shaped_alignment_and_bounds() {
    let Harness { mut system, .. } = harness(MockShaper::default(), None);

    system.set_align(HAlign::Right, VAlign::Top);
    let out = shaped(&mut system, 100.0, 0.0, "AB", Direction::LeftToRight);
    assert_eq!(out[0].x0, 100.0 - 2.0 * ADVANCE + BEARING_X);
    assert_eq!(out[0].y0, 12.0 - BEARING_Y);

    system.set_align(HAlign::Left, VAlign::Baseline);
    let bounds = system.shaped_text_bounds(0.0, 0.0, "AB", Direction::LeftToRight);
    assert_eq!(bounds.advance, 2.0 * ADVANCE);
    assert_eq!(bounds.max_x, 2.0 * ADVANCE);
    assert_eq!(bounds.min_y, -BEARING_Y);
}

#[test]
fn test_shaped_iter_exposes_run() {
    let Harness { mut system, .. } = harness(MockShaper::default(), None);
    let mut iter = system.shaped_text_iter(0.0, 0.0, "ABC", Direction::LeftToRight);
    assert_eq!(iter.glyphs().len(), 3);
    assert_eq!(iter.size_hint(), (0, Some(3)));
    iter.next();
    assert_eq!(iter.cursor(), (ADVANCE, 0.0));
    assert_eq!(iter.count(), 2);
}

#[test]
fn test_empty_and_fontless_input() {
    let Harness { mut system, shaper } = harness(MockShaper::default(), None);
    assert!(shaped(&mut system, 0.0, 0.0, "", Direction::LeftToRight).is_empty());
    assert_eq!(shaper.call_count(), 0);

    system.reset_state();
    assert!(shaped(&mut system, 0.0, 0.0, "AB", Direction::LeftToRight).is_empty());
    assert_eq!(shaper.call_count(), 0);
}
