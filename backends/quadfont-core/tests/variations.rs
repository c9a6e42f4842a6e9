// this_file: backends/quadfont-core/tests/variations.rs

//! Variable font instances are cached separately and reach the collaborators.

mod common;

use common::*;
use quadfont_core::{
    Collaborators, Direction, FontSystem, Quad, SystemConfig, Variation, VariationId,
};
use std::sync::Arc;

fn variable_system() -> (FontSystem, Arc<MockRasterizer>, Arc<MockShaper>) {
    init_logging();
    let rasterizer = Arc::new(MockRasterizer::new().with_font("sans", "AB"));
    let shaper = Arc::new(MockShaper::default());
    let collaborators = Collaborators::new(rasterizer.clone()).with_shaper(shaper.clone());
    let mut system = FontSystem::new(SystemConfig::default(), collaborators).unwrap();
    let sans = system.add_font("sans", FontSource::Static(b"sans")).unwrap();
    system.set_font(sans);
    system.set_size(16.0);
    (system, rasterizer, shaper)
}

fn weight(value: f32) -> [Variation; 1] {
    [Variation::new(*b"wght", value)]
}

#[test]
fn test_instances_get_distinct_cache_records() {
    let (mut system, rasterizer, _) = variable_system();
    let uploads = record_uploads(&mut system);
    let sans = system.find_font("sans").unwrap();

    let regular = system.set_font_variations(sans, &weight(400.0)).unwrap();
    let _: Vec<Quad> = system.text_iter(0.0, 0.0, "A").collect();
    let bold = system.set_font_variations(sans, &weight(700.0)).unwrap();
    let _: Vec<Quad> = system.text_iter(0.0, 0.0, "A").collect();

    assert_ne!(regular, bold);
    assert_eq!(system.cache().len(), 2);
    assert_eq!(upload_count(&uploads), 2);
    let variations: Vec<_> = system.cache().iter().map(|(key, _)| key.variation).collect();
    assert!(variations.contains(&regular) && variations.contains(&bold));

    let seen = rasterizer.variations.lock().unwrap().clone();
    assert_eq!(seen, vec![weight(400.0).to_vec(), weight(700.0).to_vec()]);

    // Returning to an earlier instance hits its records.
    assert_eq!(system.set_font_variations(sans, &weight(400.0)).unwrap(), regular);
    let _: Vec<Quad> = system.text_iter(0.0, 0.0, "A").collect();
    assert_eq!(upload_count(&uploads), 2);
    assert_eq!(system.font_variations(sans).unwrap(), &weight(400.0));
}

#[test]
fn test_default_instance_is_id_zero() {
    let (mut system, _, _) = variable_system();
    let sans = system.find_font("sans").unwrap();
    let out: Vec<Quad> = system.text_iter(0.0, 0.0, "A").collect();
    assert_eq!(out.len(), 1);
    let (key, _) = system.cache().iter().next().unwrap();
    assert_eq!(key.variation, VariationId(0));
    assert!(system.font_variations(sans).unwrap().is_empty());
}

#[test]
fn test_shape_cache_is_per_instance() {
    let (mut system, _, shaper) = variable_system();
    let sans = system.find_font("sans").unwrap();

    let _: Vec<Quad> = system.shaped_text_iter(0.0, 0.0, "AB", Direction::LeftToRight).collect();
    system.set_font_variations(sans, &weight(700.0)).unwrap();
    let _: Vec<Quad> = system.shaped_text_iter(0.0, 0.0, "AB", Direction::LeftToRight).collect();

    assert_eq!(shaper.call_count(), 2);
    assert_eq!(system.shaped_runs_cached(), 2);
    assert_eq!(shaper.last_call().unwrap().variations, weight(700.0).to_vec());
    assert_eq!(system.cache().len(), 4);
}
