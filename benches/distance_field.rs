// this_file: benches/distance_field.rs

//! Distance field generation benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadfont::sdf::{generate, Contour, Edge, FieldKind, FieldParams, GlyphSource, Outline, Point};

/// Ring-shaped "O" made of quadratic arcs, outer contour plus a counter.
fn ring(outer: f64, inner: f64) -> Outline {
    let contour = |radius: f64, clockwise: bool| {
        let center = Point::new(outer, outer);
        let steps = 8;
        let angle = |i: usize| {
            let t = i as f64 / steps as f64 * std::f64::consts::TAU;
            if clockwise {
                -t
            } else {
                t
            }
        };
        let at = |a: f64, r: f64| Point::new(center.x + r * a.cos(), center.y + r * a.sin());
        let ctrl_radius = radius / (std::f64::consts::PI / steps as f64).cos();
        let edges = (0..steps)
            .map(|i| {
                let (a0, a1) = (angle(i), angle(i + 1));
                Edge::quad(at(a0, radius), at((a0 + a1) / 2.0, ctrl_radius), at(a1, radius))
            })
            .collect();
        Contour::new(edges)
    };
    Outline::new(vec![contour(outer, false), contour(inner, true)])
}

fn bench_field_sizes(c: &mut Criterion) {
    let outline = ring(20.0, 12.0);
    let mut group = c.benchmark_group("distance_field");
    for size in [32u32, 64, 128] {
        let params = FieldParams::new(size, size).with_padding(4).with_range(4.0);
        for kind in [FieldKind::Sdf, FieldKind::Msdf] {
            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), size),
                &params,
                |b, params| {
                    b.iter(|| generate(kind, GlyphSource::Outline(black_box(&outline)), params));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_field_sizes);
criterion_main!(benches);
