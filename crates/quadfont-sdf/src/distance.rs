// this_file: crates/quadfont-sdf/src/distance.rs

//! Point-to-outline distance and inside/outside classification.

use crate::outline::{Edge, Outline};
use kurbo::Point;

/// Parametric samples taken along a quadratic edge.
pub const QUAD_SAMPLES: usize = 32;

/// Unsigned distance from `p` to a single edge.
///
/// Lines use an exact projection onto the segment. Quadratics are sampled
/// densely and the minimum distance to the resulting polyline is kept.
pub fn edge_distance(edge: &Edge, p: Point) -> f64 {
    match *edge {
        Edge::Line { from, to } => segment_distance(p, from, to),
        Edge::Quad { .. } => {
            let mut best = f64::MAX;
            let mut prev = edge.start();
            for i in 1..=QUAD_SAMPLES {
                let next = edge.eval(i as f64 / QUAD_SAMPLES as f64);
                best = best.min(segment_distance(p, prev, next));
                prev = next;
            }
            best
        }
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Winding number of the outline around `p`, counted with a horizontal ray.
pub fn winding_number(outline: &Outline, p: Point) -> i32 {
    let mut winding = 0;
    for edge in outline.edges() {
        match *edge {
            Edge::Line { from, to } => winding += crossing(from, to, p),
            Edge::Quad { .. } => {
                let mut prev = edge.start();
                for i in 1..=QUAD_SAMPLES {
                    let next = edge.eval(i as f64 / QUAD_SAMPLES as f64);
                    winding += crossing(prev, next, p);
                    prev = next;
                }
            }
        }
    }
    winding
}

fn crossing(a: Point, b: Point, p: Point) -> i32 {
    let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
    if a.y <= p.y {
        if b.y > p.y && side > 0.0 {
            return 1;
        }
    } else if b.y <= p.y && side < 0.0 {
        return -1;
    }
    0
}

/// Whether `p` lies inside the outline under the non-zero rule.
pub fn is_inside(outline: &Outline, p: Point) -> bool {
    winding_number(outline, p) != 0
}

/// Minimum distance from `p` to any edge of the outline, or `None` when
/// the outline has no edges.
pub fn nearest_distance(outline: &Outline, p: Point) -> Option<f64> {
    outline
        .edges()
        .map(|edge| edge_distance(edge, p))
        .reduce(f64::min)
}

/// Signed distance in outline units: positive inside, negative outside.
pub fn signed_distance(outline: &Outline, p: Point) -> f64 {
    let Some(distance) = nearest_distance(outline, p) else {
        return f64::NEG_INFINITY;
    };
    if is_inside(outline, p) {
        distance
    } else {
        -distance
    }
}
