// this_file: crates/quadfont-sdf/src/outline.rs

//! Outline geometry: edges, contours and the pen used to record them.

use kurbo::{Line, ParamCurve, Point, QuadBez, Rect};

/// Angular tolerance (degrees) within which an edge direction counts as
/// lying on a channel sector boundary.
const SECTOR_EPSILON: f64 = 1e-3;

/// One edge of a closed contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Line { from: Point, to: Point },
    Quad { from: Point, ctrl: Point, to: Point },
}

impl Edge {
    pub fn line(from: Point, to: Point) -> Self {
        Edge::Line { from, to }
    }

    pub fn quad(from: Point, ctrl: Point, to: Point) -> Self {
        Edge::Quad { from, ctrl, to }
    }

    pub fn start(&self) -> Point {
        match *self {
            Edge::Line { from, .. } | Edge::Quad { from, .. } => from,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Edge::Line { to, .. } | Edge::Quad { to, .. } => to,
        }
    }

    /// Evaluate the edge at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        match *self {
            Edge::Line { from, to } => Line::new(from, to).eval(t),
            Edge::Quad { from, ctrl, to } => QuadBez::new(from, ctrl, to).eval(t),
        }
    }

    /// Direction of the edge chord in degrees, normalized to `[0, 360)`.
    pub fn direction_degrees(&self) -> f64 {
        let angle = (self.end() - self.start()).atan2().to_degrees();
        if angle < 0.0 {
            angle + 360.0
        } else {
            angle
        }
    }

    /// Color channels this edge contributes to in a multi-channel field.
    ///
    /// The direction circle is split into three 120 degree sectors
    /// (red `[0, 120)`, green `[120, 240)`, blue `[240, 360)`); an edge lying
    /// on a sector boundary belongs to both neighbouring channels.
    pub fn channels(&self) -> ChannelMask {
        let angle = self.direction_degrees();
        let near = |boundary: f64| (angle - boundary).abs() <= SECTOR_EPSILON;

        let mut mask = if angle < 120.0 {
            ChannelMask::RED
        } else if angle < 240.0 {
            ChannelMask::GREEN
        } else {
            ChannelMask::BLUE
        };

        if near(0.0) || near(360.0) {
            mask = mask | ChannelMask::RED | ChannelMask::BLUE;
        }
        if near(120.0) {
            mask = mask | ChannelMask::RED | ChannelMask::GREEN;
        }
        if near(240.0) {
            mask = mask | ChannelMask::GREEN | ChannelMask::BLUE;
        }
        mask
    }

    /// Tight bounding box of the edge.
    pub fn bounds(&self) -> Rect {
        match *self {
            Edge::Line { from, to } => Rect::from_points(from, to),
            Edge::Quad { from, ctrl, to } => {
                let mut rect = Rect::from_points(from, to);
                // Axis extrema of a quadratic sit at t = (p0 - p1) / (p0 - 2p1 + p2).
                for (p0, p1, p2, horizontal) in [
                    (from.x, ctrl.x, to.x, true),
                    (from.y, ctrl.y, to.y, false),
                ] {
                    let denom = p0 - 2.0 * p1 + p2;
                    if denom.abs() > f64::EPSILON {
                        let t = (p0 - p1) / denom;
                        if t > 0.0 && t < 1.0 {
                            let point = self.eval(t);
                            let extreme = if horizontal {
                                Point::new(point.x, rect.y0)
                            } else {
                                Point::new(rect.x0, point.y)
                            };
                            rect = rect.union_pt(extreme);
                        }
                    }
                }
                rect
            }
        }
    }
}

/// Bit set over the three MSDF color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelMask(u8);

impl ChannelMask {
    pub const RED: ChannelMask = ChannelMask(0b001);
    pub const GREEN: ChannelMask = ChannelMask(0b010);
    pub const BLUE: ChannelMask = ChannelMask(0b100);

    pub fn contains(self, other: ChannelMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Channel masks in output order (R, G, B).
    pub fn all() -> [ChannelMask; 3] {
        [Self::RED, Self::GREEN, Self::BLUE]
    }
}

impl std::ops::BitOr for ChannelMask {
    type Output = ChannelMask;

    fn bitor(self, rhs: ChannelMask) -> ChannelMask {
        ChannelMask(self.0 | rhs.0)
    }
}

/// A closed sequence of edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub edges: Vec<Edge>,
}

impl Contour {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Build a closed polygon contour from its corner points.
    pub fn polygon(points: &[Point]) -> Self {
        let edges = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&from, &to)| Edge::line(from, to))
            .collect();
        Self { edges }
    }
}

/// Glyph outline made of closed contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub contours: Vec<Contour>,
}

impl Outline {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(|contour| contour.edges.is_empty())
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.contours.iter().flat_map(|contour| contour.edges.iter())
    }

    /// Bounding box of every edge, or `None` for an empty outline.
    pub fn bounds(&self) -> Option<Rect> {
        self.edges()
            .map(Edge::bounds)
            .reduce(|acc, rect| acc.union(rect))
    }
}

/// Records move/line/quad/close commands into an [`Outline`].
///
/// Contours are closed implicitly: starting a new contour or finishing the
/// pen adds a closing line when the last point differs from the first.
#[derive(Debug, Default)]
pub struct OutlinePen {
    contours: Vec<Contour>,
    edges: Vec<Edge>,
    start: Option<Point>,
    last: Option<Point>,
}

impl OutlinePen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.close();
        let point = Point::new(x, y);
        self.start = Some(point);
        self.last = Some(point);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let to = Point::new(x, y);
        let from = self.current_or(to);
        if from != to {
            self.edges.push(Edge::line(from, to));
        }
        self.last = Some(to);
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let to = Point::new(x, y);
        let from = self.current_or(to);
        self.edges.push(Edge::quad(from, Point::new(cx, cy), to));
        self.last = Some(to);
    }

    pub fn close(&mut self) {
        if let (Some(start), Some(last)) = (self.start, self.last) {
            if start != last && !self.edges.is_empty() {
                self.edges.push(Edge::line(last, start));
            }
        }
        if !self.edges.is_empty() {
            self.contours.push(Contour::new(std::mem::take(&mut self.edges)));
        }
        self.start = None;
        self.last = None;
    }

    pub fn finish(mut self) -> Outline {
        self.close();
        Outline::new(self.contours)
    }

    fn current_or(&mut self, fallback: Point) -> Point {
        match self.last {
            Some(point) => point,
            None => {
                // Drawing without a move_to starts a contour at the target.
                self.start = Some(fallback);
                fallback
            }
        }
    }
}
