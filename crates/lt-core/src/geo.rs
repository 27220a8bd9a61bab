//! Planar network coordinates.
//!
//! Lane shapes are polylines in the network's projected x/y plane (metres),
//! so plain Euclidean geometry is exact here; no geodesic math is needed.

/// A point in the network plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_to(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Project `self` onto the segment `a → b`.
    ///
    /// Returns the distance along the segment from `a` (clamped to
    /// `[0, |ab|]`) and the squared distance from `self` to that foot point.
    pub fn project_onto_segment(self, a: Position, b: Position) -> (f64, f64) {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len_2 = dx * dx + dy * dy;
        if len_2 == 0.0 {
            let d = self.distance_to(a);
            return (0.0, d * d);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_2).clamp(0.0, 1.0);
        let foot = Position::new(a.x + t * dx, a.y + t * dy);
        let d = self.distance_to(foot);
        (t * len_2.sqrt(), d * d)
    }

    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Total length of a polyline in metres.
pub fn polyline_length(shape: &[Position]) -> f64 {
    shape.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

/// The point `along` metres into a polyline, clamped to its ends.  `None`
/// for an empty shape.
pub fn polyline_point(shape: &[Position], along: f64) -> Option<Position> {
    let mut rest = along.max(0.0);
    for w in shape.windows(2) {
        let seg = w[0].distance_to(w[1]);
        if rest <= seg && seg > 0.0 {
            let t = rest / seg;
            return Some(Position::new(w[0].x + t * (w[1].x - w[0].x), w[0].y + t * (w[1].y - w[0].y)));
        }
        rest -= seg;
    }
    shape.last().copied()
}
