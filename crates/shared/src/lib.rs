use serde::{Deserialize, Serialize};

/// Unique identifier of a row in the line table
pub type ObjectId = String;

/// 2D point in the floor plane (host base units)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        kurbo::Point::from(*self).distance(kurbo::Point::from(*other))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point2D> for kurbo::Point {
    fn from(p: Point2D) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point2D {
    fn from(p: kurbo::Point) -> Self {
        Point2D { x: p.x, y: p.y }
    }
}

/// Directed 2D line segment.
///
/// Chaining may replace a segment with its reversed copy, but never moves
/// its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Build a segment from an `(x1, y1, x2, y2)` tuple
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point2D::new(x1, y1),
            end: Point2D::new(x2, y2),
        }
    }

    /// True for the `(0,0)-(0,0)` placeholder row only.
    ///
    /// This detects empty table rows; it is not a general zero-length test,
    /// so `(5,5)-(5,5)` is not degenerate.
    pub fn is_degenerate(&self) -> bool {
        self.start == Point2D::ORIGIN && self.end == Point2D::ORIGIN
    }

    /// Copy of this segment with start and end swapped
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.start, self.end)
    }
}

/// One editable row of the line table: raw endpoint coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRow {
    pub id: ObjectId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineRow {
    pub fn new(id: impl Into<ObjectId>, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id: id.into(),
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn to_segment(&self) -> Segment {
        Segment::from_coords(self.x1, self.y1, self.x2, self.y2)
    }

    /// A row is valid unless all four coordinates are zero
    pub fn is_valid(&self) -> bool {
        !self.to_segment().is_degenerate()
    }
}
