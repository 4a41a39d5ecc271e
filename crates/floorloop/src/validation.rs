//! Chain validation utilities.
//!
//! `ChainValidator` inspects an ordered chain after the fact: open joints,
//! closure gap, total length, and the enclosed area of a closed loop.

use kurbo::{BezPath, Shape};
use shared::Segment;

use crate::chain::{closure_gap, points_coincide};

/// Validator for ordered segment chains.
pub struct ChainValidator<'a> {
    chain: &'a [Segment],
    tolerance: f64,
}

impl<'a> ChainValidator<'a> {
    /// Create a new validator for the given chain.
    pub fn new(chain: &'a [Segment], tolerance: f64) -> Self {
        Self { chain, tolerance }
    }

    pub fn segment_count(&self) -> usize {
        self.chain.len()
    }

    /// Indices `i` where `chain[i].end` does not meet `chain[i + 1].start`.
    /// The wrap-around joint is not included.
    pub fn open_joints(&self) -> Vec<usize> {
        self.chain
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| !points_coincide(&pair[0].end, &pair[1].start, self.tolerance))
            .map(|(i, _)| i)
            .collect()
    }

    /// Every consecutive pair meets end-to-start.
    pub fn is_contiguous(&self) -> bool {
        self.open_joints().is_empty()
    }

    /// Contiguous and the last end meets the first start.
    pub fn is_closed(&self) -> bool {
        self.is_contiguous()
            && closure_gap(self.chain).is_some_and(|gap| gap < self.tolerance)
    }

    pub fn closure_gap(&self) -> Option<f64> {
        closure_gap(self.chain)
    }

    /// Sum of segment lengths.
    pub fn total_length(&self) -> f64 {
        self.chain.iter().map(Segment::length).sum()
    }

    /// Polygon through the segment start points, closed.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.chain.iter().map(|s| kurbo::Point::from(s.start));
        if let Some(first) = points.next() {
            path.move_to(first);
            for p in points {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    /// Signed area of the loop (positive = counter-clockwise, y up).
    /// Zero for chains that do not close.
    pub fn signed_area(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        self.to_bez_path().area()
    }

    /// Run all checks and return a list of error messages.
    /// An empty list means the chain is a valid closed loop.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.chain.is_empty() {
            errors.push("Chain is empty".to_string());
            return errors;
        }

        if let Some(i) = self.chain.iter().position(|s| !s.is_finite()) {
            errors.push(format!("Segment {} has non-finite coordinates", i));
        }

        let open = self.open_joints();
        if !open.is_empty() {
            errors.push(format!(
                "Segments are not contiguous at joints {:?} (tolerance={})",
                open, self.tolerance
            ));
        }

        if let Some(gap) = self.closure_gap() {
            if gap >= self.tolerance {
                errors.push(format!("Chain is not closed (gap={:.6})", gap));
            }
        }

        errors
    }
}
