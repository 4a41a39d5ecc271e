//! Contiguous segment ordering.
//!
//! Reorders a set of segments in place so each segment's end meets the next
//! segment's start, flipping segments that are stored backwards. Index 0 is
//! the anchor and never moves.

use serde::{Deserialize, Serialize};
use shared::{Point2D, Segment};

use crate::error::ChainError;

/// Default coincidence threshold: 1/16 of the base unit.
pub const DEFAULT_TOLERANCE: f64 = 1.0 / 16.0;

/// Configuration for segment chaining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Two points closer than this (strictly) are the same point.
    pub tolerance: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ChainConfig {
    /// Not checked here; `validate` (and every chaining call) rejects
    /// tolerances that are not positive and finite.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            Ok(())
        } else {
            Err(ChainError::InvalidTolerance {
                tolerance: self.tolerance,
            })
        }
    }
}

/// True when `a` and `b` are strictly closer than `tolerance`.
pub fn points_coincide(a: &Point2D, b: &Point2D, tolerance: f64) -> bool {
    a.distance_to(b) < tolerance
}

/// How the successor of a segment was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Successor {
    /// Start of the candidate meets the target.
    Forward(usize),
    /// End of the candidate meets the target; it must be flipped.
    Reversed(usize),
}

/// Scan `candidates` in order for the first segment touching `target`.
///
/// For each candidate the start is tried before the end. The first hit wins,
/// even if a later candidate lies closer.
fn find_successor(candidates: &[Segment], target: &Point2D, tolerance: f64) -> Option<Successor> {
    candidates.iter().enumerate().find_map(|(k, seg)| {
        if points_coincide(&seg.start, target, tolerance) {
            Some(Successor::Forward(k))
        } else if points_coincide(&seg.end, target, tolerance) {
            Some(Successor::Reversed(k))
        } else {
            None
        }
    })
}

/// Sort `segments` in place into an end-to-start contiguous chain.
///
/// The already placed prefix is never rescanned. Ring closure (last end back
/// to first start) is not checked here. On error the slice is left partially
/// reordered.
pub fn sort_contiguous(segments: &mut [Segment], config: &ChainConfig) -> Result<(), ChainError> {
    config.validate()?;
    if let Some(index) = segments.iter().position(|s| !s.is_finite()) {
        tracing::warn!("sort_contiguous: segment {} has non-finite coordinates", index);
        return Err(ChainError::MalformedGeometry { index });
    }

    let n = segments.len();
    // The last segment has no successor to find.
    for i in 0..n.saturating_sub(1) {
        let target = segments[i].end;
        tracing::debug!("  [{}] end point ({:.4},{:.4})", i, target.x, target.y);

        let next = i + 1;
        match find_successor(&segments[next..], &target, config.tolerance) {
            Some(Successor::Forward(k)) => {
                let j = next + k;
                tracing::debug!("    {} start point, swap with {}", j, next);
                segments.swap(next, j);
            }
            Some(Successor::Reversed(k)) => {
                let j = next + k;
                tracing::debug!("    {} end point, swap with reversed {}", j, next);
                let flipped = segments[j].reversed();
                segments[j] = segments[next];
                segments[next] = flipped;
            }
            None => {
                tracing::warn!(
                    "sort_contiguous: no successor for segment {} at ({:.4},{:.4})",
                    i,
                    target.x,
                    target.y
                );
                return Err(ChainError::NonContiguous { index: i, at: target });
            }
        }
    }

    Ok(())
}

/// Owned variant of [`sort_contiguous`].
pub fn chain_segments(mut segments: Vec<Segment>, config: &ChainConfig) -> Result<Vec<Segment>, ChainError> {
    sort_contiguous(&mut segments, config)?;
    Ok(segments)
}

/// Distance from the last segment's end back to the first segment's start.
pub fn closure_gap(chain: &[Segment]) -> Option<f64> {
    let first = chain.first()?;
    let last = chain.last()?;
    Some(last.end.distance_to(&first.start))
}

/// True when the chain's last end meets its first start within tolerance.
pub fn is_closed(chain: &[Segment], config: &ChainConfig) -> bool {
    closure_gap(chain).is_some_and(|gap| gap < config.tolerance)
}
