//! Loop closure check: filter, chain, and test the final joint.

use serde::{Deserialize, Serialize};
use shared::Segment;

use crate::chain::{closure_gap, sort_contiguous, ChainConfig};

/// Minimum number of valid segments that can form a loop.
pub const DEFAULT_MIN_SEGMENTS: usize = 3;

pub const MSG_CLOSED: &str = "Successfully formed a loop.";
pub const MSG_NOT_CLOSED: &str = "Curves do not form a closed loop.";

/// Result of one loop check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// Chained and the last end meets the first start.
    Closed,
    /// Too few valid segments; chaining was not attempted.
    InsufficientSegments { found: usize, required: usize },
    /// Chaining raised an error.
    ChainFailed { reason: String },
    /// Chained, but the final joint is open.
    NotClosed { gap: f64 },
}

/// Loop check report handed to the UI layer and the floor builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopReport {
    #[serde(flatten)]
    pub outcome: LoopOutcome,
    /// Ordered chain; empty unless chaining succeeded.
    pub chain: Vec<Segment>,
}

impl LoopReport {
    pub fn is_closed(&self) -> bool {
        matches!(self.outcome, LoopOutcome::Closed)
    }

    /// Human-readable status line
    pub fn message(&self) -> String {
        match &self.outcome {
            LoopOutcome::Closed => MSG_CLOSED.to_string(),
            LoopOutcome::InsufficientSegments { required, .. } => format!(
                "At least {} valid lines are required to form a loop.",
                count_word(*required)
            ),
            LoopOutcome::ChainFailed { reason } => format!("Error checking loop closure: {reason}"),
            LoopOutcome::NotClosed { .. } => MSG_NOT_CLOSED.to_string(),
        }
    }
}

/// "three" for 3, digits above ten
pub(crate) fn count_word(n: usize) -> String {
    const WORDS: [&str; 11] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS.get(n).map_or_else(|| n.to_string(), |w| w.to_string())
}

/// Validates a candidate segment set and reports whether it closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopChecker {
    config: ChainConfig,
    min_segments: usize,
}

impl Default for LoopChecker {
    fn default() -> Self {
        Self::new(ChainConfig::default(), DEFAULT_MIN_SEGMENTS)
    }
}

impl LoopChecker {
    /// `min_segments` below 1 is raised to 1, so a chain is never empty
    /// once the count check passes. The tolerance is validated by every
    /// `check`, which reports a bad one as `ChainFailed`.
    pub fn new(config: ChainConfig, min_segments: usize) -> Self {
        Self {
            config,
            min_segments: min_segments.max(1),
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn min_segments(&self) -> usize {
        self.min_segments
    }

    /// Run the check over `segments`.
    ///
    /// Placeholder segments are dropped, the rest are chained on a private
    /// copy, so the caller's slice is never reordered.
    pub fn check(&self, segments: &[Segment]) -> LoopReport {
        let mut chain: Vec<Segment> = segments
            .iter()
            .filter(|s| !s.is_degenerate())
            .copied()
            .collect();

        if chain.len() < self.min_segments {
            tracing::info!(
                "check: {} valid segments, {} required",
                chain.len(),
                self.min_segments
            );
            return LoopReport {
                outcome: LoopOutcome::InsufficientSegments {
                    found: chain.len(),
                    required: self.min_segments,
                },
                chain: Vec::new(),
            };
        }

        tracing::debug!("check: chaining {} segments", chain.len());
        if let Err(e) = sort_contiguous(&mut chain, &self.config) {
            tracing::info!("check: chaining failed: {e}");
            return LoopReport {
                outcome: LoopOutcome::ChainFailed {
                    reason: e.to_string(),
                },
                chain: Vec::new(),
            };
        }

        let Some(gap) = closure_gap(&chain) else {
            return LoopReport {
                outcome: LoopOutcome::InsufficientSegments {
                    found: 0,
                    required: self.min_segments,
                },
                chain,
            };
        };
        let outcome = if gap < self.config.tolerance {
            LoopOutcome::Closed
        } else {
            LoopOutcome::NotClosed { gap }
        };
        tracing::info!(
            "check: {} segments, gap to close={:.6}, closed={}",
            chain.len(),
            gap,
            matches!(outcome, LoopOutcome::Closed)
        );

        LoopReport { outcome, chain }
    }
}
