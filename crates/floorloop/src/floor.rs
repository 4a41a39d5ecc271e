//! Floor builder seam.
//!
//! The host turns a closed, ordered profile into a floor. This crate only
//! prepares the profile; `JsonProfileWriter` is the shipped builder and
//! serializes the profile instead of creating geometry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shared::Segment;

use crate::error::FloorError;
use crate::state::FloorSettings;
use crate::validation::ChainValidator;

/// Closed, ordered boundary handed to a floor builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorProfile {
    pub floor_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub segments: Vec<Segment>,
    /// Signed area, positive for counter-clockwise boundaries
    pub area: f64,
    pub perimeter: f64,
}

impl FloorProfile {
    /// Wrap an already validated closed chain.
    pub fn new(chain: Vec<Segment>, tolerance: f64, floor: &FloorSettings) -> Self {
        let validator = ChainValidator::new(&chain, tolerance);
        let area = validator.signed_area();
        let perimeter = validator.total_length();
        Self {
            floor_type: floor.floor_type.clone(),
            level: floor.level.clone(),
            segments: chain,
            area,
            perimeter,
        }
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.area > 0.0
    }
}

/// Something that can create a floor from a closed profile.
pub trait FloorBuilder {
    /// Build the floor and return a short description of what was created.
    fn build_floor(&mut self, profile: &FloorProfile) -> Result<String, FloorError>;
}

/// Writes profiles as pretty JSON, to a file or kept in memory.
#[derive(Debug, Default)]
pub struct JsonProfileWriter {
    path: Option<PathBuf>,
    written: Vec<String>,
}

impl JsonProfileWriter {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            written: Vec::new(),
        }
    }

    /// JSON documents written so far (in-memory mode keeps every one)
    pub fn written(&self) -> &[String] {
        &self.written
    }
}

impl FloorBuilder for JsonProfileWriter {
    fn build_floor(&mut self, profile: &FloorProfile) -> Result<String, FloorError> {
        if profile.floor_type.trim().is_empty() {
            return Err(FloorError::FloorTypeNotFound(profile.floor_type.clone()));
        }
        let json = serde_json::to_string_pretty(profile)?;
        let description = match &self.path {
            Some(path) => {
                std::fs::write(path, &json)?;
                tracing::info!("Wrote floor profile to {}", path.display());
                format!("profile written to {}", path.display())
            }
            None => format!("profile with {} segments", profile.segments.len()),
        };
        self.written.push(json);
        Ok(description)
    }
}
