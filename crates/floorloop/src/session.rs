//! Headless floor session: the line table plus loop-check and create-floor
//! state, driven by commands and queued requests.

use shared::ObjectId;

use crate::chain::ChainConfig;
use crate::floor::{FloorBuilder, FloorProfile};
use crate::loop_check::{count_word, LoopChecker, LoopReport};
use crate::state::{AppSettings, LineTableState, PasteReport};

pub const MSG_FLOOR_CREATED: &str = "Floor created successfully.";

/// Line table, settings and the result of the last loop check
pub struct FloorSession {
    pub lines: LineTableState,
    settings: AppSettings,
    checker: LoopChecker,
    status_message: String,
    /// Result of the last check. Editing the table does not reset it;
    /// `create_floor` re-validates before building.
    is_curves_contiguous: bool,
    last_report: Option<LoopReport>,
}

impl Default for FloorSession {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl FloorSession {
    pub fn new(settings: AppSettings) -> Self {
        let checker = settings.loop_checker();
        Self {
            lines: LineTableState::default(),
            settings,
            checker,
            status_message: String::new(),
            is_curves_contiguous: false,
            last_report: None,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn chain_config(&self) -> &ChainConfig {
        self.checker.config()
    }

    /// Change the coincidence tolerance for subsequent checks.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<(), String> {
        let mut settings = self.settings.clone();
        settings.chain.tolerance = tolerance;
        settings.validate().map_err(|e| e.to_string())?;
        self.checker = settings.loop_checker();
        self.settings = settings;
        Ok(())
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn is_curves_contiguous(&self) -> bool {
        self.is_curves_contiguous
    }

    pub fn last_report(&self) -> Option<&LoopReport> {
        self.last_report.as_ref()
    }

    // ── Table editing ─────────────────────────────────────────

    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ObjectId {
        self.lines.add_line(x1, y1, x2, y2)
    }

    pub fn remove_line(&mut self, id: &str) -> bool {
        self.lines.remove_line(id)
    }

    pub fn paste(&mut self, text: &str) -> PasteReport {
        self.lines.paste(text)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // ── Loop check ────────────────────────────────────────────

    /// Check whether the current rows form a closed loop and record the result.
    pub fn check_loop_closure(&mut self) -> &LoopReport {
        let report = self.checker.check(&self.lines.segments());
        self.status_message = report.message();
        self.is_curves_contiguous = report.is_closed();
        tracing::info!("Loop check: {}", self.status_message);
        self.last_report.insert(report)
    }

    // ── Create floor ──────────────────────────────────────────

    /// Hand the current rows to `builder` if they form a closed loop.
    ///
    /// Returns whether a floor was built; the outcome is also left in the
    /// status message.
    pub fn create_floor(&mut self, builder: &mut dyn FloorBuilder) -> bool {
        let required = self.checker.min_segments();
        if self.lines.valid_count() < required {
            self.status_message = format!(
                "Cannot create floor: at least {} valid lines are required to form a loop.",
                count_word(required)
            );
            return false;
        }

        if !self.is_curves_contiguous {
            self.status_message = crate::loop_check::MSG_NOT_CLOSED.to_string();
            return false;
        }

        // The flag may predate the latest edits: derive the chain again.
        let report = self.checker.check(&self.lines.segments());
        if !report.is_closed() {
            self.status_message = report.message();
            self.is_curves_contiguous = false;
            self.last_report = Some(report);
            return false;
        }

        let profile = FloorProfile::new(
            report.chain.clone(),
            self.checker.config().tolerance,
            &self.settings.floor,
        );
        self.last_report = Some(report);

        match builder.build_floor(&profile) {
            Ok(description) => {
                tracing::info!("Floor created: {description}");
                self.status_message = MSG_FLOOR_CREATED.to_string();
                true
            }
            Err(e) => {
                tracing::error!("Floor creation failed: {e}");
                self.status_message = format!("Error creating floor: {e}");
                false
            }
        }
    }
}
