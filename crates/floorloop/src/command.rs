//! JSON command protocol for scripted sessions.
//!
//! Each command edits the line table or runs a check on a `FloorSession`.

use serde::{Deserialize, Serialize};

use crate::floor::FloorBuilder;
use crate::session::FloorSession;

/// A command a script or remote UI can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LineCommand {
    /// Append a line row
    AddLine { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Remove a line row by ID
    RemoveLine { id: String },
    /// Append rows from tab-separated text
    Paste { text: String },
    /// Remove every row.
    Clear,
    /// Run the loop closure check.
    CheckLoop,
    /// Build a floor from the current rows.
    CreateFloor,
    /// List rows and the last check result.
    Inspect,
    /// Change the coincidence tolerance.
    SetTolerance { tolerance: f64 },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the session.
pub fn execute_command(
    session: &mut FloorSession,
    builder: &mut dyn FloorBuilder,
    cmd: LineCommand,
) -> CommandResponse {
    match cmd {
        LineCommand::AddLine { x1, y1, x2, y2 } => {
            let id = session.add_line(x1, y1, x2, y2);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        LineCommand::RemoveLine { id } => {
            let removed = session.remove_line(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        LineCommand::Paste { text } => {
            let report = session.paste(&text);
            CommandResponse::ok_with_data(serde_json::json!({
                "added": report.added,
                "skipped": report.skipped,
            }))
        }

        LineCommand::Clear => {
            session.clear();
            CommandResponse::ok()
        }

        LineCommand::CheckLoop => {
            let report = session.check_loop_closure();
            match serde_json::to_value(report) {
                Ok(mut data) => {
                    data["closed"] = serde_json::json!(report.is_closed());
                    data["message"] = serde_json::json!(report.message());
                    CommandResponse::ok_with_data(data)
                }
                Err(e) => CommandResponse::err(format!("Failed to serialize report: {e}")),
            }
        }

        LineCommand::CreateFloor => {
            let created = session.create_floor(builder);
            let message = session.status_message().to_string();
            if created {
                CommandResponse::ok_with_data(serde_json::json!({ "message": message }))
            } else {
                CommandResponse::err(message)
            }
        }

        LineCommand::Inspect => {
            let lines: Vec<serde_json::Value> = session
                .lines
                .rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "id": row.id,
                        "x1": row.x1,
                        "y1": row.y1,
                        "x2": row.x2,
                        "y2": row.y2,
                        "valid": row.is_valid(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "line_count": lines.len(),
                "valid_count": session.lines.valid_count(),
                "lines": lines,
                "tolerance": session.chain_config().tolerance,
                "closed": session.is_curves_contiguous(),
                "message": session.status_message(),
            }))
        }

        LineCommand::SetTolerance { tolerance } => match session.set_tolerance(tolerance) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "tolerance": tolerance })),
            Err(e) => CommandResponse::err(e),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(
    session: &mut FloorSession,
    builder: &mut dyn FloorBuilder,
    json: &str,
) -> Result<CommandResponse, String> {
    let cmd: LineCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, builder, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    session: &mut FloorSession,
    builder: &mut dyn FloorBuilder,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<LineCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, builder, cmd))
        .collect())
}
