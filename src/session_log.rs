use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User actions recorded by the demo front-end.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Action {
    /// Move the light source to (x, y)
    MoveSource { x: i32, y: i32 },
    /// Change the FOV shape
    SetShape { shape: String },
    /// Change the scan radius
    SetRadius { radius: u32 },
    /// Change the beam angle in degrees
    SetAngle { angle: f32 },
    /// Change the beam direction
    SetDirection { direction: String },
    /// Switch between circle and beam mode
    ToggleBeam { enabled: bool },
    /// Switch wall-face lighting on or off
    ToggleOpaqueApply { apply: bool },
    /// Toggle a wall cell at (x, y)
    ToggleWall { x: i32, y: i32 },
    /// Replace the layout from the clipboard (cols, rows)
    PasteLayout { cols: i32, rows: i32 },
    /// Save the layout snapshot to a file
    SaveSnapshot { path: String },
    /// Load a layout snapshot from a file
    LoadSnapshot { path: String },
}

/// Logged action with a timestamp relative to session start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Session logger for demo interactions.
pub struct SessionLog {
    start_time: Instant,
    entries: Vec<LoggedAction>,
}

impl SessionLog {
    pub fn new() -> Self {
        SessionLog {
            start_time: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Record an action with the current timestamp.
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.entries.push(LoggedAction {
            timestamp_ms,
            action,
        });
    }

    pub fn entries(&self) -> &[LoggedAction] {
        &self.entries
    }

    /// Save the log to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// One-line summary for the console on exit.
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut edits = 0;
        let mut setting_changes = 0;
        for logged in &self.entries {
            match logged.action {
                Action::MoveSource { .. } => moves += 1,
                Action::ToggleWall { .. } | Action::PasteLayout { .. } => edits += 1,
                _ => setting_changes += 1,
            }
        }
        format!(
            "Session: {} events ({} moves, {} layout edits, {} setting changes)",
            self.entries.len(),
            moves,
            edits,
            setting_changes
        )
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        SessionLog::new()
    }
}
