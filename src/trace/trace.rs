use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::nav::cursor::{Cursor, NavLevel};

/// One JSONL record per engine tick that did something observable. The
/// trace is the only way to reconstruct why an announcement happened (or
/// was suppressed) after the fact.
#[derive(Debug, Serialize)]
pub struct NavTraceEvent {
    pub timestamp_ms: u128,
    pub tick: u64,

    /// "menu" or "duel", whichever navigator handled the tick.
    pub mode: String,

    pub command: Option<String>,

    pub cursor_group: Option<usize>,
    pub cursor_element: Option<usize>,
    pub cursor_level: Option<String>,

    pub announcement: Option<String>,
    pub suppression_reason: Option<String>,
}

impl NavTraceEvent {
    pub fn now(tick: u64, mode: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            tick,
            mode: mode.to_string(),
            command: None,
            cursor_group: None,
            cursor_element: None,
            cursor_level: None,
            announcement: None,
            suppression_reason: None,
        }
    }

    pub fn with_command(mut self, command: impl ToString) -> Self {
        self.command = Some(command.to_string());
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor_group = Some(cursor.group);
        self.cursor_element = Some(cursor.element);
        self.cursor_level = Some(
            match cursor.level {
                NavLevel::GroupList => "group_list",
                NavLevel::InsideGroup => "inside_group",
            }
            .to_string(),
        );
        self
    }

    pub fn with_announcement(mut self, text: impl ToString) -> Self {
        self.announcement = Some(text.to_string());
        self
    }

    pub fn with_suppression(mut self, reason: impl ToString) -> Self {
        self.suppression_reason = Some(reason.to_string());
        self
    }
}
