use serde::{Deserialize, Serialize};

use crate::host::scene_model::SceneNodeDump;

/// A complete navigation scenario: a declarative scene, a key sequence,
/// and the announcements and cursor positions expected along the way.
/// Deserialized from YAML and replayed against the fake host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Scene name handed to the engine's load notification. Names
    /// containing "Duel" start the duel navigator.
    #[serde(default = "default_screen")]
    pub screen: String,

    /// Initial scene contents
    pub nodes: Vec<SceneNodeDump>,

    /// Ordered list of steps to execute
    pub steps: Vec<ScenarioStep>,
}

fn default_screen() -> String {
    "MenuScene".to_string()
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Deliver one command to the engine
    Press { command: String },

    /// Advance empty ticks (waiting, settle detection)
    Tick { count: u32 },

    /// Swap the whole scene, the way a host rebuild does
    ReplaceScene { nodes: Vec<SceneNodeDump> },

    /// Run checks against the current engine state
    Expect { checks: Vec<CheckSpec> },
}

/// A single check to evaluate against the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    /// The most recent utterance exactly matches
    Spoken { expected: String },

    /// The most recent utterance contains the expected substring
    SpokenContains { expected: String },

    /// Nothing has been spoken since the previous step
    NothingSpoken,

    /// Cursor group index
    CursorGroup { expected: usize },

    /// Cursor element index
    CursorElement { expected: usize },

    /// Cursor level, "group_list" or "inside_group"
    CursorLevel { expected: String },

    /// Number of groups after the latest rebuild
    GroupCount { expected: usize },
}

/// Result of evaluating a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Which step this check belongs to (0-indexed)
    pub step_index: usize,

    /// The check that was evaluated
    pub spec: CheckSpec,

    /// Whether the check passed
    pub passed: bool,

    /// Actual value found (for debugging failed checks)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Name of the scenario that was run
    pub scenario_name: String,

    /// Whether all steps and checks passed
    pub passed: bool,

    /// Number of steps that were executed
    pub steps_run: usize,

    /// All check results collected during the run
    pub check_results: Vec<CheckResult>,

    /// Error message if the run failed outright (not a check failure)
    pub error: Option<String>,
}
