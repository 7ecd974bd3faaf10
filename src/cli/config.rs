use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "arena-reader",
    version,
    about = "Screen-reader navigation engine for card-game UI trees"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the JSONL navigation trace file (disables tracing if unset)
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: arena-reader.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run navigation scenarios from YAML files
    Simulate {
        /// Path to a scenario YAML file or directory of YAML files
        #[arg(long)]
        scenario: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Classify a captured scene dump and print the resulting groups
    Classify {
        /// Path to a JSON scene dump (array of nodes)
        #[arg(long)]
        dump: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `arena-reader.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// Trace file path; tracing stays off when absent
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
        }
    }
}

// Serde default helpers
fn default_locale() -> String {
    "en".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("arena-reader.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
