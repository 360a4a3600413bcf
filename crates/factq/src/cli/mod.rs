//! CLI functionality for the factq tool
//!
//! - `eval`: evaluate a term once or over a series of facts
//! - `rewrite`: simplify or reformat a term
//! - `output`: rendering results and messages

pub mod eval;
pub mod output;
pub mod rewrite;

use anyhow::{Context, Result};
use factq_eval::{EngineConfig, TraceLevel};
use std::fs;
use std::path::Path;

/// Engine configuration from an optional JSON file, then command-line overrides
pub fn load_config(
    path: Option<&Path>,
    max_depth: Option<usize>,
    trace_level: Option<TraceLevel>,
) -> Result<EngineConfig> {
    let mut config: EngineConfig = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(max_depth) = max_depth {
        config.max_depth = max_depth;
    }
    if let Some(level) = trace_level {
        config.trace_level = level;
    }
    Ok(config)
}

/// Parse a `--trace-level` value: error, warn, info, debug or trace
pub fn parse_trace_level(value: &str) -> std::result::Result<TraceLevel, String> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| format!("unknown trace level '{}'", value))
}

/// Read a term given on the command line
pub fn read_term(source: &str) -> Result<factq_term::Term> {
    factq_reader::parse_term(source).with_context(|| format!("Failed to read term: {}", source))
}
