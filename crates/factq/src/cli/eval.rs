//! Eval command implementation

use super::output::{self, Results};
use super::read_term;
use anyhow::{Context, Result};
use factq_eval::json::{fact_from_json, rows_from_json};
use factq_eval::{Engine, EngineConfig, EvalResult, MemoryFact, Row};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for eval command
pub struct EvalConfig {
    pub term: String,
    pub fact: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub repeat_over: Option<PathBuf>,
    pub engine: EngineConfig,
    pub verbose: bool,
    pub format: output::OutputFormat,
}

/// Evaluate a term and print the results
pub fn eval(config: EvalConfig) -> Result<()> {
    let results = run(&config)?;
    output::print_results(&results, config.format)
}

/// Evaluate a term once against `--fact`, or once per fact of
/// `--repeat-over` with a single term instance.
pub fn run(config: &EvalConfig) -> Result<Results> {
    let engine = Engine::new().with_config(config.engine.clone());
    let mut term = read_term(&config.term)?;

    let maps = match &config.maps {
        Some(path) => load_rows(path)?,
        None => Vec::new(),
    };
    if config.verbose {
        eprintln!("Evaluating {} with {} rows", term, maps.len());
    }

    match &config.repeat_over {
        Some(path) => {
            let mut facts = load_facts(path)?;
            if config.verbose {
                eprintln!("Scanning {} facts from {}", facts.len(), path.display());
            }
            Ok(Results::Scan(engine.scan(&mut term, &mut facts, &maps)?))
        }
        None => {
            let mut fact = match &config.fact {
                Some(path) => fact_from_json(&load_json(path)?)
                    .with_context(|| format!("Invalid fact in {}", path.display()))?,
                None => MemoryFact::new(),
            };
            Ok(Results::Single(engine.evaluate(&mut term, &mut fact, &maps)?))
        }
    }
}

fn load_json(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))
}

fn load_rows(path: &Path) -> Result<Vec<Row>> {
    rows_from_json(&load_json(path)?).with_context(|| format!("Invalid rows in {}", path.display()))
}

fn load_facts(path: &Path) -> Result<Vec<MemoryFact>> {
    let json = load_json(path)?;
    let items = json
        .as_array()
        .with_context(|| format!("Expected a JSON array of facts in {}", path.display()))?;
    items
        .iter()
        .map(fact_from_json)
        .collect::<EvalResult<Vec<_>>>()
        .with_context(|| format!("Invalid fact in {}", path.display()))
}
