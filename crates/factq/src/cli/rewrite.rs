//! Simplify and fmt commands

use super::read_term;
use anyhow::Result;
use factq_eval::{Engine, EngineConfig};

/// The simplified canonical form of a term
pub fn simplify(source: &str, config: &EngineConfig) -> Result<String> {
    let term = read_term(source)?;
    let engine = Engine::new().with_config(config.clone());
    Ok(engine.simplify(&term).to_string())
}

/// The canonical form of a term
pub fn fmt(source: &str) -> Result<String> {
    Ok(read_term(source)?.to_string())
}
