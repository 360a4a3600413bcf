//! Engine configuration

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth of evaluation
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Log level used by the `traced` operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<TraceLevel> for log::Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Error => log::Level::Error,
            TraceLevel::Warn => log::Level::Warn,
            TraceLevel::Info => log::Level::Info,
            TraceLevel::Debug => log::Level::Debug,
            TraceLevel::Trace => log::Level::Trace,
        }
    }
}

/// Engine settings.
///
/// Deserializes from a partial document; missing keys take their defaults:
///
/// ```
/// use factq_eval::{EngineConfig, TraceLevel};
///
/// let config: EngineConfig = serde_json::from_str(r#"{"trace_level": "debug"}"#).unwrap();
/// assert_eq!(config.max_depth, 256);
/// assert_eq!(config.trace_level, TraceLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest nesting of term evaluation before `RecursionLimit`
    pub max_depth: usize,
    /// Level `traced` logs at
    pub trace_level: TraceLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace_level: TraceLevel::default(),
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the level `traced` logs at
    pub fn trace_level(&mut self, level: TraceLevel) -> &mut Self {
        self.config.trace_level = level;
        self
    }

    pub fn build(&self) -> EngineConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = EngineConfig::builder()
            .max_depth(8)
            .trace_level(TraceLevel::Warn)
            .build();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.trace_level, TraceLevel::Warn);
        assert_eq!(EngineConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_trace_level_maps_to_log_level() {
        assert_eq!(log::Level::from(TraceLevel::Debug), log::Level::Debug);
    }
}
