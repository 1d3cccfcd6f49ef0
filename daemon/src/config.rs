//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use veridoc_types::EngineParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Invalid(String),
}

/// Configuration for the Veridoc service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). CLI flags and environment
/// variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port the HTTP service listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Recognize route of the external OCR service.
    #[serde(default = "default_ocr_endpoint")]
    pub ocr_endpoint: String,

    /// Compare route of the external face service.
    #[serde(default = "default_face_endpoint")]
    pub face_endpoint: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Engine tunables (threshold, timeouts, language).
    #[serde(default)]
    pub engine: EngineParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_port() -> u16 {
    7080
}

fn default_ocr_endpoint() -> String {
    "http://127.0.0.1:5000/recognize".to_string()
}

fn default_face_endpoint() -> String {
    "http://127.0.0.1:5000/compare".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            ocr_endpoint: default_ocr_endpoint(),
            face_endpoint: default_face_endpoint(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            engine: EngineParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ServiceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.listen_port, config.listen_port);
        assert_eq!(parsed.engine.acceptance_threshold, 0.50);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.listen_port, 7080);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.engine.extraction_timeout_ms, 30_000);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            listen_port = 9999

            [engine]
            acceptance_threshold = 0.65
        "#;
        let config = ServiceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.listen_port, 9999);
        assert_eq!(config.engine.acceptance_threshold, 0.65);
        assert_eq!(config.engine.extraction_language, "eng"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ServiceConfig::from_toml_file("/nonexistent/veridoc.toml");
        assert!(result.is_err());
    }
}
