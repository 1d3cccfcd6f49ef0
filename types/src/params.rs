//! Engine parameters — every tunable the verification core exposes.

use crate::error::ParamsError;
use serde::{Deserialize, Serialize};

/// Configuration for the verification engine.
///
/// Can be embedded in a TOML service config (every field has a serde
/// default) or built programmatically for tests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    /// Minimum overall confidence (0–1 fraction) for `accepted = true`.
    /// Compared inclusively: a confidence exactly at the threshold passes.
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f64,

    /// Hard deadline for document extraction, in milliseconds.
    #[serde(default = "default_extraction_timeout_ms")]
    pub extraction_timeout_ms: u64,

    /// Language hint passed to the OCR capability.
    #[serde(default = "default_extraction_language")]
    pub extraction_language: String,

    /// Deadline for face matching, in milliseconds. Symmetric with
    /// extraction for operational parity; in practice it only bounds a hung
    /// capability.
    #[serde(default = "default_face_timeout_ms")]
    pub face_timeout_ms: u64,

    /// Deadline for the whole request, in milliseconds. When it fires, both
    /// channel tasks are cancelled.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_acceptance_threshold() -> f64 {
    0.50
}

fn default_extraction_timeout_ms() -> u64 {
    30_000
}

fn default_extraction_language() -> String {
    "eng".to_string()
}

fn default_face_timeout_ms() -> u64 {
    30_000
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineParams {
    /// Check the parameters for programmer errors.
    ///
    /// An out-of-range threshold is a misconfiguration, not an expected
    /// failure mode, so callers should fail fast on it at startup.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(0.0..=1.0).contains(&self.acceptance_threshold)
            || self.acceptance_threshold.is_nan()
        {
            return Err(ParamsError::ThresholdOutOfRange(self.acceptance_threshold));
        }
        if self.extraction_timeout_ms == 0 {
            return Err(ParamsError::ZeroTimeout("extraction_timeout_ms"));
        }
        if self.face_timeout_ms == 0 {
            return Err(ParamsError::ZeroTimeout("face_timeout_ms"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ParamsError::ZeroTimeout("request_timeout_ms"));
        }
        Ok(())
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
            extraction_timeout_ms: default_extraction_timeout_ms(),
            extraction_language: default_extraction_language(),
            face_timeout_ms: default_face_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters() {
        let params = EngineParams::default();
        assert_eq!(params.acceptance_threshold, 0.50);
        assert_eq!(params.extraction_timeout_ms, 30_000);
        assert_eq!(params.extraction_language, "eng");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut params = EngineParams::default();
        params.acceptance_threshold = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ThresholdOutOfRange(_))
        ));

        params.acceptance_threshold = -0.1;
        assert!(params.validate().is_err());

        params.acceptance_threshold = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut params = EngineParams::default();
        params.request_timeout_ms = 0;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ZeroTimeout("request_timeout_ms"))
        ));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let params: EngineParams =
            serde_json::from_str(r#"{"acceptance_threshold": 0.6}"#).unwrap();
        assert_eq!(params.acceptance_threshold, 0.6);
        assert_eq!(params.extraction_timeout_ms, 30_000);
        assert_eq!(params.extraction_language, "eng");
    }
}
