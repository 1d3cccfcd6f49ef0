//! Verification outcome types.

use crate::field::IdentityField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a verification attempt could not be completed.
///
/// A legitimate negative result (fields or face disagree) is *not* a failure
/// kind: it is a normal [`VerificationResult`] with `accepted = false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A non-image input was handed to one of the clients.
    InvalidInput,
    /// Document extraction exceeded its deadline.
    ExtractionTimeout,
    /// The OCR capability itself faulted.
    ExtractionEngineFailure,
    /// The face-similarity capability faulted.
    FaceMatchEngineFailure,
    /// The whole request exceeded its deadline.
    VerificationTimeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::InvalidInput => "invalid input",
            FailureKind::ExtractionTimeout => "document extraction timed out",
            FailureKind::ExtractionEngineFailure => "document extraction failed",
            FailureKind::FaceMatchEngineFailure => "face matching failed",
            FailureKind::VerificationTimeout => "verification timed out",
        };
        write!(f, "{s}")
    }
}

/// The comparison outcome for a single identity field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub field: IdentityField,
    pub submitted: String,
    /// What the document surfaced for this field, if anything.
    pub extracted: Option<String>,
    pub normalized_equal: bool,
    confidence: f64,
}

impl FieldMatch {
    /// Build a field match, clamping confidence into [0, 1].
    pub fn new(
        field: IdentityField,
        submitted: impl Into<String>,
        extracted: Option<String>,
        normalized_equal: bool,
        confidence: f64,
    ) -> Self {
        Self {
            field,
            submitted: submitted.into(),
            extracted,
            normalized_equal,
            confidence: clamp_unit(confidence),
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Whether the document failed to surface this field at all.
    ///
    /// Scores 0.0 like a mismatch, but the narrative wording differs.
    pub fn is_missing(&self) -> bool {
        self.extracted.is_none()
    }
}

/// The facial-similarity outcome for one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceMatchResult {
    similarity: f64,
    pub liveness_passed: bool,
}

impl FaceMatchResult {
    pub fn new(similarity: f64, liveness_passed: bool) -> Self {
        Self {
            similarity: clamp_unit(similarity),
            liveness_passed,
        }
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }
}

/// The immutable output of one verification attempt.
///
/// Constructed exactly once per request by the orchestrator. `accepted` is
/// always derived from `overall_confidence` and the configured threshold;
/// there is no way to set it independently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationResult {
    accepted: bool,
    overall_confidence: f64,
    field_matches: Vec<FieldMatch>,
    face_match: Option<FaceMatchResult>,
    details: Vec<String>,
    failure_reason: Option<FailureKind>,
}

impl VerificationResult {
    /// A completed attempt: both channels produced output and the confidence
    /// was aggregated. Acceptance is decided here, by inclusive threshold
    /// comparison, and nowhere else.
    pub fn decided(
        overall_confidence: f64,
        threshold: f64,
        field_matches: Vec<FieldMatch>,
        face_match: FaceMatchResult,
        details: Vec<String>,
    ) -> Self {
        let overall_confidence = clamp_unit(overall_confidence);
        Self {
            accepted: overall_confidence >= threshold,
            overall_confidence,
            field_matches,
            face_match: Some(face_match),
            details,
            failure_reason: None,
        }
    }

    /// A short-circuited attempt: one channel failed, so no partial scores
    /// are reported; a specific-looking number on an incomplete attempt
    /// would mislead.
    pub fn failed(reason: FailureKind, details: Vec<String>) -> Self {
        Self {
            accepted: false,
            overall_confidence: 0.0,
            field_matches: Vec::new(),
            face_match: None,
            details,
            failure_reason: Some(reason),
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn overall_confidence(&self) -> f64 {
        self.overall_confidence
    }

    pub fn field_matches(&self) -> &[FieldMatch] {
        &self.field_matches
    }

    pub fn face_match(&self) -> Option<&FaceMatchResult> {
        self.face_match.as_ref()
    }

    /// Human-readable narrative, in presentation order.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn failure_reason(&self) -> Option<FailureKind> {
        self.failure_reason
    }

    /// The overall confidence as a display percentage (one decimal place).
    pub fn overall_percent(&self) -> String {
        format!("{:.1}", self.overall_confidence * 100.0)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
