//! Human-readable narrative lines for verification results.

use veridoc_types::{FaceMatchResult, FailureKind, FieldMatch};

/// Similarity below which the narrative advises retaking the selfie.
/// Advisory wording only; acceptance is decided by the overall threshold.
pub const FACE_ADVISORY_THRESHOLD: f64 = 0.7;

/// One line describing a field comparison.
pub fn field_detail(m: &FieldMatch) -> String {
    let label = m.field.label();
    if m.is_missing() {
        format!("{label}: not found on the document")
    } else if m.normalized_equal {
        format!("{label}: \"{}\" verified", m.submitted)
    } else {
        format!(
            "{label}: form has \"{}\" but the document shows \"{}\"",
            m.submitted,
            m.extracted.as_deref().unwrap_or_default()
        )
    }
}

/// Lines describing the facial comparison.
pub fn face_details(face: &FaceMatchResult) -> Vec<String> {
    let mut lines = vec![format!(
        "Face matching confidence: {:.1}%",
        face.similarity() * 100.0
    )];
    if face.similarity() < FACE_ADVISORY_THRESHOLD {
        lines.push("Face matching below threshold".to_string());
        lines.push("Please try again with a clearer selfie photo".to_string());
    } else {
        lines.push("Face successfully matched".to_string());
    }
    if !face.liveness_passed {
        lines.push("Liveness check was not confirmed".to_string());
    }
    lines
}

/// Lines explaining a short-circuited attempt and suggesting a remedy.
pub fn failure_details(kind: FailureKind) -> Vec<String> {
    match kind {
        FailureKind::InvalidInput => vec![
            "One of the uploaded files is not an image".to_string(),
            "Please upload photos of the document and your face".to_string(),
        ],
        FailureKind::ExtractionTimeout => vec![
            "Reading the document took too long".to_string(),
            "Please try again with better lighting".to_string(),
        ],
        FailureKind::ExtractionEngineFailure => vec![
            "Document verification failed".to_string(),
            "Please ensure the document photo is clear and try again".to_string(),
        ],
        FailureKind::FaceMatchEngineFailure => vec![
            "Facial verification failed".to_string(),
            "Please try again with a clearer selfie photo".to_string(),
        ],
        FailureKind::VerificationTimeout => vec![
            "Verification took too long and was cancelled".to_string(),
            "Please try again".to_string(),
        ],
    }
}

/// The closing line reflecting the decision.
pub fn overall_detail(accepted: bool, overall_confidence: f64) -> String {
    let verdict = if accepted {
        "Verification successful"
    } else {
        "Verification failed"
    };
    format!(
        "{verdict}: overall confidence {:.1}%",
        overall_confidence * 100.0
    )
}
