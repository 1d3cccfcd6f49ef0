//! Per-field comparison of submitted and extracted values.

use crate::distance::similarity;
use crate::normalize::normalize;
use veridoc_types::{FieldMatch, IdentityField};

/// A pluggable scoring policy for normalized, non-identical value pairs.
///
/// Identity (confidence 1.0 exactly when the normalized strings are equal)
/// is enforced by [`FieldMatcher`] before the policy is consulted, so a
/// policy only ever scores pairs that already differ, and must return
/// strictly less than 1.0 for them.
pub trait MatchPolicy: Send + Sync {
    /// Human-readable name of this policy.
    fn name(&self) -> &str;

    /// Score a normalized, non-equal pair. Must return a value in [0, 1).
    fn score(&self, field: IdentityField, submitted: &str, extracted: &str) -> f64;
}

/// The strict policy: any difference is a flat zero.
pub struct ExactPolicy;

impl MatchPolicy for ExactPolicy {
    fn name(&self) -> &str {
        "exact"
    }

    fn score(&self, _field: IdentityField, _submitted: &str, _extracted: &str) -> f64 {
        0.0
    }
}

/// Partial credit by Levenshtein similarity.
///
/// A single OCR misread in a long surname scores close to 1.0 instead of
/// zeroing the field; the longer the value, the smaller the penalty per
/// character. Since the pair is known non-equal, the distance is at least 1
/// and the score stays strictly below 1.0.
pub struct EditDistancePolicy;

impl MatchPolicy for EditDistancePolicy {
    fn name(&self) -> &str {
        "edit_distance"
    }

    fn score(&self, _field: IdentityField, submitted: &str, extracted: &str) -> f64 {
        similarity(submitted, extracted)
    }
}

/// Compares one submitted value against one extracted value.
pub struct FieldMatcher {
    policy: Box<dyn MatchPolicy>,
}

impl FieldMatcher {
    /// Matcher with the strict binary policy.
    pub fn exact() -> Self {
        Self::with_policy(Box::new(ExactPolicy))
    }

    pub fn with_policy(policy: Box<dyn MatchPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Compare a form value against the document's extracted value.
    ///
    /// Pure and total: absent or degenerate input degrades to confidence
    /// 0.0, never a fault. An absent extracted value is the distinct
    /// "missing data" case (`FieldMatch::is_missing`), worded differently in
    /// the narrative but scored identically to a mismatch.
    pub fn match_field(
        &self,
        field: IdentityField,
        submitted: &str,
        extracted: Option<&str>,
    ) -> FieldMatch {
        let Some(extracted) = extracted else {
            return FieldMatch::new(field, submitted, None, false, 0.0);
        };

        let submitted_norm = normalize(field, submitted);
        let extracted_norm = normalize(field, extracted);

        // Values that normalize to nothing carry no evidence either way;
        // treat them as non-matching rather than vacuously equal.
        if submitted_norm.is_empty() || extracted_norm.is_empty() {
            return FieldMatch::new(field, submitted, Some(extracted.to_string()), false, 0.0);
        }

        if submitted_norm == extracted_norm {
            return FieldMatch::new(field, submitted, Some(extracted.to_string()), true, 1.0);
        }

        let score = self
            .policy
            .score(field, &submitted_norm, &extracted_norm)
            .clamp(0.0, 1.0)
            .min(next_below_one());
        FieldMatch::new(field, submitted, Some(extracted.to_string()), false, score)
    }
}

/// Upper bound for policy scores on non-equal pairs, strictly below 1.0.
fn next_below_one() -> f64 {
    1.0 - f64::EPSILON
}
