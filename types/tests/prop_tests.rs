use proptest::prelude::*;

use veridoc_types::{FaceMatchResult, FailureKind, FieldMatch, IdentityField, VerificationResult};

proptest! {
    /// FieldMatch confidence is always clamped into [0, 1].
    #[test]
    fn field_match_confidence_in_unit_interval(raw in -10.0f64..10.0) {
        let m = FieldMatch::new(IdentityField::FirstName, "a", None, false, raw);
        prop_assert!((0.0..=1.0).contains(&m.confidence()));
    }

    /// FaceMatchResult similarity is always clamped into [0, 1].
    #[test]
    fn face_similarity_in_unit_interval(raw in -10.0f64..10.0) {
        let face = FaceMatchResult::new(raw, false);
        prop_assert!((0.0..=1.0).contains(&face.similarity()));
    }

    /// `accepted` is exactly `overall_confidence >= threshold` after clamping.
    #[test]
    fn accepted_is_pure_function_of_confidence_and_threshold(
        confidence in -1.0f64..2.0,
        threshold in 0.0f64..1.0,
    ) {
        let result = VerificationResult::decided(
            confidence,
            threshold,
            vec![],
            FaceMatchResult::new(0.5, true),
            vec![],
        );
        let clamped = confidence.clamp(0.0, 1.0);
        prop_assert_eq!(result.accepted(), clamped >= threshold);
        prop_assert!((0.0..=1.0).contains(&result.overall_confidence()));
    }

    /// Failed results never report scores, whatever the failure kind.
    #[test]
    fn failed_results_carry_no_scores(kind_idx in 0usize..5) {
        let kinds = [
            FailureKind::InvalidInput,
            FailureKind::ExtractionTimeout,
            FailureKind::ExtractionEngineFailure,
            FailureKind::FaceMatchEngineFailure,
            FailureKind::VerificationTimeout,
        ];
        let result = VerificationResult::failed(kinds[kind_idx], vec!["failed".into()]);
        prop_assert!(!result.accepted());
        prop_assert_eq!(result.overall_confidence(), 0.0);
        prop_assert!(result.field_matches().is_empty());
        prop_assert!(result.face_match().is_none());
    }
}
