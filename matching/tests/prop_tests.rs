use proptest::prelude::*;

use veridoc_matching::{
    levenshtein, normalize, similarity, EditDistancePolicy, FieldMatcher,
};
use veridoc_types::IdentityField;

fn any_field() -> impl Strategy<Value = IdentityField> {
    prop::sample::select(IdentityField::ALL.to_vec())
}

proptest! {
    /// normalize(normalize(x)) == normalize(x) for every field.
    #[test]
    fn normalize_is_idempotent(field in any_field(), raw in ".{0,40}") {
        let once = normalize(field, &raw);
        prop_assert_eq!(normalize(field, &once), once);
    }

    /// Normalized output never carries leading/trailing/doubled whitespace
    /// or uppercase characters.
    #[test]
    fn normalized_output_is_canonical(field in any_field(), raw in ".{0,40}") {
        let out = normalize(field, &raw);
        prop_assert!(!out.starts_with(' '));
        prop_assert!(!out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.contains(|c: char| c.is_uppercase()));
    }

    /// Similarity is symmetric and stays in [0, 1].
    #[test]
    fn similarity_symmetric_unit_range(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
        prop_assert_eq!(s, similarity(&b, &a));
    }

    /// Distance to self is zero; distance to a different string is not.
    #[test]
    fn levenshtein_identity(a in "[a-z]{0,20}") {
        prop_assert_eq!(levenshtein(&a, &a), 0);
    }

    /// Confidence is 1.0 exactly when the normalized values are identical
    /// (for non-degenerate inputs), under either policy.
    #[test]
    fn confidence_one_iff_normalized_equal(
        field in any_field(),
        submitted in "[A-Za-z][A-Za-z0-9 .-]{0,20}",
        extracted in "[A-Za-z][A-Za-z0-9 .-]{0,20}",
    ) {
        for matcher in [
            FieldMatcher::exact(),
            FieldMatcher::with_policy(Box::new(EditDistancePolicy)),
        ] {
            let m = matcher.match_field(field, &submitted, Some(&extracted));
            let norm_eq = !normalize(field, &submitted).is_empty()
                && normalize(field, &submitted) == normalize(field, &extracted);
            prop_assert_eq!(m.normalized_equal, norm_eq);
            if norm_eq {
                prop_assert_eq!(m.confidence(), 1.0);
            } else {
                prop_assert!(m.confidence() < 1.0);
            }
        }
    }

    /// A missing extracted value never passes, whatever the inputs.
    #[test]
    fn missing_extracted_never_passes(field in any_field(), submitted in ".{0,20}") {
        let matcher = FieldMatcher::exact();
        let m = matcher.match_field(field, &submitted, None);
        prop_assert_eq!(m.confidence(), 0.0);
        prop_assert!(m.is_missing());
    }
}
