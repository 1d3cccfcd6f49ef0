//! Canonicalization of raw identity-field values.

use veridoc_types::IdentityField;

/// Canonicalize a raw field value for comparison.
///
/// Deterministic, pure, total, and idempotent. Lowercases, trims, collapses
/// internal whitespace runs to a single space, and strips periods. Hyphens
/// are stripped for name fields but kept for ID numbers, where they are
/// structurally significant. Sex and nationality values are additionally
/// folded to canonical forms so that e.g. "M" and "Male", or "Ghana" and
/// "Ghanaian", compare equal.
pub fn normalize(field: IdentityField, raw: &str) -> String {
    let text = normalize_text(raw, field.keeps_hyphens());
    match field {
        IdentityField::Sex => canonical_sex(text),
        IdentityField::Nationality => canonical_nationality(text),
        IdentityField::IdNumber => canonical_id_number(text),
        _ => text,
    }
}

/// Case/whitespace/punctuation normalization shared by all fields.
fn normalize_text(raw: &str, keep_hyphens: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c == '.' || (c == '-' && !keep_hyphens) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lower in c.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// Fold sex/gender spellings onto "male" / "female".
fn canonical_sex(text: String) -> String {
    match text.as_str() {
        "m" | "male" | "man" => "male".to_string(),
        "f" | "female" | "woman" => "female".to_string(),
        _ => text,
    }
}

/// Fold country names onto their demonym so "Ghana" matches "Ghanaian".
fn canonical_nationality(text: String) -> String {
    match text.as_str() {
        "ghana" => "ghanaian".to_string(),
        "nigeria" => "nigerian".to_string(),
        "kenya" => "kenyan".to_string(),
        "america" | "usa" => "american".to_string(),
        "uk" | "britain" => "british".to_string(),
        "canada" => "canadian".to_string(),
        _ => text,
    }
}

/// Normalize the Ghana-card prefix variation: a bare "gh" prefix followed by
/// the numeric body is the same document series as "gha".
fn canonical_id_number(text: String) -> String {
    if let Some(rest) = text.strip_prefix("gh") {
        if !rest.starts_with('a')
            && rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '-')
        {
            return format!("gha{rest}");
        }
    }
    text
}
