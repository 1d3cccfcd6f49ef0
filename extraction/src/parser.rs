//! Heuristic parsing of recognized document text into identity fields.
//!
//! Identity cards do not come with a schema: the recognized text is a pile
//! of lines mixing labels, values, and noise. The heuristics here are tuned
//! for Ghana-card-style layouts (uppercase name lines, labelled fields,
//! `GHA-…` document numbers) but degrade gracefully: a field that cannot
//! be located is simply absent from the output.

use regex::Regex;
use std::sync::LazyLock;
use veridoc_types::{ExtractedDocumentData, IdentityField};

static UPPER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+$").expect("static regex"));
static UPPER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+(\s[A-Z]+)*$").expect("static regex"));
static GHA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GHA[-\s]?\d+[-\s]?\d*").expect("static regex"));
static LABELLED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID[-\s:]?\d+[-\s]?\d*").expect("static regex"));
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{9,}").expect("static regex"));
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}|\d{2}[./]\d{2}[./]\d{4}").expect("static regex")
});

const FIRST_NAME_LABELS: [&str; 5] = ["Firstname", "Prénoms", "First name", "Given name", "Name"];
const NATIONALITY_LABELS: [&str; 4] = ["Nationality", "Nation", "Citizen", "Citizenship"];
const EXPIRY_LABELS: [&str; 4] = ["Expiry", "Expiration", "Valid until", "Date of expiry"];

/// Parse recognized raw text into the fixed identity field set.
///
/// Never fails; fields that cannot be located are absent.
pub fn parse_document_text(text: &str) -> ExtractedDocumentData {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut data = ExtractedDocumentData::new();

    let last_name = find_last_name(&lines);
    if let Some(name) = &last_name {
        data.set(IdentityField::LastName, name.clone());
    }
    if let Some(name) = find_first_name(&lines, last_name.as_deref()) {
        data.set(IdentityField::FirstName, name);
    }
    if let Some(id) = find_id_number(&lines) {
        data.set(IdentityField::IdNumber, id);
    }
    if let Some(nationality) = find_nationality(&lines) {
        data.set(IdentityField::Nationality, nationality);
    }
    if let Some(sex) = find_sex(&lines) {
        data.set(IdentityField::Sex, sex);
    }
    if let Some(expiry) = find_expiry(&lines) {
        data.set(IdentityField::Expiry, expiry);
    }

    data
}

/// A standalone all-uppercase word is the surname line on most card layouts.
fn find_last_name(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|line| line.len() > 1 && UPPER_WORD.is_match(line))
        .map(|line| line.to_string())
}

fn find_first_name(lines: &[&str], last_name: Option<&str>) -> Option<String> {
    // First choice: an uppercase line distinct from the surname line.
    let direct = lines
        .iter()
        .find(|&&line| line.len() > 1 && UPPER_LINE.is_match(line) && Some(line) != last_name)
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string);
    if direct.is_some() {
        return direct;
    }

    // Fallback: an uppercase line within two lines after a first-name label.
    for (i, line) in lines.iter().enumerate() {
        if !FIRST_NAME_LABELS.iter().any(|label| line.contains(label)) {
            continue;
        }
        for candidate in lines.iter().skip(i + 1).take(2) {
            if candidate.len() > 1 && UPPER_LINE.is_match(candidate) {
                return candidate.split_whitespace().next().map(str::to_string);
            }
        }
    }
    None
}

fn find_id_number(lines: &[&str]) -> Option<String> {
    for line in lines {
        for pattern in [&*GHA_ID, &*LABELLED_ID, &*DIGIT_RUN] {
            if let Some(found) = pattern.find(line) {
                return Some(found.as_str().replace(' ', ""));
            }
        }
    }
    None
}

fn find_nationality(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !NATIONALITY_LABELS
            .iter()
            .any(|label| lower.contains(&label.to_lowercase()))
        {
            continue;
        }

        // Value on the label line itself, or on the following line.
        for candidate in std::iter::once(*line).chain(lines.get(i + 1).copied()) {
            if let Some(n) = nationality_in(candidate) {
                return Some(n);
            }
        }

        // Otherwise take a capitalized word from the next line.
        if let Some(next) = lines.get(i + 1) {
            for word in next.split_whitespace() {
                let significant = word.len() > 2
                    && word.chars().next().is_some_and(char::is_uppercase)
                    && !matches!(word.to_lowercase().as_str(), "the" | "and" | "for" | "with");
                if significant {
                    return Some(if word.eq_ignore_ascii_case("ghana") {
                        "Ghanaian".to_string()
                    } else {
                        word.to_string()
                    });
                }
            }
        }
    }

    // No label anywhere: fall back to a demonym mention on any line.
    lines.iter().find_map(|line| nationality_in(line))
}

fn nationality_in(line: &str) -> Option<String> {
    let lower = line.to_lowercase();
    if lower.contains("ghanaian") || lower.contains("ghana") {
        Some("Ghanaian".to_string())
    } else {
        None
    }
}

fn find_sex(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();

        if lower.contains("sex") || lower.contains("gender") {
            // Value on the label line itself ("Sex/Sexe M"), spelled out or
            // as a single letter.
            if let Some(sex) = sex_in(&lower).or_else(|| single_letter_sex(&lower)) {
                return Some(sex);
            }
            if let Some(next) = lines.get(i + 1) {
                let next_lower = next.to_lowercase();
                if let Some(sex) = sex_in(&next_lower).or_else(|| single_letter_sex(&next_lower))
                {
                    return Some(sex);
                }
            }
            continue;
        }

        // A line that is nothing but the value.
        match lower.trim() {
            "male" | "m" => return Some("Male".to_string()),
            "female" | "f" => return Some("Female".to_string()),
            _ => {}
        }
    }

    // Last resort: a word-boundary mention anywhere.
    lines.iter().find_map(|line| sex_in(&line.to_lowercase()))
}

/// Word-boundary male/female detection; "female" contains "male", so check
/// the longer token first.
fn sex_in(lower: &str) -> Option<String> {
    let words: Vec<&str> = tokens(lower);
    if words.contains(&"female") {
        Some("Female".to_string())
    } else if words.contains(&"male") {
        Some("Male".to_string())
    } else {
        None
    }
}

/// A standalone `m` or `f` token, as printed next to the Sex label.
fn single_letter_sex(lower: &str) -> Option<String> {
    let words: Vec<&str> = tokens(lower);
    if words.contains(&"f") {
        Some("Female".to_string())
    } else if words.contains(&"m") {
        Some("Male".to_string())
    } else {
        None
    }
}

fn tokens(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn find_expiry(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !EXPIRY_LABELS
            .iter()
            .any(|label| lower.contains(&label.to_lowercase()))
        {
            continue;
        }
        for candidate in std::iter::once(*line).chain(lines.get(i + 1).copied()) {
            if let Some(date) = DATE.find(candidate) {
                return Some(date.as_str().to_string());
            }
        }
    }
    None
}
