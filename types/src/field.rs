//! The fixed set of identity fields comparable between form and document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed attributes present on both the form and the document.
///
/// The variant order defines the order in which field matches appear in a
/// [`crate::VerificationResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    FirstName,
    LastName,
    IdNumber,
    Nationality,
    Sex,
    Expiry,
}

impl IdentityField {
    /// All comparable fields, in result order.
    pub const ALL: [IdentityField; 6] = [
        IdentityField::FirstName,
        IdentityField::LastName,
        IdentityField::IdNumber,
        IdentityField::Nationality,
        IdentityField::Sex,
        IdentityField::Expiry,
    ];

    /// Stable snake_case name used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::FirstName => "first_name",
            IdentityField::LastName => "last_name",
            IdentityField::IdNumber => "id_number",
            IdentityField::Nationality => "nationality",
            IdentityField::Sex => "sex",
            IdentityField::Expiry => "expiry",
        }
    }

    /// Human-readable label for narrative details.
    pub fn label(&self) -> &'static str {
        match self {
            IdentityField::FirstName => "First name",
            IdentityField::LastName => "Last name",
            IdentityField::IdNumber => "ID number",
            IdentityField::Nationality => "Nationality",
            IdentityField::Sex => "Sex",
            IdentityField::Expiry => "Expiry date",
        }
    }

    /// Whether hyphens are structurally significant for this field.
    ///
    /// ID numbers keep their hyphens during normalization; name fields do not.
    pub fn keeps_hyphens(&self) -> bool {
        matches!(self, IdentityField::IdNumber)
    }

    /// Whether this field holds a personal name.
    pub fn is_name(&self) -> bool {
        matches!(self, IdentityField::FirstName | IdentityField::LastName)
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
