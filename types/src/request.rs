//! The inbound verification request.

use crate::field::IdentityField;
use crate::image::ImageBlob;
use serde::{Deserialize, Serialize};

/// Everything the caller submits for one verification attempt.
///
/// Assembled by the form layer (all text fields pre-validated for presence)
/// and consumed exactly once by the orchestrator. Immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone_number: String,

    // Address block as captured by the form.
    pub address: String,
    pub landmark: String,
    pub digital_address: String,
    pub region: String,
    pub city: String,
    pub area: String,

    pub id_type: String,
    pub id_number: String,
    pub id_expiry: String,

    /// Claimed nationality. Region-locked deployments have no nationality
    /// input on the form, so this may be absent; an absent value means the
    /// field is skipped on the form side, not scored as a mismatch.
    #[serde(default)]
    pub nationality: Option<String>,

    /// Photograph of the identity document.
    pub document_image: ImageBlob,
    /// Selfie to compare against the document portrait.
    pub selfie_image: ImageBlob,
}

impl VerificationRequest {
    /// The submitted value for an identity field, if the form carries one.
    ///
    /// A blank value means the form did not capture the field; it is skipped
    /// rather than scored. (Extraction-side absence is different: a field
    /// the *document* fails to surface still scores 0.0.)
    pub fn form_value(&self, field: IdentityField) -> Option<&str> {
        let value = match field {
            IdentityField::FirstName => &self.first_name,
            IdentityField::LastName => &self.last_name,
            IdentityField::IdNumber => &self.id_number,
            IdentityField::Nationality => return self.nationality.as_deref().and_then(non_blank),
            IdentityField::Sex => &self.gender,
            IdentityField::Expiry => &self.id_expiry,
        };
        non_blank(value)
    }

    /// Identity fields the form actually carries, in result order.
    pub fn comparable_fields(&self) -> Vec<IdentityField> {
        IdentityField::ALL
            .into_iter()
            .filter(|f| self.form_value(*f).is_some())
            .collect()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
