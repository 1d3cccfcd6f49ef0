//! Identity data recognized from a document image.

use crate::field::IdentityField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The field values recognized from one document image.
///
/// Produced once per verification attempt by document extraction. A field the
/// extractor could not find is simply absent; absence is data ("the document
/// did not surface this field"), not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocumentData {
    values: BTreeMap<IdentityField, String>,
}

impl ExtractedDocumentData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recognized value. Empty strings are treated as "not found".
    pub fn set(&mut self, field: IdentityField, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(field, value);
        }
    }

    pub fn get(&self, field: IdentityField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Fields the extractor recognized, in result order.
    pub fn present_fields(&self) -> impl Iterator<Item = IdentityField> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
