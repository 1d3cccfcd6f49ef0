//! Fundamental types for the Veridoc verification engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identity fields, image blobs, the verification request, the
//! extracted document data, match results, and engine parameters.

pub mod error;
pub mod extracted;
pub mod field;
pub mod image;
pub mod params;
pub mod request;
pub mod result;

pub use error::ParamsError;
pub use extracted::ExtractedDocumentData;
pub use field::IdentityField;
pub use image::ImageBlob;
pub use params::EngineParams;
pub use request::VerificationRequest;
pub use result::{FaceMatchResult, FailureKind, FieldMatch, VerificationResult};
