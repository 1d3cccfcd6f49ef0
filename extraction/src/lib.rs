//! Document text extraction.
//!
//! The OCR capability itself is opaque: it lives behind the [`OcrEngine`]
//! trait. This crate owns everything around it: media-type validation, the
//! hard extraction deadline, session cleanup on every exit path, progress
//! relaying, and parsing the recognized raw text into the fixed identity
//! field set.

pub mod client;
pub mod engine;
pub mod error;
pub mod parser;
pub mod progress;

pub use client::ExtractionClient;
pub use engine::{HttpOcrEngine, OcrEngine, OcrSession};
pub use error::ExtractionError;
pub use parser::parse_document_text;
pub use progress::{NoProgress, ProgressObserver};
