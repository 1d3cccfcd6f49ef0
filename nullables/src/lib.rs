//! Nullable infrastructure for deterministic testing.
//!
//! The two external capabilities (OCR, face similarity) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Can be told to fail, or to hang until a deadline fires
//! - Never touch the filesystem or network
//!
//! Usage: swap real engines for nullables in tests.

pub mod face;
pub mod ocr;

pub use face::NullFaceEngine;
pub use ocr::NullOcrEngine;
