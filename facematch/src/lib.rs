//! Facial-similarity scoring.
//!
//! The embedding math is opaque: it lives behind the [`FaceEngine`] trait.
//! This crate owns input validation and the optional deadline, symmetric
//! with document extraction for operational parity.

pub mod client;
pub mod engine;
pub mod error;

pub use client::FaceMatchClient;
pub use engine::{FaceEngine, HttpFaceEngine};
pub use error::FaceMatchError;
