//! HTTP service for the verification engine.
//!
//! Provides endpoints for:
//! - `POST /verify` — run one verification attempt
//! - `GET /health` — liveness probe
//!
//! Images travel as base64 strings with a declared media type; the response
//! is the serialized verification result plus a display percentage.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::RpcServer;
