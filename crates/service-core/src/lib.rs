//! Shared HTTP plumbing for the Nimbus workers.
//!
//! Every worker serves a small JSON API to browser clients, so they all need
//! the same permissive CORS policy, the same content-hash helpers for cache
//! keys and signed-hash validation, and the same short-id generator. This
//! crate holds those pieces so the worker crates stay thin.

mod cors;
mod hash;
mod id;

pub use cors::cors_layer;
pub use hash::{md5_hex, sha256_hex};
pub use id::short_id;
