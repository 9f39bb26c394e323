//! Hash algorithms exposed by the crate.
//!
//! Currently includes SHA-256 as a pipelined, streaming engine.

pub mod sha256;

/// Re-export of the SHA-256 convenience function and streaming `Hasher`.
pub use sha256::{Hasher, sha256};
