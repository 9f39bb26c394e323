//! A pipelined SHA-256 message digest engine for Nebula.
//!
//! This crate implements FIPS 180-4 SHA-256 as three cooperating
//! subsystems modeled on a hardware accelerator design: a byte-ingest
//! and padding controller, a message-schedule and compression engine,
//! and an optional multi-instance block-level pipeline that chains N
//! compression engines to process successive 512-bit blocks.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level cryptographic API. The crate
//! is dependency-free, explicit in its semantics, and suitable for
//! security-critical code.
//!
//! # Module overview
//!
//! - `hash`
//!   The SHA-256 digest engine: constants and bit primitives, the
//!   message controller, the single- and multi-engine compression
//!   pipelines, and the streaming [`hash::Hasher`] that ties them
//!   together into the public `reset`/`update`/`finalize` interface.
//!
//! # Design goals
//!
//! - No heap allocations beyond the message buffer itself
//! - Minimal and explicit APIs
//! - Bit-exact FIPS 180-4 conformance under streamed input of unknown
//!   length
//! - Correct one-pass padding and ordered block dispatch across any
//!   number of chained compression engines
//!
//! This crate is not intended to replace full-featured, externally
//! audited cryptographic libraries, but to serve as a small, controlled,
//! single-algorithm foundation suitable for a later accelerator, library
//! call, or framed wire-protocol hash service.

pub mod hash;

pub use hash::sha256::{DigestError, Hasher, sha256};
