//! SHA-256 message digest engine (FIPS 180-4).
//!
//! Structured as the three cooperating subsystems the design mirrors a
//! hardware accelerator with:
//!
//! - [`computations`] / [`constants`] — C1, the pure bit functions and
//!   literal round constants / initial hash value.
//! - [`controller`] — C2, the byte-ingest and padding controller
//!   ([`controller::MessageController`]).
//! - [`engine`] — C3, a single compression engine
//!   ([`engine::Engine`]) with an explicit per-block state machine.
//! - [`pipeline`] — C3′, the optional N-engine chained block pipeline
//!   ([`pipeline::Pipeline`]).
//! - [`hasher`] — the top-level streaming service
//!   ([`hasher::Hasher`]) that composes the above into the public
//!   `reset`/`update`/`finalize` lifecycle.

pub mod computations;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod pipeline;

pub use constants::{H256_INIT, K256};
pub use controller::MessageController;
pub use engine::{Engine, EngineState, EngineStatus};
pub use error::DigestError;
pub use hasher::{Hasher, sha256};
pub use pipeline::{LaneState, Pipeline};
