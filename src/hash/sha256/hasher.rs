//! Top-level digest service, composing [`MessageController`] with either
//! a single [`Engine`] or an N-lane [`Pipeline`].
//!
//! This is the crate's public entry point and implements the exact
//! signatures the external library interface calls for: `new`,
//! `update`, `finalize`, `reset`, plus `with_lanes` to opt into the
//! multi-engine mode. `finalize` consumes `self` — see `DESIGN.md` for
//! why that is the chosen reading of the "update after finalize fails"
//! requirement.

use super::constants::H256_INIT;
use super::controller::MessageController;
use super::engine::Engine;
use super::pipeline::Pipeline;

enum Lanes {
    Single(Engine),
    Multi(Pipeline),
}

/// A streaming SHA-256 digest engine.
///
/// ```
/// use nebula_sha256::hash::sha256::Hasher;
///
/// let mut hasher = Hasher::new();
/// hasher.update(b"abc");
/// let digest = hasher.finalize();
/// assert_eq!(
///     digest.iter().map(|b| format!("{b:02x}")).collect::<String>(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub struct Hasher {
    controller: MessageController,
    lanes: Lanes,
    lane_count: usize,
}

impl Hasher {
    /// A single-engine hasher seeded with `H⁰`.
    pub fn new() -> Self {
        Self::with_lanes(1)
    }

    /// A hasher that dispatches blocks across `lane_count` chained
    /// compression engines. `lane_count == 1` is equivalent to
    /// [`Hasher::new`]; any value produces the same digest as any other
    /// (spec §8 property 4, "multi-engine equivalence").
    pub fn with_lanes(lane_count: usize) -> Self {
        assert!(lane_count >= 1, "a hasher needs at least one lane");
        let lanes = if lane_count == 1 {
            Lanes::Single(Engine::new())
        } else {
            Lanes::Multi(Pipeline::new(lane_count))
        };
        Self {
            controller: MessageController::new(),
            lanes,
            lane_count,
        }
    }

    /// Appends message bytes. Arbitrary slicing across calls is
    /// equivalent to feeding the concatenation in one call (spec §8
    /// property 2, "chunking independence").
    pub fn update(&mut self, bytes: &[u8]) {
        self.controller
            .feed_bytes(bytes)
            .expect("Hasher's own controller never exceeds its unbounded buffer");
    }

    /// Finalizes the stream and returns the 32-byte digest in FIPS
    /// big-endian order (`H0` highest, `H7` lowest). Consumes `self`:
    /// there is no way to call `update` again without going through
    /// [`Hasher::new`]/[`Hasher::with_lanes`] (or, for a reusable
    /// handle, [`Hasher::reset`] before finalizing).
    pub fn finalize(mut self) -> [u8; 32] {
        self.controller
            .finish()
            .expect("Hasher's own controller is only ever finished once per instance");

        let h = match &mut self.lanes {
            Lanes::Single(engine) => {
                engine.start(self.controller.block_count(), H256_INIT);
                engine.run_to_completion(&self.controller);
                engine.state()
            }
            Lanes::Multi(pipeline) => pipeline.run(&self.controller),
        };

        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Returns to the initial state, as if newly constructed with the
    /// same lane count.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.lanes = if self.lane_count == 1 {
            Lanes::Single(Engine::new())
        } else {
            Lanes::Multi(Pipeline::new(self.lane_count))
        };
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the SHA-256 digest of `input` in one call, for callers who
/// don't need the streaming interface.
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}
