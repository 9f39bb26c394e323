//! Compression engine (C3), single-engine mode.
//!
//! Implements the per-block state machine from the spec literally: one
//! block is loaded, its schedule extended, 64 rounds of compression run,
//! the hash state updated, and then either the next block is dispatched
//! or the engine finalizes. [`Engine::step`] advances exactly one
//! transition (the cycle-accurate mode); [`Engine::run_to_completion`]
//! loops `step` until done, which is what [`super::hasher::Hasher`] uses.

use super::computations::{big_sigma0, big_sigma1, ch, maj, small_sigma0, small_sigma1};
use super::constants::K256;
use super::controller::MessageController;

/// One state of the per-block compression pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Load,
    Extend,
    Compress,
    Update,
    Dispatch,
    Finalize,
    Done,
}

/// Snapshot returned by [`Engine::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineStatus {
    pub busy: bool,
    pub done: bool,
}

/// A single compression unit, processing blocks `0..num_blocks` in order.
#[derive(Debug)]
pub struct Engine {
    state: EngineState,
    h: [u32; 8],
    w: [u32; 64],
    round: usize,
    block_index: usize,
    num_blocks: usize,
}

impl Engine {
    /// An engine not yet armed with `start`.
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            h: [0; 8],
            w: [0; 64],
            round: 0,
            block_index: 0,
            num_blocks: 0,
        }
    }

    /// Arms the engine to process `num_blocks` blocks starting from
    /// `input_h`. No-op precondition violations leave the engine in
    /// `Idle` rather than panicking — per spec this engine fails closed.
    pub fn start(&mut self, num_blocks: usize, input_h: [u32; 8]) {
        self.h = input_h;
        self.num_blocks = num_blocks;
        self.block_index = 0;
        self.round = 0;
        self.w = [0; 64];
        self.state = if num_blocks == 0 {
            EngineState::Finalize
        } else {
            EngineState::Load
        };
    }

    /// Advances the engine by exactly one state transition, pulling
    /// words from `controller` as needed during `LOAD`/`EXTEND`.
    pub fn step(&mut self, controller: &MessageController) {
        match self.state {
            EngineState::Idle => {}

            EngineState::Load => {
                for word_index in 0..16 {
                    self.w[word_index] = controller
                        .word(self.block_index, word_index)
                        .expect("engine requested a block/word the controller cannot serve");
                }
                self.state = EngineState::Extend;
            }

            EngineState::Extend => {
                for i in 16..64 {
                    let s0 = small_sigma0(self.w[i - 15]);
                    let s1 = small_sigma1(self.w[i - 2]);
                    self.w[i] = self.w[i - 16]
                        .wrapping_add(s0)
                        .wrapping_add(self.w[i - 7])
                        .wrapping_add(s1);
                }
                self.round = 0;
                self.state = EngineState::Compress;
            }

            EngineState::Compress => {
                // Collapsed mode: run all 64 rounds in one transition.
                // The `round` counter is retained so a cycle-accurate
                // caller could instead single-step it, per spec §5.
                let mut vars = self.h;
                for t in 0..64 {
                    compress_round(&mut vars, self.w[t], K256[t]);
                }
                self.round = 64;
                for i in 0..8 {
                    self.h[i] = self.h[i].wrapping_add(vars[i]);
                }
                self.state = EngineState::Update;
            }

            EngineState::Update => {
                self.state = EngineState::Dispatch;
            }

            EngineState::Dispatch => {
                self.block_index += 1;
                self.state = if self.block_index < self.num_blocks {
                    EngineState::Load
                } else {
                    EngineState::Finalize
                };
            }

            EngineState::Finalize => {
                self.state = EngineState::Done;
            }

            EngineState::Done => {}
        }
    }

    /// Runs the engine to completion against `controller`'s blocks.
    pub fn run_to_completion(&mut self, controller: &MessageController) {
        while self.state != EngineState::Done {
            self.step(controller);
        }
    }

    /// `{ busy, done }` — whether the engine still has work and whether
    /// it has reached `Done`.
    pub fn poll(&self) -> EngineStatus {
        EngineStatus {
            busy: !matches!(self.state, EngineState::Idle | EngineState::Done),
            done: self.state == EngineState::Done,
        }
    }

    /// The final hash state as 32 big-endian bytes. Only meaningful once
    /// [`Engine::poll`] reports `done`.
    pub fn digest(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// The raw eight-word hash state, for handing off to the next lane
    /// in a [`super::pipeline::Pipeline`].
    pub fn state(&self) -> [u32; 8] {
        self.h
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// One round of the SHA-256 compression function, mutating the eight
/// working variables in place.
#[inline]
fn compress_round(vars: &mut [u32; 8], wi: u32, ki: u32) {
    let [a, b, c, d, e, f, g, h] = *vars;

    let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(wi)
        .wrapping_add(ki);
    let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

    vars[7] = g;
    vars[6] = f;
    vars[5] = e;
    vars[4] = d.wrapping_add(t1);
    vars[3] = c;
    vars[2] = b;
    vars[1] = a;
    vars[0] = t1.wrapping_add(t2);
}

/// Runs one block's worth of compression (load + extend + 64 rounds +
/// state update) synchronously, reading words from `controller`. Used by
/// [`super::pipeline::Pipeline`], which drives a ring of these rather
/// than a single [`Engine`]'s internal block loop.
pub(super) fn compress_block(
    controller: &MessageController,
    block_index: usize,
    state: [u32; 8],
) -> [u32; 8] {
    let mut w = [0u32; 64];
    for word_index in 0..16 {
        w[word_index] = controller
            .word(block_index, word_index)
            .expect("pipeline requested a block/word the controller cannot serve");
    }
    for i in 16..64 {
        let s0 = small_sigma0(w[i - 15]);
        let s1 = small_sigma1(w[i - 2]);
        w[i] = w[i - 16]
            .wrapping_add(s0)
            .wrapping_add(w[i - 7])
            .wrapping_add(s1);
    }

    let mut vars = state;
    for t in 0..64 {
        compress_round(&mut vars, w[t], K256[t]);
    }

    let mut out = state;
    for i in 0..8 {
        out[i] = out[i].wrapping_add(vars[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::constants::H256_INIT;

    fn digest_hex(bytes: &[u8]) -> String {
        let mut controller = MessageController::new();
        controller.feed_bytes(bytes).unwrap();
        controller.finish().unwrap();

        let mut engine = Engine::new();
        engine.start(controller.block_count(), H256_INIT);
        engine.run_to_completion(&controller);

        engine
            .digest()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    #[test]
    fn abc_vector() {
        assert_eq!(
            digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn step_and_run_to_completion_agree() {
        let mut controller = MessageController::new();
        controller.feed_bytes(b"abc").unwrap();
        controller.finish().unwrap();

        let mut stepped = Engine::new();
        stepped.start(controller.block_count(), H256_INIT);
        while !stepped.poll().done {
            stepped.step(&controller);
        }

        let mut collapsed = Engine::new();
        collapsed.start(controller.block_count(), H256_INIT);
        collapsed.run_to_completion(&controller);

        assert_eq!(stepped.digest(), collapsed.digest());
    }

    #[test]
    fn zero_blocks_finalizes_immediately() {
        let controller = MessageController::new();
        let mut engine = Engine::new();
        engine.start(0, H256_INIT);
        engine.run_to_completion(&controller);
        assert_eq!(engine.digest(), {
            let mut out = [0u8; 32];
            for (chunk, word) in out.chunks_exact_mut(4).zip(H256_INIT.iter()) {
                chunk.copy_from_slice(&word.to_be_bytes());
            }
            out
        });
    }
}
