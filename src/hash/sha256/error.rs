//! Errors surfaced by the message controller.
//!
//! Three kinds, matching the taxonomy the engine's external contract
//! distinguishes: an operation invoked out of lifecycle order, an
//! out-of-range block/word coordinate, and an optional bounded-buffer
//! overflow. Nothing here is retried — a `DigestError` always reflects
//! either caller misuse or an explicit capacity limit the caller chose.

use std::fmt;

/// Errors produced by [`super::controller::MessageController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestError {
    /// An operation was invoked in the wrong lifecycle state — e.g.
    /// `word()` before `finish()`, or `feed()` after `finish()`.
    StateError {
        /// What the controller was asked to do and why it refused.
        reason: &'static str,
    },

    /// `word()` was called with a block or word index outside the
    /// range the controller can currently serve.
    RangeError {
        block_index: usize,
        word_index: usize,
        block_count: usize,
    },

    /// A bounded buffer (see [`super::controller::MessageController::bounded`])
    /// would have been exceeded by the requested `feed`.
    OverflowError {
        /// The configured byte ceiling that was hit.
        limit: usize,
    },
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::StateError { reason } => {
                write!(f, "sha256 controller used out of sequence: {reason}")
            }
            DigestError::RangeError {
                block_index,
                word_index,
                block_count,
            } => write!(
                f,
                "word({block_index}, {word_index}) out of range (block_count = {block_count})"
            ),
            DigestError::OverflowError { limit } => {
                write!(f, "message buffer exceeded its {limit}-byte limit")
            }
        }
    }
}

impl std::error::Error for DigestError {}
