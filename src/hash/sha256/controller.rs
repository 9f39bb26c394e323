//! Message controller (C2): byte ingest, FIPS 180-4 padding, and
//! coordinate-addressed word-fetch for the compression engine(s).
//!
//! Owns the message buffer exclusively; engines only ever read from it
//! through [`MessageController::word`], a pure function with no side
//! effects on buffer state — any sequence of calls to `word` is
//! permitted and repeated reads of the same coordinate always agree.

use super::error::DigestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Receive,
    Ready,
}

/// Buffers a streamed message, pads it per FIPS 180-4 §5.1.1, and serves
/// 512-bit blocks as sixteen big-endian 32-bit words.
///
/// By default the buffer grows without bound; [`MessageController::bounded`]
/// opts into the §4.2 `OverflowError` behavior for callers that want a
/// hard byte ceiling.
#[derive(Debug)]
pub struct MessageController {
    buffer: Vec<u8>,
    limit: Option<usize>,
    state: State,
    original_len: usize,
    block_count: usize,
}

impl MessageController {
    /// A controller with an unbounded buffer.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            limit: None,
            state: State::Idle,
            original_len: 0,
            block_count: 0,
        }
    }

    /// A controller that refuses `feed`/`feed_bytes` once the original
    /// (pre-padding) message would exceed `limit` bytes.
    pub fn bounded(limit: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
            state: State::Idle,
            original_len: 0,
            block_count: 0,
        }
    }

    /// Returns to `IDLE`, clearing the buffer and all counters.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = State::Idle;
        self.original_len = 0;
        self.block_count = 0;
    }

    /// Appends one byte of message.
    ///
    /// Transitions `IDLE`/`RECEIVE` → `RECEIVE`. Fails with
    /// [`DigestError::StateError`] once the controller has already been
    /// finished, and with [`DigestError::OverflowError`] if a bounded
    /// buffer would be exceeded.
    pub fn feed(&mut self, byte: u8) -> Result<(), DigestError> {
        if self.state == State::Ready {
            return Err(DigestError::StateError {
                reason: "feed() called after finish()",
            });
        }

        if let Some(limit) = self.limit {
            if self.original_len >= limit {
                return Err(DigestError::OverflowError { limit });
            }
        }

        self.buffer.push(byte);
        self.original_len += 1;
        self.state = State::Receive;
        Ok(())
    }

    /// Appends a slice of message bytes, one byte at a time, preserving
    /// `feed`'s per-call semantics while giving callers a batched entry
    /// point.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(), DigestError> {
        for &byte in bytes {
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Signals end-of-stream: appends the `0x80` pad byte, zero-fills to
    /// a 56 (mod 64) byte boundary, appends the original length in bits
    /// as a 64-bit big-endian trailer, and computes the final block
    /// count. `PADDING` → `LENGTH_APPEND` → `COMPUTE_BLOCKS` → `READY`
    /// have no suspension point between them, so this single call
    /// performs all four per spec's collapsed-mode allowance.
    pub fn finish(&mut self) -> Result<(), DigestError> {
        if self.state == State::Ready {
            return Err(DigestError::StateError {
                reason: "finish() called twice without an intervening reset()",
            });
        }

        let bit_len = (self.original_len as u64).wrapping_mul(8);

        self.buffer.push(0x80);
        while self.buffer.len() % 64 != 56 {
            self.buffer.push(0);
        }
        self.buffer.extend_from_slice(&bit_len.to_be_bytes());

        debug_assert_eq!(self.buffer.len() % 64, 0);
        self.block_count = self.buffer.len() / 64;
        self.state = State::Ready;
        Ok(())
    }

    /// The 32-bit big-endian word at `(block_index, word_index)`,
    /// `word_index ∈ 0..=15`. Pure: any order of calls is permitted and
    /// repeated calls at the same coordinate always agree.
    pub fn word(&self, block_index: usize, word_index: usize) -> Result<u32, DigestError> {
        if self.state != State::Ready || block_index >= self.block_count || word_index > 15 {
            return Err(DigestError::RangeError {
                block_index,
                word_index,
                block_count: self.block_count,
            });
        }

        let offset = 64 * block_index + 4 * word_index;
        let bytes: [u8; 4] = self.buffer[offset..offset + 4].try_into().unwrap();
        Ok(u32::from_be_bytes(bytes))
    }

    /// Number of 512-bit blocks the padded message occupies. Only
    /// meaningful once [`MessageController::finish`] has run.
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Whether `finish()` has run and `word()` is servable.
    pub fn is_done(&self) -> bool {
        self.state == State::Ready
    }
}

impl Default for MessageController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_pads_to_one_block() {
        let mut c = MessageController::new();
        c.finish().unwrap();
        assert_eq!(c.block_count(), 1);
        assert_eq!(c.word(0, 0).unwrap(), 0x8000_0000);
        for w in 1..14 {
            assert_eq!(c.word(0, w).unwrap(), 0);
        }
        assert_eq!(c.word(0, 14).unwrap(), 0);
        assert_eq!(c.word(0, 15).unwrap(), 0);
    }

    #[test]
    fn word_fetch_is_pure_and_repeatable() {
        let mut c = MessageController::new();
        c.feed_bytes(b"abc").unwrap();
        c.finish().unwrap();
        let first = c.word(0, 0).unwrap();
        let second = c.word(0, 0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn word_out_of_range_before_finish() {
        let mut c = MessageController::new();
        c.feed_bytes(b"abc").unwrap();
        assert!(matches!(
            c.word(0, 0),
            Err(DigestError::RangeError { .. })
        ));
    }

    #[test]
    fn word_out_of_range_indices() {
        let mut c = MessageController::new();
        c.finish().unwrap();
        assert!(matches!(
            c.word(1, 0),
            Err(DigestError::RangeError { .. })
        ));
        assert!(matches!(
            c.word(0, 16),
            Err(DigestError::RangeError { .. })
        ));
    }

    #[test]
    fn feed_after_finish_is_a_state_error() {
        let mut c = MessageController::new();
        c.finish().unwrap();
        assert!(matches!(c.feed(b'x'), Err(DigestError::StateError { .. })));
    }

    #[test]
    fn bounded_buffer_overflows() {
        let mut c = MessageController::bounded(2);
        c.feed(b'a').unwrap();
        c.feed(b'b').unwrap();
        assert!(matches!(
            c.feed(b'c'),
            Err(DigestError::OverflowError { limit: 2 })
        ));
    }

    #[test]
    fn boundary_lengths_need_one_extra_block() {
        for len in [55usize, 56, 63, 64] {
            let mut c = MessageController::new();
            c.feed_bytes(&vec![b'a'; len]).unwrap();
            c.finish().unwrap();
            let expected_blocks = if len % 64 < 56 {
                len / 64 + 1
            } else {
                len / 64 + 2
            };
            assert_eq!(c.block_count(), expected_blocks, "len={len}");
        }
    }
}
