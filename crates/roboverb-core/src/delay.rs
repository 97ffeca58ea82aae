//! Fixed-length circular delay line.
//!
//! The primitive underneath every comb and allpass filter. The length is
//! chosen once (from the sample rate) and never changes afterwards; the
//! buffer is allocated in [`DelayLine::new`] and never reallocates, so
//! reading and writing are safe on the audio thread.
//!
//! # Cursor Semantics
//!
//! The cursor always points at the *oldest* sample, which is also the slot
//! the next [`write`](DelayLine::write) overwrites. A delay line of length
//! `N` therefore delays its input by exactly `N` samples when used as
//! read-then-write:
//!
//! ```text
//! buffer:  [ s3 | s4 | s0 | s1 | s2 ]      N = 5
//!                      ^ cursor (oldest, written 5 writes ago)
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Circular buffer of `N` samples with a single read/write cursor.
///
/// # Example
///
/// ```rust
/// use roboverb_core::DelayLine;
///
/// let mut delay = DelayLine::new(3);
/// delay.write(1.0);
/// delay.write(2.0);
/// delay.write(3.0);
///
/// // The cursor is back at the oldest sample.
/// assert_eq!(delay.read(), 1.0);
/// // One write ago.
/// assert_eq!(delay.read_at(1), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    cursor: usize,
}

impl DelayLine {
    /// Creates a zeroed delay line holding `len` samples.
    ///
    /// A length of 0 is bumped to 1 so the line is always readable.
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len.max(1)],
            cursor: 0,
        }
    }

    /// Returns the sample at the cursor (written `len()` writes ago).
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.cursor]
    }

    /// Returns the sample written `offset` writes ago.
    ///
    /// `offset` is taken modulo the length, so `read_at(0)` and
    /// `read_at(len())` both equal [`read`](Self::read).
    #[inline]
    pub fn read_at(&self, offset: usize) -> f32 {
        let len = self.buffer.len();
        let back = offset % len;
        self.buffer[(self.cursor + len - back) % len]
    }

    /// Stores `sample` at the cursor and advances it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.cursor] = sample;
        self.cursor += 1;
        if self.cursor == self.buffer.len() {
            self.cursor = 0;
        }
    }

    /// Zero-fills the buffer and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 0;
    }

    /// Number of samples of history held.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false: a delay line holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
