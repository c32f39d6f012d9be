//! Bounded displacement history for the strip chart.
//!
//! The buffer is append-only. Once the cursor reaches capacity new samples
//! are dropped; nothing is ever overwritten behind the cursor. A reset only
//! rewinds the cursor, the storage is kept and stale samples past the cursor
//! are never observable.

/// Number of samples the strip chart can hold, one per horizontal pixel.
pub const HISTORY_CAPACITY: usize = 1200;

/// Fixed-capacity displacement history.
///
/// Writing and advancing are separate operations: [`record`] stores a value
/// in the slot under the cursor, [`advance`] commits that slot. The
/// simulation records after every physics sub-step and advances once per
/// frame, so the committed sample is the last sub-step's displacement.
///
/// [`record`]: HistoryBuffer::record
/// [`advance`]: HistoryBuffer::advance
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: Box<[f64]>,
    cursor: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Creates an empty buffer with [`HISTORY_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: vec![0.0; HISTORY_CAPACITY].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Maximum number of samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of committed samples.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once no more samples can be committed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cursor >= self.samples.len()
    }

    /// Writes `value` into the slot under the cursor without committing it.
    ///
    /// Returns `false` (and stores nothing) when the buffer is full.
    pub fn record(&mut self, value: f64) -> bool {
        match self.samples.get_mut(self.cursor) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Commits the slot under the cursor. Saturates at capacity.
    pub fn advance(&mut self) {
        if !self.is_full() {
            self.cursor += 1;
        }
    }

    /// Records and commits `value` in one go.
    ///
    /// Returns `false` when the buffer was already full.
    pub fn append(&mut self, value: f64) -> bool {
        let stored = self.record(value);
        self.advance();
        stored
    }

    /// Rewinds the cursor to zero. Storage is kept as is.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Committed samples, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples[..self.cursor]
    }

    /// Iterates over the committed samples, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    /// The most recently committed sample.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.as_slice().last().copied()
    }
}
