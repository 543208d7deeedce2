//! Scratch buffers - the ordered set of independent text snapshots a session
//! can cycle through.
//!
//! The set never holds fewer than one or more than [`MAX_BUFFERS`] buffers and
//! the current index always points at one of them. It stores plain snapshots;
//! writing the live engine state back before a switch is the job of
//! [`Session`](super::Session).

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a scratch buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct BufferId(pub u64);

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upper bound on simultaneously open scratch buffers
pub const MAX_BUFFERS: usize = 9;

/// Content and cursor of one scratch buffer
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScratchBuffer {
    pub id: BufferId,
    pub content: String,
    /// Cursor as a char offset into `content`
    pub cursor: usize,
}

impl ScratchBuffer {
    pub fn empty(id: BufferId) -> Self {
        Self {
            id,
            content: String::new(),
            cursor: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Drop the content and reset the cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }
}

// ============================================================================
// BufferSet
// ============================================================================

#[derive(Debug, Clone)]
pub struct BufferSet {
    buffers: Vec<ScratchBuffer>,
    current: usize,
    next_buffer_id: u64,
}

impl Default for BufferSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferSet {
    /// A set holding one empty buffer
    pub fn new() -> Self {
        Self {
            buffers: vec![ScratchBuffer::empty(BufferId(1))],
            current: 0,
            next_buffer_id: 2,
        }
    }

    fn next_buffer_id(&mut self) -> BufferId {
        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffers.len() >= MAX_BUFFERS
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &ScratchBuffer {
        &self.buffers[self.current]
    }

    pub fn current_mut(&mut self) -> &mut ScratchBuffer {
        &mut self.buffers[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&ScratchBuffer> {
        self.buffers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScratchBuffer> {
        self.buffers.iter()
    }

    /// Index of the buffer with `id`, if it is still open
    pub fn position(&self, id: BufferId) -> Option<usize> {
        self.buffers.iter().position(|b| b.id == id)
    }

    /// Append an empty buffer and select it. Returns false at the cap.
    pub fn create(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let id = self.next_buffer_id();
        self.buffers.push(ScratchBuffer::empty(id));
        self.current = self.buffers.len() - 1;
        self.assert_invariants();
        true
    }

    /// Select the buffer at `index`. Returns false if invalid or already current.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.buffers.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Remove the current buffer unless it is the last one.
    ///
    /// The buffer at the same index (or the new last one) becomes current.
    pub fn close_current(&mut self) -> Option<ScratchBuffer> {
        if self.buffers.len() <= 1 {
            return None;
        }
        let closed = self.buffers.remove(self.current);
        self.current = self.current.min(self.buffers.len() - 1);
        self.assert_invariants();
        Some(closed)
    }

    /// Cycle forward. Returns false with a single buffer.
    pub fn next(&mut self) -> bool {
        let target = (self.current + 1) % self.buffers.len();
        self.switch_to(target)
    }

    /// Cycle backward. Returns false with a single buffer.
    pub fn prev(&mut self) -> bool {
        let len = self.buffers.len();
        let target = (self.current + len - 1) % len;
        self.switch_to(target)
    }

    /// Clear the buffer with `id`. Returns false if it has been closed.
    pub fn clear_buffer(&mut self, id: BufferId) -> bool {
        match self.buffers.iter_mut().find(|b| b.id == id) {
            Some(buffer) => {
                buffer.clear();
                true
            }
            None => false,
        }
    }

    /// Verify count and index invariants.
    ///
    /// Panics in debug builds if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        assert!(
            !self.buffers.is_empty() && self.buffers.len() <= MAX_BUFFERS,
            "buffer count {} outside 1..={}",
            self.buffers.len(),
            MAX_BUFFERS
        );
        assert!(
            self.current < self.buffers.len(),
            "current index {} but only {} buffers",
            self.current,
            self.buffers.len()
        );
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
