//! Fixed-capacity ring buffer of task slots.
//!
//! Embedded in the pool's locked state; every mutation happens with the pool
//! lock held. Slot storage is reused after a pop. Task results outlive slot
//! reuse because each handle owns its own completion record.

use crate::task::Task;

pub(crate) struct RingBuffer {
    slots: Vec<Option<Task>>,
    head: usize,
    tail: usize,
    len: usize,
}

impl RingBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be > 0");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Store `task` in the tail slot. Caller checks `is_full` first, under
    /// the same lock.
    pub(crate) fn push(&mut self, task: Task) {
        debug_assert!(!self.is_full());
        self.slots[self.tail] = Some(task);
        self.tail = (self.tail + 1) % self.slots.len();
        self.len += 1;
    }

    /// Take the head slot, FIFO relative to `push` order.
    pub(crate) fn pop(&mut self) -> Option<Task> {
        if self.len == 0 {
            return None;
        }
        let task = self.slots[self.head].take();
        debug_assert!(task.is_some(), "occupied slot was empty");
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        task
    }
}

impl std::fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}
