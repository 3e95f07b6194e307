//! Deferred task queue.
//!
//! Match/mismatch resolutions and elapsed-time samples are not run
//! inline. They are queued with a due time and fired later by
//! `GameEngine::run_due`.
//!
//! ## Ordering
//!
//! Tasks fire in `(due_ms, seq)` order. `seq` increases with every
//! `schedule` call, so two tasks due at the same instant fire in the order
//! they were scheduled.
//!
//! ## Invalidation
//!
//! Every task carries the generation of the session that scheduled it.
//! The queue itself never inspects generations; the engine drops tasks
//! whose generation is not the current one.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// What a deferred task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Settle a completed two-card selection.
    ResolvePair {
        first: CardId,
        second: CardId,
        matched: bool,
    },

    /// Recompute elapsed time and re-arm while the game is in progress.
    SampleElapsed,
}

/// A queued task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTask {
    /// Earliest clock time at which the task may fire.
    pub due_ms: u64,

    /// Scheduling order tiebreaker.
    pub seq: u64,

    /// Session generation that scheduled this task.
    pub generation: u64,

    pub kind: TaskKind,
}

impl Ord for DeferredTask {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for DeferredTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of deferred tasks.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<DeferredTask>>,
    next_seq: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task. Returns its sequence number.
    pub fn schedule(&mut self, due_ms: u64, generation: u64, kind: TaskKind) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(DeferredTask {
            due_ms,
            seq,
            generation,
            kind,
        }));
        seq
    }

    /// Remove and return the earliest task if it is due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DeferredTask> {
        if self.next_due()? > now_ms {
            return None;
        }
        self.queue.pop().map(|Reverse(task)| task)
    }

    /// Due time of the earliest queued task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(task)| task.due_ms)
    }

    /// Number of queued tasks, including stale ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued tasks belonging to `generation`.
    #[must_use]
    pub fn pending_for(&self, generation: u64) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(task)| task.generation == generation)
            .count()
    }
}
