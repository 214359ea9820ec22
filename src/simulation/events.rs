//! Deferred effects keyed on simulated time
//!
//! Events fire once the sim clock reaches their due minute, so pausing or
//! fast-forwarding the clock delays or hastens them consistently. Equal due
//! times fire in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredEvent {
    /// Follow-up narration once a clean should be over
    AfterTaskThought { agent: AgentId },
    /// Switch the TV off if the agent who turned it on has gone idle
    TelevisionAutoOff { agent: AgentId },
    /// Drop a completed task record
    PurgeTask { task: TaskId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub due: f64,
    pub seq: u64,
    pub event: DeferredEvent,
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering: (due ASC, seq ASC). Wrapped in `Reverse` so the heap pops the smallest.
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, event: DeferredEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledEvent { due, seq, event }));
    }

    /// Pop every event due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: f64) -> Vec<DeferredEvent> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.heap.peek() {
            if next.due > now {
                break;
            }
            if let Some(Reverse(event)) = self.heap.pop() {
                due.push(event.event);
            }
        }
        due
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(e)| e.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
