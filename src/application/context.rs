//! # Context Buffer
//!
//! Bounded history of recent dispatches, oldest first. Entries only leave through eviction.
//! The buffer is shared between requests, so appends and snapshots go through one mutex.

use std::collections::VecDeque;
use tokio::sync::Mutex;

use crate::domain::types::DispatchEvent;

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug)]
pub struct ContextBuffer {
    capacity: usize,
    events: Mutex<VecDeque<DispatchEvent>>,
}

impl ContextBuffer {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an event, evicting the oldest one when full.
    pub async fn record(&self, event: DispatchEvent) {
        let mut events = self.events.lock().await;
        Self::push(&mut events, self.capacity, event);
    }

    /// Append and copy out the contents under the same lock, so the copy
    /// contains this event and no half-applied append from another request.
    pub async fn record_and_snapshot(&self, event: DispatchEvent) -> Vec<DispatchEvent> {
        let mut events = self.events.lock().await;
        Self::push(&mut events, self.capacity, event);
        events.iter().cloned().collect()
    }

    pub async fn snapshot(&self) -> Vec<DispatchEvent> {
        self.events.lock().await.iter().cloned().collect()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    fn push(events: &mut VecDeque<DispatchEvent>, capacity: usize, event: DispatchEvent) {
        while events.len() >= capacity {
            events.pop_front();
        }
        events.push_back(event);
    }
}

impl Default for ContextBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn event(i: usize) -> DispatchEvent {
        DispatchEvent::new(&format!("prompt {i}"), Some("open_chrome"))
    }

    fn prompts(events: &[DispatchEvent]) -> Vec<String> {
        events.iter().map(|e| e.prompt.clone()).collect()
    }

    #[tokio::test]
    async fn test_six_inserts_keep_last_five() {
        let buffer = ContextBuffer::default();
        for i in 1..=6 {
            buffer.record(event(i)).await;
        }
        let snapshot = buffer.snapshot().await;
        assert_eq!(
            prompts(&snapshot),
            vec!["prompt 2", "prompt 3", "prompt 4", "prompt 5", "prompt 6"]
        );
    }

    #[tokio::test]
    async fn test_length_never_exceeds_capacity() {
        let buffer = ContextBuffer::new(3);
        for i in 0..50 {
            buffer.record(event(i)).await;
            assert!(buffer.len().await <= 3);
        }
        assert_eq!(buffer.len().await, 3);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_mutate() {
        let buffer = ContextBuffer::default();
        buffer.record(event(1)).await;
        let first = buffer.snapshot().await;
        let second = buffer.snapshot().await;
        assert_eq!(first, second);
        assert_eq!(buffer.len().await, 1);
    }

    #[tokio::test]
    async fn test_record_and_snapshot_includes_new_event() {
        let buffer = ContextBuffer::new(2);
        buffer.record(event(1)).await;
        buffer.record(event(2)).await;
        let snapshot = buffer.record_and_snapshot(event(3)).await;
        assert_eq!(prompts(&snapshot), vec!["prompt 2", "prompt 3"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised() {
        let buffer = ContextBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.record(event(1)).await;
        buffer.record(event(2)).await;
        assert_eq!(prompts(&buffer.snapshot().await), vec!["prompt 2"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_respect_capacity() {
        let buffer = Arc::new(ContextBuffer::default());
        let mut handles = Vec::new();
        for i in 0..32 {
            let buffer = buffer.clone();
            handles.push(tokio::spawn(async move {
                buffer.record_and_snapshot(event(i)).await
            }));
        }
        for handle in handles {
            let snapshot = handle.await.unwrap();
            assert!(!snapshot.is_empty() && snapshot.len() <= 5);
        }
        assert_eq!(buffer.len().await, 5);
    }
}
