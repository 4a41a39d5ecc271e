//! Thread-safe request mailbox.
//!
//! Producers on any thread enqueue request tags; a single consumer (the
//! thread that owns the session) takes them in FIFO order. All operations
//! share one lock and never block beyond lock contention.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Deferred operations a producer can ask the session thread to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestId {
    /// No request; returned when the queue is empty.
    #[default]
    None,
    CheckLoop,
    CreateFloor,
    ClearLines,
}

/// Unbounded FIFO of request tags guarded by a single mutex.
#[derive(Debug)]
pub struct RequestQueue<T> {
    requests: Mutex<VecDeque<T>>,
}

impl<T> Default for RequestQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestQueue<T> {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(VecDeque::new()),
        }
    }

    // Each critical section is a single VecDeque call, so a panic in another
    // holder cannot leave the deque half-updated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a request.
    pub fn enqueue(&self, request: T) {
        self.lock().push_back(request);
    }

    /// Pop the oldest request, if any.
    pub fn dequeue(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }
}

impl<T: Default> RequestQueue<T> {
    /// Pop the oldest request, or the `T::default()` sentinel when empty.
    pub fn take_request(&self) -> T {
        self.dequeue().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order_then_sentinel() {
        let q = RequestQueue::new();
        q.enqueue(RequestId::CheckLoop);
        q.enqueue(RequestId::CreateFloor);
        q.enqueue(RequestId::ClearLines);
        assert_eq!(q.take_request(), RequestId::CheckLoop);
        assert_eq!(q.take_request(), RequestId::CreateFloor);
        assert_eq!(q.take_request(), RequestId::ClearLines);
        assert_eq!(q.take_request(), RequestId::None);
    }

    #[test]
    fn test_dequeue_empty_is_none() {
        let q: RequestQueue<RequestId> = RequestQueue::default();
        assert_eq!(q.dequeue(), None);
        assert!(!q.has_pending());
        assert!(q.is_empty());
    }

    #[test]
    fn test_has_pending_and_len() {
        let q = RequestQueue::new();
        q.enqueue(RequestId::CheckLoop);
        q.enqueue(RequestId::CheckLoop);
        assert!(q.has_pending());
        assert_eq!(q.len(), 2);
        q.dequeue();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_no_deduplication() {
        let q = RequestQueue::new();
        for _ in 0..3 {
            q.enqueue(RequestId::CheckLoop);
        }
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_arbitrary_tag_type() {
        #[derive(Debug, PartialEq, Default)]
        enum Tag {
            #[default]
            Idle,
            Named(&'static str),
        }
        let q = RequestQueue::new();
        q.enqueue(Tag::Named("a"));
        assert_eq!(q.take_request(), Tag::Named("a"));
        assert_eq!(q.take_request(), Tag::Idle);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        use std::sync::Arc;

        let q = Arc::new(RequestQueue::new());
        q.enqueue(1u32);
        let q2 = Arc::clone(&q);
        let _ = std::thread::spawn(move || {
            let _guard = q2.requests.lock().unwrap();
            panic!("poison the queue");
        })
        .join();
        q.enqueue(2);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
    }

    #[test]
    fn test_request_id_serde() {
        let json = serde_json::to_string(&RequestId::CreateFloor).unwrap();
        assert_eq!(json, r#""create_floor""#);
        let back: RequestId = serde_json::from_str(r#""check_loop""#).unwrap();
        assert_eq!(back, RequestId::CheckLoop);
        assert_eq!(RequestId::default(), RequestId::None);
    }
}
