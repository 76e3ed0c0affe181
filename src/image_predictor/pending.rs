use crate::image_predictor::prediction::Prediction;
use crate::inference_engine::interface::RequestId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub type PredictionHandler = Box<dyn FnOnce(Option<Vec<Prediction>>) + Send + 'static>;

/// Completion handlers of requests the engine has not answered yet.
///
/// Handlers are only ever moved in and out under the lock. They are invoked
/// by the caller after `take` returns, never while the lock is held.
#[derive(Default)]
pub struct PendingRequests {
    handlers: Mutex<HashMap<RequestId, PredictionHandler>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, request_id: RequestId, handler: PredictionHandler) {
        let previous = self.lock().insert(request_id, handler);
        debug_assert!(previous.is_none(), "request {} registered twice", request_id);
    }

    pub fn take(&self, request_id: RequestId) -> Option<PredictionHandler> {
        self.lock().remove(&request_id)
    }

    pub fn contains(&self, request_id: RequestId) -> bool {
        self.lock().contains_key(&request_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RequestId, PredictionHandler>> {
        // A panic elsewhere cannot leave the map half-updated.
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_take_removes_exactly_once() {
        let pending = PendingRequests::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        pending.insert(
            RequestId::new(1),
            Box::new(move |_| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert!(pending.contains(RequestId::new(1)));

        let handler = pending.take(RequestId::new(1)).unwrap();
        handler(None);

        assert!(pending.take(RequestId::new(1)).is_none());
        assert!(pending.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_take_unknown_request() {
        let pending = PendingRequests::new();
        pending.insert(RequestId::new(1), Box::new(|_| {}));

        assert!(pending.take(RequestId::new(2)).is_none());
        assert_eq!(pending.len(), 1);
    }
}
