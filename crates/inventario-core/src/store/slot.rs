// ── Generation-tagged reactive slot ──
//
// Holds one wholesale-replaced value plus the request generation that
// produced it. A fetch reserves a generation before it is sent; its
// response is applied only if no newer generation has landed meanwhile.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// A value together with the request generation that produced it.
///
/// Generation `0` is the empty value the slot starts with.
#[derive(Debug)]
pub struct Versioned<T> {
    pub generation: u64,
    pub data: Arc<T>,
}

impl<T> Clone for Versioned<T> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            data: Arc::clone(&self.data),
        }
    }
}

pub(crate) struct Slot<T> {
    /// Last generation handed out by `reserve`.
    issued: AtomicU64,
    current: watch::Sender<Versioned<T>>,
}

impl<T: Send + Sync + 'static> Slot<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (current, _) = watch::channel(Versioned {
            generation: 0,
            data: Arc::new(initial),
        });
        Self {
            issued: AtomicU64::new(0),
            current,
        }
    }

    /// Reserve the generation for a request about to be sent.
    pub(crate) fn reserve(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the value if `generation` is newer than what is held.
    /// Returns `false` when the response was stale and got dropped.
    pub(crate) fn apply(&self, generation: u64, data: T) -> bool {
        self.current.send_if_modified(|current| {
            if generation <= current.generation {
                return false;
            }
            *current = Versioned {
                generation,
                data: Arc::new(data),
            };
            true
        })
    }

    pub(crate) fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.current.borrow().data)
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Versioned<T>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_generation_replaces_value() {
        let slot = Slot::new(Vec::<u32>::new());
        let generation = slot.reserve();
        assert!(slot.apply(generation, vec![1, 2]));
        assert_eq!(*slot.snapshot(), vec![1, 2]);
        assert_eq!(slot.subscribe().borrow().generation, 1);
    }

    #[test]
    fn stale_response_is_dropped() {
        let slot = Slot::new(Vec::<u32>::new());
        let older = slot.reserve();
        let newer = slot.reserve();

        assert!(slot.apply(newer, vec![2]));
        assert!(!slot.apply(older, vec![1]));
        assert_eq!(*slot.snapshot(), vec![2]);
    }

    #[test]
    fn apply_notifies_subscribers_only_on_change() {
        let slot = Slot::new(0_u32);
        let mut rx = slot.subscribe();
        let older = slot.reserve();
        let newer = slot.reserve();

        slot.apply(newer, 7);
        assert!(rx.has_changed().unwrap_or(false));
        rx.borrow_and_update();

        slot.apply(older, 3);
        assert!(!rx.has_changed().unwrap_or(true));
    }
}
