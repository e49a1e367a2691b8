//! Latest-request-wins gating.
//!
//! Each call to [`RequestGate::begin`] for a key supersedes every earlier
//! token for that key, so a slow analysis finishing after a newer one was
//! started can be discarded instead of overwriting fresher output.
//!
//! A token releases its key when it is accepted or dropped, so a request
//! abandoned mid-flight leaves nothing behind.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Proof that a request was started. Consumed by [`RequestToken::accept`].
#[derive(Debug)]
pub struct RequestToken {
    latest: Arc<DashMap<String, u64>>,
    key: String,
    seq: u64,
}

impl RequestToken {
    /// Pass `value` through only if this is still the newest token for its key.
    pub fn accept<T>(self, value: T) -> Option<T> {
        self.release().map(|_| value)
    }

    fn release(&self) -> Option<(String, u64)> {
        self.latest.remove_if(&self.key, |_, seq| *seq == self.seq)
    }
}

impl Drop for RequestToken {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Default)]
pub struct RequestGate {
    latest: Arc<DashMap<String, u64>>,
    counter: AtomicU64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, key: &str) -> RequestToken {
        // The entry guard holds the shard lock, so sequence numbers for one
        // key are issued and stored in the same order.
        let mut slot = self.latest.entry(key.to_string()).or_insert(0);
        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        *slot = seq;
        drop(slot);

        RequestToken {
            latest: Arc::clone(&self.latest),
            key: key.to_string(),
            seq,
        }
    }

    /// Keys with a request in flight.
    pub fn pending(&self) -> usize {
        self.latest.len()
    }
}
