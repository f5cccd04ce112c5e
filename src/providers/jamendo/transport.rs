//! Callback-wrapped transport for the Jamendo API.
//!
//! The API supports a JSONP-style response mode: requesting
//! `format=jsonp&jsonp=<handle>` wraps the JSON payload in a call to the named
//! handle. That mode needs no third-party relay, so it is tried before the
//! public CORS relays.
//!
//! Handles come from a scoped registry with acquire/release pairing: a handle
//! is released exactly once - on success, timeout, or error - via its RAII
//! guard, so no binding ever leaks past its request.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;

/// Registry of live callback handles.
#[derive(Default)]
pub struct CallbackRegistry {
    live: Mutex<HashSet<String>>,
    counter: AtomicU64,
}

impl CallbackRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Allocate a unique handle, registered until its guard drops.
    pub fn acquire(self: &Arc<Self>) -> CallbackHandle {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let salt: u32 = rand::rng().random_range(0..100_000);
        let name = format!("_ss_{seq}_{salt}");

        self.lock().insert(name.clone());

        CallbackHandle {
            name,
            registry: Arc::clone(self),
        }
    }

    /// Number of handles currently outstanding
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, name: &str) {
        self.lock().remove(name);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // Inserts and removals are independent; a poisoned lock can't leave
        // torn state
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// One live callback handle; releases itself on drop.
pub struct CallbackHandle {
    name: String,
    registry: Arc<CallbackRegistry>,
}

impl CallbackHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CallbackHandle {
    fn drop(&mut self) {
        self.registry.release(&self.name);
    }
}

/// Strip the callback wrapper from a response body, returning the inner JSON.
///
/// Accepts `handle({...})`, `handle({...});` and surrounding whitespace.
/// Returns `None` when the body was not wrapped with the expected handle.
pub fn unwrap_payload<'a>(handle: &str, body: &'a str) -> Option<&'a str> {
    let body = body.trim();
    let rest = body.strip_prefix(handle)?.trim_start();
    let inner = rest.strip_prefix('(')?;
    let inner = inner.trim_end().strip_suffix(';').unwrap_or(inner.trim_end());
    inner.trim_end().strip_suffix(')').map(str::trim)
}
