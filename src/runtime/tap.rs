use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use crate::render::backend::FrameRGBA;

#[derive(Default)]
struct Slot {
    latest: Option<Arc<FrameRGBA>>,
    seq: u64,
}

#[derive(Default)]
struct Shared {
    slot: Mutex<Slot>,
    published: Condvar,
}

/// Latest rendered frame, shared between the render loop and any observers.
///
/// Publishing swaps a pointer under a short lock; readers clone the `Arc`, so the loop never
/// waits on a slow consumer.
#[derive(Clone, Default)]
pub struct FrameTap {
    shared: Arc<Shared>,
}

impl FrameTap {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.shared
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current frame; returns its sequence number (starting at 1).
    pub fn publish(&self, frame: FrameRGBA) -> u64 {
        let seq = {
            let mut slot = self.slot();
            slot.seq += 1;
            slot.latest = Some(Arc::new(frame));
            slot.seq
        };
        self.shared.published.notify_all();
        seq
    }

    /// Number of frames published so far.
    pub fn seq(&self) -> u64 {
        self.slot().seq
    }

    pub fn latest(&self) -> Option<(u64, Arc<FrameRGBA>)> {
        let slot = self.slot();
        slot.latest.clone().map(|f| (slot.seq, f))
    }

    /// Block until a frame newer than `after` exists, or `timeout` elapses.
    pub fn wait_newer(&self, after: u64, timeout: Duration) -> Option<(u64, Arc<FrameRGBA>)> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.slot();
        loop {
            if slot.seq > after
                && let Some(frame) = slot.latest.clone()
            {
                return Some((slot.seq, frame));
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            slot = self
                .shared
                .published
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Drop the held frame, e.g. after the surface is torn down.
    pub fn clear(&self) {
        self.slot().latest = None;
    }
}

impl std::fmt::Debug for FrameTap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTap").field("seq", &self.seq()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/tap.rs"]
mod tests;
