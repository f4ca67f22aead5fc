// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Invisible sample cache: the reactor/application hand-off buffer.
//!
//! The cache decouples the single reactor (I/O) thread delivering incoming
//! event notifications from the application threads consuming them, with an
//! explicit drop-oldest policy under backpressure.
//!
//! # Architecture
//!
//! ```text
//! reactor thread                            application thread
//! --------------                            ------------------
//! enqueue(msg) --> [reactor cache] --migrate--> [app cache] --> pop_front
//!                   bounded, evicts      get_samples(n)    caller consumes
//!                   front when full                        from the batch
//! ```
//!
//! `enqueue` only ever locks the reactor cache, so the reactor is never
//! blocked by an application thread still holding a checked-out batch.
//! `get_samples` locks the app cache for the lifetime of the returned
//! batch; a concurrent `get_samples`, `clear`, or `resize` serializes
//! behind it. Lock order is always app cache before reactor cache.

use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered, bounded sample sequence backing both cache stages.
///
/// Supports O(1) push-back and pop-front; the application iterates and
/// removes from the front of the batch returned by
/// [`InvisibleSampleCache::get_samples`].
#[derive(Debug, Default)]
pub struct SampleCacheContainer<T> {
    items: VecDeque<T>,
}

impl<T> SampleCacheContainer<T> {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append a sample at the back.
    pub fn push_back(&mut self, sample: T) {
        self.items.push_back(sample);
    }

    /// Remove and return the oldest sample.
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Peek at the oldest sample without removing it.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the held samples in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reserve storage for at least `total` samples overall.
    pub fn reserve_total(&mut self, total: usize) {
        self.items.reserve(total.saturating_sub(self.items.len()));
    }

    /// Move up to `count` samples from the front of `other` to the back of
    /// `self`, preserving FIFO order. Returns the number moved.
    pub fn migrate_from(&mut self, other: &mut Self, count: usize) -> usize {
        let n = count.min(other.items.len());
        self.items.extend(other.items.drain(..n));
        n
    }
}

impl<'a, T> IntoIterator for &'a SampleCacheContainer<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Batch of samples checked out by the application.
///
/// Holds the app-cache lock: further `get_samples`/`clear`/`resize` calls
/// serialize behind it, while reactor-side `enqueue` stays unaffected.
/// Samples left in the batch when it is dropped remain cached and are
/// returned again by the next `get_samples` call.
pub type SampleBatch<'a, T> = MutexGuard<'a, SampleCacheContainer<T>>;

/// Capacity-bounded, two-stage (reactor-side / application-side) FIFO of
/// event samples with drop-oldest semantics under overflow.
///
/// "Invisible" because the application never observes the reactor-side
/// buffer directly; samples become visible only after `get_samples`
/// migrates them into the application-side cache.
///
/// # Invariants
///
/// - `enqueue` never grows the reactor cache beyond the capacity; when full
///   the oldest reactor-cache entry is dropped first.
/// - `get_samples` restores `reactor.len() + app.len() <= capacity` before
///   returning, trimming the app-cache front first.
/// - FIFO arrival order is preserved end-to-end; under overflow the oldest
///   unconsumed sample is always the one dropped (most-recent-N retention).
///
/// A capacity of `0` disables the cache: `enqueue` reports `false` and
/// drops the message. `resize` takes effect lazily on shrink; excess
/// elements are evicted at the next `enqueue`/`get_samples`.
pub struct InvisibleSampleCache<T> {
    /// Application-side buffer. Locked first (lock order: app -> reactor).
    app_cache: Mutex<SampleCacheContainer<T>>,
    /// Reactor-side buffer. `enqueue` locks only this one.
    reactor_cache: Mutex<SampleCacheContainer<T>>,
    /// Maximum total sample count across both buffers. Written under both
    /// locks; the lock-free accessor uses a relaxed load.
    capacity: AtomicUsize,
    /// Total samples accepted by `enqueue` (for stats).
    total_enqueued: AtomicUsize,
    /// Samples dropped by eviction, trimming, or a disabled cache.
    dropped: AtomicUsize,
}

impl<T> InvisibleSampleCache<T> {
    /// Create a disabled cache (capacity 0). Size it via [`resize`].
    ///
    /// [`resize`]: Self::resize
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_cache: Mutex::new(SampleCacheContainer::new()),
            reactor_cache: Mutex::new(SampleCacheContainer::new()),
            capacity: AtomicUsize::new(0),
            total_enqueued: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Set the maximum total sample count and reserve storage.
    ///
    /// Called at subscription setup. Existing samples are not evicted here;
    /// a shrink takes effect lazily at the next `enqueue`/`get_samples`.
    pub fn resize(&self, capacity: usize) {
        let mut app = self.app_cache.lock();
        let mut reactor = self.reactor_cache.lock();
        app.reserve_total(capacity);
        reactor.reserve_total(capacity);
        self.capacity.store(capacity, Ordering::Relaxed);
    }

    /// Disable the cache and drop all samples. Called on unsubscribe.
    pub fn clear(&self) {
        let mut app = self.app_cache.lock();
        let mut reactor = self.reactor_cache.lock();
        self.capacity.store(0, Ordering::Relaxed);
        app.clear();
        reactor.clear();
    }

    /// Store a sample from the reactor thread.
    ///
    /// Returns `true` if the sample was cached, `false` if the cache is
    /// disabled (capacity 0) and the sample was dropped. When the reactor
    /// cache is full the oldest entry is evicted first; capacity is never
    /// exceeded by this call.
    pub fn enqueue(&self, sample: T) -> bool {
        let mut reactor = self.reactor_cache.lock();
        let capacity = self.capacity.load(Ordering::Relaxed);

        if capacity == 0 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // Enforce the bound; also drains backlog after a lazy shrink.
        while reactor.len() >= capacity {
            reactor.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
            log::debug!("[SAMPLE-CACHE] reactor cache full, evicted oldest sample");
        }

        reactor.push_back(sample);
        self.total_enqueued.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Currently configured capacity.
    ///
    /// Lock-free relaxed load: a caller racing with `resize`/`clear` may
    /// observe either the old or the new value.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Retrieve the application-side cache with up to
    /// `requested_sample_count` newly migrated samples.
    ///
    /// Restores the capacity bound first: samples beyond it are trimmed
    /// from the app-cache front (oldest unconsumed leftovers), then, if a
    /// shrink left the reactor cache itself over the bound, from the
    /// reactor-cache front. Afterwards samples are moved from the reactor
    /// cache until the batch holds `requested_sample_count` samples or the
    /// reactor cache is empty, preserving FIFO arrival order.
    ///
    /// The returned batch may hold fewer samples than requested (not enough
    /// available) or more (unconsumed leftovers from a prior call); both
    /// are documented, non-erroneous outcomes. The reactor cache is only
    /// locked for the trim/migrate step, not for the lifetime of the batch.
    pub fn get_samples(&self, requested_sample_count: usize) -> SampleBatch<'_, T> {
        let mut app = self.app_cache.lock();
        {
            let mut reactor = self.reactor_cache.lock();
            let capacity = self.capacity.load(Ordering::Relaxed);

            let mut excess = (app.len() + reactor.len()).saturating_sub(capacity);
            while excess > 0 && app.pop_front().is_some() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                excess -= 1;
            }
            // Only reachable after a shrink; under stable capacity the
            // reactor cache is already bounded by enqueue.
            while excess > 0 && reactor.pop_front().is_some() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                excess -= 1;
            }

            let app_len = app.len();
            if app_len < requested_sample_count {
                app.migrate_from(&mut reactor, requested_sample_count - app_len);
            }
        }
        app
    }

    /// Samples currently held across both buffers (diagnostics).
    #[must_use]
    pub fn cached_len(&self) -> usize {
        let app = self.app_cache.lock();
        let reactor = self.reactor_cache.lock();
        app.len() + reactor.len()
    }

    /// Total samples accepted by `enqueue` since creation.
    #[must_use]
    pub fn total_enqueued(&self) -> usize {
        self.total_enqueued.load(Ordering::Relaxed)
    }

    /// Samples dropped by eviction, trimming, or a disabled cache.
    #[must_use]
    pub fn dropped_samples(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<T> Default for InvisibleSampleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
