// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Proxy event backend: the per-event component a generated proxy drives.
//!
//! The backend owns one [`InvisibleSampleCache`] and sits between the two
//! execution contexts:
//!
//! - the connection's reactor thread delivers decoded notifications via
//!   [`ProxyEventBackend::on_notification_received`] and the subscription
//!   ACK/NACK lifecycle events;
//! - application threads manage the subscription and pull samples via
//!   [`ProxyEventBackend::get_new_samples`].
//!
//! Connection and service state gate whether notifications are accepted
//! upstream of the cache; the cache itself is state-agnostic.
//!
//! # Thread Safety
//!
//! All methods take `&self`; the backend is shared as `Arc<ProxyEventBackend>`
//! between the reactor and the application. The receive handler is invoked
//! from the reactor context and must not block.

use crate::events::cache::{InvisibleSampleCache, SampleBatch};
use crate::events::subscription::SubscriptionState;
use crate::ipc::message::{EventId, NotificationMessage};
use crate::{Error, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Callback signalled from the reactor context after a sample was cached.
///
/// Must be `Send + Sync` and should return quickly (non-blocking); it is
/// typically used to wake a waiting application thread or schedule a poll.
pub type EventReceiveHandler = Arc<dyn Fn() + Send + Sync>;

/// Drop and throughput counters of one event backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBackendStats {
    /// Notifications accepted into the cache.
    pub notifications_cached: u64,
    /// Notifications rejected upstream of the cache (gates down or not
    /// subscribed).
    pub notifications_rejected: u64,
    /// Samples lost inside the cache (eviction, trimming, disabled cache).
    pub samples_dropped: u64,
}

/// Backend of one subscribable proxy event.
pub struct ProxyEventBackend {
    /// Event identity, for diagnostics only.
    event_id: EventId,
    /// The reactor/application hand-off buffer.
    cache: InvisibleSampleCache<NotificationMessage>,
    /// Transport connection to the remote service is up.
    connection_up: AtomicBool,
    /// Remote service instance is offered.
    service_up: AtomicBool,
    /// Subscription lifecycle state.
    state: Mutex<SubscriptionState>,
    /// Registered data-available callback (read-mostly).
    receive_handler: RwLock<Option<EventReceiveHandler>>,
    /// Notifications rejected before reaching the cache.
    rejected: AtomicU64,
}

impl ProxyEventBackend {
    /// Create a backend for one event. Connection and service gates start
    /// closed; the owning connection opens them on establishment.
    #[must_use]
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            cache: InvisibleSampleCache::new(),
            connection_up: AtomicBool::new(false),
            service_up: AtomicBool::new(false),
            state: Mutex::new(SubscriptionState::NotSubscribed),
            receive_handler: RwLock::new(None),
            rejected: AtomicU64::new(0),
        }
    }

    /// Event this backend belongs to.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    // ========================================================================
    // Connection management (reactor / connection context)
    // ========================================================================

    /// Open or close the transport-connection gate.
    pub fn set_connection_state(&self, up: bool) {
        self.connection_up.store(up, Ordering::Release);
        log::debug!(
            "[EVENT-BACKEND] connection state event_id={} up={}",
            self.event_id.get(),
            up
        );
    }

    /// Open or close the service-availability gate.
    pub fn set_service_state(&self, up: bool) {
        self.service_up.store(up, Ordering::Release);
        log::debug!(
            "[EVENT-BACKEND] service state event_id={} up={}",
            self.event_id.get(),
            up
        );
    }

    /// Reactor-thread entry point on message arrival.
    ///
    /// Filters on the connection/service gates and the subscription state,
    /// enqueues into the cache, and signals the registered receive handler
    /// when the sample was stored. Rejected or uncached notifications are
    /// counted, never reported as errors.
    pub fn on_notification_received(&self, message: NotificationMessage) {
        if !self.connection_up.load(Ordering::Acquire) || !self.service_up.load(Ordering::Acquire)
        {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "[EVENT-BACKEND] notification rejected event_id={} (gate down)",
                self.event_id.get()
            );
            return;
        }

        if !self.state.lock().accepts_notifications() {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "[EVENT-BACKEND] notification rejected event_id={} (not subscribed)",
                self.event_id.get()
            );
            return;
        }

        if !self.cache.enqueue(message) {
            // Capacity 0: subscribed with a disabled cache.
            log::debug!(
                "[EVENT-BACKEND] notification not cached event_id={} (cache disabled)",
                self.event_id.get()
            );
            return;
        }

        // Clone out of the slot so the handler runs without the lock held.
        let handler = self.receive_handler.read().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Reactor-thread notification that the remote service acknowledged the
    /// subscription.
    pub fn on_subscribe_ack_received(&self) {
        let mut state = self.state.lock();
        if *state == SubscriptionState::SubscriptionPending {
            *state = SubscriptionState::Subscribed;
            log::info!(
                "[EVENT-BACKEND] subscription acknowledged event_id={}",
                self.event_id.get()
            );
        } else {
            log::warn!(
                "[EVENT-BACKEND] unexpected subscribe ACK event_id={} state={:?}",
                self.event_id.get(),
                *state
            );
        }
    }

    /// Reactor-thread notification that the remote service rejected the
    /// subscription. Tears the cache down again.
    pub fn on_subscribe_nack_received(&self) {
        let mut state = self.state.lock();
        if *state == SubscriptionState::SubscriptionPending {
            *state = SubscriptionState::NotSubscribed;
            self.cache.clear();
            log::warn!(
                "[EVENT-BACKEND] subscription rejected event_id={}",
                self.event_id.get()
            );
        } else {
            log::warn!(
                "[EVENT-BACKEND] unexpected subscribe NACK event_id={} state={:?}",
                self.event_id.get(),
                *state
            );
        }
    }

    // ========================================================================
    // Subscription management (application context)
    // ========================================================================

    /// Request the subscription and size the cache for `cache_size` samples.
    ///
    /// The cache is sized here, before the ACK, so samples arriving during
    /// `SubscriptionPending` are retained. A `cache_size` of 0 keeps the
    /// cache disabled.
    pub fn subscribe(&self, cache_size: usize) -> Result<()> {
        let mut state = self.state.lock();
        if *state != SubscriptionState::NotSubscribed {
            return Err(Error::AlreadySubscribed(self.event_id));
        }
        self.cache.resize(cache_size);
        *state = SubscriptionState::SubscriptionPending;
        log::info!(
            "[EVENT-BACKEND] subscribe event_id={} cache_size={}",
            self.event_id.get(),
            cache_size
        );
        Ok(())
    }

    /// Request the subscription with the cache capacity the deployment
    /// model configures for this event.
    pub fn subscribe_with_config(&self, config: &crate::config::DeploymentConfig) -> Result<()> {
        self.subscribe(config.event_cache_size(self.event_id))
    }

    /// Drop the subscription, disable the cache, and discard all samples.
    pub fn unsubscribe(&self) -> Result<()> {
        let mut state = self.state.lock();
        if *state == SubscriptionState::NotSubscribed {
            return Err(Error::NotSubscribed(self.event_id));
        }
        *state = SubscriptionState::NotSubscribed;
        self.cache.clear();
        log::info!(
            "[EVENT-BACKEND] unsubscribe event_id={}",
            self.event_id.get()
        );
        Ok(())
    }

    /// Current subscription state.
    #[must_use]
    pub fn subscription_state(&self) -> SubscriptionState {
        *self.state.lock()
    }

    // ========================================================================
    // Sample access (application context)
    // ========================================================================

    /// Pull up to `requested_sample_count` new samples.
    ///
    /// Delegates to [`InvisibleSampleCache::get_samples`]; the returned
    /// batch may hold fewer samples than requested, or unconsumed leftovers
    /// from a previous call. The reactor keeps enqueueing while the batch
    /// is held.
    pub fn get_new_samples(
        &self,
        requested_sample_count: usize,
    ) -> SampleBatch<'_, NotificationMessage> {
        self.cache.get_samples(requested_sample_count)
    }

    /// Register the data-available callback, replacing any previous one.
    pub fn set_receive_handler(&self, handler: EventReceiveHandler) {
        *self.receive_handler.write() = Some(handler);
    }

    /// Remove the data-available callback.
    pub fn unset_receive_handler(&self) {
        *self.receive_handler.write() = None;
    }

    /// Drop and throughput counters.
    #[must_use]
    pub fn stats(&self) -> EventBackendStats {
        EventBackendStats {
            notifications_cached: self.cache.total_enqueued() as u64,
            notifications_rejected: self.rejected.load(Ordering::Relaxed),
            samples_dropped: self.cache.dropped_samples() as u64,
        }
    }
}
