// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! # acom - IPC event binding for adaptive automotive middleware
//!
//! `acom` implements the event-sample hand-off between the single reactor
//! (I/O) thread of a middleware connection and the application threads that
//! consume event data through a generated service proxy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acom::{EventId, ProxyEventBackend, Result};
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let backend = Arc::new(ProxyEventBackend::new(EventId::new(0x8001)));
//!
//!     // Connection management (normally driven by the IPC connection):
//!     backend.set_connection_state(true);
//!     backend.set_service_state(true);
//!
//!     // Application side: subscribe with a cache capacity of 8 samples.
//!     backend.subscribe(8)?;
//!     backend.on_subscribe_ack_received();
//!
//!     // Application side: pull up to 4 new samples.
//!     let mut samples = backend.get_new_samples(4);
//!     while let Some(sample) = samples.pop_front() {
//!         println!("received {} payload bytes", sample.payload.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                        Application Layer                           |
//! |        generated proxy -> ProxyEventBackend::get_new_samples       |
//! +--------------------------------------------------------------------+
//! |                         Event Binding                              |
//! |   subscription lifecycle | state gating | receive-handler signal   |
//! +--------------------------------------------------------------------+
//! |                      InvisibleSampleCache                          |
//! |   reactor cache --(migrate, FIFO, drop-oldest)--> app cache        |
//! +--------------------------------------------------------------------+
//! |                        Reactor Thread                              |
//! |   decoded NotificationMessage -> on_notification_received          |
//! +--------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`InvisibleSampleCache`] | Bounded two-stage FIFO with drop-oldest policy |
//! | [`ProxyEventBackend`] | Per-event backend driven by the reactor and the proxy |
//! | [`NotificationMessage`] | Decoded event notification (header + payload) |
//! | [`SampleCacheContainer`] | Ordered sample sequence handed to the consumer |
//! | [`DeploymentConfig`] | Per-event cache capacities from the deployment model |
//!
//! ## Scope
//!
//! Wire protocol encoding/decoding, service discovery, connection
//! establishment, and method/RPC dispatch are out of scope. The binding
//! receives already-decoded notifications and exposes a pull-based
//! sample-retrieval API to the generated proxy-event object.

/// Deployment-model configuration (per-event cache capacities).
pub mod config;
/// Event sample path: invisible sample cache, proxy event backend,
/// subscription lifecycle.
pub mod events;
/// IPC message model (decoded notification messages and identifiers).
pub mod ipc;

pub use config::{DeploymentConfig, DEFAULT_EVENT_CACHE_SIZE};
pub use events::backend::{EventBackendStats, EventReceiveHandler, ProxyEventBackend};
pub use events::cache::{InvisibleSampleCache, SampleBatch, SampleCacheContainer};
pub use events::subscription::SubscriptionState;
pub use ipc::message::{
    ClientId, EventId, InstanceId, NotificationHeader, NotificationMessage, ServiceId, SessionId,
};

/// Errors returned by acom event binding operations.
///
/// The cache itself reports nothing beyond the boolean "was it cached"
/// signal of `enqueue`; lost samples under backpressure are designed-in
/// lossy behavior, not errors. Only subscription lifecycle misuse is
/// surfaced here.
#[derive(Debug)]
pub enum Error {
    /// `subscribe` called while a subscription is already pending or active.
    AlreadySubscribed(EventId),
    /// `unsubscribe` called without a pending or active subscription.
    NotSubscribed(EventId),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AlreadySubscribed(event_id) => {
                write!(f, "event {} is already subscribed", event_id.get())
            }
            Error::NotSubscribed(event_id) => {
                write!(f, "event {} is not subscribed", event_id.get())
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for API results using the public `Error` type.
pub type Result<T> = core::result::Result<T, Error>;

/// acom version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
