// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Event sample path of the IPC binding.
//!
//! Two execution contexts meet here: the connection's single reactor (I/O)
//! thread producing decoded notifications, and the application threads
//! consuming them through the generated proxy. The
//! [`cache::InvisibleSampleCache`] is the hand-off point; the
//! [`backend::ProxyEventBackend`] owns one cache per subscribed event and
//! drives the subscription lifecycle around it.

/// Per-event backend (gating, subscription lifecycle, receive handler).
pub mod backend;
/// Bounded two-stage sample cache.
pub mod cache;
/// Subscription lifecycle states.
pub mod subscription;

pub use backend::{EventBackendStats, EventReceiveHandler, ProxyEventBackend};
pub use cache::{InvisibleSampleCache, SampleBatch, SampleCacheContainer};
pub use subscription::SubscriptionState;
