// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Subscription lifecycle states of a proxy event.
//!
//! Transitions are driven by the application (`subscribe`/`unsubscribe`)
//! and the reactor (subscribe ACK/NACK from the remote service):
//!
//! ```text
//! NotSubscribed --subscribe--> SubscriptionPending --ack--> Subscribed
//!       ^                            |                          |
//!       +----------nack--------------+                          |
//!       +----------------------unsubscribe----------------------+
//! ```

/// Subscription state of one proxy event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionState {
    /// No subscription requested, or torn down again.
    #[default]
    NotSubscribed,
    /// Subscribe request sent, ACK/NACK outstanding.
    SubscriptionPending,
    /// Subscription acknowledged by the remote service.
    Subscribed,
}

impl SubscriptionState {
    /// Whether incoming notifications are accepted in this state.
    ///
    /// Notifications can legitimately arrive between the subscribe request
    /// and its ACK (the cache is already sized at that point), so pending
    /// subscriptions accept as well.
    #[must_use]
    pub fn accepts_notifications(&self) -> bool {
        matches!(
            self,
            SubscriptionState::SubscriptionPending | SubscriptionState::Subscribed
        )
    }
}
