// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Decoded event notification messages.
//!
//! A [`NotificationMessage`] is the unit the reactor hands to the event
//! binding: the protocol header identifiers plus the serialized event
//! payload. The sample cache treats it as an opaque, owned, movable value;
//! eviction simply drops ownership.

/// Service identifier from the deployment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(pub u16);

impl ServiceId {
    /// Create a new service identifier.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Service instance identifier from the deployment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u16);

impl InstanceId {
    /// Create a new instance identifier.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Event identifier within a service interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub u16);

impl EventId {
    /// Create a new event identifier.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Client identifier of the proxy that opened the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClientId(pub u16);

impl ClientId {
    /// Create a new client identifier.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Per-connection session counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(pub u32);

impl SessionId {
    /// Create a new session identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Protocol header of a decoded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHeader {
    /// Service the event belongs to.
    pub service_id: ServiceId,
    /// Instance of the service.
    pub instance_id: InstanceId,
    /// Event within the service interface.
    pub event_id: EventId,
    /// Client the notification is addressed to.
    pub client_id: ClientId,
    /// Session counter of the sending connection.
    pub session_id: SessionId,
}

/// A received event sample: header plus serialized payload.
///
/// Ownership is transferred into the cache on `enqueue` and back out when
/// the application pops the sample from a retrieved batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Decoded protocol header.
    pub header: NotificationHeader,
    /// Serialized event payload (deserialization happens in the generated
    /// proxy, after retrieval).
    pub payload: Vec<u8>,
}

impl NotificationMessage {
    /// Create a new notification message.
    #[must_use]
    pub fn new(header: NotificationHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Event identifier this notification carries.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        self.header.event_id
    }

    /// Consume the message and return the payload bytes.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
