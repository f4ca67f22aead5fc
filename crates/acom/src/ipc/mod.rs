// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! IPC message model.
//!
//! The binding consumes notifications that the connection's reactor has
//! already decoded from the wire; this module defines that decoded form.
//! Wire encoding/decoding lives in the transport layer and is out of scope.

pub mod message;

pub use message::{
    ClientId, EventId, InstanceId, NotificationHeader, NotificationMessage, ServiceId, SessionId,
};
