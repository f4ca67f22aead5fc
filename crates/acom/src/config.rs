// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Deployment-model configuration - single source of truth.
//!
//! Cache capacities are supplied by the deployment model that the service
//! generator emits; this module is the runtime stand-in for that generated
//! table. Capacities are consulted at subscribe time, never on the hot
//! path.

use crate::ipc::message::EventId;
use dashmap::DashMap;

/// Default event cache capacity when the deployment model carries no
/// per-event value.
///
/// A single slot retains the latest sample ("last-is-best"), the common
/// default for field-like events.
pub const DEFAULT_EVENT_CACHE_SIZE: usize = 1;

/// Per-event cache capacities from the deployment model.
///
/// Lookups are lock-free reads; overrides are installed once at
/// initialization and may be adjusted at runtime for diagnostics.
#[derive(Debug)]
pub struct DeploymentConfig {
    cache_sizes: DashMap<EventId, usize>,
    default_cache_size: usize,
}

impl DeploymentConfig {
    /// Create a config with [`DEFAULT_EVENT_CACHE_SIZE`] as fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default(DEFAULT_EVENT_CACHE_SIZE)
    }

    /// Create a config with a custom fallback capacity.
    #[must_use]
    pub fn with_default(default_cache_size: usize) -> Self {
        Self {
            cache_sizes: DashMap::new(),
            default_cache_size,
        }
    }

    /// Install the cache capacity for one event. A capacity of 0 disables
    /// caching for that event.
    pub fn set_event_cache_size(&self, event_id: EventId, cache_size: usize) {
        self.cache_sizes.insert(event_id, cache_size);
    }

    /// Cache capacity for `event_id`, falling back to the default.
    #[must_use]
    pub fn event_cache_size(&self, event_id: EventId) -> usize {
        self.cache_sizes
            .get(&event_id)
            .map_or(self.default_cache_size, |entry| *entry.value())
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fallback() {
        let config = DeploymentConfig::new();
        assert_eq!(
            config.event_cache_size(EventId::new(0x8001)),
            DEFAULT_EVENT_CACHE_SIZE
        );
    }

    #[test]
    fn test_override_per_event() {
        let config = DeploymentConfig::with_default(4);
        config.set_event_cache_size(EventId::new(0x8001), 16);
        config.set_event_cache_size(EventId::new(0x8002), 0);

        assert_eq!(config.event_cache_size(EventId::new(0x8001)), 16);
        assert_eq!(config.event_cache_size(EventId::new(0x8002)), 0);
        assert_eq!(config.event_cache_size(EventId::new(0x8003)), 4);
    }
}
