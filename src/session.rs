//! External capabilities consumed by the decoder.
//!
//! Identity resolution and baseline lookup live outside the decoder core;
//! they are passed in per call so the core stays free of ambient state and
//! testable with synthetic providers. The in-memory implementations below
//! back the CLI replay tool and the test suite.

use crate::types::{DeviceId, PositionRecord};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

/// Transport-level context for one connection, as much of it as identity
/// resolution needs.
#[derive(Clone, Debug, Default)]
pub struct TransportContext {
    pub remote_address: Option<SocketAddr>,
}

/// Resolves devices from transport sessions and identifiers.
pub trait IdentityProvider {
    /// Device already associated with this connection, if any.
    fn resolve_session(&self, ctx: &TransportContext) -> Option<DeviceId>;

    /// Associate this connection with the device carrying `identifier`.
    fn resolve_session_by_identifier(
        &self,
        ctx: &TransportContext,
        identifier: &str,
    ) -> Option<DeviceId>;

    /// The device's textual unique identifier.
    fn unique_identifier(&self, device: DeviceId) -> Option<String>;
}

/// Read-only access to the last decoded position per device.
///
/// The decoder reads at most once per delta decode and never writes; a
/// stale baseline degrades patch accuracy but never decode safety.
pub trait BaselineProvider {
    fn last_position(&self, device: DeviceId) -> Option<PositionRecord>;
}

#[derive(Debug, Default)]
struct RegistryInner {
    by_identifier: HashMap<String, DeviceId>,
    identifiers: HashMap<DeviceId, String>,
    active: Option<DeviceId>,
    next_id: u64,
}

/// In-memory identity provider for one replayed connection.
///
/// Tracks the device most recently resolved by identifier as the active
/// session. With auto-registration enabled, unknown identifiers are
/// assigned fresh handles on first sight.
#[derive(Debug)]
pub struct MemoryRegistry {
    auto_register: bool,
    inner: Mutex<RegistryInner>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            auto_register: false,
            inner: Mutex::new(RegistryInner {
                next_id: 1,
                ..RegistryInner::default()
            }),
        }
    }

    pub fn with_auto_register() -> Self {
        Self {
            auto_register: true,
            ..Self::new()
        }
    }

    /// Register an identifier, returning its handle (existing or fresh).
    pub fn register(&self, identifier: &str) -> DeviceId {
        let mut inner = self.inner.lock().unwrap();
        if let Some(&device) = inner.by_identifier.get(identifier) {
            return device;
        }
        let device = DeviceId(inner.next_id);
        inner.next_id += 1;
        inner.by_identifier.insert(identifier.to_string(), device);
        inner.identifiers.insert(device, identifier.to_string());
        device
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MemoryRegistry {
    fn resolve_session(&self, _ctx: &TransportContext) -> Option<DeviceId> {
        self.inner.lock().unwrap().active
    }

    fn resolve_session_by_identifier(
        &self,
        _ctx: &TransportContext,
        identifier: &str,
    ) -> Option<DeviceId> {
        let known = self
            .inner
            .lock()
            .unwrap()
            .by_identifier
            .get(identifier)
            .copied();

        let device = match known {
            Some(device) => Some(device),
            None if self.auto_register => Some(self.register(identifier)),
            None => None,
        };

        if let Some(device) = device {
            self.inner.lock().unwrap().active = Some(device);
        }
        device
    }

    fn unique_identifier(&self, device: DeviceId) -> Option<String> {
        self.inner.lock().unwrap().identifiers.get(&device).cloned()
    }
}

/// In-memory "last position" store.
#[derive(Debug, Default)]
pub struct MemoryBaselines {
    inner: Mutex<HashMap<DeviceId, PositionRecord>>,
}

impl MemoryBaselines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decoded position as the device's new baseline.
    pub fn store(&self, record: &PositionRecord) {
        self.inner
            .lock()
            .unwrap()
            .insert(record.device_id, record.clone());
    }
}

impl BaselineProvider for MemoryBaselines {
    fn last_position(&self, device: DeviceId) -> Option<PositionRecord> {
        self.inner.lock().unwrap().get(&device).cloned()
    }
}
