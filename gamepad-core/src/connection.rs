//! Host connection gate shared between the BLE event handler and the update loop.

use portable_atomic::{AtomicBool, Ordering};

/// Connection change reported by the BLE stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionEvent {
    Connected,
    Disconnected,
}

/// Whether a host is currently connected.
///
/// Written from the connection callback, read by the encoder before every
/// update. Relaxed ordering is enough: a read that lags by one update is
/// corrected on the next tick.
///
/// # Example
///
/// ```
/// use gamepad_core::{ConnectionEvent, ConnectionState};
///
/// static CONNECTION: ConnectionState = ConnectionState::new();
///
/// CONNECTION.apply(ConnectionEvent::Connected);
/// assert!(CONNECTION.is_connected());
/// ```
#[derive(Debug, Default)]
pub struct ConnectionState {
    connected: AtomicBool,
}

impl ConnectionState {
    /// A gate that starts disconnected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Apply a connection event.
    pub fn apply(&self, event: ConnectionEvent) {
        debug!("connection event: {:?}", event);
        self.set_connected(matches!(event, ConnectionEvent::Connected));
    }
}
