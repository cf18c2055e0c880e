//! Channel source trait and error types.

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::channels::ChannelVector;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Receiver/communication I/O error.
    Io,
    /// Malformed frame (bad pulse width, bad sync).
    Framing,
    /// Protocol parsing error (invalid format).
    Parse,
    /// Receiver signal lost / timeout.
    Disconnected,
    /// More channels than a frame can hold.
    BufferOverflow,
}

/// Async trait for channel sources.
///
/// This trait abstracts where channel values come from (PPM decoder, serial
/// RC protocol, test fixture) so the update loop can be driven by any of them.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ChannelSource {
    /// Wait for and receive the next channel vector.
    ///
    /// On error, callers should fall back to [`ChannelVector::centered`].
    fn receive(&mut self) -> impl Future<Output = Result<ChannelVector, InputError>>;

    /// Check if the source currently has a live signal.
    fn is_connected(&self) -> bool;
}

/// Channel source fed through an embassy [`Signal`].
///
/// The producer task calls [`Signal::signal`] with every new vector; a
/// pending value is overwritten, so the update loop always sees the latest
/// channels.
pub struct SignalSource<'a, M: RawMutex> {
    signal: &'a Signal<M, ChannelVector>,
    received: bool,
}

impl<'a, M: RawMutex> SignalSource<'a, M> {
    #[must_use]
    pub fn new(signal: &'a Signal<M, ChannelVector>) -> Self {
        Self {
            signal,
            received: false,
        }
    }
}

impl<M: RawMutex> ChannelSource for SignalSource<'_, M> {
    async fn receive(&mut self) -> Result<ChannelVector, InputError> {
        let channels = self.signal.wait().await;
        self.received = true;
        Ok(channels)
    }

    fn is_connected(&self) -> bool {
        self.received
    }
}
