//! Report sink trait and error types.

use core::future::Future;

use crate::report::EncodedReport;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// BLE/communication I/O error.
    Io,
    /// Characteristic not ready (e.g. notifications not enabled yet).
    NotReady,
    /// Report dropped (e.g. notification queue full).
    Dropped,
    /// Stack busy.
    Busy,
}

/// Async trait for report sinks.
///
/// Implemented by the BLE HID transport: each [`EncodedReport`] goes to the
/// input report characteristic whose Report Reference matches
/// [`EncodedReport::report_id`].
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Push one report to the host.
    ///
    /// May block until the previous notification has been queued.
    fn send(&mut self, report: &EncodedReport) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool;
}
