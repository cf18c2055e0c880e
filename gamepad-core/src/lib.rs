//! Platform-agnostic BLE gamepad HID modes, descriptors, and report encoding.
//!
//! This crate provides the core of a multi-mode HID gamepad without any
//! radio or board dependencies. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`mode`]: The eight gamepad modes and their parameters ([`GamepadMode`], [`ModeParams`])
//! - [`descriptor`]: Static HID report descriptors, one per mode, and a descriptor walker
//! - [`channels`]: The twelve-channel input vector ([`ChannelVector`])
//! - [`report`]: Channel values to input reports ([`encode`], [`ReportEncoder`])
//! - [`connection`]: Host connection gate ([`ConnectionState`])
//! - [`config`]: Device metadata resolved before the first update ([`DeviceConfig`])
//! - [`input`]: Channel source trait ([`ChannelSource`])
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`bridge`]: Orchestrates source-to-sink flow ([`GamepadBridge`])
//!
//! # Reports
//!
//! Every report is one zero button byte followed by six axes:
//!
//! ```text
//! 8-bit modes:  [00][x][y][z][rx][ry][rz]                       7 bytes
//! 16-bit modes: [00][x lo][x hi] .. [rz lo][rz hi]             13 bytes
//! ```
//!
//! Dual modes send a second report for channels 6..=11 under report ID 2.
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::{encode, ChannelVector, GamepadMode};
//!
//! let channels = ChannelVector::new([100, -100, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
//! let reports = encode(GamepadMode::Single16Bit, &channels, true);
//!
//! assert_eq!(reports.len(), 1);
//! assert_eq!(&reports[0].report.as_bytes()[..5], &[0x00, 0x64, 0x00, 0x9C, 0xFF]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route log output through the `log` facade (for host)
//! - **`critical-section`**: Atomics through `critical-section` on cores without CAS
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod bridge;
pub mod channels;
pub mod config;
pub mod connection;
pub mod descriptor;
pub mod input;
pub mod mode;
pub mod output;
pub mod report;

// Re-export main types at crate root
pub use bridge::{BridgeError, GamepadBridge};
pub use channels::{ChannelError, ChannelVector, AXES_PER_GAMEPAD, CHANNEL_COUNT, MAX_GAMEPADS};
pub use config::{
    ConfigError, DeviceConfig, HidInfo, PnpId, APPEARANCE_GAMEPAD, DEFAULT_HID_INFO, DEFAULT_PNP_ID,
};
pub use connection::{ConnectionEvent, ConnectionState};
pub use input::{ChannelSource, InputError, SignalSource};
pub use mode::{AxisRange, AxisWidth, GamepadMode, ModeError, ModeParams};
pub use output::{OutputError, ReportSink};
pub use report::{encode, EncodedReport, Report, ReportEncoder, Reports, MAX_REPORT_LEN};
