//! RC receiver PPM decoding and channel mapping.
//!
//! This crate turns the pulse train of an RC receiver's PPM output into the
//! [`ChannelVector`](gamepad_core::ChannelVector) that drives the gamepad
//! report encoder. It is designed to be used with any pulse capture
//! peripheral (timer input capture, PIO, GPIO interrupts with a timestamp).
//!
//! # Features
//!
//! - Incremental frame decoding with resynchronization on bad pulses
//! - Configurable channel order and per-channel inversion
//! - Signed or unsigned value range, following the gamepad mode
//! - No chip-specific dependencies - works on any platform
//! - Fully testable on host
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::AxisRange;
//! use ppm_proto::{frame_to_channels, PpmDecoder, DEFAULT_MAPPING};
//!
//! let mut decoder = PpmDecoder::new();
//! let mut latest = None;
//!
//! // Widths from the capture peripheral, in microseconds
//! for width in [8000, 1500, 2000, 1000, 1500, 8000] {
//!     if let Ok(Some(frame)) = decoder.push_pulse(width) {
//!         latest = Some(frame_to_channels(&frame, &DEFAULT_MAPPING, AxisRange::Signed));
//!     }
//! }
//!
//! let channels = latest.unwrap();
//! assert_eq!(channels.get(1), Some(32767));
//! ```
//!
//! # Signal Timing
//!
//! - Channel pulse: 700..=2300 us (nominal 1000..2000 us, centre 1500 us)
//! - Sync gap: at least 3000 us
//! - Up to 12 channels per frame

#![cfg_attr(not(feature = "std"), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod decoder;
pub mod mapping;
pub mod source;

// Re-export main types from decoder
pub use decoder::{PpmDecoder, PpmError, PpmFrame, PULSE_MAX_US, PULSE_MIN_US, SYNC_MIN_US};

// Re-export mapping
pub use mapping::{
    frame_to_channels, pulse_to_axis, ChannelMapping, DEFAULT_MAPPING, PULSE_CENTER_US,
    PULSE_HALF_SPAN_US,
};

pub use source::{PpmSource, PulseInput};
