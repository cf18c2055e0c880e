//! Pulse-width-to-channel mapping.
//!
//! Receivers send 1000..2000 us pulses centred on 1500 us. This module maps
//! those widths onto the signed 16-bit channel values the report encoder
//! consumes, using the range of the active gamepad mode.

use gamepad_core::{AxisRange, ChannelVector, CHANNEL_COUNT};

/// Pulse width at stick centre.
pub const PULSE_CENTER_US: u16 = 1500;

/// Pulse deflection from centre that maps to full scale.
pub const PULSE_HALF_SPAN_US: u16 = 500;

/// Largest axis value produced.
pub const AXIS_MAX: i16 = i16::MAX;

/// Channel mapping configuration for PPM to gamepad conversion.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMapping {
    /// Frame index feeding each output channel. Channels 0..=5 drive
    /// gamepad 1 (X, Y, Z, Rx, Ry, Rz), channels 6..=11 drive gamepad 2.
    pub order: [usize; CHANNEL_COUNT],
    /// Bit `n` set inverts output channel `n`.
    pub invert: u16,
}

/// Receiver channel `n` drives output channel `n`, nothing inverted.
pub const DEFAULT_MAPPING: ChannelMapping = ChannelMapping {
    order: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
    invert: 0,
};

impl ChannelMapping {
    /// Whether output channel `channel` is inverted.
    #[inline]
    #[must_use]
    pub const fn is_inverted(&self, channel: usize) -> bool {
        channel < CHANNEL_COUNT && self.invert & (1 << channel) != 0
    }

    /// Same mapping with output channel `channel` inverted.
    #[must_use]
    pub const fn with_inverted(mut self, channel: usize) -> Self {
        if channel < CHANNEL_COUNT {
            self.invert |= 1 << channel;
        }
        self
    }
}

impl Default for ChannelMapping {
    fn default() -> Self {
        DEFAULT_MAPPING
    }
}

/// Convert a pulse width to an axis value.
///
/// - `Signed`: 1500 us is 0, 1000/2000 us are -32767/+32767.
/// - `Unsigned`: 1000 us is 0, 2000 us is 32767.
///
/// Widths past the nominal span are clamped, so unsigned modes never see a
/// negative value.
#[inline]
#[must_use]
pub fn pulse_to_axis(width_us: u16, range: AxisRange, invert: bool) -> i16 {
    let half_span = i32::from(PULSE_HALF_SPAN_US);
    let max = i32::from(AXIS_MAX);

    let mut offset = i32::from(width_us) - i32::from(PULSE_CENTER_US);
    if invert {
        offset = -offset;
    }

    let value = match range {
        AxisRange::Signed => offset * max / half_span,
        AxisRange::Unsigned => (offset + half_span) * max / (2 * half_span),
    };
    let min = match range {
        AxisRange::Signed => -max,
        AxisRange::Unsigned => 0,
    };
    value.clamp(min, max) as i16
}

/// Map a decoded frame to a channel vector.
///
/// Output channels whose source index is not present in `frame` stay zero.
#[must_use]
pub fn frame_to_channels(
    frame: &[u16],
    mapping: &ChannelMapping,
    range: AxisRange,
) -> ChannelVector {
    let mut channels = ChannelVector::NEUTRAL;
    for (channel, &source) in mapping.order.iter().enumerate() {
        if let Some(&width) = frame.get(source) {
            let invert = mapping.is_inverted(channel);
            channels.set(channel, pulse_to_axis(width, range, invert));
        }
    }
    channels
}
