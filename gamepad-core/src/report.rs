//! Report encoding: channel values to wire-exact HID input reports.
//!
//! Wire format, one report per active gamepad:
//!
//! ```text
//! [buttons][axis0]..[axis5]
//! ```
//!
//! `buttons` is always zero. Each axis is one byte (8-bit modes, the high
//! byte of the channel value) or two little-endian bytes (16-bit modes).
//! Reports are 7 or 13 bytes long.

use heapless::Vec;

use crate::channels::{ChannelVector, AXES_PER_GAMEPAD, MAX_GAMEPADS};
use crate::connection::ConnectionState;
use crate::mode::{AxisWidth, GamepadMode, ModeParams, BUTTON_BYTES};

/// Largest report any mode produces.
pub const MAX_REPORT_LEN: usize = BUTTON_BYTES + AXES_PER_GAMEPAD * 2;

/// One encoded gamepad input report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    buf: [u8; MAX_REPORT_LEN],
    len: usize,
}

impl Report {
    /// Encode six axis values at the given width.
    ///
    /// 8-bit axes keep only the high byte (`value >> 8`, sign-preserving).
    /// This drops resolution on purpose; no clamping to the declared logical
    /// range is done.
    #[must_use]
    pub fn encode(width: AxisWidth, axes: &[i16; AXES_PER_GAMEPAD]) -> Self {
        let mut buf = [0u8; MAX_REPORT_LEN];
        let mut len = BUTTON_BYTES;

        for &value in axes {
            match width {
                AxisWidth::Bits8 => {
                    buf[len] = (value >> 8) as u8;
                    len += 1;
                }
                AxisWidth::Bits16 => {
                    buf[len..len + 2].copy_from_slice(&value.to_le_bytes());
                    len += 2;
                }
            }
        }

        Self { buf, len }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Report {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A report tagged with the gamepad it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedReport {
    /// Zero-based gamepad index.
    pub gamepad: usize,
    pub report: Report,
}

impl EncodedReport {
    /// Report ID declared for this gamepad in the descriptor.
    #[inline]
    #[must_use]
    pub const fn report_id(&self) -> u8 {
        self.gamepad as u8 + 1
    }
}

/// Reports produced by one update.
pub type Reports = Vec<EncodedReport, MAX_GAMEPADS>;

/// Encode `channels` for `mode`.
///
/// Returns no reports while disconnected; the update is simply dropped.
#[must_use]
pub fn encode(mode: GamepadMode, channels: &ChannelVector, connected: bool) -> Reports {
    encode_with(&mode.params(), channels, connected)
}

fn encode_with(params: &ModeParams, channels: &ChannelVector, connected: bool) -> Reports {
    let mut reports = Reports::new();
    if !connected {
        return reports;
    }

    for gamepad in 0..params.report_count.min(MAX_GAMEPADS) {
        let Some(axes) = channels.gamepad(gamepad) else {
            break;
        };
        let report = Report::encode(params.axis_width, axes);
        // Capacity is MAX_GAMEPADS and the loop is bounded by it.
        let _ = reports.push(EncodedReport { gamepad, report });
    }

    reports
}

/// Encoder bound to the mode chosen at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportEncoder {
    mode: GamepadMode,
    params: ModeParams,
}

impl ReportEncoder {
    #[must_use]
    pub const fn new(mode: GamepadMode) -> Self {
        Self {
            mode,
            params: mode.params(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> GamepadMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn params(&self) -> &ModeParams {
        &self.params
    }

    /// Encode one update, reading the connection gate afresh.
    #[must_use]
    pub fn encode(&self, channels: &ChannelVector, connection: &ConnectionState) -> Reports {
        encode_with(&self.params, channels, connection.is_connected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_16bit_scenario() {
        let channels = ChannelVector::new([100, -100, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let reports = encode(GamepadMode::Single16Bit, &channels, true);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].gamepad, 0);
        assert_eq!(reports[0].report_id(), 1);
        assert_eq!(
            reports[0].report.as_bytes(),
            &[
                0x00, 0x64, 0x00, 0x9C, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn test_dual_8bit_scenario() {
        let channels = ChannelVector::new([0, 0, 0, 0, 0, 32000, 0, 0, 0, 0, 0, -32000]);
        let reports = encode(GamepadMode::Dual8Bit, &channels, true);
        assert_eq!(reports.len(), 2);

        let first = reports[0].report.as_bytes();
        let second = reports[1].report.as_bytes();
        assert_eq!(first.len(), 7);
        assert_eq!(second.len(), 7);
        assert_eq!(first[6], 0x7D);
        assert_eq!(second[6], 0x83);
        assert_eq!(reports[1].gamepad, 1);
        assert_eq!(reports[1].report_id(), 2);
    }

    #[test]
    fn test_8bit_takes_high_byte() {
        let mut channels = ChannelVector::NEUTRAL;
        channels.set(0, 300);
        channels.set(1, -300);
        channels.set(2, 255);
        channels.set(3, -1);
        let reports = encode(GamepadMode::Single8Bit, &channels, true);
        assert_eq!(
            reports[0].report.as_bytes(),
            &[0x00, 0x01, 0xFE, 0x00, 0xFF, 0x00, 0x00]
        );
    }

    #[test]
    fn test_16bit_little_endian() {
        let mut channels = ChannelVector::NEUTRAL;
        channels.set(5, 1000);
        let reports = encode(GamepadMode::Single15Bit, &channels, true);
        assert_eq!(&reports[0].report.as_bytes()[11..], &[0xE8, 0x03]);
    }

    #[test]
    fn test_disconnected_produces_nothing() {
        let channels = ChannelVector::new([1234; 12]);
        for mode in GamepadMode::ALL {
            assert!(encode(mode, &channels, false).is_empty());
        }
    }

    #[test]
    fn test_unsigned_modes_encode_like_signed() {
        let channels = ChannelVector::new([-5000, 5000, 0, 1, -1, 32767, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            encode(GamepadMode::Single7Bit, &channels, true),
            encode(GamepadMode::Single8Bit, &channels, true)
        );
        assert_eq!(
            encode(GamepadMode::Dual15Bit, &channels, true),
            encode(GamepadMode::Dual16Bit, &channels, true)
        );
    }

    #[test]
    fn test_single_modes_ignore_second_group() {
        let mut channels = ChannelVector::NEUTRAL;
        channels.set(6, 1000);
        let reports = encode(GamepadMode::Single16Bit, &channels, true);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].report.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encoder_reads_connection_each_call() {
        let connection = ConnectionState::new();
        let encoder = ReportEncoder::new(GamepadMode::Dual16Bit);
        let channels = ChannelVector::NEUTRAL;

        assert!(encoder.encode(&channels, &connection).is_empty());
        connection.set_connected(true);
        assert_eq!(encoder.encode(&channels, &connection).len(), 2);
        connection.set_connected(false);
        assert!(encoder.encode(&channels, &connection).is_empty());
    }

    #[test]
    fn test_report_lengths_match_params() {
        for mode in GamepadMode::ALL {
            let reports = encode(mode, &ChannelVector::NEUTRAL, true);
            assert_eq!(reports.len(), mode.params().report_count);
            for r in &reports {
                assert_eq!(r.report.len(), mode.params().report_len());
                assert_eq!(r.report.as_bytes()[0], 0);
            }
        }
    }
}
