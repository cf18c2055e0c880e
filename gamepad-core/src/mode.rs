//! Gamepad modes and the structural parameters implied by their descriptors.

use crate::channels::AXES_PER_GAMEPAD;
use crate::descriptor;

/// Size of the reserved button field at the start of every report.
pub const BUTTON_BYTES: usize = 1;

/// Axis field width declared by a mode's descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisWidth {
    /// One byte per axis ("compatibility mode").
    Bits8,
    /// Two little-endian bytes per axis.
    Bits16,
}

impl AxisWidth {
    /// Report Size declared for each axis field.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            AxisWidth::Bits8 => 8,
            AxisWidth::Bits16 => 16,
        }
    }

    /// Bytes occupied by one axis on the wire.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            AxisWidth::Bits8 => 1,
            AxisWidth::Bits16 => 2,
        }
    }
}

/// Sign convention of the declared logical range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisRange {
    /// Symmetric range around zero (`±127` / `±32767`).
    Signed,
    /// Non-negative range (`0..=127` / `0..=32767`).
    ///
    /// Some consumers mishandle negative gamepad axes; these modes declare a
    /// zero logical minimum instead. Encoding is unchanged, so the caller must
    /// only supply non-negative channel values.
    Unsigned,
}

impl AxisRange {
    /// Channel value at the middle of the declared range.
    ///
    /// For unsigned ranges this is half of `i16::MAX`, which also lands on
    /// the middle byte (63) once reduced to 8 bits.
    #[inline]
    #[must_use]
    pub const fn center(self) -> i16 {
        match self {
            AxisRange::Signed => 0,
            AxisRange::Unsigned => i16::MAX / 2,
        }
    }
}

/// Structural parameters of a mode, as declared by its descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeParams {
    pub axis_width: AxisWidth,
    pub axis_range: AxisRange,
    /// Number of independent gamepad reports (top-level collections).
    pub report_count: usize,
    pub logical_min: i32,
    pub logical_max: i32,
}

impl ModeParams {
    const fn new(axis_width: AxisWidth, axis_range: AxisRange, report_count: usize) -> Self {
        let logical_max = match axis_width {
            AxisWidth::Bits8 => i8::MAX as i32,
            AxisWidth::Bits16 => i16::MAX as i32,
        };
        let logical_min = match axis_range {
            AxisRange::Signed => -logical_max,
            AxisRange::Unsigned => 0,
        };
        Self {
            axis_width,
            axis_range,
            report_count,
            logical_min,
            logical_max,
        }
    }

    /// Byte length of one report: the button byte plus six axis fields.
    #[inline]
    #[must_use]
    pub const fn report_len(&self) -> usize {
        BUTTON_BYTES + AXES_PER_GAMEPAD * self.axis_width.bytes()
    }

    /// Whether this mode exposes two gamepads.
    #[inline]
    #[must_use]
    pub const fn is_dual(&self) -> bool {
        self.report_count > 1
    }
}

/// Supported gamepad configurations.
///
/// The discriminant is the raw mode number accepted at configuration time.
/// A mode is selected once and never changes while the device runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GamepadMode {
    /// One gamepad, 8-bit axes, range ±127.
    Single8Bit = 0,
    /// One gamepad, 16-bit axes, range ±32767.
    Single16Bit = 1,
    /// Two gamepads, 8-bit axes, range ±127.
    Dual8Bit = 2,
    /// Two gamepads, 16-bit axes, range ±32767.
    Dual16Bit = 3,
    /// One gamepad, 8-bit axes, range 0..=127.
    Single7Bit = 4,
    /// One gamepad, 16-bit axes, range 0..=32767.
    Single15Bit = 5,
    /// Two gamepads, 8-bit axes, range 0..=127.
    Dual7Bit = 6,
    /// Two gamepads, 16-bit axes, range 0..=32767.
    Dual15Bit = 7,
}

impl GamepadMode {
    /// Every mode, ordered by raw value.
    pub const ALL: [GamepadMode; 8] = [
        GamepadMode::Single8Bit,
        GamepadMode::Single16Bit,
        GamepadMode::Dual8Bit,
        GamepadMode::Dual16Bit,
        GamepadMode::Single7Bit,
        GamepadMode::Single15Bit,
        GamepadMode::Dual7Bit,
        GamepadMode::Dual15Bit,
    ];

    /// Raw mode number.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Structural parameters of this mode.
    ///
    /// `report_count` comes straight from this table. It must never be
    /// recomputed from the raw mode number.
    #[must_use]
    pub const fn params(self) -> ModeParams {
        use AxisRange::{Signed, Unsigned};
        use AxisWidth::{Bits16, Bits8};

        match self {
            GamepadMode::Single8Bit => ModeParams::new(Bits8, Signed, 1),
            GamepadMode::Single16Bit => ModeParams::new(Bits16, Signed, 1),
            GamepadMode::Dual8Bit => ModeParams::new(Bits8, Signed, 2),
            GamepadMode::Dual16Bit => ModeParams::new(Bits16, Signed, 2),
            GamepadMode::Single7Bit => ModeParams::new(Bits8, Unsigned, 1),
            GamepadMode::Single15Bit => ModeParams::new(Bits16, Unsigned, 1),
            GamepadMode::Dual7Bit => ModeParams::new(Bits8, Unsigned, 2),
            GamepadMode::Dual15Bit => ModeParams::new(Bits16, Unsigned, 2),
        }
    }

    /// HID report descriptor the host must receive for this mode.
    #[must_use]
    pub fn descriptor(self) -> &'static [u8] {
        match self {
            GamepadMode::Single8Bit => descriptor::SINGLE_8BIT,
            GamepadMode::Single16Bit => descriptor::SINGLE_16BIT,
            GamepadMode::Dual8Bit => descriptor::DUAL_8BIT,
            GamepadMode::Dual16Bit => descriptor::DUAL_16BIT,
            GamepadMode::Single7Bit => descriptor::SINGLE_7BIT,
            GamepadMode::Single15Bit => descriptor::SINGLE_15BIT,
            GamepadMode::Dual7Bit => descriptor::DUAL_7BIT,
            GamepadMode::Dual15Bit => descriptor::DUAL_15BIT,
        }
    }

    /// Advertised device name used when none is configured.
    #[must_use]
    pub const fn default_device_name(self) -> &'static str {
        match self {
            GamepadMode::Single8Bit => "Gamepad 8",
            GamepadMode::Single16Bit => "Gamepad 16",
            GamepadMode::Dual8Bit => "Gamepad 2x8",
            GamepadMode::Dual16Bit => "Gamepad 2x16",
            GamepadMode::Single7Bit => "Gamepad 7",
            GamepadMode::Single15Bit => "Gamepad 15",
            GamepadMode::Dual7Bit => "Gamepad 2x7",
            GamepadMode::Dual15Bit => "Gamepad 2x15",
        }
    }

    /// Pick a mode from the number of receiver channels in use.
    ///
    /// - `0`: single gamepad in 8-bit compatibility mode
    /// - `1..=6`: single gamepad with 16-bit axes
    /// - `7..`: two gamepads with 16-bit axes
    #[must_use]
    pub const fn for_channel_count(channels: usize) -> Self {
        match channels {
            0 => GamepadMode::Single8Bit,
            1..=AXES_PER_GAMEPAD => GamepadMode::Single16Bit,
            _ => GamepadMode::Dual16Bit,
        }
    }
}

impl TryFrom<u8> for GamepadMode {
    type Error = ModeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        GamepadMode::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or(ModeError::Unknown(raw))
    }
}

impl From<GamepadMode> for u8 {
    #[inline]
    fn from(mode: GamepadMode) -> Self {
        mode.raw()
    }
}

/// Error returned for a raw mode number outside the defined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    Unknown(u8),
}
