//! Fixed-size channel vector fed to the report encoder on every update.

use crate::mode::AxisRange;

/// Channels in every update, regardless of mode.
pub const CHANNEL_COUNT: usize = 12;

/// Axes per gamepad report (X, Y, Z, Rx, Ry, Rz).
pub const AXES_PER_GAMEPAD: usize = 6;

/// Gamepads a dual mode exposes.
pub const MAX_GAMEPADS: usize = CHANNEL_COUNT / AXES_PER_GAMEPAD;

/// Error converting a slice of the wrong length into a [`ChannelVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    Length { expected: usize, actual: usize },
}

/// Twelve signed 16-bit channel values.
///
/// Channels 0..=5 drive gamepad 1 and channels 6..=11 drive gamepad 2.
/// Single-report modes only read the first group; unused channels should be
/// left at zero.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelVector(pub [i16; CHANNEL_COUNT]);

impl ChannelVector {
    /// All channels at zero.
    pub const NEUTRAL: Self = Self([0; CHANNEL_COUNT]);

    /// All channels at the middle of `range`.
    #[must_use]
    pub const fn centered(range: AxisRange) -> Self {
        Self([range.center(); CHANNEL_COUNT])
    }

    #[must_use]
    pub const fn new(channels: [i16; CHANNEL_COUNT]) -> Self {
        Self(channels)
    }

    /// Channel value, or `None` past the last channel.
    #[inline]
    #[must_use]
    pub fn get(&self, channel: usize) -> Option<i16> {
        self.0.get(channel).copied()
    }

    /// Set one channel. Out-of-range indices are ignored and return `false`.
    #[inline]
    pub fn set(&mut self, channel: usize, value: i16) -> bool {
        match self.0.get_mut(channel) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The six channels driving gamepad `index` (0 or 1).
    ///
    /// Returns `None` for any other index.
    #[must_use]
    pub fn gamepad(&self, index: usize) -> Option<&[i16; AXES_PER_GAMEPAD]> {
        let (first, second) = self.0.split_at(AXES_PER_GAMEPAD);
        let group = match index {
            0 => first,
            1 => second,
            _ => return None,
        };
        group.try_into().ok()
    }

    #[inline]
    #[must_use]
    pub const fn as_array(&self) -> &[i16; CHANNEL_COUNT] {
        &self.0
    }
}

impl From<[i16; CHANNEL_COUNT]> for ChannelVector {
    #[inline]
    fn from(channels: [i16; CHANNEL_COUNT]) -> Self {
        Self(channels)
    }
}

impl TryFrom<&[i16]> for ChannelVector {
    type Error = ChannelError;

    fn try_from(channels: &[i16]) -> Result<Self, Self::Error> {
        channels
            .try_into()
            .map(Self)
            .map_err(|_| ChannelError::Length {
                expected: CHANNEL_COUNT,
                actual: channels.len(),
            })
    }
}
