//! PPM pulse-train decoder.
//!
//! A PPM frame is a run of channel pulses (700..=2300 us, nominally
//! 1000..2000 us) terminated by a sync gap of at least 3 ms. The decoder is
//! fed one measured width at a time, typically from a timer capture ISR or
//! a PIO program, and hands out a frame on every sync gap.

use gamepad_core::CHANNEL_COUNT;
use heapless::Vec;

/// Shortest gap treated as the end of a frame.
pub const SYNC_MIN_US: u16 = 3000;

/// Shortest width accepted as a channel pulse.
pub const PULSE_MIN_US: u16 = 700;

/// Longest width accepted as a channel pulse.
pub const PULSE_MAX_US: u16 = 2300;

/// Pulse widths of one frame, in microseconds, in receiver channel order.
pub type PpmFrame = Vec<u16, CHANNEL_COUNT>;

/// Error type for PPM decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PpmError {
    /// Width is neither a channel pulse nor a sync gap.
    InvalidPulse(u16),
    /// More pulses between two sync gaps than a frame can hold.
    TooManyChannels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    /// Waiting for a sync gap; pulses are discarded.
    Searching,
    /// Collecting the pulses of the current frame.
    Synced,
}

/// Incremental PPM decoder.
///
/// # Example
///
/// ```
/// use ppm_proto::PpmDecoder;
///
/// let mut decoder = PpmDecoder::new();
/// decoder.push_pulse(5000).unwrap(); // first sync
/// decoder.push_pulse(1500).unwrap();
/// decoder.push_pulse(1200).unwrap();
///
/// let frame = decoder.push_pulse(5000).unwrap().unwrap();
/// assert_eq!(frame.as_slice(), &[1500, 1200]);
/// ```
#[derive(Debug, Clone)]
pub struct PpmDecoder {
    state: State,
    pulses: PpmFrame,
    frames: u32,
    errors: u32,
}

impl PpmDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Searching,
            pulses: Vec::new(),
            frames: 0,
            errors: 0,
        }
    }

    /// Feed one measured width.
    ///
    /// Returns the completed frame when `width_us` is a sync gap that ends a
    /// non-empty frame. On error the partial frame is dropped and pulses are
    /// ignored until the next sync gap.
    pub fn push_pulse(&mut self, width_us: u16) -> Result<Option<PpmFrame>, PpmError> {
        if width_us >= SYNC_MIN_US {
            return Ok(self.sync());
        }

        if self.state == State::Searching {
            return Ok(None);
        }

        if !(PULSE_MIN_US..=PULSE_MAX_US).contains(&width_us) {
            warn!("ppm: invalid pulse {} us", width_us);
            self.resync();
            return Err(PpmError::InvalidPulse(width_us));
        }

        if self.pulses.push(width_us).is_err() {
            warn!("ppm: more than {} channels", CHANNEL_COUNT);
            self.resync();
            return Err(PpmError::TooManyChannels);
        }

        Ok(None)
    }

    fn sync(&mut self) -> Option<PpmFrame> {
        if self.state == State::Searching {
            debug!("ppm: sync acquired");
            self.state = State::Synced;
            self.pulses.clear();
            return None;
        }

        if self.pulses.is_empty() {
            return None;
        }

        self.frames = self.frames.wrapping_add(1);
        let frame = core::mem::take(&mut self.pulses);
        trace!("ppm: frame of {} channels", frame.len());
        Some(frame)
    }

    fn resync(&mut self) {
        self.errors = self.errors.wrapping_add(1);
        self.state = State::Searching;
        self.pulses.clear();
    }

    /// Drop any partial frame and wait for the next sync gap.
    pub fn reset(&mut self) {
        self.state = State::Searching;
        self.pulses.clear();
    }

    /// Whether a sync gap has been seen since the last error or reset.
    #[inline]
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.state == State::Synced
    }

    /// Frames decoded so far (wraps).
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Decoding errors so far (wraps).
    #[inline]
    #[must_use]
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl Default for PpmDecoder {
    fn default() -> Self {
        Self::new()
    }
}
