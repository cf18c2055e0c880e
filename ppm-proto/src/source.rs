//! Channel source backed by a PPM pulse stream.

use core::future::Future;

use gamepad_core::{AxisRange, ChannelSource, ChannelVector, GamepadMode, InputError};

use crate::decoder::{PpmDecoder, PpmError};
use crate::mapping::{frame_to_channels, ChannelMapping};

/// Async trait for pulse-width capture hardware.
///
/// Implementations wrap a timer input capture or PIO program and yield the
/// width between consecutive edges, in microseconds.
pub trait PulseInput {
    /// Wait for the next measured width.
    fn next_pulse(&mut self) -> impl Future<Output = Result<u16, InputError>>;
}

impl From<PpmError> for InputError {
    fn from(err: PpmError) -> Self {
        match err {
            PpmError::InvalidPulse(_) => InputError::Framing,
            PpmError::TooManyChannels => InputError::BufferOverflow,
        }
    }
}

/// Decodes pulses into frames and maps each frame to a [`ChannelVector`].
pub struct PpmSource<P> {
    input: P,
    decoder: PpmDecoder,
    mapping: ChannelMapping,
    range: AxisRange,
}

impl<P: PulseInput> PpmSource<P> {
    #[must_use]
    pub fn new(input: P, mapping: ChannelMapping, range: AxisRange) -> Self {
        Self {
            input,
            decoder: PpmDecoder::new(),
            mapping,
            range,
        }
    }

    /// Source whose value range follows `mode`.
    #[must_use]
    pub fn for_mode(input: P, mapping: ChannelMapping, mode: GamepadMode) -> Self {
        Self::new(input, mapping, mode.params().axis_range)
    }

    /// Get the decoder, e.g. for frame and error counters.
    pub fn decoder(&self) -> &PpmDecoder {
        &self.decoder
    }

    /// Decompose the source into its pulse input.
    pub fn into_inner(self) -> P {
        self.input
    }
}

impl<P: PulseInput> ChannelSource for PpmSource<P> {
    async fn receive(&mut self) -> Result<ChannelVector, InputError> {
        loop {
            let width = match self.input.next_pulse().await {
                Ok(width) => width,
                Err(e) => {
                    // A frame interrupted by a capture error must not carry over.
                    self.decoder.reset();
                    return Err(e);
                }
            };
            if let Some(frame) = self.decoder.push_pulse(width)? {
                return Ok(frame_to_channels(&frame, &self.mapping, self.range));
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.decoder.is_synced()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mapping::DEFAULT_MAPPING;
    use embassy_futures::block_on;
    use std::collections::VecDeque;

    struct MockPulses(VecDeque<Result<u16, InputError>>);

    impl PulseInput for MockPulses {
        fn next_pulse(&mut self) -> impl Future<Output = Result<u16, InputError>> {
            let pulse = self.0.pop_front().unwrap_or(Err(InputError::Disconnected));
            core::future::ready(pulse)
        }
    }

    fn source_with(
        pulses: &[Result<u16, InputError>],
        mode: GamepadMode,
    ) -> PpmSource<MockPulses> {
        PpmSource::for_mode(
            MockPulses(pulses.iter().copied().collect()),
            DEFAULT_MAPPING,
            mode,
        )
    }

    fn source(widths: &[u16], mode: GamepadMode) -> PpmSource<MockPulses> {
        let pulses: std::vec::Vec<_> = widths.iter().copied().map(Ok).collect();
        source_with(&pulses, mode)
    }

    #[test]
    fn test_receive_maps_frame() {
        let mut source = source(
            &[9000, 2000, 1000, 1500, 1500, 1500, 1500, 9000],
            GamepadMode::Single16Bit,
        );
        let channels = block_on(source.receive()).unwrap();
        assert_eq!(channels.get(0), Some(32767));
        assert_eq!(channels.get(1), Some(-32767));
        assert_eq!(channels.get(5), Some(0));
        assert!(source.is_connected());
        assert_eq!(source.decoder().frames(), 1);
    }

    #[test]
    fn test_unsigned_mode_uses_unsigned_range() {
        let mut source = source(&[9000, 1000, 2000, 9000], GamepadMode::Single15Bit);
        let channels = block_on(source.receive()).unwrap();
        assert_eq!(channels.get(0), Some(0));
        assert_eq!(channels.get(1), Some(32767));
    }

    #[test]
    fn test_decode_error_becomes_framing() {
        let mut source = source(&[9000, 1500, 100], GamepadMode::Single8Bit);
        assert_eq!(block_on(source.receive()), Err(InputError::Framing));
        assert!(!source.is_connected());
    }

    #[test]
    fn test_input_exhausted() {
        let mut source = source(&[9000, 1500], GamepadMode::Single8Bit);
        assert_eq!(block_on(source.receive()), Err(InputError::Disconnected));
    }

    #[test]
    fn test_capture_error_drops_partial_frame() {
        let mut pulses = std::vec![Ok(9000), Ok(1000), Ok(1000), Ok(1000)];
        pulses.push(Err(InputError::Io));
        pulses.push(Ok(9000));
        pulses.extend([Ok(2000); 6]);
        pulses.push(Ok(9000));
        let mut source = source_with(&pulses, GamepadMode::Dual16Bit);

        assert_eq!(block_on(source.receive()), Err(InputError::Io));
        assert!(!source.is_connected());

        let channels = block_on(source.receive()).unwrap();
        assert_eq!(
            channels.as_array(),
            &[32767, 32767, 32767, 32767, 32767, 32767, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_capture_error_waits_for_next_sync() {
        // Pulses arriving right after the error belong to a frame whose start was lost.
        let mut source = source_with(
            &[
                Ok(9000),
                Ok(1000),
                Err(InputError::Io),
                Ok(1000),
                Ok(9000),
                Ok(2000),
                Ok(9000),
            ],
            GamepadMode::Single16Bit,
        );
        assert_eq!(block_on(source.receive()), Err(InputError::Io));
        let channels = block_on(source.receive()).unwrap();
        assert_eq!(channels.get(0), Some(32767));
        assert_eq!(channels.get(1), Some(0));
    }
}
