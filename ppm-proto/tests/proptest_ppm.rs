//! Property-based tests for PPM decoding and pulse mapping.

use gamepad_core::{AxisRange, CHANNEL_COUNT};
use ppm_proto::{
    frame_to_channels, pulse_to_axis, PpmDecoder, DEFAULT_MAPPING, PULSE_MAX_US, PULSE_MIN_US,
    SYNC_MIN_US,
};
use proptest::prelude::*;

fn any_range() -> impl Strategy<Value = AxisRange> {
    prop_oneof![Just(AxisRange::Signed), Just(AxisRange::Unsigned)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Output stays inside the logical range of the mode.
    #[test]
    fn prop_axis_within_range(width in any::<u16>(), invert in any::<bool>()) {
        let signed = pulse_to_axis(width, AxisRange::Signed, invert);
        prop_assert!(signed >= -32767);
        let unsigned = pulse_to_axis(width, AxisRange::Unsigned, invert);
        prop_assert!(unsigned >= 0);
    }

    /// Wider pulses never map to smaller values (or larger, when inverted).
    #[test]
    fn prop_axis_monotonic(a in any::<u16>(), b in any::<u16>(), range in any_range()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(pulse_to_axis(lo, range, false) <= pulse_to_axis(hi, range, false));
        prop_assert!(pulse_to_axis(lo, range, true) >= pulse_to_axis(hi, range, true));
    }

    /// A well-formed pulse train decodes back to the same widths.
    #[test]
    fn prop_decoder_recovers_frame(
        widths in prop::collection::vec(PULSE_MIN_US..=PULSE_MAX_US, 1..=CHANNEL_COUNT),
        sync in SYNC_MIN_US..=u16::MAX,
    ) {
        let mut decoder = PpmDecoder::new();
        prop_assert_eq!(decoder.push_pulse(sync), Ok(None));
        for &width in &widths {
            prop_assert_eq!(decoder.push_pulse(width), Ok(None));
        }
        let frame = decoder.push_pulse(sync).unwrap();
        prop_assert_eq!(frame.as_deref(), Some(widths.as_slice()));
    }

    /// Arbitrary input never yields an empty or oversized frame.
    #[test]
    fn prop_decoder_frames_bounded(widths in prop::collection::vec(any::<u16>(), 0..256)) {
        let mut decoder = PpmDecoder::new();
        for width in widths {
            if let Ok(Some(frame)) = decoder.push_pulse(width) {
                prop_assert!(!frame.is_empty());
                prop_assert!(frame.len() <= CHANNEL_COUNT);
                prop_assert!(frame.iter().all(|w| (PULSE_MIN_US..=PULSE_MAX_US).contains(w)));
            }
        }
    }

    /// Channels past the end of a short frame stay zero.
    #[test]
    fn prop_missing_channels_are_zero(
        widths in prop::collection::vec(PULSE_MIN_US..=PULSE_MAX_US, 0..=CHANNEL_COUNT),
        range in any_range(),
    ) {
        let channels = frame_to_channels(&widths, &DEFAULT_MAPPING, range);
        for channel in widths.len()..CHANNEL_COUNT {
            prop_assert_eq!(channels.get(channel), Some(0));
        }
    }
}
