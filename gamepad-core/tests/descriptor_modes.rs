//! Every mode's descriptor declares exactly the layout its params describe.

use gamepad_core::descriptor::{summarize, DescriptorError};
use gamepad_core::{AxisRange, AxisWidth, GamepadMode, ModeError};
use proptest::prelude::*;

#[test]
fn descriptor_matches_own_params() {
    for mode in GamepadMode::ALL {
        let summary = summarize(mode.descriptor()).expect("descriptor must parse");
        assert!(
            summary.matches(&mode.params()),
            "{mode:?}: {summary:?} does not match {:?}",
            mode.params()
        );
    }
}

#[test]
fn descriptor_matches_no_other_params() {
    for mode in GamepadMode::ALL {
        let summary = summarize(mode.descriptor()).expect("descriptor must parse");
        for other in GamepadMode::ALL.into_iter().filter(|&m| m != mode) {
            assert!(
                !summary.matches(&other.params()),
                "{mode:?} descriptor also matches {other:?}"
            );
        }
    }
}

#[test]
fn descriptor_report_ids_are_sequential() {
    for mode in GamepadMode::ALL {
        let summary = summarize(mode.descriptor()).expect("descriptor must parse");
        let expected: &[u8] = if mode.params().is_dual() { &[1, 2] } else { &[1] };
        assert_eq!(summary.report_ids.as_slice(), expected, "{mode:?}");
    }
}

#[test]
fn mode_table_covers_every_combination() {
    let mut seen = Vec::new();
    for mode in GamepadMode::ALL {
        let p = mode.params();
        let key = (p.axis_width, p.axis_range, p.report_count);
        assert!(!seen.contains(&key), "{mode:?} duplicates {key:?}");
        seen.push(key);
    }
    assert_eq!(seen.len(), 8);
    for width in [AxisWidth::Bits8, AxisWidth::Bits16] {
        for range in [AxisRange::Signed, AxisRange::Unsigned] {
            for count in [1, 2] {
                assert!(seen.contains(&(width, range, count)));
            }
        }
    }
}

#[test]
fn truncated_descriptor_is_rejected() {
    for mode in GamepadMode::ALL {
        let bytes = mode.descriptor();
        // Cut inside the last Input item.
        let cut = &bytes[..bytes.len() - 2];
        assert!(summarize(cut).is_err(), "{mode:?}");
    }
    assert_eq!(summarize(&[]), Err(DescriptorError::NoGamepad));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Raw values round-trip through the mode table; the rest are rejected.
    #[test]
    fn prop_raw_mode_conversion(raw in any::<u8>()) {
        match GamepadMode::try_from(raw) {
            Ok(mode) => {
                prop_assert!(raw < 8);
                prop_assert_eq!(mode.raw(), raw);
            }
            Err(err) => {
                prop_assert!(raw >= 8);
                prop_assert_eq!(err, ModeError::Unknown(raw));
            }
        }
    }

    /// Arbitrary bytes never make the descriptor walker panic.
    #[test]
    fn prop_summarize_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = summarize(&bytes);
    }
}
