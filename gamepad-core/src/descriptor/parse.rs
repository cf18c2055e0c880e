//! Minimal HID report descriptor walker.
//!
//! Understands just enough of the short-item grammar to recover the layout
//! a gamepad descriptor declares: how many top-level Gamepad collections it
//! has, their report IDs, and the size, count and logical range of the axis
//! fields. Long items are rejected.

use heapless::Vec;

use crate::channels::MAX_GAMEPADS;
use crate::mode::ModeParams;

const LONG_ITEM_PREFIX: u8 = 0xFE;

// Main item tags
const TAG_INPUT: u8 = 0x8;
const TAG_COLLECTION: u8 = 0xA;
const TAG_END_COLLECTION: u8 = 0xC;

// Global item tags
const TAG_USAGE_PAGE: u8 = 0x0;
const TAG_LOGICAL_MINIMUM: u8 = 0x1;
const TAG_LOGICAL_MAXIMUM: u8 = 0x2;
const TAG_REPORT_SIZE: u8 = 0x7;
const TAG_REPORT_ID: u8 = 0x8;
const TAG_REPORT_COUNT: u8 = 0x9;

// Local item tags
const TAG_USAGE: u8 = 0x0;

const PAGE_GENERIC_DESKTOP: u32 = 0x01;
const PAGE_BUTTON: u32 = 0x09;
const USAGE_GAMEPAD: u32 = 0x05;
const COLLECTION_APPLICATION: u32 = 0x01;

/// Errors found while walking a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// An item's data runs past the end of the descriptor.
    Truncated { offset: usize },
    /// Long items are not used by gamepad descriptors.
    LongItem { offset: usize },
    /// End Collection without a matching Collection, or a collection left open.
    UnbalancedCollection,
    /// A top-level collection that is not a Generic Desktop Gamepad application.
    NotGamepad,
    /// No gamepad collection at all.
    NoGamepad,
    /// More gamepad collections than the encoder can drive.
    TooManyReports,
    /// Axis fields disagree on size or logical range.
    MixedAxisLayout,
}

/// HID item type, from bits 2..3 of the prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemType {
    Main,
    Global,
    Local,
    Reserved,
}

/// One short item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub item_type: ItemType,
    pub tag: u8,
    pub data: &'a [u8],
}

impl Item<'_> {
    /// Item data as an unsigned little-endian value.
    #[must_use]
    pub fn unsigned(&self) -> u32 {
        match self.data {
            &[b0] => u32::from(b0),
            &[b0, b1] => u32::from(u16::from_le_bytes([b0, b1])),
            &[b0, b1, b2, b3] => u32::from_le_bytes([b0, b1, b2, b3]),
            _ => 0,
        }
    }

    /// Item data as a sign-extended little-endian value.
    #[must_use]
    pub fn signed(&self) -> i32 {
        match self.data {
            &[b0] => i32::from(b0 as i8),
            &[b0, b1] => i32::from(i16::from_le_bytes([b0, b1])),
            &[b0, b1, b2, b3] => i32::from_le_bytes([b0, b1, b2, b3]),
            _ => 0,
        }
    }
}

/// Iterator over the short items of a descriptor.
///
/// Yields one error and then stops if the descriptor is malformed.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Items<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Result<Item<'a>, DescriptorError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.pos;
        let prefix = *self.bytes.get(offset)?;

        if prefix == LONG_ITEM_PREFIX {
            self.pos = self.bytes.len();
            return Some(Err(DescriptorError::LongItem { offset }));
        }

        let size = match prefix & 0x03 {
            3 => 4,
            n => usize::from(n),
        };
        let start = offset + 1;
        let Some(data) = self.bytes.get(start..start + size) else {
            self.pos = self.bytes.len();
            return Some(Err(DescriptorError::Truncated { offset }));
        };
        self.pos = start + size;

        let item_type = match (prefix >> 2) & 0x03 {
            0 => ItemType::Main,
            1 => ItemType::Global,
            2 => ItemType::Local,
            _ => ItemType::Reserved,
        };

        Some(Ok(Item {
            item_type,
            tag: prefix >> 4,
            data,
        }))
    }
}

/// Layout recovered from a gamepad descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSummary {
    /// Number of top-level Gamepad application collections.
    pub gamepads: usize,
    /// Report ID of each gamepad, in declaration order.
    pub report_ids: Vec<u8, MAX_GAMEPADS>,
    /// Button bits per report.
    pub button_bits: u32,
    /// Report Size of each axis field, in bits.
    pub axis_size: u32,
    /// Number of axis fields per report.
    pub axis_count: u32,
    pub logical_min: i32,
    pub logical_max: i32,
}

impl DescriptorSummary {
    /// Whether this layout is the one `params` describes.
    #[must_use]
    pub fn matches(&self, params: &ModeParams) -> bool {
        self.gamepads == params.report_count
            && self.button_bits == 8
            && self.axis_size == u32::from(params.axis_width.bits())
            && self.axis_count == crate::channels::AXES_PER_GAMEPAD as u32
            && self.logical_min == params.logical_min
            && self.logical_max == params.logical_max
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Globals {
    usage_page: u32,
    logical_min: i32,
    logical_max: i32,
    report_size: u32,
    report_count: u32,
    report_id: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Layout {
    report_id: u8,
    button_bits: u32,
    axis_size: u32,
    axis_count: u32,
    logical_min: i32,
    logical_max: i32,
}

impl Layout {
    fn same_shape(&self, other: &Layout) -> bool {
        Layout {
            report_id: other.report_id,
            ..*self
        } == *other
    }
}

/// Walk `bytes` and summarize the gamepad layout it declares.
pub fn summarize(bytes: &[u8]) -> Result<DescriptorSummary, DescriptorError> {
    let mut globals = Globals::default();
    let mut last_usage: Option<u32> = None;
    let mut depth = 0usize;
    let mut current: Option<Layout> = None;
    let mut layouts: Vec<Layout, MAX_GAMEPADS> = Vec::new();

    for item in Items::new(bytes) {
        let item = item?;
        match (item.item_type, item.tag) {
            (ItemType::Global, TAG_USAGE_PAGE) => globals.usage_page = item.unsigned(),
            (ItemType::Global, TAG_LOGICAL_MINIMUM) => globals.logical_min = item.signed(),
            (ItemType::Global, TAG_LOGICAL_MAXIMUM) => globals.logical_max = item.signed(),
            (ItemType::Global, TAG_REPORT_SIZE) => globals.report_size = item.unsigned(),
            (ItemType::Global, TAG_REPORT_COUNT) => globals.report_count = item.unsigned(),
            (ItemType::Global, TAG_REPORT_ID) => {
                globals.report_id = item.unsigned() as u8;
                if let Some(layout) = current.as_mut() {
                    layout.report_id = globals.report_id;
                }
            }
            (ItemType::Local, TAG_USAGE) => last_usage = Some(item.unsigned()),
            (ItemType::Main, TAG_COLLECTION) => {
                if depth == 0 {
                    let is_gamepad = item.unsigned() == COLLECTION_APPLICATION
                        && globals.usage_page == PAGE_GENERIC_DESKTOP
                        && last_usage == Some(USAGE_GAMEPAD);
                    if !is_gamepad {
                        return Err(DescriptorError::NotGamepad);
                    }
                    current = Some(Layout {
                        report_id: globals.report_id,
                        ..Layout::default()
                    });
                }
                depth += 1;
                last_usage = None;
            }
            (ItemType::Main, TAG_END_COLLECTION) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(DescriptorError::UnbalancedCollection)?;
                if depth == 0 {
                    if let Some(layout) = current.take() {
                        layouts
                            .push(layout)
                            .map_err(|_| DescriptorError::TooManyReports)?;
                    }
                }
                last_usage = None;
            }
            (ItemType::Main, TAG_INPUT) => {
                let layout = current
                    .as_mut()
                    .ok_or(DescriptorError::UnbalancedCollection)?;
                match globals.usage_page {
                    PAGE_BUTTON => {
                        let bits = globals.report_size.saturating_mul(globals.report_count);
                        layout.button_bits = layout.button_bits.saturating_add(bits);
                    }
                    PAGE_GENERIC_DESKTOP => {
                        if layout.axis_count == 0 {
                            layout.axis_size = globals.report_size;
                            layout.logical_min = globals.logical_min;
                            layout.logical_max = globals.logical_max;
                        } else if layout.axis_size != globals.report_size
                            || layout.logical_min != globals.logical_min
                            || layout.logical_max != globals.logical_max
                        {
                            return Err(DescriptorError::MixedAxisLayout);
                        }
                        layout.axis_count = layout.axis_count.saturating_add(globals.report_count);
                    }
                    _ => {}
                }
                last_usage = None;
            }
            (ItemType::Main, _) => last_usage = None,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(DescriptorError::UnbalancedCollection);
    }

    let first = *layouts.first().ok_or(DescriptorError::NoGamepad)?;
    let mut report_ids = Vec::new();
    for layout in &layouts {
        if !first.same_shape(layout) {
            return Err(DescriptorError::MixedAxisLayout);
        }
        report_ids
            .push(layout.report_id)
            .map_err(|_| DescriptorError::TooManyReports)?;
    }

    Ok(DescriptorSummary {
        gamepads: layouts.len(),
        report_ids,
        button_bits: first.button_bits,
        axis_size: first.axis_size,
        axis_count: first.axis_count,
        logical_min: first.logical_min,
        logical_max: first.logical_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DUAL_15BIT, SINGLE_16BIT, SINGLE_8BIT};

    #[test]
    fn test_item_sign_extension() {
        let items: [Item<'_>; 2] = [
            Item {
                item_type: ItemType::Global,
                tag: TAG_LOGICAL_MINIMUM,
                data: &[0x81],
            },
            Item {
                item_type: ItemType::Global,
                tag: TAG_LOGICAL_MINIMUM,
                data: &[0x01, 0x80],
            },
        ];
        assert_eq!(items[0].signed(), -127);
        assert_eq!(items[1].signed(), -32767);
        assert_eq!(items[1].unsigned(), 0x8001);
    }

    #[test]
    fn test_summarize_single_8bit() {
        let s = summarize(SINGLE_8BIT).unwrap();
        assert_eq!(s.gamepads, 1);
        assert_eq!(s.report_ids.as_slice(), &[1]);
        assert_eq!(s.button_bits, 8);
        assert_eq!((s.axis_size, s.axis_count), (8, 6));
        assert_eq!((s.logical_min, s.logical_max), (-127, 127));
    }

    #[test]
    fn test_summarize_dual_15bit() {
        let s = summarize(DUAL_15BIT).unwrap();
        assert_eq!(s.gamepads, 2);
        assert_eq!(s.report_ids.as_slice(), &[1, 2]);
        assert_eq!((s.axis_size, s.axis_count), (16, 6));
        assert_eq!((s.logical_min, s.logical_max), (0, 32767));
    }

    #[test]
    fn test_split_axis_inputs_are_summed() {
        // X/Y/Z/Rz then Rx/Ry as two Input items with the same range.
        let desc = [
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, 0x85, 0x01, //
            0x15, 0x81, 0x25, 0x7F, 0x75, 0x08, //
            0x95, 0x04, 0x81, 0x02, //
            0x95, 0x02, 0x81, 0x02, //
            0xC0,
        ];
        let s = summarize(&desc).unwrap();
        assert_eq!(s.axis_count, 6);
        assert_eq!(s.button_bits, 0);
    }

    #[test]
    fn test_truncated_item() {
        let desc = &SINGLE_16BIT[..SINGLE_16BIT.len() - 5];
        assert!(matches!(
            summarize(desc),
            Err(DescriptorError::Truncated { .. }) | Err(DescriptorError::UnbalancedCollection)
        ));
        assert_eq!(
            summarize(&[0x16, 0x01]),
            Err(DescriptorError::Truncated { offset: 0 })
        );
    }

    #[test]
    fn test_long_item_rejected() {
        assert_eq!(
            summarize(&[0xFE, 0x00, 0x00]),
            Err(DescriptorError::LongItem { offset: 0 })
        );
    }

    #[test]
    fn test_unbalanced_collections() {
        assert_eq!(
            summarize(&[0xC0]),
            Err(DescriptorError::UnbalancedCollection)
        );
        assert_eq!(
            summarize(&[0x05, 0x01, 0x09, 0x05, 0xA1, 0x01]),
            Err(DescriptorError::UnbalancedCollection)
        );
    }

    #[test]
    fn test_non_gamepad_collection_rejected() {
        // Usage (Mouse)
        let desc = [0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0xC0];
        assert_eq!(summarize(&desc), Err(DescriptorError::NotGamepad));
    }

    #[test]
    fn test_empty_descriptor() {
        assert_eq!(summarize(&[]), Err(DescriptorError::NoGamepad));
    }

    #[test]
    fn test_mixed_axis_sizes_rejected() {
        let desc = [
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x75, 0x08, 0x95, 0x02, 0x81, 0x02, //
            0x75, 0x10, 0x95, 0x02, 0x81, 0x02, //
            0xC0,
        ];
        assert_eq!(summarize(&desc), Err(DescriptorError::MixedAxisLayout));
    }

    #[test]
    fn test_too_many_gamepads() {
        let block = [0x09, 0x05, 0xA1, 0x01, 0xC0];
        let mut desc = [0u8; 17];
        desc[..2].copy_from_slice(&[0x05, 0x01]);
        for i in 0..3 {
            desc[2 + i * 5..7 + i * 5].copy_from_slice(&block);
        }
        assert_eq!(summarize(&desc), Err(DescriptorError::TooManyReports));
    }
}
