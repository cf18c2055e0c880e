//! Device configuration resolved once before the first update.
//!
//! Besides the mode, this carries the values the BLE HID transport publishes
//! alongside the report descriptor: device name, manufacturer, battery level,
//! the Device Information PnP ID, the HID Information characteristic and the
//! GAP appearance.

use crate::mode::{GamepadMode, ModeError};

/// Manufacturer string used when none is configured.
pub const DEFAULT_MANUFACTURER: &str = "Rust Gamepad";

/// Battery level reported when none is configured.
pub const DEFAULT_BATTERY_LEVEL: u8 = 100;

/// GAP appearance value for a HID gamepad.
pub const APPEARANCE_GAMEPAD: u16 = 0x03C4;

/// Error type for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Raw mode number outside the mode table.
    Mode(ModeError),
    /// Battery level above 100 percent.
    BatteryLevel(u8),
}

impl From<ModeError> for ConfigError {
    fn from(err: ModeError) -> Self {
        ConfigError::Mode(err)
    }
}

/// Device Information Service PnP ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PnpId {
    /// 0x01 = Bluetooth SIG assigned, 0x02 = USB-IF assigned.
    pub vendor_id_source: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub product_version: u16,
}

impl PnpId {
    /// Characteristic value: source, then the three fields little-endian.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 7] {
        let [v0, v1] = self.vendor_id.to_le_bytes();
        let [p0, p1] = self.product_id.to_le_bytes();
        let [r0, r1] = self.product_version.to_le_bytes();
        [self.vendor_id_source, v0, v1, p0, p1, r0, r1]
    }
}

pub const DEFAULT_PNP_ID: PnpId = PnpId {
    vendor_id_source: 0x01,
    vendor_id: 0x02E5,
    product_id: 0xABCD,
    product_version: 0x0110,
};

/// HID Information characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidInfo {
    /// HID class specification release (BCD).
    pub bcd_hid: u16,
    pub country_code: u8,
    /// Bit 0: remote wake, bit 1: normally connectable.
    pub flags: u8,
}

impl HidInfo {
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 4] {
        let [b0, b1] = self.bcd_hid.to_le_bytes();
        [b0, b1, self.country_code, self.flags]
    }
}

pub const DEFAULT_HID_INFO: HidInfo = HidInfo {
    bcd_hid: 0x0111,
    country_code: 0x00,
    flags: 0x01,
};

/// Configuration of one gamepad device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub mode: GamepadMode,
    /// Advertised name; display only, no effect on encoding.
    pub name: &'static str,
    pub manufacturer: &'static str,
    battery_level: u8,
    pub pnp_id: PnpId,
    pub hid_info: HidInfo,
}

impl DeviceConfig {
    /// Configuration for `mode` with its default name and the default metadata.
    #[must_use]
    pub const fn new(mode: GamepadMode) -> Self {
        Self {
            mode,
            name: mode.default_device_name(),
            manufacturer: DEFAULT_MANUFACTURER,
            battery_level: DEFAULT_BATTERY_LEVEL,
            pnp_id: DEFAULT_PNP_ID,
            hid_info: DEFAULT_HID_INFO,
        }
    }

    /// Configuration from a raw mode number, rejecting undefined modes.
    pub fn from_raw_mode(raw: u8) -> Result<Self, ConfigError> {
        let mode = GamepadMode::try_from(raw)?;
        Ok(Self::new(mode))
    }

    /// Configuration chosen from the number of receiver channels in use.
    #[must_use]
    pub const fn from_channel_count(channels: usize) -> Self {
        Self::new(GamepadMode::for_channel_count(channels))
    }

    #[must_use]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub const fn with_manufacturer(mut self, manufacturer: &'static str) -> Self {
        self.manufacturer = manufacturer;
        self
    }

    pub fn with_battery_level(mut self, percent: u8) -> Result<Self, ConfigError> {
        if percent > 100 {
            return Err(ConfigError::BatteryLevel(percent));
        }
        self.battery_level = percent;
        Ok(self)
    }

    #[must_use]
    pub const fn with_pnp_id(mut self, pnp_id: PnpId) -> Self {
        self.pnp_id = pnp_id;
        self
    }

    #[inline]
    #[must_use]
    pub const fn battery_level(&self) -> u8 {
        self.battery_level
    }

    /// Report descriptor to publish for the configured mode.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &'static [u8] {
        self.mode.descriptor()
    }

    /// Report IDs the transport must create input characteristics for.
    pub fn report_ids(&self) -> impl Iterator<Item = u8> {
        1..=self.mode.params().report_count as u8
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(GamepadMode::Single16Bit)
    }
}
