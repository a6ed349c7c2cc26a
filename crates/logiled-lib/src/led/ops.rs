//! One-shot lighting operations — convert and forward to the device.
//!
//! Every function here converts colors, durations and keys into SDK terms
//! and makes exactly one device call. A failed call is logged at debug level
//! and otherwise ignored; none of these return an error.

use std::time::Duration;

use crate::device::LightingDevice;
use crate::keys::{DeviceType, KeyName, LogiLedKey};

use super::bitmap::{BITMAP_HEIGHT, BITMAP_WIDTH, LightingBitmap};
use super::color::LinearColor;

/// Whole milliseconds, saturating at `u32::MAX`.
fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

// ── Generic ──

/// Select which device classes later calls affect. Returns `false` on failure.
pub fn set_target_device(device: &impl LightingDevice, device_type: DeviceType) -> bool {
    match device.set_target_device(device_type) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("failed to set target device to {device_type}: {e}");
            false
        }
    }
}

// ── Config options ──

/// Read a boolean option, falling back to `default` if the SDK has none.
pub fn get_config_option_bool(device: &impl LightingDevice, path: &str, default: bool) -> bool {
    device.get_config_option_bool(path).unwrap_or_else(|e| {
        log::debug!("failed to get boolean config option for {path}: {e}");
        default
    })
}

/// Read a numeric option, falling back to `default` if the SDK has none.
pub fn get_config_option_number(device: &impl LightingDevice, path: &str, default: f32) -> f32 {
    match device.get_config_option_number(path) {
        Ok(v) => v as f32,
        Err(e) => {
            log::debug!("failed to get numeric config option for {path}: {e}");
            default
        }
    }
}

/// Read a color option, falling back to `default` if the SDK has none.
pub fn get_config_option_color(
    device: &impl LightingDevice,
    path: &str,
    default: LinearColor,
) -> LinearColor {
    match device.get_config_option_color(path) {
        Ok([r, g, b]) => LinearColor::from_rgb8(r, g, b),
        Err(e) => {
            log::debug!("failed to get color config option for {path}: {e}");
            default
        }
    }
}

/// Set the label shown for an option. Returns `false` on failure.
pub fn set_config_option_label(device: &impl LightingDevice, path: &str, label: &str) -> bool {
    match device.set_config_option_label(path, label) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("failed to set label for config option {path}: {e}");
            false
        }
    }
}

// ── Whole-device lighting ──

pub fn set_lighting(device: &impl LightingDevice, color: LinearColor) {
    if let Err(e) = device.set_lighting(color.to_percent()) {
        log::debug!("failed to set lighting to {color}: {e}");
    }
}

/// Flash `color` on and off every `interval` for `duration`, then restore.
pub fn flash_lighting(
    device: &impl LightingDevice,
    color: LinearColor,
    duration: Duration,
    interval: Duration,
) {
    if let Err(e) = device.flash_lighting(color.to_percent(), millis(duration), millis(interval)) {
        log::debug!(
            "failed to flash lighting with color {color} for duration {duration:?} with interval {interval:?}: {e}"
        );
    }
}

/// Pulse `color` every `interval` for `duration`, then restore.
pub fn pulse_lighting(
    device: &impl LightingDevice,
    color: LinearColor,
    duration: Duration,
    interval: Duration,
) {
    if let Err(e) = device.pulse_lighting(color.to_percent(), millis(duration), millis(interval)) {
        log::debug!(
            "failed to pulse lighting with color {color} for duration {duration:?} with interval {interval:?}: {e}"
        );
    }
}

pub fn save_lighting(device: &impl LightingDevice) {
    if let Err(e) = device.save_current_lighting() {
        log::debug!("failed to save current lighting: {e}");
    }
}

pub fn restore_lighting(device: &impl LightingDevice) {
    if let Err(e) = device.restore_lighting() {
        log::debug!("failed to restore saved lighting: {e}");
    }
}

/// Stop any running flash or pulse effect on the device.
pub fn stop_effects(device: &impl LightingDevice) {
    if let Err(e) = device.stop_effects() {
        log::debug!("failed to stop effects: {e}");
    }
}

// ── Per-key lighting ──

pub fn set_lighting_for_key(device: &impl LightingDevice, key: LogiLedKey, color: LinearColor) {
    if let Err(e) = device.set_lighting_for_key(key.key_name(), color.to_percent()) {
        log::debug!("failed to set lighting to {color} for key {key}: {e}");
    }
}

pub fn flash_lighting_for_key(
    device: &impl LightingDevice,
    key: LogiLedKey,
    color: LinearColor,
    duration: Duration,
    interval: Duration,
) {
    if let Err(e) = device.flash_single_key(
        key.key_name(),
        color.to_percent(),
        millis(duration),
        millis(interval),
    ) {
        log::debug!("failed to flash lighting for key {key}: {e}");
    }
}

/// Fade `key` from `start` to `end` over `duration`, looping if `infinite`.
pub fn pulse_lighting_for_key(
    device: &impl LightingDevice,
    key: LogiLedKey,
    start: LinearColor,
    end: LinearColor,
    duration: Duration,
    infinite: bool,
) {
    if let Err(e) = device.pulse_single_key(
        key.key_name(),
        start.to_percent(),
        end.to_percent(),
        millis(duration),
        infinite,
    ) {
        log::debug!("failed to pulse lighting for key {key}: {e}");
    }
}

pub fn save_lighting_for_key(device: &impl LightingDevice, key: LogiLedKey) {
    if let Err(e) = device.save_lighting_for_key(key.key_name()) {
        log::debug!("failed to save lighting for key {key}: {e}");
    }
}

pub fn restore_lighting_for_key(device: &impl LightingDevice, key: LogiLedKey) {
    if let Err(e) = device.restore_lighting_for_key(key.key_name()) {
        log::debug!("failed to restore lighting for key {key}: {e}");
    }
}

pub fn stop_effects_for_key(device: &impl LightingDevice, key: LogiLedKey) {
    if let Err(e) = device.stop_effects_on_key(key.key_name()) {
        log::debug!("failed to stop effects for key {key}: {e}");
    }
}

// ── Bitmap lighting ──

/// Keys that [`set_lighting_from_bitmap`] should leave alone.
pub fn exclude_keys_from_bitmap(device: &impl LightingDevice, keys: &[LogiLedKey]) {
    let names: Vec<KeyName> = keys.iter().map(|k| k.key_name()).collect();
    if let Err(e) = device.exclude_keys_from_bitmap(&names) {
        log::debug!("failed to exclude keys from bitmap: {e}");
    }
}

/// Light keys from a bitmap. Bitmaps that do not match the device grid are
/// rejected with a warning and nothing is sent.
pub fn set_lighting_from_bitmap(device: &impl LightingDevice, bitmap: &LightingBitmap) {
    if !bitmap.is_device_sized() {
        log::warn!(
            "lighting bitmap must be {BITMAP_WIDTH}x{BITMAP_HEIGHT}, but it is {}x{}",
            bitmap.width(),
            bitmap.height()
        );
        return;
    }
    if let Err(e) = device.set_lighting_from_bitmap(&bitmap.to_bgra()) {
        log::debug!("failed to set lighting from bitmap: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::{Call, MockDevice};
    use crate::led::RgbPercent;

    fn pct(r: u8, g: u8, b: u8) -> RgbPercent {
        RgbPercent { r, g, b }
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    #[test]
    fn set_lighting_converts_to_percent() {
        let dev = MockDevice::new();
        set_lighting(&dev, LinearColor::rgb(1.0, 0.5, 0.0));
        assert_eq!(dev.calls(), vec![Call::SetLighting(pct(100, 50, 0))]);
    }

    #[test]
    fn set_lighting_for_key_uses_vendor_code() {
        let dev = MockDevice::new();
        set_lighting_for_key(&dev, LogiLedKey::NumEnter, LinearColor::WHITE);
        assert_eq!(
            dev.calls(),
            vec![Call::SetLightingForKey(KeyName(0x11C), pct(100, 100, 100))]
        );
    }

    #[test]
    fn flash_converts_durations() {
        let dev = MockDevice::new();
        flash_lighting(
            &dev,
            LinearColor::rgb(0.0, 0.0, 1.0),
            Duration::from_secs(2),
            Duration::from_millis(250),
        );
        assert_eq!(
            dev.calls(),
            vec![Call::FlashLighting {
                color: pct(0, 0, 100),
                duration_ms: 2000,
                interval_ms: 250,
            }]
        );
    }

    #[test]
    fn pulse_for_key_passes_both_colors() {
        let dev = MockDevice::new();
        pulse_lighting_for_key(
            &dev,
            LogiLedKey::G3,
            LinearColor::BLACK,
            LinearColor::WHITE,
            Duration::from_millis(800),
            true,
        );
        assert_eq!(
            dev.calls(),
            vec![Call::PulseSingleKey {
                key: KeyName(0xFFF3),
                start: pct(0, 0, 0),
                end: pct(100, 100, 100),
                duration_ms: 800,
                infinite: true,
            }]
        );
    }

    #[test]
    fn failures_are_swallowed() {
        let dev = MockDevice::new();
        dev.fail("set_lighting");
        dev.fail("stop_effects");
        set_lighting(&dev, LinearColor::WHITE);
        stop_effects(&dev);
        assert_eq!(dev.calls().len(), 2);
    }

    #[test]
    fn set_target_device_reports_result() {
        let dev = MockDevice::new();
        assert!(set_target_device(&dev, DeviceType::PerKeyRgb));
        dev.fail("set_target_device");
        assert!(!set_target_device(&dev, DeviceType::Rgb));
    }

    #[test]
    fn save_restore_for_key() {
        let dev = MockDevice::new();
        save_lighting_for_key(&dev, LogiLedKey::Escape);
        restore_lighting_for_key(&dev, LogiLedKey::Escape);
        assert_eq!(
            dev.calls(),
            vec![
                Call::SaveLightingForKey(KeyName(0x01)),
                Call::RestoreLightingForKey(KeyName(0x01)),
            ]
        );
    }

    #[test]
    fn exclude_keys_maps_codes() {
        let dev = MockDevice::new();
        exclude_keys_from_bitmap(&dev, &[LogiLedKey::W, LogiLedKey::A]);
        assert_eq!(
            dev.calls(),
            vec![Call::ExcludeKeysFromBitmap(vec![KeyName(0x11), KeyName(0x1E)])]
        );
    }

    #[test]
    fn bitmap_of_wrong_size_is_not_sent() {
        let dev = MockDevice::new();
        let bmp = LightingBitmap::from_rgba(4, 4, vec![0; 64]).unwrap();
        set_lighting_from_bitmap(&dev, &bmp);
        assert!(dev.calls().is_empty());
    }

    #[test]
    fn bitmap_is_sent_as_bgra() {
        let dev = MockDevice::new();
        let bmp = LightingBitmap::filled(LinearColor::rgb(1.0, 0.0, 0.0));
        set_lighting_from_bitmap(&dev, &bmp);
        let calls = dev.calls();
        let Call::SetLightingFromBitmap(bytes) = &calls[0] else {
            panic!("expected bitmap call, got {calls:?}");
        };
        assert_eq!(bytes.len(), crate::led::BITMAP_SIZE);
        assert_eq!(&bytes[..4], &[0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn config_option_defaults_on_failure() {
        let dev = MockDevice::new();
        assert!(get_config_option_bool(&dev, "missing", true));
        assert_eq!(get_config_option_number(&dev, "missing", 2.5), 2.5);
        assert_eq!(
            get_config_option_color(&dev, "missing", LinearColor::WHITE),
            LinearColor::WHITE
        );
    }

    #[test]
    fn config_option_reads_device_value() {
        let dev = MockDevice::new();
        dev.bool_options.borrow_mut().insert("fx/on".into(), false);
        dev.number_options.borrow_mut().insert("fx/speed".into(), 0.75);
        dev.color_options
            .borrow_mut()
            .insert("fx/tint".into(), [0xFF, 0x00, 0x00]);
        assert!(!get_config_option_bool(&dev, "fx/on", true));
        assert_eq!(get_config_option_number(&dev, "fx/speed", 0.0), 0.75);
        assert_eq!(
            get_config_option_color(&dev, "fx/tint", LinearColor::BLACK),
            LinearColor::rgb(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn set_label_reports_result() {
        let dev = MockDevice::new();
        assert!(set_config_option_label(&dev, "fx/speed", "Speed"));
        assert_eq!(
            dev.calls(),
            vec![Call::SetConfigOptionLabel("fx/speed".into(), "Speed".into())]
        );
    }
}
