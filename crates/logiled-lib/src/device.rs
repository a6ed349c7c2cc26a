//! Lighting device abstraction — trait + console and mock backends.
//!
//! [`LightingDevice`] mirrors the LED SDK's C surface one call at a time. The
//! SDK reports failure as a bare `false`; backends turn that into
//! [`DeviceError::CallFailed`] naming the operation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::keys::{DeviceType, KeyName};
use crate::led::RgbPercent;

// ── Error type ──

/// Lighting device errors.
#[derive(Debug)]
pub enum DeviceError {
    /// A call was made before `initialize` succeeded (or after `shutdown`).
    NotInitialized,
    /// The SDK refused to initialize.
    InitFailed(String),
    /// The SDK returned failure for the named operation.
    CallFailed(String),
    /// The backend does not implement the named operation.
    Unsupported(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotInitialized => write!(f, "LED SDK not initialized"),
            DeviceError::InitFailed(e) => write!(f, "LED SDK init failed: {e}"),
            DeviceError::CallFailed(op) => write!(f, "LED SDK call failed: {op}"),
            DeviceError::Unsupported(op) => write!(f, "Not supported by this device: {op}"),
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── SDK version ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SdkVersion {
    pub major: i32,
    pub minor: i32,
    pub build: i32,
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

// ── Trait ──

pub trait LightingDevice {
    fn initialize(&self) -> Result<()>;
    fn shutdown(&self);

    /// SDK version triple. Default: not supported.
    fn sdk_version(&self) -> Result<SdkVersion> {
        Err(DeviceError::Unsupported("sdk_version".into()))
    }

    fn set_target_device(&self, device_type: DeviceType) -> Result<()>;

    fn set_lighting(&self, color: RgbPercent) -> Result<()>;
    fn set_lighting_for_key(&self, key: KeyName, color: RgbPercent) -> Result<()>;

    fn save_current_lighting(&self) -> Result<()>;
    fn restore_lighting(&self) -> Result<()>;
    fn save_lighting_for_key(&self, key: KeyName) -> Result<()>;
    fn restore_lighting_for_key(&self, key: KeyName) -> Result<()>;

    fn flash_lighting(
        &self,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()>;
    fn pulse_lighting(
        &self,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()>;
    fn flash_single_key(
        &self,
        key: KeyName,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()>;
    fn pulse_single_key(
        &self,
        key: KeyName,
        start: RgbPercent,
        end: RgbPercent,
        duration_ms: u32,
        infinite: bool,
    ) -> Result<()>;

    fn stop_effects(&self) -> Result<()>;
    fn stop_effects_on_key(&self, key: KeyName) -> Result<()>;

    /// Keys that bitmap updates should leave untouched. Default: not supported.
    fn exclude_keys_from_bitmap(&self, _keys: &[KeyName]) -> Result<()> {
        Err(DeviceError::Unsupported("exclude_keys_from_bitmap".into()))
    }

    /// Per-key lighting from a BGRA bitmap of
    /// [`BITMAP_WIDTH`](crate::led::BITMAP_WIDTH) × [`BITMAP_HEIGHT`](crate::led::BITMAP_HEIGHT)
    /// pixels. Default: not supported.
    fn set_lighting_from_bitmap(&self, _bgra: &[u8]) -> Result<()> {
        Err(DeviceError::Unsupported("set_lighting_from_bitmap".into()))
    }

    // Config options exposed through the vendor's settings UI.

    fn get_config_option_bool(&self, _path: &str) -> Result<bool> {
        Err(DeviceError::Unsupported("get_config_option_bool".into()))
    }

    fn get_config_option_number(&self, _path: &str) -> Result<f64> {
        Err(DeviceError::Unsupported("get_config_option_number".into()))
    }

    /// Color option as 8-bit RGB.
    fn get_config_option_color(&self, _path: &str) -> Result<[u8; 3]> {
        Err(DeviceError::Unsupported("get_config_option_color".into()))
    }

    fn set_config_option_label(&self, _path: &str, _label: &str) -> Result<()> {
        Err(DeviceError::Unsupported("set_config_option_label".into()))
    }
}

/// Lets a session borrow a device owned elsewhere.
impl<T: LightingDevice + ?Sized> LightingDevice for &T {
    fn initialize(&self) -> Result<()> {
        (**self).initialize()
    }
    fn shutdown(&self) {
        (**self).shutdown()
    }
    fn sdk_version(&self) -> Result<SdkVersion> {
        (**self).sdk_version()
    }
    fn set_target_device(&self, device_type: DeviceType) -> Result<()> {
        (**self).set_target_device(device_type)
    }
    fn set_lighting(&self, color: RgbPercent) -> Result<()> {
        (**self).set_lighting(color)
    }
    fn set_lighting_for_key(&self, key: KeyName, color: RgbPercent) -> Result<()> {
        (**self).set_lighting_for_key(key, color)
    }
    fn save_current_lighting(&self) -> Result<()> {
        (**self).save_current_lighting()
    }
    fn restore_lighting(&self) -> Result<()> {
        (**self).restore_lighting()
    }
    fn save_lighting_for_key(&self, key: KeyName) -> Result<()> {
        (**self).save_lighting_for_key(key)
    }
    fn restore_lighting_for_key(&self, key: KeyName) -> Result<()> {
        (**self).restore_lighting_for_key(key)
    }
    fn flash_lighting(
        &self,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()> {
        (**self).flash_lighting(color, duration_ms, interval_ms)
    }
    fn pulse_lighting(
        &self,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()> {
        (**self).pulse_lighting(color, duration_ms, interval_ms)
    }
    fn flash_single_key(
        &self,
        key: KeyName,
        color: RgbPercent,
        duration_ms: u32,
        interval_ms: u32,
    ) -> Result<()> {
        (**self).flash_single_key(key, color, duration_ms, interval_ms)
    }
    fn pulse_single_key(
        &self,
        key: KeyName,
        start: RgbPercent,
        end: RgbPercent,
        duration_ms: u32,
        infinite: bool,
    ) -> Result<()> {
        (**self).pulse_single_key(key, start, end, duration_ms, infinite)
    }
    fn stop_effects(&self) -> Result<()> {
        (**self).stop_effects()
    }
    fn stop_effects_on_key(&self, key: KeyName) -> Result<()> {
        (**self).stop_effects_on_key(key)
    }
    fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> Result<()> {
        (**self).exclude_keys_from_bitmap(keys)
    }
    fn set_lighting_from_bitmap(&self, bgra: &[u8]) -> Result<()> {
        (**self).set_lighting_from_bitmap(bgra)
    }
    fn get_config_option_bool(&self, path: &str) -> Result<bool> {
        (**self).get_config_option_bool(path)
    }
    fn get_config_option_number(&self, path: &str) -> Result<f64> {
        (**self).get_config_option_number(path)
    }
    fn get_config_option_color(&self, path: &str) -> Result<[u8; 3]> {
        (**self).get_config_option_color(path)
    }
    fn set_config_option_label(&self, path: &str, label: &str) -> Result<()> {
        (**self).set_config_option_label(path, label)
    }
}

// ── Console backend ──

/// Device that writes one line per SDK call to a sink instead of driving
/// hardware. Calls made outside `initialize`/`shutdown` fail with
/// [`DeviceError::NotInitialized`].
pub mod console {
    use super::*;

    pub struct ConsoleDevice<W: Write> {
        out: RefCell<W>,
        initialized: Cell<bool>,
    }

    impl ConsoleDevice<std::io::Stdout> {
        pub fn stdout() -> Self {
            Self::new(std::io::stdout())
        }
    }

    impl<W: Write> ConsoleDevice<W> {
        pub fn new(out: W) -> Self {
            ConsoleDevice {
                out: RefCell::new(out),
                initialized: Cell::new(false),
            }
        }

        pub fn into_inner(self) -> W {
            self.out.into_inner()
        }

        fn emit(&self, op: &str, args: fmt::Arguments<'_>) -> Result<()> {
            if !self.initialized.get() {
                return Err(DeviceError::NotInitialized);
            }
            let args = args.to_string();
            let mut out = self.out.borrow_mut();
            let written = if args.is_empty() {
                writeln!(out, "[led] {op}")
            } else {
                writeln!(out, "[led] {op} {args}")
            };
            written.map_err(|e| DeviceError::CallFailed(format!("{op}: {e}")))
        }
    }

    impl<W: Write> LightingDevice for ConsoleDevice<W> {
        fn initialize(&self) -> Result<()> {
            self.initialized.set(true);
            Ok(())
        }

        fn shutdown(&self) {
            self.initialized.set(false);
        }

        fn set_target_device(&self, device_type: DeviceType) -> Result<()> {
            self.emit(
                "set_target_device",
                format_args!("{device_type} (0x{:X})", device_type.sdk_mask()),
            )
        }

        fn set_lighting(&self, color: RgbPercent) -> Result<()> {
            self.emit("set_lighting", format_args!("{color}"))
        }

        fn set_lighting_for_key(&self, key: KeyName, color: RgbPercent) -> Result<()> {
            self.emit("set_lighting_for_key", format_args!("{key} {color}"))
        }

        fn save_current_lighting(&self) -> Result<()> {
            self.emit("save_current_lighting", format_args!(""))
        }

        fn restore_lighting(&self) -> Result<()> {
            self.emit("restore_lighting", format_args!(""))
        }

        fn save_lighting_for_key(&self, key: KeyName) -> Result<()> {
            self.emit("save_lighting_for_key", format_args!("{key}"))
        }

        fn restore_lighting_for_key(&self, key: KeyName) -> Result<()> {
            self.emit("restore_lighting_for_key", format_args!("{key}"))
        }

        fn flash_lighting(
            &self,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.emit(
                "flash_lighting",
                format_args!("{color} for {duration_ms}ms every {interval_ms}ms"),
            )
        }

        fn pulse_lighting(
            &self,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.emit(
                "pulse_lighting",
                format_args!("{color} for {duration_ms}ms every {interval_ms}ms"),
            )
        }

        fn flash_single_key(
            &self,
            key: KeyName,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.emit(
                "flash_single_key",
                format_args!("{key} {color} for {duration_ms}ms every {interval_ms}ms"),
            )
        }

        fn pulse_single_key(
            &self,
            key: KeyName,
            start: RgbPercent,
            end: RgbPercent,
            duration_ms: u32,
            infinite: bool,
        ) -> Result<()> {
            let repeat = if infinite { " (looping)" } else { "" };
            self.emit(
                "pulse_single_key",
                format_args!("{key} {start} -> {end} over {duration_ms}ms{repeat}"),
            )
        }

        fn stop_effects(&self) -> Result<()> {
            self.emit("stop_effects", format_args!(""))
        }

        fn stop_effects_on_key(&self, key: KeyName) -> Result<()> {
            self.emit("stop_effects_on_key", format_args!("{key}"))
        }

        fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> Result<()> {
            let list: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
            self.emit("exclude_keys_from_bitmap", format_args!("{}", list.join(",")))
        }

        fn set_lighting_from_bitmap(&self, bgra: &[u8]) -> Result<()> {
            self.emit(
                "set_lighting_from_bitmap",
                format_args!("{} bytes", bgra.len()),
            )
        }
    }
}

// ── Mock device for testing ──

/// In-memory mock device for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// One recorded SDK call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Initialize,
        Shutdown,
        SetTargetDevice(DeviceType),
        SetLighting(RgbPercent),
        SetLightingForKey(KeyName, RgbPercent),
        SaveCurrentLighting,
        RestoreLighting,
        SaveLightingForKey(KeyName),
        RestoreLightingForKey(KeyName),
        FlashLighting {
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        },
        PulseLighting {
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        },
        FlashSingleKey {
            key: KeyName,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        },
        PulseSingleKey {
            key: KeyName,
            start: RgbPercent,
            end: RgbPercent,
            duration_ms: u32,
            infinite: bool,
        },
        StopEffects,
        StopEffectsOnKey(KeyName),
        ExcludeKeysFromBitmap(Vec<KeyName>),
        SetLightingFromBitmap(Vec<u8>),
        GetConfigOption(String),
        SetConfigOptionLabel(String, String),
    }

    impl Call {
        /// Operation name used for failure injection.
        pub fn op(&self) -> &'static str {
            match self {
                Call::Initialize => "initialize",
                Call::Shutdown => "shutdown",
                Call::SetTargetDevice(_) => "set_target_device",
                Call::SetLighting(_) => "set_lighting",
                Call::SetLightingForKey(..) => "set_lighting_for_key",
                Call::SaveCurrentLighting => "save_current_lighting",
                Call::RestoreLighting => "restore_lighting",
                Call::SaveLightingForKey(_) => "save_lighting_for_key",
                Call::RestoreLightingForKey(_) => "restore_lighting_for_key",
                Call::FlashLighting { .. } => "flash_lighting",
                Call::PulseLighting { .. } => "pulse_lighting",
                Call::FlashSingleKey { .. } => "flash_single_key",
                Call::PulseSingleKey { .. } => "pulse_single_key",
                Call::StopEffects => "stop_effects",
                Call::StopEffectsOnKey(_) => "stop_effects_on_key",
                Call::ExcludeKeysFromBitmap(_) => "exclude_keys_from_bitmap",
                Call::SetLightingFromBitmap(_) => "set_lighting_from_bitmap",
                Call::GetConfigOption(_) => "get_config_option",
                Call::SetConfigOptionLabel(..) => "set_config_option_label",
            }
        }
    }

    /// Records every call in order. Calls are recorded even when a failure
    /// is injected for their operation.
    pub struct MockDevice {
        /// Recorded calls, oldest first.
        pub calls: RefCell<Vec<Call>>,
        /// Operation names that should return `CallFailed`.
        pub failing: RefCell<HashSet<&'static str>>,
        /// Version reported by `sdk_version`; `None` means unsupported.
        pub version: Cell<Option<SdkVersion>>,
        pub bool_options: RefCell<HashMap<String, bool>>,
        pub number_options: RefCell<HashMap<String, f64>>,
        pub color_options: RefCell<HashMap<String, [u8; 3]>>,
    }

    impl Default for MockDevice {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockDevice {
        pub fn new() -> Self {
            MockDevice {
                calls: RefCell::new(Vec::new()),
                failing: RefCell::new(HashSet::new()),
                version: Cell::new(Some(SdkVersion {
                    major: 9,
                    minor: 0,
                    build: 1,
                })),
                bool_options: RefCell::new(HashMap::new()),
                number_options: RefCell::new(HashMap::new()),
                color_options: RefCell::new(HashMap::new()),
            }
        }

        /// Make every future call of `op` fail.
        pub fn fail(&self, op: &'static str) {
            self.failing.borrow_mut().insert(op);
        }

        /// Calls recorded so far.
        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        /// Recorded calls with the given operation name.
        pub fn calls_of(&self, op: &str) -> Vec<Call> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.op() == op)
                .cloned()
                .collect()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }

        fn record(&self, call: Call) -> Result<()> {
            let op = call.op();
            self.calls.borrow_mut().push(call);
            if self.failing.borrow().contains(op) {
                return Err(DeviceError::CallFailed(op.into()));
            }
            Ok(())
        }

        fn option<T: Copy>(
            &self,
            options: &RefCell<HashMap<String, T>>,
            path: &str,
        ) -> Result<T> {
            self.record(Call::GetConfigOption(path.into()))?;
            options
                .borrow()
                .get(path)
                .copied()
                .ok_or_else(|| DeviceError::CallFailed(format!("get_config_option {path}")))
        }
    }

    impl LightingDevice for MockDevice {
        fn initialize(&self) -> Result<()> {
            self.record(Call::Initialize)
                .map_err(|_| DeviceError::InitFailed("mock: initialize failure injected".into()))
        }

        fn shutdown(&self) {
            let _ = self.record(Call::Shutdown);
        }

        fn sdk_version(&self) -> Result<SdkVersion> {
            self.version
                .get()
                .ok_or_else(|| DeviceError::Unsupported("sdk_version".into()))
        }

        fn set_target_device(&self, device_type: DeviceType) -> Result<()> {
            self.record(Call::SetTargetDevice(device_type))
        }

        fn set_lighting(&self, color: RgbPercent) -> Result<()> {
            self.record(Call::SetLighting(color))
        }

        fn set_lighting_for_key(&self, key: KeyName, color: RgbPercent) -> Result<()> {
            self.record(Call::SetLightingForKey(key, color))
        }

        fn save_current_lighting(&self) -> Result<()> {
            self.record(Call::SaveCurrentLighting)
        }

        fn restore_lighting(&self) -> Result<()> {
            self.record(Call::RestoreLighting)
        }

        fn save_lighting_for_key(&self, key: KeyName) -> Result<()> {
            self.record(Call::SaveLightingForKey(key))
        }

        fn restore_lighting_for_key(&self, key: KeyName) -> Result<()> {
            self.record(Call::RestoreLightingForKey(key))
        }

        fn flash_lighting(
            &self,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.record(Call::FlashLighting {
                color,
                duration_ms,
                interval_ms,
            })
        }

        fn pulse_lighting(
            &self,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.record(Call::PulseLighting {
                color,
                duration_ms,
                interval_ms,
            })
        }

        fn flash_single_key(
            &self,
            key: KeyName,
            color: RgbPercent,
            duration_ms: u32,
            interval_ms: u32,
        ) -> Result<()> {
            self.record(Call::FlashSingleKey {
                key,
                color,
                duration_ms,
                interval_ms,
            })
        }

        fn pulse_single_key(
            &self,
            key: KeyName,
            start: RgbPercent,
            end: RgbPercent,
            duration_ms: u32,
            infinite: bool,
        ) -> Result<()> {
            self.record(Call::PulseSingleKey {
                key,
                start,
                end,
                duration_ms,
                infinite,
            })
        }

        fn stop_effects(&self) -> Result<()> {
            self.record(Call::StopEffects)
        }

        fn stop_effects_on_key(&self, key: KeyName) -> Result<()> {
            self.record(Call::StopEffectsOnKey(key))
        }

        fn exclude_keys_from_bitmap(&self, keys: &[KeyName]) -> Result<()> {
            self.record(Call::ExcludeKeysFromBitmap(keys.to_vec()))
        }

        fn set_lighting_from_bitmap(&self, bgra: &[u8]) -> Result<()> {
            self.record(Call::SetLightingFromBitmap(bgra.to_vec()))
        }

        fn get_config_option_bool(&self, path: &str) -> Result<bool> {
            self.option(&self.bool_options, path)
        }

        fn get_config_option_number(&self, path: &str) -> Result<f64> {
            self.option(&self.number_options, path)
        }

        fn get_config_option_color(&self, path: &str) -> Result<[u8; 3]> {
            self.option(&self.color_options, path)
        }

        fn set_config_option_label(&self, path: &str, label: &str) -> Result<()> {
            self.record(Call::SetConfigOptionLabel(path.into(), label.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::console::ConsoleDevice;
    use super::mock::{Call, MockDevice};
    use super::*;

    fn red() -> RgbPercent {
        RgbPercent { r: 100, g: 0, b: 0 }
    }

    // ── DeviceError ──

    #[test]
    fn display_errors() {
        assert_eq!(DeviceError::NotInitialized.to_string(), "LED SDK not initialized");
        assert_eq!(
            DeviceError::CallFailed("set_lighting".into()).to_string(),
            "LED SDK call failed: set_lighting"
        );
        assert_eq!(
            DeviceError::Unsupported("sdk_version".into()).to_string(),
            "Not supported by this device: sdk_version"
        );
    }

    #[test]
    fn sdk_version_display() {
        let v = SdkVersion {
            major: 8,
            minor: 87,
            build: 110,
        };
        assert_eq!(v.to_string(), "8.87.110");
    }

    // ── ConsoleDevice ──

    #[test]
    fn console_rejects_calls_before_initialize() {
        let dev = ConsoleDevice::new(Vec::new());
        let err = dev.set_lighting(red()).unwrap_err();
        assert!(matches!(err, DeviceError::NotInitialized));
        assert!(dev.into_inner().is_empty());
    }

    #[test]
    fn console_writes_one_line_per_call() {
        let dev = ConsoleDevice::new(Vec::new());
        dev.initialize().unwrap();
        dev.set_lighting(red()).unwrap();
        dev.set_lighting_for_key(KeyName(0x1E), red()).unwrap();
        dev.stop_effects().unwrap();
        let out = String::from_utf8(dev.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[led] set_lighting 100%,0%,0%",
                "[led] set_lighting_for_key 0x1E 100%,0%,0%",
                "[led] stop_effects",
            ]
        );
    }

    #[test]
    fn console_rejects_calls_after_shutdown() {
        let dev = ConsoleDevice::new(Vec::new());
        dev.initialize().unwrap();
        dev.shutdown();
        assert!(dev.stop_effects().is_err());
    }

    #[test]
    fn console_has_no_config_options() {
        let dev = ConsoleDevice::new(Vec::new());
        dev.initialize().unwrap();
        assert!(matches!(
            dev.get_config_option_bool("a/b"),
            Err(DeviceError::Unsupported(_))
        ));
        assert!(dev.sdk_version().is_err());
    }

    // ── MockDevice ──

    #[test]
    fn mock_records_calls_in_order() {
        let dev = MockDevice::new();
        dev.set_lighting(red()).unwrap();
        dev.stop_effects_on_key(KeyName(0x01)).unwrap();
        assert_eq!(
            dev.calls(),
            vec![Call::SetLighting(red()), Call::StopEffectsOnKey(KeyName(0x01))]
        );
    }

    #[test]
    fn mock_failure_injection_still_records() {
        let dev = MockDevice::new();
        dev.fail("set_lighting");
        assert!(dev.set_lighting(red()).is_err());
        assert!(dev.stop_effects().is_ok());
        assert_eq!(dev.calls_of("set_lighting").len(), 1);
    }

    #[test]
    fn mock_initialize_failure_is_init_failed() {
        let dev = MockDevice::new();
        dev.fail("initialize");
        assert!(matches!(dev.initialize(), Err(DeviceError::InitFailed(_))));
    }

    #[test]
    fn mock_config_options() {
        let dev = MockDevice::new();
        dev.bool_options.borrow_mut().insert("fx/enabled".into(), true);
        assert!(dev.get_config_option_bool("fx/enabled").unwrap());
        assert!(dev.get_config_option_bool("fx/missing").is_err());
    }
}
