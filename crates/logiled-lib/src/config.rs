//! Application configuration — TOML-based, platform-aware paths.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::curve::{ColorCurve, ColorKey, Extrapolation};
use crate::keys::{DeviceType, LogiLedKey};
use crate::led::parse_color;

/// Header comment at the top of written config files.
const CONFIG_HEADER: &str =
    "# LogiLed configuration\n# Named curves go in [curves.<name>] tables.\n\n";

/// Highest accepted `frame_rate`.
pub const MAX_FRAME_RATE: u32 = 240;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Device classes to drive: "all", "monochrome", "rgb" or "per-key-rgb".
    #[serde(default = "default_target_device")]
    pub target_device: String,

    /// Curve playback rate in frames per second. Default: 60.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Default flash/pulse effect length.
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u32,

    /// Default flash/pulse period.
    #[serde(default = "default_flash_interval_ms")]
    pub flash_interval_ms: u32,

    /// Keys that bitmap lighting leaves alone, by name (e.g. `"Escape"`).
    #[serde(default)]
    pub excluded_keys: Vec<String>,

    /// Named color curves for `play`.
    /// Example in TOML: `[curves.fade]` / `extrapolation = "cycle"` /
    /// `keys = [{ time = 0.0, color = "black" }, { time = 1.0, color = "red" }]`
    #[serde(default)]
    pub curves: BTreeMap<String, CurveConfig>,
}

/// A curve as written in the config file. Colors stay strings until
/// [`Config::curve`] so that a typo is a validation error, not a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    #[serde(default)]
    pub extrapolation: Extrapolation,
    #[serde(default)]
    pub keys: Vec<CurveKeyConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveKeyConfig {
    pub time: f32,
    pub color: String,
}

fn default_target_device() -> String {
    "all".into()
}
fn default_frame_rate() -> u32 {
    60
}
fn default_flash_duration_ms() -> u32 {
    1000
}
fn default_flash_interval_ms() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_device: default_target_device(),
            frame_rate: default_frame_rate(),
            flash_duration_ms: default_flash_duration_ms(),
            flash_interval_ms: default_flash_interval_ms(),
            excluded_keys: Vec::new(),
            curves: BTreeMap::new(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `target_device` is not a known device type.
    InvalidTargetDevice(String),
    /// `frame_rate` is zero or above [`MAX_FRAME_RATE`].
    InvalidFrameRate(u32),
    /// A flash timing field is zero (`field` is `"flash_duration_ms"` or `"flash_interval_ms"`).
    ZeroTiming { field: &'static str },
    /// An `excluded_keys` entry is not a key name.
    UnknownKey(String),
    /// A `curves` entry cannot be built.
    InvalidCurve { name: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidTargetDevice(v) => {
                write!(f, "Invalid target_device: \"{v}\"")
            }
            ValidationError::InvalidFrameRate(v) => {
                write!(f, "Invalid frame_rate: {v} (must be 1-{MAX_FRAME_RATE})")
            }
            ValidationError::ZeroTiming { field } => write!(f, "{field} must be positive"),
            ValidationError::UnknownKey(k) => write!(f, "Unknown key in excluded_keys: {k}"),
            ValidationError::InvalidCurve { name, reason } => {
                write!(f, "Invalid curves.{name}: {reason}")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("logiled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Write this config to `path` as TOML, creating parent directories.
    ///
    /// Fails with `AlreadyExists` if the file exists and `overwrite` is false.
    pub fn write_to(&self, path: &Path, overwrite: bool) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let body = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .create_new(!overwrite)
            .truncate(true)
            .open(path)?;
        file.write_all(CONFIG_HEADER.as_bytes())?;
        file.write_all(body.as_bytes())
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Parsed `target_device`, falling back to [`DeviceType::All`].
    pub fn device_type(&self) -> DeviceType {
        self.target_device.parse().unwrap_or_default()
    }

    /// Parsed `excluded_keys`. Unknown names are skipped.
    pub fn excluded_keys(&self) -> Vec<LogiLedKey> {
        self.excluded_keys
            .iter()
            .filter_map(|k| k.parse().ok())
            .collect()
    }

    /// Time between frames at `frame_rate` (clamped to a valid rate).
    pub fn frame_interval(&self) -> Duration {
        let fps = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        Duration::from_nanos(1_000_000_000 / u64::from(fps))
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.flash_duration_ms))
    }

    pub fn flash_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.flash_interval_ms))
    }

    /// Build the named curve from `curves`.
    pub fn curve(&self, name: &str) -> crate::error::Result<ColorCurve> {
        let Some(cfg) = self.curves.get(name) else {
            return Err(crate::LogiLedError::Config(format!("Unknown curve: {name}")));
        };
        cfg.build()
    }

    /// Validate the entire config, collecting all errors.
    ///
    /// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all problems found.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.target_device.parse::<DeviceType>().is_err() {
            errors.push(ValidationError::InvalidTargetDevice(
                self.target_device.clone(),
            ));
        }

        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            errors.push(ValidationError::InvalidFrameRate(self.frame_rate));
        }

        if self.flash_duration_ms == 0 {
            errors.push(ValidationError::ZeroTiming {
                field: "flash_duration_ms",
            });
        }
        if self.flash_interval_ms == 0 {
            errors.push(ValidationError::ZeroTiming {
                field: "flash_interval_ms",
            });
        }

        for key in &self.excluded_keys {
            if key.parse::<LogiLedKey>().is_err() {
                errors.push(ValidationError::UnknownKey(key.clone()));
            }
        }

        for (name, cfg) in &self.curves {
            if let Err(e) = cfg.build() {
                errors.push(ValidationError::InvalidCurve {
                    name: name.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl CurveConfig {
    /// Parse colors and build the curve.
    pub fn build(&self) -> crate::error::Result<ColorCurve> {
        let keys = self
            .keys
            .iter()
            .map(|k| {
                Ok(ColorKey {
                    time: k.time,
                    color: parse_color(&k.color)?,
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;
        ColorCurve::new(keys, self.extrapolation)
    }
}
