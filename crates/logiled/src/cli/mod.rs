//! CLI subcommands — key listing, configuration, one-shot effects, curve playback.

mod bitmap;
mod config_cmd;
mod effect;
mod keys;
mod play;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use logiled_lib::LogiLedError;
pub(super) use logiled_lib::config::Config;
pub(super) use logiled_lib::device::console::ConsoleDevice;
pub(super) use logiled_lib::error::Result;
pub(super) use logiled_lib::keys::{KeyName, LogiLedKey};
pub(super) use logiled_lib::led;
pub(super) use logiled_lib::session::LedSession;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Config from `custom_path` if given, else the default location.
/// Parse warnings are logged.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let (config, warnings) = match custom_path {
        Some(p) => Config::load_from(p),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    config
}

/// Lighting session on the console backend, targeted per config.
pub(super) fn open_session(config: &Config) -> Result<LedSession<ConsoleDevice<std::io::Stdout>>> {
    let session = LedSession::start(ConsoleDevice::stdout())?;
    led::set_target_device(session.device(), config.device_type());
    Ok(session)
}

/// Print `value` as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| LogiLedError::Io(std::io::Error::other(e)))?;
    println!("{s}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct KeysOutput {
    pub count: usize,
    pub keys: Vec<KeyJson>,
}

#[derive(Serialize)]
pub(super) struct KeyJson {
    pub name: &'static str,
    pub code: KeyName,
}

#[derive(Subcommand)]
pub enum Command {
    /// List key names and their SDK codes
    Keys,

    /// Show current configuration and file path
    Config {
        /// Write a default config file instead
        #[arg(long)]
        init: bool,
        /// Replace an existing file (with --init)
        #[arg(long, requires = "init")]
        force: bool,
    },

    /// Set a static color on every key, or on one key
    Set {
        /// Color (hex "#RRGGBB" or name)
        color: String,
        /// Only this key
        #[arg(long)]
        key: Option<LogiLedKey>,
    },

    /// Flash a color on and off
    Flash {
        /// Color (hex "#RRGGBB" or name)
        color: String,
        /// Only this key
        #[arg(long)]
        key: Option<LogiLedKey>,
        /// Effect length in milliseconds (default: from config)
        #[arg(long)]
        duration: Option<u32>,
        /// Flash period in milliseconds (default: from config)
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Pulse a color, or fade one key between two colors
    Pulse {
        /// Color (hex "#RRGGBB" or name)
        color: String,
        /// Only this key
        #[arg(long)]
        key: Option<LogiLedKey>,
        /// End color for a single-key fade (default: black)
        #[arg(long, requires = "key")]
        end: Option<String>,
        /// Effect length in milliseconds (default: from config)
        #[arg(long)]
        duration: Option<u32>,
        /// Pulse period in milliseconds (default: from config)
        #[arg(long, conflicts_with = "key")]
        interval: Option<u32>,
        /// Loop a single-key fade until stopped
        #[arg(long, requires = "key")]
        infinite: bool,
    },

    /// Stop running effects
    Stop {
        /// Only this key
        #[arg(long)]
        key: Option<LogiLedKey>,
    },

    /// Play a named curve from the config file
    Play {
        /// Curve name (a `[curves.<name>]` table)
        curve: String,
        /// Only this key
        #[arg(long)]
        key: Option<LogiLedKey>,
        /// Playback length in seconds (default: up to the curve's last key)
        #[arg(long)]
        seconds: Option<f32>,
    },

    /// Light keys from a PNG image
    Bitmap {
        /// Path to a PNG file (21x6 unless --fit)
        path: PathBuf,
        /// Resize the image to the keyboard grid first
        #[arg(long)]
        fit: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    if json && !matches!(cmd, Command::Keys | Command::Config { init: false, .. }) {
        warn_json_unsupported(cmd.name());
    }
    match cmd {
        Command::Keys => keys::cmd_keys(json),
        Command::Config { init: true, force } => config_cmd::cmd_config_init(config_path, force),
        Command::Config { .. } => config_cmd::cmd_config(json, config_path),
        Command::Set { color, key } => {
            let config = load_config(config_path);
            effect::cmd_set(&config, &color, key)
        }
        Command::Flash {
            color,
            key,
            duration,
            interval,
        } => {
            let config = load_config(config_path);
            effect::cmd_flash(&config, &color, key, duration, interval)
        }
        Command::Pulse {
            color,
            key,
            end,
            duration,
            interval,
            infinite,
        } => {
            let config = load_config(config_path);
            let opts = effect::PulseOptions {
                key,
                end,
                duration,
                interval,
                infinite,
            };
            effect::cmd_pulse(&config, &color, opts)
        }
        Command::Stop { key } => {
            let config = load_config(config_path);
            effect::cmd_stop(&config, key)
        }
        Command::Play {
            curve,
            key,
            seconds,
        } => {
            let config = load_config(config_path);
            play::cmd_play(&config, &curve, key, seconds)
        }
        Command::Bitmap { path, fit } => {
            let config = load_config(config_path);
            bitmap::cmd_bitmap(&config, &path, fit)
        }
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Keys => "keys",
            Command::Config { .. } => "config",
            Command::Set { .. } => "set",
            Command::Flash { .. } => "flash",
            Command::Pulse { .. } => "pulse",
            Command::Stop { .. } => "stop",
            Command::Play { .. } => "play",
            Command::Bitmap { .. } => "bitmap",
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Longer key:"], &[]);
        // "Longer key:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["frame_rate:"]);
        // "frame_rate:" = 11 + PADDING + 2 = 15
        assert_eq!(w, 15);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Config file:"], &["target_device:"]);
        let top = format_kv("Config file:", "V", w);
        let indent = format!("  {:<width$}{}", "target_device:", "V", width = w - 2);
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_exact_width() {
        // Longer than width: no padding added
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }

    #[test]
    fn kv_width_empty_both() {
        assert_eq!(kv_width(&[], &[]), 0);
    }
}

#[cfg(test)]
mod json_output_tests {
    use super::*;

    #[test]
    fn config_output_complete() {
        let output = ConfigOutput {
            config_file: Some("/home/user/.config/logiled/config.toml".into()),
            config_file_exists: true,
            settings: Config::default(),
            problems: vec![],
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["config_file"].is_string());
        assert_eq!(parsed["config_file_exists"], true);
        assert_eq!(parsed["settings"]["target_device"], "all");
        assert_eq!(parsed["settings"]["frame_rate"], 60);
        assert!(parsed["problems"].as_array().unwrap().is_empty());
    }

    #[test]
    fn config_output_missing_path_is_null() {
        let output = ConfigOutput {
            config_file: None,
            config_file_exists: false,
            settings: Config::default(),
            problems: vec!["Invalid frame_rate: 0 (must be 1-240)".into()],
        };
        let parsed = serde_json::to_value(&output).unwrap();
        assert!(parsed["config_file"].is_null());
        assert_eq!(parsed["problems"][0], "Invalid frame_rate: 0 (must be 1-240)");
    }

    #[test]
    fn keys_output_uses_numeric_codes() {
        let output = KeysOutput {
            count: 1,
            keys: vec![KeyJson {
                name: LogiLedKey::NumEnter.name(),
                code: LogiLedKey::NumEnter.key_name(),
            }],
        };
        let parsed = serde_json::to_value(&output).unwrap();
        assert_eq!(parsed["keys"][0]["name"], "NumEnter");
        assert_eq!(parsed["keys"][0]["code"], 0x11C);
    }
}

#[cfg(test)]
mod command_tests {
    use super::*;

    fn config_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn load_config_from_custom_path() {
        let (_dir, path) = config_file("frame_rate = 25");
        assert_eq!(load_config(Some(&path)).frame_rate, 25);
    }

    #[test]
    fn load_config_invalid_file_gives_defaults() {
        let (_dir, path) = config_file("not [valid");
        assert_eq!(load_config(Some(&path)), Config::default());
    }

    #[test]
    fn cmd_config_succeeds() {
        let (_dir, path) = config_file("");
        assert!(config_cmd::cmd_config(false, Some(&path)).is_ok());
        assert!(config_cmd::cmd_config(true, Some(&path)).is_ok());
    }

    #[test]
    fn cmd_config_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logiled").join("config.toml");
        config_cmd::cmd_config_init(Some(&path), false).unwrap();
        assert_eq!(load_config(Some(&path)), Config::default());

        let err = config_cmd::cmd_config_init(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(config_cmd::cmd_config_init(Some(&path), true).is_ok());
    }

    #[test]
    fn cmd_keys_succeeds() {
        assert!(keys::cmd_keys(false).is_ok());
        assert!(keys::cmd_keys(true).is_ok());
    }

    #[test]
    fn cmd_set_rejects_bad_color() {
        let err = effect::cmd_set(&Config::default(), "not-a-color", None).unwrap_err();
        assert!(matches!(err, LogiLedError::Color(_)));
    }

    #[test]
    fn cmd_play_unknown_curve_is_error() {
        let err = play::cmd_play(&Config::default(), "nope", None, Some(0.0)).unwrap_err();
        assert!(err.to_string().contains("Unknown curve: nope"));
    }

    #[test]
    fn cmd_bitmap_missing_file_is_error() {
        let result = bitmap::cmd_bitmap(
            &Config::default(),
            Path::new("/nonexistent/keys.png"),
            false,
        );
        assert!(result.is_err());
    }
}
