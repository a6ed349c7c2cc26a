//! `config` subcommand — show current configuration and file path, or write defaults.

use std::path::Path;

use super::{
    Config, ConfigOutput, LogiLedError, Result, kv, kv_indent, kv_width, load_config, print_json,
};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            problems,
        });
    }

    // Human-readable output
    let curve_keys: Vec<String> = config.curves.keys().map(|n| format!("{n}:")).collect();
    let mut indent: Vec<&str> = vec![
        "target_device:",
        "frame_rate:",
        "flash_duration_ms:",
        "flash_interval_ms:",
        "excluded_keys:",
    ];
    indent.extend(curve_keys.iter().map(String::as_str));
    let w = kv_width(&["Config file:"], &indent);

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent(
        "target_device:",
        format_args!("{} -> {}", config.target_device, config.device_type()),
        w,
    );
    kv_indent("frame_rate:", config.frame_rate, w);
    kv_indent("flash_duration_ms:", config.flash_duration_ms, w);
    kv_indent("flash_interval_ms:", config.flash_interval_ms, w);
    let excluded = if config.excluded_keys.is_empty() {
        "(none)".to_string()
    } else {
        config.excluded_keys.join(", ")
    };
    kv_indent("excluded_keys:", excluded, w);

    if !config.curves.is_empty() {
        println!();
        println!("Curves:");
        for ((name, curve), label) in config.curves.iter().zip(&curve_keys) {
            let n = curve.keys.len();
            let plural = if n == 1 { "" } else { "s" };
            kv_indent(
                label,
                format_args!("{n} key{plural}, {} extrapolation", curve.extrapolation),
                w,
            );
            log::debug!("curve {name}: {:?}", curve.keys);
        }
    }

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}

/// Write a default config to `custom_path` or the platform location.
pub(super) fn cmd_config_init(custom_path: Option<&Path>, force: bool) -> Result<()> {
    let Some(path) = custom_path.map(|p| p.to_path_buf()).or_else(Config::path) else {
        return Err(LogiLedError::Config("no config directory".into()));
    };
    Config::default()
        .write_to(&path, force)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => LogiLedError::Config(format!(
                "{} already exists (use --force to replace it)",
                path.display()
            )),
            _ => LogiLedError::Io(e),
        })?;
    println!("Wrote {}", path.display());
    Ok(())
}
