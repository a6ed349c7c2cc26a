//! `set` / `flash` / `pulse` / `stop` subcommands — one-shot device effects.

use std::time::Duration;

use super::{Config, LogiLedKey, Result, led, open_session};

fn ms_or(value: Option<u32>, default: Duration) -> Duration {
    value.map_or(default, |ms| Duration::from_millis(u64::from(ms)))
}

pub(super) fn cmd_set(config: &Config, color: &str, key: Option<LogiLedKey>) -> Result<()> {
    let color = led::parse_color(color)?;
    let session = open_session(config)?;
    match key {
        Some(key) => led::set_lighting_for_key(session.device(), key, color),
        None => led::set_lighting(session.device(), color),
    }
    Ok(())
}

pub(super) fn cmd_flash(
    config: &Config,
    color: &str,
    key: Option<LogiLedKey>,
    duration: Option<u32>,
    interval: Option<u32>,
) -> Result<()> {
    let color = led::parse_color(color)?;
    let duration = ms_or(duration, config.flash_duration());
    let interval = ms_or(interval, config.flash_interval());
    let session = open_session(config)?;
    match key {
        Some(key) => led::flash_lighting_for_key(session.device(), key, color, duration, interval),
        None => led::flash_lighting(session.device(), color, duration, interval),
    }
    Ok(())
}

pub(super) struct PulseOptions {
    pub key: Option<LogiLedKey>,
    pub end: Option<String>,
    pub duration: Option<u32>,
    pub interval: Option<u32>,
    pub infinite: bool,
}

/// Whole-device pulses use `interval`; single-key pulses fade to `end`.
pub(super) fn cmd_pulse(config: &Config, color: &str, opts: PulseOptions) -> Result<()> {
    let start = led::parse_color(color)?;
    let end = match &opts.end {
        Some(s) => led::parse_color(s)?,
        None => led::LinearColor::BLACK,
    };
    let duration = ms_or(opts.duration, config.flash_duration());
    let session = open_session(config)?;
    match opts.key {
        Some(key) => led::pulse_lighting_for_key(
            session.device(),
            key,
            start,
            end,
            duration,
            opts.infinite,
        ),
        None => {
            let interval = ms_or(opts.interval, config.flash_interval());
            led::pulse_lighting(session.device(), start, duration, interval);
        }
    }
    Ok(())
}

pub(super) fn cmd_stop(config: &Config, key: Option<LogiLedKey>) -> Result<()> {
    let mut session = open_session(config)?;
    match key {
        Some(key) => session.stop_effects_for_key(key),
        None => session.stop_effects(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_or_prefers_explicit_value() {
        assert_eq!(ms_or(Some(250), Duration::from_secs(1)), Duration::from_millis(250));
        assert_eq!(ms_or(None, Duration::from_secs(1)), Duration::from_secs(1));
    }

    #[test]
    fn pulse_rejects_bad_end_color() {
        let opts = PulseOptions {
            key: Some(LogiLedKey::A),
            end: Some("nope".into()),
            duration: None,
            interval: None,
            infinite: false,
        };
        assert!(cmd_pulse(&Config::default(), "red", opts).is_err());
    }
}
