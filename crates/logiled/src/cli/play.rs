//! `play` subcommand — run a config curve through the animation scheduler.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use logiled_lib::curve;
use logiled_lib::session::{SessionSignal, Tickable};

use super::{Config, LogiLedKey, RUNNING, Result, open_session};

pub(super) fn cmd_play(
    config: &Config,
    name: &str,
    key: Option<LogiLedKey>,
    seconds: Option<f32>,
) -> Result<()> {
    let source = Rc::new(config.curve(name)?);
    let length = seconds.unwrap_or_else(|| source.time_range().1).max(0.0);

    let session = Rc::new(RefCell::new(open_session(config)?));
    let mut signal = SessionSignal::new();
    signal.subscribe_rc(&session);

    match key {
        Some(key) => session
            .borrow_mut()
            .play_curve_for_key(key, curve::handle(&source)),
        None => session.borrow_mut().play_curve(curve::handle(&source)),
    }
    log::info!("playing curve {name} for {length:.2}s");

    let frames = run_frames(&session, config.frame_interval(), length);

    // Stops the animation; the session's drop releases the device.
    signal.end_session();
    println!("Played {name} ({frames} frames)");
    Ok(())
}

/// Tick `target` once per `frame` until `length` seconds pass, Ctrl+C is
/// pressed, or it has nothing left to tick. Returns the number of frames.
fn run_frames<T: Tickable>(target: &RefCell<T>, frame: Duration, length: f32) -> u64 {
    let start = Instant::now();
    let mut last = start;
    let mut frames = 0u64;
    while target.borrow().is_tickable() {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;
        target.borrow_mut().tick(dt);
        frames += 1;

        if !RUNNING.load(Ordering::SeqCst) || start.elapsed().as_secs_f32() >= length {
            break;
        }
        std::thread::sleep(frame);
    }
    frames
}
