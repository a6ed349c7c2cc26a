//! LED session — device lifecycle plus the animation scheduler.
//!
//! A host creates one [`LedSession`] at startup, ticks it once per frame, and
//! ends it on shutdown. [`SessionSignal`] carries the host's "session ended"
//! event to any number of listeners without owning them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::curve::CurveHandle;
use crate::device::{DeviceError, LightingDevice};
use crate::keys::LogiLedKey;
use crate::led;
use crate::scheduler::AnimationScheduler;

// ── Host hooks ──

/// Something the host advances once per frame.
pub trait Tickable {
    /// Advance by `dt` seconds.
    fn tick(&mut self, dt: f32);

    /// Whether `tick` currently has any work to do.
    fn is_tickable(&self) -> bool;
}

/// Receiver for the host's end-of-session event.
pub trait SessionListener {
    fn on_session_end(&mut self);
}

/// Single-threaded "session ended" event source.
///
/// Listeners are held weakly; dropping a listener unsubscribes it.
#[derive(Default)]
pub struct SessionSignal<'a> {
    listeners: Vec<Weak<RefCell<dyn SessionListener + 'a>>>,
}

impl<'a> SessionSignal<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Weak<RefCell<dyn SessionListener + 'a>>) {
        self.listeners.push(listener);
    }

    /// Subscribe a shared listener of any concrete type.
    pub fn subscribe_rc<L: SessionListener + 'a>(&mut self, listener: &Rc<RefCell<L>>) {
        let weak: Weak<RefCell<L>> = Rc::downgrade(listener);
        self.subscribe(weak);
    }

    /// Live listener count. Dead listeners are pruned first.
    pub fn listener_count(&mut self) -> usize {
        self.listeners.retain(|l| l.strong_count() > 0);
        self.listeners.len()
    }

    /// Notify every live listener in subscription order. Returns how many
    /// were notified.
    pub fn end_session(&mut self) -> usize {
        self.listeners.retain(|l| l.strong_count() > 0);
        let mut notified = 0;
        for listener in &self.listeners {
            if let Some(listener) = listener.upgrade() {
                listener.borrow_mut().on_session_end();
                notified += 1;
            }
        }
        notified
    }
}

// ── Session ──

/// An initialized device and the animations playing on it.
///
/// The device is shut down exactly once, by [`shutdown`](Self::shutdown) or
/// on drop.
pub struct LedSession<D: LightingDevice> {
    device: D,
    scheduler: AnimationScheduler,
    shut_down: bool,
}

impl<D: LightingDevice> LedSession<D> {
    /// Initialize `device` and start a session on it.
    ///
    /// Returns `Err(Device(InitFailed))` if the SDK refuses to start; no
    /// session exists in that case.
    pub fn start(device: D) -> crate::error::Result<Self> {
        device.initialize().map_err(|e| match e {
            DeviceError::InitFailed(msg) => DeviceError::InitFailed(msg),
            other => DeviceError::InitFailed(other.to_string()),
        })?;
        match device.sdk_version() {
            Ok(v) => log::info!("LED SDK initialized (version {v})"),
            Err(_) => log::info!("LED SDK initialized (unknown version)"),
        }
        Ok(LedSession {
            device,
            scheduler: AnimationScheduler::new(),
            shut_down: false,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Play a curve on every key, replacing any running global animation.
    pub fn play_curve(&mut self, curve: CurveHandle) {
        self.scheduler.play_global(curve);
    }

    /// Play a curve on one key, replacing that key's running animation.
    pub fn play_curve_for_key(&mut self, key: LogiLedKey, curve: CurveHandle) {
        self.scheduler.play_for_key(key, curve);
    }

    /// Stop device effects and every curve animation.
    pub fn stop_effects(&mut self) {
        led::stop_effects(&self.device);
        self.scheduler.stop_all();
    }

    /// Stop device effects and the curve animation on `key`.
    pub fn stop_effects_for_key(&mut self, key: LogiLedKey) {
        led::stop_effects_for_key(&self.device, key);
        self.scheduler.stop_key(key);
    }

    /// Drop all animations and release the SDK. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.scheduler.stop_all();
        self.device.shutdown();
        log::info!("LED SDK shut down");
    }
}

impl<D: LightingDevice> Tickable for LedSession<D> {
    fn tick(&mut self, dt: f32) {
        self.scheduler.tick(dt, &self.device);
    }

    fn is_tickable(&self) -> bool {
        self.scheduler.is_active()
    }
}

impl<D: LightingDevice> SessionListener for LedSession<D> {
    fn on_session_end(&mut self) {
        log::info!("session ended, stopping animations");
        self.scheduler.stop_all();
    }
}

impl<D: LightingDevice> Drop for LedSession<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
