//! Color-curve animation scheduler.
//!
//! Holds at most one whole-device animation plus at most one animation per
//! key. Each [`tick`](AnimationScheduler::tick) samples every bound curve at
//! its task's elapsed time, pushes the result to the device, and advances the
//! clock. Curves are held through weak handles: a curve dropped by its owner
//! makes its task inert until the task is stopped or replaced.

use std::collections::BTreeMap;

use crate::curve::CurveHandle;
use crate::device::LightingDevice;
use crate::keys::LogiLedKey;
use crate::led::LinearColor;

/// What an animation paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// Every key on the targeted devices.
    Global,
    /// A single key.
    Key(LogiLedKey),
}

/// One playing animation.
#[derive(Debug)]
struct AnimationTask {
    source: CurveHandle,
    elapsed: f32,
}

impl AnimationTask {
    fn new(source: CurveHandle) -> Self {
        AnimationTask {
            source,
            elapsed: 0.0,
        }
    }

    fn is_bound(&self) -> bool {
        self.source.strong_count() > 0
    }

    /// Sample at the current time and advance by `dt`. `None` if unbound.
    fn step(&mut self, dt: f32) -> Option<LinearColor> {
        let source = self.source.upgrade()?;
        let color = source.sample(self.elapsed);
        self.elapsed += dt;
        Some(color)
    }
}

/// Per-frame curve playback for the whole device and individual keys.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    global: Option<AnimationTask>,
    keys: BTreeMap<LogiLedKey, AnimationTask>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `source` on every key, replacing any running global animation.
    pub fn play_global(&mut self, source: CurveHandle) {
        self.global = Some(AnimationTask::new(source));
    }

    /// Play `source` on `key`, replacing that key's running animation.
    pub fn play_for_key(&mut self, key: LogiLedKey, source: CurveHandle) {
        self.keys.insert(key, AnimationTask::new(source));
    }

    /// Drop the global animation and every key animation.
    pub fn stop_all(&mut self) {
        self.global = None;
        self.keys.clear();
    }

    /// Drop the animation on `key`, if any.
    pub fn stop_key(&mut self, key: LogiLedKey) {
        self.keys.remove(&key);
    }

    /// Whether a future tick would emit anything.
    pub fn is_active(&self) -> bool {
        self.global.as_ref().is_some_and(AnimationTask::is_bound)
            || self.keys.values().any(AnimationTask::is_bound)
    }

    /// Advance every bound animation by `dt` seconds, emitting one lighting
    /// call per bound task. Device failures are logged and skipped.
    ///
    /// A negative or non-finite `dt` counts as zero; elapsed time never
    /// runs backwards.
    pub fn tick(&mut self, dt: f32, device: &impl LightingDevice) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if let Some(color) = self.global.as_mut().and_then(|task| task.step(dt)) {
            let percent = color.to_percent();
            if let Err(e) = device.set_lighting(percent) {
                log::debug!("failed to set lighting to {color}: {e}");
            }
        }

        for (&key, task) in self.keys.iter_mut() {
            let Some(color) = task.step(dt) else {
                continue;
            };
            let percent = color.to_percent();
            if let Err(e) = device.set_lighting_for_key(key.key_name(), percent) {
                log::debug!("failed to set lighting to {color} for key {key}: {e}");
            }
        }
    }

    /// Elapsed seconds of the animation on `target`, if one exists.
    pub fn elapsed(&self, target: AnimationTarget) -> Option<f32> {
        self.task(target).map(|t| t.elapsed)
    }

    /// Whether an animation exists on `target` and its curve is still alive.
    pub fn is_bound(&self, target: AnimationTarget) -> bool {
        self.task(target).is_some_and(AnimationTask::is_bound)
    }

    /// Targets that currently have an animation, bound or not. Global first,
    /// then keys in declaration order.
    pub fn targets(&self) -> Vec<AnimationTarget> {
        self.global
            .iter()
            .map(|_| AnimationTarget::Global)
            .chain(self.keys.keys().map(|&k| AnimationTarget::Key(k)))
            .collect()
    }

    fn task(&self, target: AnimationTarget) -> Option<&AnimationTask> {
        match target {
            AnimationTarget::Global => self.global.as_ref(),
            AnimationTarget::Key(key) => self.keys.get(&key),
        }
    }
}
