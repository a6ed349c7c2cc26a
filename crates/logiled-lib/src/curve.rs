//! Time-parameterized color sources.
//!
//! A [`ColorCurveSource`] maps elapsed seconds to a [`LinearColor`]. The
//! scheduler only ever borrows sources through weak handles, so a curve can
//! be dropped by its owner while an animation still refers to it.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::{LogiLedError, Result};
use crate::led::LinearColor;

/// Anything that yields a color for a point in time.
///
/// Implementations must be pure functions of `elapsed` so that one source can
/// drive several animations at different offsets.
pub trait ColorCurveSource {
    fn sample(&self, elapsed: f32) -> LinearColor;
}

/// Non-owning reference to a shared color source.
pub type CurveHandle = Weak<dyn ColorCurveSource>;

/// Downgrade an owned source into a [`CurveHandle`].
pub fn handle<S: ColorCurveSource + 'static>(source: &Rc<S>) -> CurveHandle {
    let weak: Weak<S> = Rc::downgrade(source);
    weak
}

/// A handle that was never bound to any source.
pub fn unbound() -> CurveHandle {
    Weak::<ColorCurve>::new()
}

impl<F> ColorCurveSource for F
where
    F: Fn(f32) -> LinearColor,
{
    fn sample(&self, elapsed: f32) -> LinearColor {
        self(elapsed)
    }
}

/// Behavior of a [`ColorCurve`] outside its first/last key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Hold the end key's color.
    #[default]
    Constant,
    /// Continue the slope of the end segment. May leave `[0, 1]`.
    Linear,
    /// Wrap time back into the key range.
    Cycle,
}

impl std::fmt::Display for Extrapolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extrapolation::Constant => write!(f, "constant"),
            Extrapolation::Linear => write!(f, "linear"),
            Extrapolation::Cycle => write!(f, "cycle"),
        }
    }
}

/// A single keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorKey {
    pub time: f32,
    pub color: LinearColor,
}

/// Keyframed color curve with linear interpolation between keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCurve {
    keys: Vec<ColorKey>,
    extrapolation: Extrapolation,
}

impl ColorCurve {
    /// Build a curve from unordered keys.
    ///
    /// Keys are sorted by time. Fails on an empty key list or a non-finite time.
    pub fn new(mut keys: Vec<ColorKey>, extrapolation: Extrapolation) -> Result<Self> {
        if keys.is_empty() {
            return Err(LogiLedError::Curve("curve has no keys".into()));
        }
        if let Some(bad) = keys.iter().find(|k| !k.time.is_finite()) {
            return Err(LogiLedError::Curve(format!(
                "key time must be finite, got {}",
                bad.time
            )));
        }
        // Stable sort keeps the later of two equal-time keys last.
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(ColorCurve {
            keys,
            extrapolation,
        })
    }

    /// Curve that holds one color forever.
    pub fn constant(color: LinearColor) -> Self {
        ColorCurve {
            keys: vec![ColorKey { time: 0.0, color }],
            extrapolation: Extrapolation::Constant,
        }
    }

    pub fn keys(&self) -> &[ColorKey] {
        &self.keys
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Time of the first key to time of the last key.
    pub fn time_range(&self) -> (f32, f32) {
        let first = self.keys[0].time;
        let last = self.keys[self.keys.len() - 1].time;
        (first, last)
    }

    fn interpolate(&self, t: f32) -> LinearColor {
        // Index of the first key strictly after t.
        let upper = self.keys.partition_point(|k| k.time <= t);
        if upper == 0 {
            return self.keys[0].color;
        }
        if upper == self.keys.len() {
            return self.keys[upper - 1].color;
        }
        let lo = self.keys[upper - 1];
        let hi = self.keys[upper];
        let span = hi.time - lo.time;
        if span <= 0.0 {
            return hi.color;
        }
        lo.color.lerp(hi.color, (t - lo.time) / span)
    }

    fn extrapolate_linear(&self, t: f32) -> LinearColor {
        let (first, _) = self.time_range();
        let n = self.keys.len();
        if n < 2 {
            return self.keys[0].color;
        }
        let (a, b) = if t < first {
            (self.keys[0], self.keys[1])
        } else {
            (self.keys[n - 2], self.keys[n - 1])
        };
        let span = b.time - a.time;
        if span <= 0.0 {
            return if t < first { a.color } else { b.color };
        }
        a.color.lerp(b.color, (t - a.time) / span)
    }
}

impl ColorCurveSource for ColorCurve {
    fn sample(&self, elapsed: f32) -> LinearColor {
        let (first, last) = self.time_range();
        if elapsed >= first && elapsed <= last {
            return self.interpolate(elapsed);
        }
        match self.extrapolation {
            Extrapolation::Constant => self.interpolate(elapsed),
            Extrapolation::Linear => self.extrapolate_linear(elapsed),
            Extrapolation::Cycle => {
                let span = last - first;
                if span <= 0.0 || !elapsed.is_finite() {
                    return self.interpolate(elapsed);
                }
                self.interpolate(first + (elapsed - first).rem_euclid(span))
            }
        }
    }
}
