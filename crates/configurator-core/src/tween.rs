//! Time-sliced interpolation used by every animated transition.
//!
//! A [`Tween`] is advanced once per tick with the frame delta and reports the
//! interpolated value. Clearing the owning `Option<Tween<_>>` is how a
//! transition is cancelled.

use glam::{Vec3, Vec4};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    /// Zero-tangent ease at both ends (`3t^2 - 2t^3`).
    #[default]
    EaseInOut,
}

impl Curve {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

impl Lerp for Vec4 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    pub start: T,
    pub target: T,
    pub elapsed: f32,
    pub duration: f32,
    pub curve: Curve,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, target: T, duration: f32, curve: Curve) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
            curve,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.target;
        }
        self.start.lerp_to(self.target, self.curve.apply(self.progress()))
    }

    /// Step by `dt` and return the value for the new position.
    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = (self.elapsed + dt.as_secs_f32()).min(self.duration);
        self.value()
    }
}
