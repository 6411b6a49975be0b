use crate::foundation::core::Point;

/// Scalar value that eases from `current` toward `target` as time is fed in.
///
/// Convergence is exponential: after `update(dt)` the remaining distance is scaled by
/// `exp(-rate * dt)`. The approach is monotonic, never overshoots, and snaps onto the
/// target once the remaining distance drops below [`Kinetic::SETTLE_EPSILON`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kinetic {
    current: f64,
    target: f64,
    rate: f64,
}

impl Default for Kinetic {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Kinetic {
    /// Convergence rate used by [`Kinetic::new`].
    pub const DEFAULT_RATE: f64 = 3.0;
    /// Distance under which `current` snaps to `target`.
    pub const SETTLE_EPSILON: f64 = 1e-9;

    /// Value at rest at `v`.
    pub fn new(v: f64) -> Self {
        Self::with_rate(v, Self::DEFAULT_RATE)
    }

    /// Value at rest at `v` with an explicit convergence rate (clamped to `>= 0`).
    pub fn with_rate(v: f64, rate: f64) -> Self {
        Self {
            current: v,
            target: v,
            rate: rate.max(0.0),
        }
    }

    /// Current value.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Convergence rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Jump the current value without touching the target.
    pub fn set_current(&mut self, v: f64) {
        self.current = v;
    }

    /// Retarget without touching the current value.
    pub fn set_target(&mut self, v: f64) {
        self.target = v;
    }

    /// Advance toward the target by `dt` units of time. Non-positive `dt` is ignored.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let remaining = (self.current - self.target) * (-self.rate * dt).exp();
        if remaining.abs() < Self::SETTLE_EPSILON {
            self.current = self.target;
        } else {
            self.current = self.target + remaining;
        }
    }
}

/// Pair of [`Kinetic`] values driving a 2D position.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kinetic2D {
    /// Horizontal component.
    pub x: Kinetic,
    /// Vertical component.
    pub y: Kinetic,
}

impl Kinetic2D {
    /// Position at rest at `p`.
    pub fn new(p: Point) -> Self {
        Self {
            x: Kinetic::new(p.x),
            y: Kinetic::new(p.y),
        }
    }

    /// Current position.
    pub fn current(&self) -> Point {
        Point::new(self.x.current(), self.y.current())
    }

    /// Target position.
    pub fn target(&self) -> Point {
        Point::new(self.x.target(), self.y.target())
    }

    /// Jump the current position.
    pub fn set_current(&mut self, p: Point) {
        self.x.set_current(p.x);
        self.y.set_current(p.y);
    }

    /// Retarget both axes.
    pub fn set_target(&mut self, p: Point) {
        self.x.set_target(p.x);
        self.y.set_target(p.y);
    }

    /// Advance both axes by `dt`.
    pub fn update(&mut self, dt: f64) {
        self.x.update(dt);
        self.y.update(dt);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/kinetic.rs"]
mod tests;
