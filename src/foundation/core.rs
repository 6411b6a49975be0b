pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Number of speckle slots a gradient host carries by default.
pub const COLOR_SLOT: usize = 8;

/// Tolerance used for geometric and progress comparisons.
pub const NUMERIC_EPSILON: f64 = 1e-6;

/// Clamp `v` into `[0, 1]`.
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Wrap a normalized progress value into `[0, 1)`.
pub fn wrap_unit(v: f64) -> f64 {
    let r = v % 1.0;
    if r < 0.0 {
        // -1e-18 % 1.0 + 1.0 rounds to 1.0
        let wrapped = r + 1.0;
        if wrapped >= 1.0 { 0.0 } else { wrapped }
    } else {
        r
    }
}
