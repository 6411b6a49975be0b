use kurbo::{Line, ParamCurve as _};

use crate::foundation::core::{BezPath, NUMERIC_EPSILON, Point, Rect, Vec2, clamp01, wrap_unit};

/// Geometry of one perimeter segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentKind {
    /// Straight run.
    Line(Line),
    /// Circular arc swept from `start_angle` to `end_angle` (radians, y-down).
    Arc {
        /// Arc center.
        center: Point,
        /// Arc radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
    },
}

/// A perimeter segment with its precomputed arc length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Segment geometry.
    pub kind: SegmentKind,
    /// Arc length of the segment.
    pub length: f64,
}

impl Segment {
    /// Straight segment, or `None` when it would be degenerate.
    pub fn line(start: Point, end: Point) -> Option<Self> {
        let length = (end - start).hypot();
        (length > NUMERIC_EPSILON).then_some(Self {
            kind: SegmentKind::Line(Line::new(start, end)),
            length,
        })
    }

    /// Arc segment, or `None` when the radius or sweep is degenerate.
    pub fn arc(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Option<Self> {
        let sweep = end_angle - start_angle;
        if radius <= NUMERIC_EPSILON || sweep <= NUMERIC_EPSILON {
            return None;
        }
        Some(Self {
            kind: SegmentKind::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            },
            length: radius * sweep,
        })
    }

    /// First point of the segment.
    pub fn start_point(&self) -> Point {
        self.point_at(0.0)
    }

    /// Last point of the segment.
    pub fn end_point(&self) -> Point {
        self.point_at(1.0)
    }

    /// Point at `ratio` of the segment's length; `ratio` is clamped into `[0, 1]`.
    pub fn point_at(&self, ratio: f64) -> Point {
        let t = clamp01(ratio);
        match self.kind {
            SegmentKind::Line(line) => line.eval(t),
            SegmentKind::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => point_on_arc(center, radius, start_angle + (end_angle - start_angle) * t),
        }
    }
}

fn point_on_arc(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Closed rounded-rectangle perimeter inside the unit square, parameterized by arc length.
#[derive(Clone, Debug, PartialEq)]
pub struct PerimeterPath {
    segments: Vec<Segment>,
    total_length: f64,
}

impl Default for PerimeterPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl PerimeterPath {
    /// Path with no segments. Sampling it yields the unit-square center.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            total_length: 1.0,
        }
    }

    /// Build from an explicit segment list.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            return Self::empty();
        }
        let total = segments.iter().map(|s| s.length).sum::<f64>();
        Self {
            segments,
            total_length: total.max(NUMERIC_EPSILON),
        }
    }

    /// Rounded rectangle inset by `inset` from every edge of the unit square.
    ///
    /// The corner radius is limited to half the shorter side. Winding starts at the top
    /// edge and runs top, right, bottom, left (clockwise on a y-down canvas).
    pub fn rounded_rect(inset: f64, corner_radius: f64) -> Self {
        let bounds = Rect::new(inset, inset, 1.0 - inset, 1.0 - inset);
        let width = bounds.width().max(0.0);
        let height = bounds.height().max(0.0);
        if width <= NUMERIC_EPSILON || height <= NUMERIC_EPSILON {
            return Self::empty();
        }

        let radius = corner_radius.max(0.0).min(width.min(height) / 2.0);
        let (left, top, right, bottom) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);

        let candidates = if radius <= NUMERIC_EPSILON {
            let top_left = Point::new(left, top);
            let top_right = Point::new(right, top);
            let bottom_right = Point::new(right, bottom);
            let bottom_left = Point::new(left, bottom);
            vec![
                Segment::line(top_left, top_right),
                Segment::line(top_right, bottom_right),
                Segment::line(bottom_right, bottom_left),
                Segment::line(bottom_left, top_left),
            ]
        } else {
            use std::f64::consts::{FRAC_PI_2, PI, TAU};
            vec![
                Segment::line(
                    Point::new(left + radius, top),
                    Point::new(right - radius, top),
                ),
                Segment::arc(
                    Point::new(right - radius, top + radius),
                    radius,
                    1.5 * PI,
                    TAU,
                ),
                Segment::line(
                    Point::new(right, top + radius),
                    Point::new(right, bottom - radius),
                ),
                Segment::arc(
                    Point::new(right - radius, bottom - radius),
                    radius,
                    0.0,
                    FRAC_PI_2,
                ),
                Segment::line(
                    Point::new(right - radius, bottom),
                    Point::new(left + radius, bottom),
                ),
                Segment::arc(
                    Point::new(left + radius, bottom - radius),
                    radius,
                    FRAC_PI_2,
                    PI,
                ),
                Segment::line(
                    Point::new(left, bottom - radius),
                    Point::new(left, top + radius),
                ),
                Segment::arc(
                    Point::new(left + radius, top + radius),
                    radius,
                    PI,
                    1.5 * PI,
                ),
            ]
        };

        let path = Self::from_segments(candidates.into_iter().flatten().collect());
        tracing::debug!(
            inset,
            radius,
            segments = path.segments.len(),
            total_length = path.total_length,
            "built perimeter path"
        );
        path
    }

    /// Segments in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sum of segment lengths, never zero.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Map normalized progress (wrapped into `[0, 1)`) to a point on the perimeter.
    pub fn sample(&self, progress: f64) -> Point {
        let Some(last) = self.segments.last() else {
            return Point::new(0.5, 0.5);
        };

        let mut remaining = wrap_unit(progress) * self.total_length;
        for segment in &self.segments {
            if segment.length <= NUMERIC_EPSILON {
                continue;
            }
            if remaining <= segment.length {
                return segment.point_at(remaining / segment.length);
            }
            remaining -= segment.length;
        }
        last.end_point()
    }

    /// Export the perimeter as a closed bezier path, approximating arcs within `tolerance`.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.segments.first() else {
            return path;
        };

        path.move_to(first.start_point());
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Line(line) => path.line_to(line.p1),
                SegmentKind::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let arc = kurbo::Arc {
                        center,
                        radii: Vec2::new(radius, radius),
                        start_angle,
                        sweep_angle: end_angle - start_angle,
                        x_rotation: 0.0,
                    };
                    arc.to_cubic_beziers(tolerance, |p1, p2, p3| path.curve_to(p1, p2, p3));
                }
            }
        }
        path.close_path();
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
