use crate::{
    animation::kinetic::{Kinetic, Kinetic2D},
    color::vector::ColorVector,
    foundation::core::Point,
};

/// One animated gradient control point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Speckle {
    /// Only enabled speckles contribute gradient stops.
    pub enabled: bool,
    /// Target color of this speckle.
    pub color: ColorVector,
    /// Color transition progress in `[0, 1]`, driven toward 1 by the director.
    pub transition_progress: Kinetic,
    /// Position in the unit square; its target belongs to the active motion strategy.
    pub position: Kinetic2D,
}

impl Default for Speckle {
    fn default() -> Self {
        Self {
            enabled: false,
            color: ColorVector::default(),
            transition_progress: Kinetic::new(0.0),
            position: Kinetic2D::new(Point::new(0.5, 0.5)),
        }
    }
}

impl Speckle {
    /// Snapshot this speckle as a gradient stop at its current position.
    pub fn gradient_stop(&self) -> GradientStop {
        GradientStop {
            color: self.color,
            position: self.position.current(),
        }
    }
}

/// `(color, position)` pair consumed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: ColorVector,
    /// Stop position in the unit square.
    pub position: Point,
}

/// Render inputs published by the director once per frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderParameters {
    /// Stops from enabled speckles, in slot order.
    pub points: Vec<GradientStop>,
    /// Pass-through renderer bias.
    pub bias: f64,
    /// Pass-through renderer noise.
    pub noise: f64,
}
