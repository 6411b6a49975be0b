//! Speckle is a small animation engine for multi-point gradients.
//!
//! A host (for example [`GradientView`]) owns a handful of [`Speckle`]s: colored control
//! points with an eased position and an eased color transition. Once per rendered frame
//! the host asks a [`Director`] to step them; the director runs a pluggable
//! [`MotionStrategy`] over every speckle and publishes the enabled ones as
//! [`GradientStop`]s in the host's [`RenderParameters`].
//!
//! # Strategies
//!
//! - [`RandomWalk`]: each speckle drifts toward a random point in the unit square and
//!   picks a new one once it gets close.
//! - [`PerimeterMotion`]: speckles are spaced evenly by arc length around an inset
//!   rounded rectangle ([`PerimeterPath`]) and travel along it.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: hosts are shared through `Rc<RefCell<_>>`; the director keeps a
//!   weak reference and silently does nothing once the host is gone.
//! - **No IO in the frame loop**: scene files are read up front by [`SceneConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod color;
mod director;
mod foundation;
mod geometry;
mod scene;
mod session;

pub use animation::kinetic::{Kinetic, Kinetic2D};
pub use color::def::ColorDef;
pub use color::vector::{
    ColorSource, ColorSpace, ColorVector, Components, RawColor, RgbSpace, SpaceConverter,
};
pub use director::base::{Director, FramePhase, HostHandle, MotionStrategy, TickCtx};
pub use director::config::{
    Direction, PerimeterConfig, RandomWalkConfig, SceneConfig, StrategyConfig,
};
pub use director::perimeter::PerimeterMotion;
pub use director::random::RandomWalk;
pub use foundation::core::{
    BezPath, COLOR_SLOT, NUMERIC_EPSILON, Point, Rect, Vec2, clamp01, wrap_unit,
};
pub use foundation::error::{SpeckleError, SpeckleResult};
pub use foundation::math::Rng64;
pub use geometry::path::{PerimeterPath, Segment, SegmentKind};
pub use scene::host::{GradientView, SpeckleHost};
pub use scene::speckle::{GradientStop, RenderParameters, Speckle};
pub use session::animated::AnimatedGradient;
