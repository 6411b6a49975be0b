use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    color::def::ColorDef,
    director::{base::MotionStrategy, perimeter::PerimeterMotion, random::RandomWalk},
    foundation::error::{SpeckleError, SpeckleResult},
};

/// Travel direction along the perimeter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Top edge left to right, then down the right edge.
    #[default]
    Clockwise,
    /// The reverse.
    CounterClockwise,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// Parameters of the perimeter motion strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerimeterConfig {
    /// Distance from the unit-square edges; `<= 1`, negative extends outward.
    pub inset: f64,
    /// Corner radius, clamped into `[0, 0.5]`.
    pub corner_radius: f64,
    /// Travel direction.
    pub direction: Direction,
    /// Perimeter turns per unit of time (before host speed).
    pub movement_rate: f64,
    /// How quickly positions chase their perimeter targets.
    pub position_response_rate: f64,
}

impl Default for PerimeterConfig {
    fn default() -> Self {
        Self {
            inset: 0.1,
            corner_radius: 0.18,
            direction: Direction::Clockwise,
            movement_rate: 0.25,
            position_response_rate: 0.5,
        }
    }
}

impl PerimeterConfig {
    /// Reject values the strategy would treat as a programmer error.
    pub fn validate(&self) -> SpeckleResult<()> {
        if !(self.inset <= 1.0) {
            return Err(SpeckleError::validation(format!(
                "inset must be <= 1 (use negative values to extend outside the unit square), got {}",
                self.inset
            )));
        }
        for (name, v) in [
            ("corner_radius", self.corner_radius),
            ("movement_rate", self.movement_rate),
            ("position_response_rate", self.position_response_rate),
        ] {
            if !v.is_finite() {
                return Err(SpeckleError::validation(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of the random-walk strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    /// Fixed seed for reproducible runs; randomly seeded when absent.
    pub seed: Option<u64>,
}

/// Motion strategy selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// [`RandomWalk`].
    RandomWalk(RandomWalkConfig),
    /// [`PerimeterMotion`].
    Perimeter(PerimeterConfig),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Perimeter(PerimeterConfig::default())
    }
}

impl StrategyConfig {
    /// Instantiate the configured strategy.
    pub fn build(&self) -> SpeckleResult<Box<dyn MotionStrategy>> {
        Ok(match self {
            Self::RandomWalk(cfg) => Box::new(RandomWalk::from_config(cfg)),
            Self::Perimeter(cfg) => Box::new(PerimeterMotion::try_new(cfg.clone())?),
        })
    }
}

/// Headless scene description: host parameters, palette and strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Host motion rate multiplier.
    pub speed: f64,
    /// Host color transition rate multiplier.
    pub transition_speed: f64,
    /// Renderer bias.
    pub bias: f64,
    /// Renderer noise.
    pub noise: f64,
    /// Speckle colors, one enabled speckle per entry.
    pub palette: Vec<ColorDef>,
    /// Motion strategy.
    pub strategy: StrategyConfig,
    /// Simulated frames per second.
    pub fps: f64,
    /// Number of frames to simulate.
    pub frames: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            transition_speed: 1.0,
            bias: 0.01,
            noise: 0.0,
            palette: vec![
                ColorDef::rgba(0.98, 0.36, 0.45, 1.0),
                ColorDef::rgba(0.99, 0.73, 0.34, 1.0),
                ColorDef::rgba(0.33, 0.78, 0.93, 1.0),
                ColorDef::rgba(0.54, 0.42, 0.93, 1.0),
            ],
            strategy: StrategyConfig::default(),
            fps: 60.0,
            frames: 120,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON scene.
    pub fn from_json_str(s: &str) -> SpeckleResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SpeckleError::config(format!("parse scene: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON scene file.
    pub fn from_path(path: impl AsRef<Path>) -> SpeckleResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| SpeckleError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    /// Check host parameters and the strategy configuration.
    pub fn validate(&self) -> SpeckleResult<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SpeckleError::validation(format!(
                "fps must be > 0, got {}",
                self.fps
            )));
        }
        for (name, v) in [
            ("speed", self.speed),
            ("transition_speed", self.transition_speed),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SpeckleError::validation(format!(
                    "{name} must be >= 0, got {v}"
                )));
            }
        }
        if let StrategyConfig::Perimeter(cfg) = &self.strategy {
            cfg.validate()?;
        }
        Ok(())
    }

    /// Duration of one simulated frame.
    pub fn frame_delta(&self) -> f64 {
        1.0 / self.fps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/config.rs"]
mod tests;
