use crate::{
    director::base::{MotionStrategy, TickCtx},
    director::config::RandomWalkConfig,
    foundation::core::Point,
    foundation::math::Rng64,
    scene::speckle::Speckle,
};

/// Wanders each speckle between uniformly random points of the unit square.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    rng: Rng64,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomWalk {
    /// A new target is picked once either axis is closer than this to its target.
    pub const RETARGET_DISTANCE: f64 = 0.125;
    /// Fraction of `delta_time * speed` fed to the position per frame.
    pub const MOVE_FACTOR: f64 = 0.5;

    /// Random walk with a non-deterministic seed.
    pub fn new() -> Self {
        Self {
            rng: Rng64::from_entropy(),
        }
    }

    /// Reproducible random walk.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
        }
    }

    /// Build from scene configuration.
    pub fn from_config(config: &RandomWalkConfig) -> Self {
        config.seed.map_or_else(Self::new, Self::with_seed)
    }

    fn random_location(&mut self) -> Point {
        let x = self.rng.next_f64_01();
        let y = self.rng.next_f64_01();
        Point::new(x, y)
    }
}

impl MotionStrategy for RandomWalk {
    fn initialize_speckle(&mut self, speckle: &mut Speckle, _index: usize, ctx: &mut TickCtx) {
        let location = self.random_location();
        speckle.position.set_current(location);
        speckle.position.set_target(location);
        ctx.mark_modified();
    }

    fn update_speckle(&mut self, speckle: &mut Speckle, _index: usize, ctx: &mut TickCtx) {
        let move_delta = ctx.delta_time * ctx.speed * Self::MOVE_FACTOR;
        if move_delta > 0.0 {
            speckle.position.update(move_delta);
        }

        // Either axis being close is enough; both need not converge.
        let current = speckle.position.current();
        let target = speckle.position.target();
        if (current.x - target.x).abs() < Self::RETARGET_DISTANCE
            || (current.y - target.y).abs() < Self::RETARGET_DISTANCE
        {
            let location = self.random_location();
            speckle.position.set_target(location);
            ctx.mark_modified();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/random.rs"]
mod tests;
