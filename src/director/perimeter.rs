use crate::{
    director::base::{FramePhase, MotionStrategy, TickCtx},
    director::config::{Direction, PerimeterConfig},
    foundation::core::{COLOR_SLOT, NUMERIC_EPSILON, Point, wrap_unit},
    foundation::error::SpeckleResult,
    geometry::path::PerimeterPath,
    scene::speckle::Speckle,
};

/// Moves speckles along an inset rounded rectangle, evenly spaced by arc length.
///
/// Each participating speckle owns a progress value in `[0, 1)`. Progress advances by
/// `delta_time * speed * movement_rate` per frame in the configured direction and is
/// mapped onto the perimeter; positions then chase those points at
/// `position_response_rate`. Any change to the geometry or to the set of enabled
/// speckles snaps positions onto the path on the next frame.
#[derive(Clone, Debug)]
pub struct PerimeterMotion {
    direction: Direction,
    inset: f64,
    corner_radius: f64,
    movement_rate: f64,
    position_response_rate: f64,

    progress_state: Vec<f64>,
    distribution_indices: Vec<usize>,
    distribution_dirty: bool,
    needs_position_refresh: bool,

    path: PerimeterPath,
    path_needs_update: bool,

    render_input_modified: bool,
}

impl Default for PerimeterMotion {
    fn default() -> Self {
        Self::new(PerimeterConfig::default())
    }
}

impl PerimeterMotion {
    /// Build from `config`.
    ///
    /// # Panics
    ///
    /// Panics when `config.inset > 1` (or NaN). Use [`PerimeterMotion::try_new`] for
    /// untrusted input.
    pub fn new(config: PerimeterConfig) -> Self {
        assert_inset(config.inset);
        Self {
            direction: config.direction,
            inset: clamp_inset(config.inset),
            corner_radius: clamp_radius(config.corner_radius),
            movement_rate: config.movement_rate.max(0.0),
            position_response_rate: config.position_response_rate.max(0.0),
            progress_state: vec![0.0; COLOR_SLOT],
            distribution_indices: Vec::new(),
            distribution_dirty: true,
            needs_position_refresh: true,
            path: PerimeterPath::empty(),
            path_needs_update: true,
            render_input_modified: false,
        }
    }

    /// Validate `config` and build.
    pub fn try_new(config: PerimeterConfig) -> SpeckleResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Current parameters as a config value.
    pub fn config(&self) -> PerimeterConfig {
        PerimeterConfig {
            inset: self.inset,
            corner_radius: self.corner_radius,
            direction: self.direction,
            movement_rate: self.movement_rate,
            position_response_rate: self.position_response_rate,
        }
    }

    /// Travel direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change the travel direction.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction {
            return;
        }
        self.direction = direction;
        self.render_input_modified = true;
    }

    /// Inset from the unit-square edges.
    pub fn inset(&self) -> f64 {
        self.inset
    }

    /// Change the inset. Negative values extend the path outside the unit square.
    ///
    /// # Panics
    ///
    /// Panics when `inset > 1` or `inset` is NaN.
    pub fn set_inset(&mut self, inset: f64) {
        assert_inset(inset);
        let clamped = clamp_inset(inset);
        if clamped == self.inset {
            return;
        }
        self.inset = clamped;
        self.distribution_dirty = true;
        self.path_needs_update = true;
        self.needs_position_refresh = true;
        self.render_input_modified = true;
    }

    /// Corner radius as configured (before the build-time limit).
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Change the corner radius; clamped into `[0, 0.5]`.
    pub fn set_corner_radius(&mut self, corner_radius: f64) {
        let clamped = clamp_radius(corner_radius);
        if clamped == self.corner_radius {
            return;
        }
        self.corner_radius = clamped;
        self.path_needs_update = true;
        self.needs_position_refresh = true;
        self.render_input_modified = true;
    }

    /// Progress rate along the perimeter.
    pub fn movement_rate(&self) -> f64 {
        self.movement_rate
    }

    /// Change the progress rate; negative values clamp to zero.
    pub fn set_movement_rate(&mut self, rate: f64) {
        let clamped = rate.max(0.0);
        if clamped == self.movement_rate {
            return;
        }
        self.movement_rate = clamped;
        self.render_input_modified = true;
    }

    /// Position catch-up rate.
    pub fn position_response_rate(&self) -> f64 {
        self.position_response_rate
    }

    /// Change the position catch-up rate; negative values clamp to zero.
    pub fn set_position_response_rate(&mut self, rate: f64) {
        let clamped = rate.max(0.0);
        if clamped == self.position_response_rate {
            return;
        }
        self.position_response_rate = clamped;
        self.render_input_modified = true;
    }

    /// Stored progress for speckle slot `index`.
    pub fn progress(&self, index: usize) -> Option<f64> {
        self.progress_state.get(index).copied()
    }

    /// Stored progress for every slot.
    pub fn progress_state(&self) -> &[f64] {
        &self.progress_state
    }

    /// Slots currently sharing the perimeter, in spacing order.
    pub fn distribution_indices(&self) -> &[usize] {
        &self.distribution_indices
    }

    /// The perimeter, rebuilt first if a geometry parameter changed.
    pub fn path(&mut self) -> &PerimeterPath {
        self.ensure_path();
        &self.path
    }

    /// Point on the perimeter at normalized `progress`.
    pub fn sample_point(&mut self, progress: f64) -> Point {
        self.path().sample(progress)
    }

    fn ensure_path(&mut self) {
        if !self.path_needs_update {
            return;
        }
        self.path = PerimeterPath::rounded_rect(self.inset, self.corner_radius);
        self.path_needs_update = false;
    }

    fn ensure_progress_capacity(&mut self, count: usize) {
        if count > self.progress_state.len() {
            self.progress_state.resize(count, 0.0);
        }
    }

    pub(crate) fn refresh_distribution(
        &mut self,
        speckles: &[Speckle],
        force: bool,
        ctx: &mut TickCtx,
    ) {
        if force {
            self.distribution_dirty = true;
        }
        self.ensure_path();
        self.ensure_progress_capacity(speckles.len());

        let enabled: Vec<usize> = speckles
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.enabled.then_some(idx))
            .collect();
        let desired = if enabled.is_empty() {
            (0..speckles.len()).collect()
        } else {
            enabled
        };

        if !self.distribution_dirty && desired == self.distribution_indices {
            return;
        }

        self.distribution_indices = desired;
        let total = self.distribution_indices.len().max(1) as f64;
        for (offset, &index) in self.distribution_indices.iter().enumerate() {
            self.progress_state[index] = offset as f64 / total;
        }
        tracing::debug!(
            participants = self.distribution_indices.len(),
            "redistributed speckles along perimeter"
        );

        self.needs_position_refresh = true;
        self.distribution_dirty = false;
        ctx.mark_modified();
    }

    pub(crate) fn advance_progress(&mut self, speckle_count: usize, ctx: &TickCtx) {
        let delta = ctx.delta_time * ctx.speed * self.movement_rate * self.direction.sign();
        if delta.abs() <= NUMERIC_EPSILON {
            return;
        }
        if self.distribution_indices.is_empty() {
            let count = speckle_count.min(self.progress_state.len());
            for p in &mut self.progress_state[..count] {
                *p = wrap_unit(*p + delta);
            }
        } else {
            for &index in &self.distribution_indices {
                self.progress_state[index] = wrap_unit(self.progress_state[index] + delta);
            }
        }
    }
}

impl MotionStrategy for PerimeterMotion {
    fn begin_frame(&mut self, phase: FramePhase, speckles: &[Speckle], ctx: &mut TickCtx) {
        if std::mem::take(&mut self.render_input_modified) {
            ctx.mark_modified();
        }
        self.ensure_progress_capacity(speckles.len());
        match phase {
            FramePhase::Initialize => self.refresh_distribution(speckles, true, ctx),
            FramePhase::Update => {
                self.refresh_distribution(speckles, false, ctx);
                self.advance_progress(speckles.len(), ctx);
            }
        }
    }

    fn initialize_speckle(&mut self, speckle: &mut Speckle, index: usize, _ctx: &mut TickCtx) {
        let Some(progress) = self.progress(index) else {
            return;
        };
        let location = self.sample_point(progress);
        speckle.position.set_current(location);
        speckle.position.set_target(location);
    }

    fn update_speckle(&mut self, speckle: &mut Speckle, index: usize, ctx: &mut TickCtx) {
        let Some(progress) = self.progress(index) else {
            return;
        };
        let target = self.sample_point(progress);

        if self.needs_position_refresh {
            speckle.position.set_current(target);
            speckle.position.set_target(target);
            ctx.mark_modified();
            return;
        }

        let previous = speckle.position.target();
        if (previous.x - target.x).abs() > NUMERIC_EPSILON
            || (previous.y - target.y).abs() > NUMERIC_EPSILON
        {
            speckle.position.set_target(target);
            ctx.mark_modified();
        }

        let move_delta = ctx.delta_time * ctx.speed * self.position_response_rate;
        if move_delta > 0.0 {
            speckle.position.update(move_delta);
            ctx.mark_modified();
        }
    }

    fn end_frame(&mut self, _phase: FramePhase) {
        self.needs_position_refresh = false;
    }

    fn take_render_input_modified(&mut self) -> bool {
        std::mem::take(&mut self.render_input_modified)
    }
}

fn assert_inset(inset: f64) {
    assert!(
        inset <= 1.0,
        "inset must be <= 1; use negative values to extend outside the unit square (got {inset})"
    );
}

fn clamp_inset(inset: f64) -> f64 {
    if inset >= 0.0 { inset.clamp(0.0, 1.0) } else { inset }
}

fn clamp_radius(radius: f64) -> f64 {
    radius.clamp(0.0, 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/director/perimeter.rs"]
mod tests;
