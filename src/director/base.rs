use std::{
    cell::{RefCell, RefMut},
    rc::{Rc, Weak},
};

use crate::scene::{
    host::SpeckleHost,
    speckle::{RenderParameters, Speckle},
};

/// Which director entry point is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePhase {
    /// One-time setup via [`Director::initialize`].
    Initialize,
    /// Per-frame step via [`Director::update`].
    Update,
}

/// Per-frame values handed to strategy hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickCtx {
    /// Elapsed time for this frame (zero during initialization).
    pub delta_time: f64,
    /// Host motion rate multiplier.
    pub speed: f64,
    modified: bool,
}

impl TickCtx {
    /// Context for one frame.
    pub fn new(delta_time: f64, speed: f64) -> Self {
        Self {
            delta_time,
            speed,
            modified: false,
        }
    }

    /// Record that visual output changed this frame.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Whether any hook recorded a visual change.
    pub fn render_input_modified(&self) -> bool {
        self.modified
    }
}

/// Pluggable motion algorithm driven by a [`Director`].
///
/// Every hook defaults to a no-op.
pub trait MotionStrategy {
    /// Called after the director binds a host.
    fn on_attach(&mut self, _host: &dyn SpeckleHost) {}

    /// Called before the director releases its host.
    fn on_detach(&mut self) {}

    /// Runs before the per-speckle pass with a read-only view of all speckles.
    fn begin_frame(&mut self, _phase: FramePhase, _speckles: &[Speckle], _ctx: &mut TickCtx) {}

    /// Set up one speckle during [`Director::initialize`].
    fn initialize_speckle(&mut self, _speckle: &mut Speckle, _index: usize, _ctx: &mut TickCtx) {}

    /// Advance one speckle during [`Director::update`].
    fn update_speckle(&mut self, _speckle: &mut Speckle, _index: usize, _ctx: &mut TickCtx) {}

    /// Runs after the per-speckle pass.
    fn end_frame(&mut self, _phase: FramePhase) {}

    /// Report (and clear) visual changes caused by parameter setters.
    fn take_render_input_modified(&mut self) -> bool {
        false
    }
}

impl<S: MotionStrategy + ?Sized> MotionStrategy for Box<S> {
    fn on_attach(&mut self, host: &dyn SpeckleHost) {
        (**self).on_attach(host);
    }

    fn on_detach(&mut self) {
        (**self).on_detach();
    }

    fn begin_frame(&mut self, phase: FramePhase, speckles: &[Speckle], ctx: &mut TickCtx) {
        (**self).begin_frame(phase, speckles, ctx);
    }

    fn initialize_speckle(&mut self, speckle: &mut Speckle, index: usize, ctx: &mut TickCtx) {
        (**self).initialize_speckle(speckle, index, ctx);
    }

    fn update_speckle(&mut self, speckle: &mut Speckle, index: usize, ctx: &mut TickCtx) {
        (**self).update_speckle(speckle, index, ctx);
    }

    fn end_frame(&mut self, phase: FramePhase) {
        (**self).end_frame(phase);
    }

    fn take_render_input_modified(&mut self) -> bool {
        (**self).take_render_input_modified()
    }
}

/// Shared handle to a host as stored by its owner.
pub type HostHandle = Rc<RefCell<dyn SpeckleHost>>;

/// Drives speckle lifecycle for a host and publishes its gradient stops.
///
/// The director holds only a weak reference to its host. When the host is gone, or was
/// never attached, every entry point silently does nothing.
pub struct Director<S> {
    host: Option<Weak<RefCell<dyn SpeckleHost>>>,
    strategy: S,
}

impl<S: std::fmt::Debug> std::fmt::Debug for Director<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("attached", &self.is_attached())
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl<S> Director<S> {
    /// Whether a live host is bound.
    pub fn is_attached(&self) -> bool {
        self.host.as_ref().is_some_and(|h| h.strong_count() > 0)
    }

    fn upgrade(&self) -> Option<HostHandle> {
        self.host.as_ref().and_then(Weak::upgrade)
    }
}

impl<S: MotionStrategy> Director<S> {
    /// Detached director running `strategy`.
    pub fn new(strategy: S) -> Self {
        Self {
            host: None,
            strategy,
        }
    }

    /// Bind a non-owning reference to `host`, replacing any previous one.
    pub fn attach<H: SpeckleHost + 'static>(&mut self, host: &Rc<RefCell<H>>) {
        let handle: HostHandle = host.clone();
        self.attach_handle(&handle);
    }

    /// Bind a non-owning reference to an already type-erased host.
    pub fn attach_handle(&mut self, host: &HostHandle) {
        self.host = Some(Rc::downgrade(host));
        if let Ok(host) = host.try_borrow() {
            self.strategy.on_attach(&*host);
        }
    }

    /// Release the host reference.
    pub fn detach(&mut self) {
        if self.host.take().is_some() {
            self.strategy.on_detach();
        }
    }

    /// Active motion strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Change strategy parameters; visual changes are flagged on the host right away.
    pub fn configure<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let out = f(&mut self.strategy);
        // Left pending for the next frame when there is no host to flag.
        let Some(host) = self.upgrade() else {
            return out;
        };
        if let Some(mut host) = borrow_host(&host) {
            if self.strategy.take_render_input_modified() {
                host.set_render_input_was_modified(true);
            }
        }
        out
    }

    /// Reset every speckle through the strategy and publish gradient stops.
    #[tracing::instrument(skip(self))]
    pub fn initialize(&mut self) {
        let Some(host) = self.upgrade() else {
            return;
        };
        let Some(mut host) = borrow_host(&host) else {
            return;
        };

        let mut ctx = TickCtx::new(0.0, host.speed());
        self.strategy
            .begin_frame(FramePhase::Initialize, host.speckles(), &mut ctx);
        for (index, speckle) in host.speckles_mut().iter_mut().enumerate() {
            speckle.transition_progress.set_target(1.0);
            self.strategy.initialize_speckle(speckle, index, &mut ctx);
        }
        self.strategy.end_frame(FramePhase::Initialize);

        finish_frame(&mut *host, ctx);
    }

    /// Advance color transitions and motion by `delta_time`, then publish gradient stops.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, delta_time: f64) {
        let Some(host) = self.upgrade() else {
            return;
        };
        let Some(mut host) = borrow_host(&host) else {
            return;
        };

        let transition_step = delta_time * host.transition_speed();
        let mut ctx = TickCtx::new(delta_time, host.speed());
        self.strategy
            .begin_frame(FramePhase::Update, host.speckles(), &mut ctx);
        for (index, speckle) in host.speckles_mut().iter_mut().enumerate() {
            if speckle.transition_progress.current() < 1.0 {
                speckle.transition_progress.update(transition_step);
            }
            self.strategy.update_speckle(speckle, index, &mut ctx);
        }
        self.strategy.end_frame(FramePhase::Update);

        finish_frame(&mut *host, ctx);
    }

    /// Recompute gradient stops from enabled speckles and publish them to the host.
    pub fn update_color_stops(&self) {
        let Some(host) = self.upgrade() else {
            return;
        };
        if let Some(mut host) = borrow_host(&host) {
            publish_color_stops(&mut *host);
        }
    }
}

fn borrow_host(host: &HostHandle) -> Option<RefMut<'_, dyn SpeckleHost>> {
    match host.try_borrow_mut() {
        Ok(h) => Some(h),
        Err(_) => {
            tracing::warn!("speckle host is already borrowed; skipping director step");
            None
        }
    }
}

fn finish_frame(host: &mut dyn SpeckleHost, ctx: TickCtx) {
    if ctx.render_input_modified() {
        host.set_render_input_was_modified(true);
    }
    publish_color_stops(host);
}

fn publish_color_stops(host: &mut dyn SpeckleHost) {
    let points = host
        .speckles()
        .iter()
        .filter(|s| s.enabled)
        .map(Speckle::gradient_stop)
        .collect();
    let parameters = RenderParameters {
        points,
        bias: host.bias(),
        noise: host.noise(),
    };
    host.set_parameters(parameters);
}

#[cfg(test)]
#[path = "../../tests/unit/director/base.rs"]
mod tests;
