use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::{
    color::vector::ColorVector,
    director::{
        base::{Director, MotionStrategy},
        config::SceneConfig,
    },
    foundation::error::SpeckleResult,
    scene::{host::GradientView, speckle::RenderParameters},
};

/// A [`GradientView`] paired with the director animating it.
///
/// The gradient owns the view; the director only holds a weak reference to it.
#[derive(Debug)]
pub struct AnimatedGradient<S> {
    view: Rc<RefCell<GradientView>>,
    director: Director<S>,
}

impl<S: MotionStrategy> AnimatedGradient<S> {
    /// Take ownership of `view` and attach a director running `strategy`.
    pub fn new(view: GradientView, strategy: S) -> Self {
        let view = Rc::new(RefCell::new(view));
        let mut director = Director::new(strategy);
        director.attach(&view);
        Self { view, director }
    }

    /// One-time setup; call before the first [`AnimatedGradient::tick`].
    pub fn initialize(&mut self) {
        self.director.initialize();
    }

    /// Advance one frame. Returns whether render input changed, then clears the flag.
    pub fn tick(&mut self, delta_time: f64) -> bool {
        self.director.update(delta_time);
        let mut view = self.view.borrow_mut();
        std::mem::take(&mut view.render_input_was_modified)
    }

    /// Assign palette colors to the view's speckles.
    pub fn set_palette(&mut self, colors: &[ColorVector]) {
        self.view.borrow_mut().set_palette(colors);
    }

    /// Borrow the hosted view.
    pub fn view(&self) -> Ref<'_, GradientView> {
        self.view.borrow()
    }

    /// Shared handle to the hosted view.
    pub fn view_handle(&self) -> &Rc<RefCell<GradientView>> {
        &self.view
    }

    /// Last published render parameters.
    pub fn parameters(&self) -> RenderParameters {
        self.view.borrow().parameters.clone()
    }

    /// The director.
    pub fn director(&self) -> &Director<S> {
        &self.director
    }

    /// The director, mutably (for [`Director::configure`]).
    pub fn director_mut(&mut self) -> &mut Director<S> {
        &mut self.director
    }
}

impl AnimatedGradient<Box<dyn MotionStrategy>> {
    /// Build view and strategy from a scene description.
    pub fn from_scene(scene: &SceneConfig) -> SpeckleResult<Self> {
        scene.validate()?;
        let palette = scene
            .palette
            .iter()
            .map(|c| ColorVector::from_color(c))
            .collect::<SpeckleResult<Vec<_>>>()?;

        let mut view = GradientView {
            speed: scene.speed,
            transition_speed: scene.transition_speed,
            bias: scene.bias,
            noise: scene.noise,
            ..GradientView::default()
        };
        view.set_palette(&palette);

        Ok(Self::new(view, scene.strategy.build()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animated.rs"]
mod tests;
