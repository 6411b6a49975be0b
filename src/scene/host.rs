use crate::{
    color::vector::ColorVector,
    foundation::core::COLOR_SLOT,
    scene::speckle::{RenderParameters, Speckle},
};

/// Surface a director reads from and publishes into.
///
/// The host owns the speckle storage. Directors only mutate it in place through
/// [`SpeckleHost::speckles_mut`] and never keep a copy.
pub trait SpeckleHost {
    /// Speckles in slot order.
    fn speckles(&self) -> &[Speckle];

    /// Mutable access to the speckle storage for in-place updates.
    fn speckles_mut(&mut self) -> &mut [Speckle];

    /// Global rate multiplier for motion.
    fn speed(&self) -> f64;

    /// Rate multiplier for color transitions. Defaults to [`SpeckleHost::speed`].
    fn transition_speed(&self) -> f64 {
        self.speed()
    }

    /// Renderer bias passed through unchanged.
    fn bias(&self) -> f64;

    /// Renderer noise passed through unchanged.
    fn noise(&self) -> f64;

    /// Whether visual output changed since the flag was last cleared.
    fn render_input_was_modified(&self) -> bool;

    /// Set or clear the render-input-modified flag.
    fn set_render_input_was_modified(&mut self, modified: bool);

    /// Replace the render-parameter slot wholesale.
    fn set_parameters(&mut self, parameters: RenderParameters);
}

/// Plain in-memory host holding speckles and the last published parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientView {
    /// Speckle storage.
    pub speckles: Vec<Speckle>,
    /// Motion rate multiplier.
    pub speed: f64,
    /// Color transition rate multiplier.
    pub transition_speed: f64,
    /// Renderer bias.
    pub bias: f64,
    /// Renderer noise.
    pub noise: f64,
    /// Set whenever a director changed visual output.
    pub render_input_was_modified: bool,
    /// Last published render parameters.
    pub parameters: RenderParameters,
}

impl Default for GradientView {
    fn default() -> Self {
        Self {
            speckles: vec![Speckle::default(); COLOR_SLOT],
            speed: 1.0,
            transition_speed: 1.0,
            bias: 0.01,
            noise: 0.0,
            render_input_was_modified: false,
            parameters: RenderParameters::default(),
        }
    }
}

impl GradientView {
    /// Host with [`COLOR_SLOT`] disabled speckles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `colors` to the leading slots and enable them; disable the rest.
    ///
    /// Slots whose color changes restart their color transition. Storage grows when
    /// `colors` has more entries than there are slots.
    pub fn set_palette(&mut self, colors: &[ColorVector]) {
        if colors.len() > self.speckles.len() {
            self.speckles.resize(colors.len(), Speckle::default());
        }
        for (idx, speckle) in self.speckles.iter_mut().enumerate() {
            match colors.get(idx) {
                Some(color) => {
                    if speckle.color != *color || !speckle.enabled {
                        speckle.color = *color;
                        speckle.transition_progress.set_current(0.0);
                    }
                    speckle.enabled = true;
                }
                None => speckle.enabled = false,
            }
        }
        self.render_input_was_modified = true;
    }
}

impl SpeckleHost for GradientView {
    fn speckles(&self) -> &[Speckle] {
        &self.speckles
    }

    fn speckles_mut(&mut self) -> &mut [Speckle] {
        &mut self.speckles
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn transition_speed(&self) -> f64 {
        self.transition_speed
    }

    fn bias(&self) -> f64 {
        self.bias
    }

    fn noise(&self) -> f64 {
        self.noise
    }

    fn render_input_was_modified(&self) -> bool {
        self.render_input_was_modified
    }

    fn set_render_input_was_modified(&mut self, modified: bool) {
        self.render_input_was_modified = modified;
    }

    fn set_parameters(&mut self, parameters: RenderParameters) {
        self.parameters = parameters;
    }
}
