/// Convenience result type used across the speckle engine.
pub type SpeckleResult<T> = Result<T, SpeckleError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpeckleError {
    /// Invalid user-provided parameters or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// No component extraction strategy produced usable color channels.
    #[error("color error: {0}")]
    Color(String),

    /// Errors while reading or decoding configuration files.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpeckleError {
    /// Build a [`SpeckleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpeckleError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`SpeckleError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
