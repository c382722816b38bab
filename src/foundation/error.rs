/// Convenience result type used across microcosm.
pub type MicrocosmResult<T> = Result<T, MicrocosmError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MicrocosmError {
    /// Invalid user-provided configuration (colors, scene ids, capture settings).
    #[error("validation error: {0}")]
    Validation(String),

    /// The render surface is absent (not mounted yet, or already torn down).
    #[error("surface error: {0}")]
    Surface(String),

    /// A capture could not start or was abandoned.
    #[error("capture error: {0}")]
    Capture(String),

    /// Encoder failures (ffmpeg, GIF writer, palette building).
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MicrocosmError {
    /// Build a [`MicrocosmError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MicrocosmError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`MicrocosmError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`MicrocosmError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MicrocosmError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
