pub type AurumResult<T> = Result<T, AurumError>;

/// Errors surfaced by configuration, raster output and the CLI.
///
/// The per-frame simulation never produces these: degenerate inputs there are absorbed locally.
#[derive(thiserror::Error, Debug)]
pub enum AurumError {
    /// A value failed validation (configuration ranges, geometry limits).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be resolved.
    #[error("config error: {0}")]
    Config(String),

    /// The raster backend could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AurumError {
    /// Build an [`AurumError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AurumError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AurumError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AurumError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
