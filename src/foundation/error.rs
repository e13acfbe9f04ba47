pub type RasterFxResult<T> = Result<T, RasterFxError>;

#[derive(thiserror::Error, Debug)]
pub enum RasterFxError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Export attempted in a host that cannot run the encoder.
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    /// No encoder collaborator was supplied.
    #[error("encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// The encoder aborted or reported an error.
    #[error("encoding failure: {0}")]
    EncodingFailure(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterFxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_environment(msg: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment(msg.into())
    }

    pub fn encoder_unavailable(msg: impl Into<String>) -> Self {
        Self::EncoderUnavailable(msg.into())
    }

    pub fn encoding_failure(msg: impl Into<String>) -> Self {
        Self::EncodingFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
