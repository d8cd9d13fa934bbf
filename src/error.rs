use swatch_core::SampleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image error: {0}")]
    Image(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for AppError {
    fn from(e: png::DecodingError) -> Self {
        AppError::Image(e.to_string())
    }
}
