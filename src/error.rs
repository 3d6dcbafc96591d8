use thiserror::Error;

/// Errors that abort map generation. There is no partial-success output.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("corridor carving got stuck {attempts} times in a row")]
    GenerationFailed { attempts: u32 },
    #[error("not enough candidate tiles for {what}: needed {needed}, found {available}")]
    InsufficientCandidates {
        what: &'static str,
        needed: usize,
        available: usize,
    },
    #[error("influence field sums to zero, there is no land to paint")]
    DegenerateField,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
