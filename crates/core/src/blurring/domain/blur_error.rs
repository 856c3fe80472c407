use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlurError {
    #[error("blur radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("cannot blur an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("not enough memory for blur buffers: {0}")]
    OutOfMemory(#[from] std::collections::TryReserveError),
    #[error("blur backend failed: {0}")]
    Backend(String),
}

impl BlurError {
    /// True for errors caused by caller-supplied arguments rather than the backend.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BlurError::InvalidRadius(_) | BlurError::EmptyImage { .. })
    }
}
