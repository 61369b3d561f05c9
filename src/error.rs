use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding, and transform selection.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid BMP: {0}")]
    InvalidFormat(String),

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i64, height: i64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer size mismatch: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("unknown transform: {0:?}")]
    UnknownTransform(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
