use enough::StopReason;

/// Errors from BMP decoding, encoding and pixel buffer operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format: {0}")]
    UnrecognizedFormat(String),

    #[error("unsupported orientation: height {height} is top-down, only bottom-up rows are supported")]
    UnsupportedOrientation { height: i32 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error(
        "region at ({x}, {y}) of size {width}x{height} does not fit in {image_width}x{image_height} image"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
