use crate::error::BitmapError;

/// Resource limits applied while decoding, before the pixel buffer is
/// allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the in-memory pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check a `width` x `height` image whose buffer takes `buffer_len` bytes.
    pub(crate) fn check(&self, width: u32, height: u32, buffer_len: usize) -> Result<(), BitmapError> {
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;
        exceeds("buffer size", buffer_len as u64, self.max_memory_bytes)
    }
}
