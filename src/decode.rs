use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::limits::Limits;

/// Builder for decoding with resource limits and a stop token.
///
/// ```no_run
/// use bmpfile::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(16_000_000),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new()
///     .with_limits(&limits)
///     .decode_file("input.bmp", Unstoppable)?;
/// # Ok::<(), bmpfile::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode from a seekable stream.
    pub fn decode_reader<R: Read + Seek, S: Stop>(
        self,
        reader: &mut R,
        stop: S,
    ) -> Result<BitmapImage, BitmapError> {
        bmp::decode(reader, self.limits, &stop)
    }

    /// Decode an in-memory BMP file.
    pub fn decode_bytes<S: Stop>(self, data: &[u8], stop: S) -> Result<BitmapImage, BitmapError> {
        self.decode_reader(&mut Cursor::new(data), stop)
    }

    /// Open and decode the file at `path`.
    pub fn decode_file<P: AsRef<Path>, S: Stop>(
        self,
        path: P,
        stop: S,
    ) -> Result<BitmapImage, BitmapError> {
        let mut reader = BufReader::new(File::open(path)?);
        self.decode_reader(&mut reader, stop)
    }
}
