use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::image::BitmapImage;

/// Builder for encoding with a stop token.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    image: &'a BitmapImage,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(image: &'a BitmapImage) -> Self {
        Self { image }
    }

    pub fn encode_to<W: Write, S: Stop>(self, writer: &mut W, stop: S) -> Result<(), BitmapError> {
        bmp::encode(self.image, writer, &stop)
    }

    pub fn encode_to_vec<S: Stop>(self, stop: S) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::with_capacity(self.image.file_header().file_size as usize);
        self.encode_to(&mut out, stop)?;
        Ok(out)
    }

    /// Create (or truncate) the file at `path` and encode into it.
    pub fn encode_file<P: AsRef<Path>, S: Stop>(self, path: P, stop: S) -> Result<(), BitmapError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.encode_to(&mut writer, stop)?;
        writer.flush()?;
        Ok(())
    }
}
