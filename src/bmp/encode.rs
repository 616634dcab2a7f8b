//! BMP encoder: the reverse of the decoder, emitting row padding for 24-bit
//! images and none for 32-bit ones.

use std::io::Write;

use enough::Stop;
use log::debug;

use super::stride;
use crate::error::BitmapError;
use crate::image::BitmapImage;

/// Write headers and pixel rows of `image` to `writer`.
///
/// Headers are written as held by the image; their derived fields are
/// already consistent with the buffer.
pub(crate) fn encode<W: Write>(
    image: &BitmapImage,
    writer: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let layout = image.layout();
    debug!(
        "encoding {}x{} {:?} BMP, {} bytes",
        image.width(),
        image.height(),
        layout,
        image.file_header().file_size
    );

    writer.write_all(&image.file_header().to_bytes())?;
    writer.write_all(&image.info_header().to_bytes())?;
    if layout.has_alpha() {
        let color = image.color_header().copied().unwrap_or_default();
        writer.write_all(&color.to_bytes())?;
    }

    let row_len = image.width() as usize * layout.bytes_per_pixel();
    if row_len == 0 {
        return Ok(());
    }
    let padding = [0u8; stride::ROW_ALIGNMENT];
    let pad = stride::row_padding(row_len);
    for (y, row) in image.pixels().chunks_exact(row_len).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        writer.write_all(row)?;
        writer.write_all(&padding[..pad])?;
    }
    Ok(())
}
