//! BMP header codec, decoder and encoder.
//!
//! Use [`crate::BitmapImage`] or the top-level [`crate::decode_file`],
//! [`crate::encode_file`] and [`crate::allocate`].

mod color;
mod decode;
mod encode;
pub mod header;
pub mod stride;

pub(crate) use decode::decode;
pub(crate) use encode::encode;

use crate::error::BitmapError;
use crate::pixel::PixelLayout;
use header::{COLOR_HEADER_SIZE, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader};

/// Info header size and pixel data offset implied by the layout.
pub(crate) fn header_sizes(layout: PixelLayout) -> (u32, u32) {
    let info = match layout {
        PixelLayout::Bgr8 => INFO_HEADER_SIZE,
        PixelLayout::Bgra8 => INFO_HEADER_SIZE + COLOR_HEADER_SIZE,
    };
    (info as u32, (FILE_HEADER_SIZE + info) as u32)
}

/// Reset `header_size`, `pixel_offset` and `file_size` to what the layout
/// implies. `file_size` covers the headers only; pixel data is added once
/// it is known.
pub(crate) fn normalize_headers(file: &mut FileHeader, info: &mut InfoHeader, layout: PixelLayout) {
    let (header_size, pixel_offset) = header_sizes(layout);
    info.header_size = header_size;
    file.pixel_offset = pixel_offset;
    file.file_size = pixel_offset;
}

/// In-memory buffer length, `width * height * channels`.
pub(crate) fn pixel_buffer_len(
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// On-disk pixel data length including row padding.
pub(crate) fn on_disk_data_size(
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<u32, BitmapError> {
    stride::padded_data_size(width as usize, height as usize, layout.bytes_per_pixel())
        .and_then(|size| u32::try_from(size).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
