//! BMP decoder for uncompressed bottom-up 24-bit BGR and 32-bit BGRA images.
//!
//! Reads strictly forward through the headers, seeks once to the pixel
//! data, and strips row padding while reading so the buffer holds only
//! pixel bytes.

use std::io::{Read, Seek, SeekFrom};

use enough::Stop;
use log::{debug, trace};

use super::header::{
    BitDepth, COLOR_HEADER_SIZE, COMPRESSION_BITFIELDS, COMPRESSION_NONE, ColorMaskHeader,
    FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader,
};
use super::stride::{self, ROW_ALIGNMENT};
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], BitmapError> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Map the declared bit depth and compression to a supported layout.
fn classify(info: &InfoHeader) -> Result<PixelLayout, BitmapError> {
    let depth = info.bit_depth().ok_or_else(|| {
        BitmapError::UnrecognizedFormat(format!("bit depth {} is not a BMP depth", info.bit_count))
    })?;
    if depth.is_indexed() {
        return Err(BitmapError::UnsupportedFormat(format!(
            "palette images ({} bits per pixel) are not supported",
            depth.bits()
        )));
    }
    match (depth, info.compression) {
        (BitDepth::Bgr24, COMPRESSION_NONE) => Ok(PixelLayout::Bgr8),
        (BitDepth::Bgra32, COMPRESSION_NONE | COMPRESSION_BITFIELDS) => Ok(PixelLayout::Bgra8),
        (_, compression) => Err(BitmapError::UnsupportedFormat(format!(
            "compression {compression} with {} bits per pixel",
            depth.bits()
        ))),
    }
}

/// Decode a complete BMP image from `reader`.
///
/// Nothing is returned unless every header and pixel read succeeds.
pub(crate) fn decode<R: Read + Seek>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<BitmapImage, BitmapError> {
    let mut file_header = FileHeader::from_bytes(&read_array::<_, FILE_HEADER_SIZE>(reader)?);
    if !file_header.has_valid_signature() {
        return Err(BitmapError::UnrecognizedFormat(format!(
            "signature {:#06x} is not \"BM\"",
            file_header.signature
        )));
    }

    let mut info_header = InfoHeader::from_bytes(&read_array::<_, INFO_HEADER_SIZE>(reader)?);
    let layout = classify(&info_header)?;

    let color_header = if layout == PixelLayout::Bgra8 {
        let required = (INFO_HEADER_SIZE + COLOR_HEADER_SIZE) as u32;
        if info_header.header_size < required {
            return Err(BitmapError::UnrecognizedFormat(format!(
                "32-bit image declares a {}-byte info header, need at least {required}",
                info_header.header_size
            )));
        }
        let color = ColorMaskHeader::from_bytes(&read_array::<_, COLOR_HEADER_SIZE>(reader)?);
        color.validate()?;
        Some(color)
    } else {
        None
    };

    reader.seek(SeekFrom::Start(u64::from(file_header.pixel_offset)))?;

    if info_header.height < 0 {
        return Err(BitmapError::UnsupportedOrientation {
            height: info_header.height,
        });
    }
    if info_header.width < 0 {
        return Err(BitmapError::InvalidDimensions {
            width: info_header.width,
            height: info_header.height,
        });
    }

    debug!(
        "BMP {}x{} {}bpp, declared header size {}, pixel offset {}, file size {}",
        info_header.width,
        info_header.height,
        info_header.bit_count,
        info_header.header_size,
        file_header.pixel_offset,
        file_header.file_size
    );
    super::normalize_headers(&mut file_header, &mut info_header, layout);

    let width = info_header.width as u32;
    let height = info_header.height as u32;
    let len = super::pixel_buffer_len(width, height, layout)?;
    let data_size = super::on_disk_data_size(width, height, layout)?;
    file_header.file_size = file_header
        .pixel_offset
        .checked_add(data_size)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check(width, height, len)?;
    }
    stop.check()?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|e| {
        BitmapError::LimitExceeded(format!("cannot allocate {len} byte pixel buffer: {e}"))
    })?;
    pixels.resize(len, 0u8);
    let row_len = width as usize * layout.channels();
    let padding = stride::row_padding(row_len);

    if padding == 0 {
        trace!("rows are 4-byte aligned, reading {len} bytes at once");
        reader.read_exact(&mut pixels)?;
    } else {
        trace!("reading {height} rows of {row_len} bytes, skipping {padding} padding bytes each");
        let mut pad = [0u8; ROW_ALIGNMENT];
        for (y, row) in pixels.chunks_exact_mut(row_len).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            reader.read_exact(row)?;
            reader.read_exact(&mut pad[..padding])?;
        }
    }

    Ok(BitmapImage {
        file_header,
        info_header,
        color_header,
        layout,
        pixels,
    })
}
