//! # bmpfile
//!
//! Windows BMP decoder and encoder for uncompressed bottom-up images.
//!
//! ## Supported Formats
//!
//! - 24-bit BGR (`BI_RGB`), rows padded to 4 bytes on disk
//! - 32-bit BGRA with an sRGB color mask header (`BI_BITFIELDS`, V5 header)
//!
//! Headers are parsed field by field at their fixed offsets. After decoding,
//! the derived header fields (info header size, pixel data offset, file size)
//! are recomputed so the image always re-encodes consistently.
//!
//! ## Non-Goals
//!
//! - Top-down (negative height) images
//! - Palette (1, 4, 8-bit) images
//! - RLE or other compressed pixel data
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfile::{BGRA8, BitmapImage, Rect};
//!
//! let mut image = bmpfile::allocate(64, 32, true)?;
//! image.fill(Rect::new(0, 0, 16, 16), BGRA8 { b: 10, g: 20, r: 30, a: 255 })?;
//! bmpfile::encode_file("out.bmp", &image)?;
//!
//! let decoded: BitmapImage = bmpfile::decode_file("out.bmp")?;
//! assert_eq!(decoded.pixels(), image.pixels());
//! # Ok::<(), bmpfile::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

use std::path::Path;

// Re-exports
pub use bmp::header::{BitDepth, ColorMaskHeader, FileHeader, InfoHeader};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use image::{BitmapImage, Rect};
pub use limits::Limits;
pub use pixel::{BitmapPixel, PixelLayout};
pub use rgb::alt::{BGR8, BGRA8};

/// Open and decode the BMP file at `path`.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<BitmapImage, BitmapError> {
    BitmapImage::open(path)
}

/// Allocate a zero-filled 24-bit (`has_alpha == false`) or 32-bit image.
pub fn allocate(width: i32, height: i32, has_alpha: bool) -> Result<BitmapImage, BitmapError> {
    BitmapImage::new(width, height, has_alpha)
}

/// Encode `image` into a new file at `path`, replacing any existing file.
pub fn encode_file<P: AsRef<Path>>(path: P, image: &BitmapImage) -> Result<(), BitmapError> {
    image.save(path)
}
