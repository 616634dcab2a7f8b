use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use enough::Unstoppable;
use log::debug;
use rgb::AsPixels as _;
use rgb::alt::BGRA8;

use crate::bmp;
use crate::bmp::header::{
    BitDepth, COMPRESSION_BITFIELDS, COMPRESSION_NONE, ColorMaskHeader, FileHeader, InfoHeader,
};
use crate::error::BitmapError;
use crate::pixel::{BitmapPixel, PixelLayout};

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A BMP image: its headers plus a tightly packed BGR or BGRA pixel buffer.
///
/// Rows are kept in file order, so row 0 is the bottom row of the picture.
/// Header fields derived from the layout (`header_size`, `pixel_offset`,
/// `file_size`) are always consistent with the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapImage {
    pub(crate) file_header: FileHeader,
    pub(crate) info_header: InfoHeader,
    pub(crate) color_header: Option<ColorMaskHeader>,
    pub(crate) layout: PixelLayout,
    pub(crate) pixels: Vec<u8>,
}

impl BitmapImage {
    /// Allocate a zero-filled image.
    ///
    /// `has_alpha` selects 32-bit BGRA with an sRGB color mask header;
    /// otherwise the image is 24-bit BGR. Fails with
    /// [`BitmapError::InvalidDimensions`] unless both sides are positive.
    pub fn new(width: i32, height: i32, has_alpha: bool) -> Result<Self, BitmapError> {
        if width <= 0 || height <= 0 {
            return Err(BitmapError::InvalidDimensions { width, height });
        }
        let layout = PixelLayout::from_alpha(has_alpha);
        let (w, h) = (width as u32, height as u32);
        let len = bmp::pixel_buffer_len(w, h, layout)?;

        let mut file_header = FileHeader::default();
        let mut info_header = InfoHeader {
            width,
            height,
            ..Default::default()
        };
        let color_header = if has_alpha {
            info_header.bit_count = BitDepth::Bgra32.bits();
            info_header.compression = COMPRESSION_BITFIELDS;
            Some(ColorMaskHeader::default())
        } else {
            info_header.bit_count = BitDepth::Bgr24.bits();
            info_header.compression = COMPRESSION_NONE;
            None
        };
        bmp::normalize_headers(&mut file_header, &mut info_header, layout);

        let data_size = bmp::on_disk_data_size(w, h, layout)?;
        info_header.image_size = data_size;
        file_header.file_size = file_header
            .pixel_offset
            .checked_add(data_size)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: w,
                height: h,
            })?;

        debug!(
            "allocated {width}x{height} {layout:?} image, file size {}",
            file_header.file_size
        );

        Ok(Self {
            file_header,
            info_header,
            color_header,
            layout,
            pixels: vec![0u8; len],
        })
    }

    /// Decode from a seekable byte stream.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self, BitmapError> {
        bmp::decode(reader, None, &Unstoppable)
    }

    /// Decode from an in-memory BMP file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        Self::read_from(&mut Cursor::new(data))
    }

    /// Open and decode the BMP file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BitmapError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Encode headers and row-padded pixel data to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BitmapError> {
        bmp::encode(self, writer, &Unstoppable)
    }

    /// Encode to an in-memory BMP file.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::with_capacity(self.file_header.file_size as usize);
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Create (or truncate) the file at `path` and encode into it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BitmapError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.info_header.width as u32
    }

    pub fn height(&self) -> u32 {
        self.info_header.height as u32
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// 24 or 32.
    pub fn bits_per_pixel(&self) -> u16 {
        self.info_header.bit_count
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Present only for 32-bit images.
    pub fn color_header(&self) -> Option<&ColorMaskHeader> {
        self.color_header.as_ref()
    }

    /// Unpadded pixel bytes, `width * height * channels` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn row_len(&self) -> usize {
        self.width() as usize * self.layout.channels()
    }

    /// Pixel bytes of row `y` (0 = bottom row).
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height() {
            return None;
        }
        let len = self.row_len();
        let start = y as usize * len;
        self.pixels.get(start..start + len)
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some((y as usize * self.width() as usize + x as usize) * self.layout.bytes_per_pixel())
    }

    /// Color at `(x, y)`; alpha reads as 255 for 24-bit images.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BGRA8> {
        let off = self.pixel_offset(x, y)?;
        let p = &self.pixels[off..off + self.layout.bytes_per_pixel()];
        Some(BGRA8 {
            b: p[0],
            g: p[1],
            r: p[2],
            a: if self.has_alpha() { p[3] } else { 255 },
        })
    }

    /// Overwrite the pixel at `(x, y)`; alpha is dropped for 24-bit images.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BGRA8) -> Result<(), BitmapError> {
        self.fill(Rect::new(x, y, 1, 1), color)
    }

    /// Write `color` into every pixel of `rect`.
    ///
    /// The rectangle must satisfy `x + width <= image width` and
    /// `y + height <= image height`; otherwise [`BitmapError::OutOfBounds`].
    /// An empty rectangle is a no-op. Alpha is written only for 32-bit images.
    pub fn fill(&mut self, rect: Rect, color: BGRA8) -> Result<(), BitmapError> {
        let (image_width, image_height) = (self.width(), self.height());
        let fits_x = rect.x.checked_add(rect.width).is_some_and(|r| r <= image_width);
        let fits_y = rect.y.checked_add(rect.height).is_some_and(|b| b <= image_height);
        if !fits_x || !fits_y {
            return Err(BitmapError::OutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                image_width,
                image_height,
            });
        }

        let bpp = self.layout.bytes_per_pixel();
        let value = [color.b, color.g, color.r, color.a];
        let row_len = self.row_len();
        for y in rect.y..rect.y + rect.height {
            let start = y as usize * row_len + rect.x as usize * bpp;
            let end = start + rect.width as usize * bpp;
            for px in self.pixels[start..end].chunks_exact_mut(bpp) {
                px.copy_from_slice(&value[..bpp]);
            }
        }
        Ok(())
    }

    /// Reinterpret the buffer as typed pixels without copying.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if `P` doesn't match the image layout.
    pub fn as_pixels<P: BitmapPixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_layout::<P>()?;
        Ok(self.pixels[..].as_pixels())
    }

    /// Mutable counterpart of [`BitmapImage::as_pixels`].
    pub fn as_pixels_mut<P: BitmapPixel>(&mut self) -> Result<&mut [P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_layout::<P>()?;
        Ok(self.pixels[..].as_pixels_mut())
    }

    /// Zero-copy 2D view of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: BitmapPixel>(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(pixels, w, h))
    }

    fn check_layout<P: BitmapPixel>(&self) -> Result<(), BitmapError> {
        if P::layout() != self.layout {
            return Err(BitmapError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::alt::BGR8;

    const COLOR: BGRA8 = BGRA8 {
        b: 10,
        g: 20,
        r: 30,
        a: 255,
    };

    #[test]
    fn allocate_bgra() {
        let img = BitmapImage::new(5, 3, true).unwrap();
        assert_eq!(img.pixels().len(), 5 * 3 * 4);
        assert!(img.pixels().iter().all(|&b| b == 0));
        assert_eq!(img.bits_per_pixel(), 32);
        assert_eq!(img.info_header().compression, COMPRESSION_BITFIELDS);
        assert_eq!(img.info_header().header_size, 124);
        assert_eq!(img.file_header().pixel_offset, 138);
        assert_eq!(img.file_header().file_size, 138 + 60);
        assert_eq!(img.color_header(), Some(&ColorMaskHeader::default()));
    }

    #[test]
    fn allocate_bgr_counts_padding() {
        let img = BitmapImage::new(5, 3, false).unwrap();
        assert_eq!(img.pixels().len(), 5 * 3 * 3);
        assert_eq!(img.bits_per_pixel(), 24);
        assert_eq!(img.info_header().compression, COMPRESSION_NONE);
        assert_eq!(img.info_header().header_size, 40);
        assert_eq!(img.file_header().pixel_offset, 54);
        // 15-byte rows pad to 16
        assert_eq!(img.info_header().image_size, 48);
        assert_eq!(img.file_header().file_size, 54 + 48);
        assert!(img.color_header().is_none());
    }

    #[test]
    fn allocate_rejects_non_positive() {
        for (w, h, alpha) in [(0, 5, true), (-1, 5, false), (5, 0, false), (3, -2, true)] {
            assert!(matches!(
                BitmapImage::new(w, h, alpha),
                Err(BitmapError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn fill_whole_image() {
        let mut img = BitmapImage::new(4, 3, true).unwrap();
        img.fill(Rect::new(0, 0, 4, 3), COLOR).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(img.pixel(x, y), Some(COLOR));
            }
        }
    }

    #[test]
    fn fill_flush_with_far_edge() {
        let mut img = BitmapImage::new(6, 4, false).unwrap();
        img.fill(Rect::new(4, 1, 2, 3), COLOR).unwrap();
        assert_eq!(img.pixel(5, 3), Some(COLOR));
        assert_eq!(img.pixel(3, 3).map(|p| p.b), Some(0));
        assert_eq!(img.pixel(4, 0).map(|p| p.b), Some(0));
    }

    #[test]
    fn fill_one_past_edge_fails() {
        let mut img = BitmapImage::new(6, 4, true).unwrap();
        assert!(matches!(
            img.fill(Rect::new(4, 0, 3, 1), COLOR),
            Err(BitmapError::OutOfBounds { .. })
        ));
        assert!(matches!(
            img.fill(Rect::new(0, 1, 1, 4), COLOR),
            Err(BitmapError::OutOfBounds { .. })
        ));
        assert!(img.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_overflowing_rect_fails() {
        let mut img = BitmapImage::new(2, 2, true).unwrap();
        assert!(matches!(
            img.fill(Rect::new(1, 0, u32::MAX, 1), COLOR),
            Err(BitmapError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn empty_fill_is_noop() {
        let mut img = BitmapImage::new(2, 2, false).unwrap();
        img.fill(Rect::new(2, 2, 0, 0), COLOR).unwrap();
        img.fill(Rect::new(0, 0, 2, 0), COLOR).unwrap();
        assert!(img.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn alpha_ignored_for_bgr() {
        let mut img = BitmapImage::new(1, 1, false).unwrap();
        img.set_pixel(0, 0, BGRA8 { b: 1, g: 2, r: 3, a: 4 }).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3]);
        assert_eq!(img.pixel(0, 0), Some(BGRA8 { b: 1, g: 2, r: 3, a: 255 }));
    }

    #[test]
    fn rows_are_tightly_packed() {
        let mut img = BitmapImage::new(3, 2, false).unwrap();
        img.set_pixel(2, 1, COLOR).unwrap();
        assert_eq!(img.row(0), Some(&[0u8; 9][..]));
        assert_eq!(img.row(1), Some(&[0, 0, 0, 0, 0, 0, 10, 20, 30][..]));
        assert_eq!(img.row(2), None);
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn typed_views() {
        let mut img = BitmapImage::new(2, 1, true).unwrap();
        img.as_pixels_mut::<BGRA8>().unwrap()[1] = COLOR;
        assert_eq!(img.pixels(), &[0, 0, 0, 0, 10, 20, 30, 255]);
        assert!(matches!(
            img.as_pixels::<BGR8>(),
            Err(BitmapError::LayoutMismatch { .. })
        ));

        let img = BitmapImage::new(2, 2, false).unwrap();
        assert_eq!(img.as_pixels::<BGR8>().unwrap().len(), 4);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_view() {
        let mut img = BitmapImage::new(3, 2, true).unwrap();
        img.set_pixel(2, 1, COLOR).unwrap();
        let view = img.as_imgref::<BGRA8>().unwrap();
        assert_eq!(view.width(), 3);
        assert_eq!(view.height(), 2);
        assert_eq!(view[(2usize, 1usize)], COLOR);
    }
}
