//! Fixed-layout BMP header structures and their byte codecs.
//!
//! Every field is read and written at its literal offset, little-endian,
//! with no padding between fields.

/// "BM" read as a little-endian u16.
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// Wire size of [`FileHeader`].
pub const FILE_HEADER_SIZE: usize = 14;
/// Wire size of [`InfoHeader`].
pub const INFO_HEADER_SIZE: usize = 40;
/// Wire size of [`ColorMaskHeader`].
pub const COLOR_HEADER_SIZE: usize = 84;

/// `BI_RGB`: uncompressed.
pub const COMPRESSION_NONE: u32 = 0;
/// `BI_BITFIELDS`: uncompressed with explicit channel masks.
pub const COMPRESSION_BITFIELDS: u32 = 3;

/// "sRGB" color space tag (`LCS_sRGB`).
pub const SRGB_COLOR_SPACE: u32 = 0x7352_4742;

pub const RED_MASK: u32 = 0x00FF_0000;
pub const GREEN_MASK: u32 = 0x0000_FF00;
pub const BLUE_MASK: u32 = 0x0000_00FF;
pub const ALPHA_MASK: u32 = 0xFF00_0000;

fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn le_i32(buf: &[u8], at: usize) -> i32 {
    le_u32(buf, at) as i32
}

fn put_u16(buf: &mut [u8], at: usize, v: u16) {
    buf[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut [u8], at: usize, v: u32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

fn put_i32(buf: &mut [u8], at: usize, v: i32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

// ── Bit depth ───────────────────────────────────────────────────────

/// The closed set of bit depths a BMP info header may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum BitDepth {
    /// Monochrome palette.
    Mono = 1,
    /// 16-color palette.
    Colors16 = 4,
    /// 256-color palette.
    Colors256 = 8,
    /// 8-bit BGR.
    Bgr24 = 24,
    /// 8-bit BGRA.
    Bgra32 = 32,
}

impl BitDepth {
    pub fn from_u16(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::Mono),
            4 => Some(Self::Colors16),
            8 => Some(Self::Colors256),
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        self as u16
    }

    /// Palette-indexed depths (1, 4, 8).
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Mono | Self::Colors16 | Self::Colors256)
    }
}

// ── File header ─────────────────────────────────────────────────────

/// `BITMAPFILEHEADER`, 14 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Must be [`BMP_SIGNATURE`].
    pub signature: u16,
    /// Total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Absolute offset of the pixel data.
    pub pixel_offset: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            signature: BMP_SIGNATURE,
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            pixel_offset: 0,
        }
    }
}

impl FileHeader {
    pub fn from_bytes(buf: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: le_u16(buf, 0),
            file_size: le_u32(buf, 2),
            reserved1: le_u16(buf, 6),
            reserved2: le_u16(buf, 8),
            pixel_offset: le_u32(buf, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut buf = [0u8; FILE_HEADER_SIZE];
        put_u16(&mut buf, 0, self.signature);
        put_u32(&mut buf, 2, self.file_size);
        put_u16(&mut buf, 6, self.reserved1);
        put_u16(&mut buf, 8, self.reserved2);
        put_u32(&mut buf, 10, self.pixel_offset);
        buf
    }

    pub fn has_valid_signature(&self) -> bool {
        self.signature == BMP_SIGNATURE
    }
}

// ── Info header ─────────────────────────────────────────────────────

/// `BITMAPINFOHEADER`, 40 bytes.
///
/// `bit_count` is kept raw so that any 40-byte buffer decodes; use
/// [`InfoHeader::bit_depth`] to interpret it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared size of the info header, including any extension that follows.
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up rows, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// Size of the pixel data; may be zero for uncompressed images.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bit_count: BitDepth::Bgr24.bits(),
            compression: COMPRESSION_NONE,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }
}

impl InfoHeader {
    pub fn from_bytes(buf: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: le_u32(buf, 0),
            width: le_i32(buf, 4),
            height: le_i32(buf, 8),
            planes: le_u16(buf, 12),
            bit_count: le_u16(buf, 14),
            compression: le_u32(buf, 16),
            image_size: le_u32(buf, 20),
            x_pixels_per_meter: le_i32(buf, 24),
            y_pixels_per_meter: le_i32(buf, 28),
            colors_used: le_u32(buf, 32),
            colors_important: le_u32(buf, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut buf = [0u8; INFO_HEADER_SIZE];
        put_u32(&mut buf, 0, self.header_size);
        put_i32(&mut buf, 4, self.width);
        put_i32(&mut buf, 8, self.height);
        put_u16(&mut buf, 12, self.planes);
        put_u16(&mut buf, 14, self.bit_count);
        put_u32(&mut buf, 16, self.compression);
        put_u32(&mut buf, 20, self.image_size);
        put_i32(&mut buf, 24, self.x_pixels_per_meter);
        put_i32(&mut buf, 28, self.y_pixels_per_meter);
        put_u32(&mut buf, 32, self.colors_used);
        put_u32(&mut buf, 36, self.colors_important);
        buf
    }

    pub fn bit_depth(&self) -> Option<BitDepth> {
        BitDepth::from_u16(self.bit_count)
    }
}

// ── Color mask header ───────────────────────────────────────────────

/// Channel masks and color space that follow the info header of a 32-bit
/// image, 84 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorMaskHeader {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space: u32,
    /// Endpoints, gamma and profile words; unused for sRGB.
    pub reserved: [u32; 16],
}

/// BGRA byte order in sRGB, the only layout accepted on decode.
impl Default for ColorMaskHeader {
    fn default() -> Self {
        Self {
            red_mask: RED_MASK,
            green_mask: GREEN_MASK,
            blue_mask: BLUE_MASK,
            alpha_mask: ALPHA_MASK,
            color_space: SRGB_COLOR_SPACE,
            reserved: [0; 16],
        }
    }
}

impl ColorMaskHeader {
    pub fn from_bytes(buf: &[u8; COLOR_HEADER_SIZE]) -> Self {
        let mut reserved = [0u32; 16];
        for (i, word) in reserved.iter_mut().enumerate() {
            *word = le_u32(buf, 20 + i * 4);
        }
        Self {
            red_mask: le_u32(buf, 0),
            green_mask: le_u32(buf, 4),
            blue_mask: le_u32(buf, 8),
            alpha_mask: le_u32(buf, 12),
            color_space: le_u32(buf, 16),
            reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; COLOR_HEADER_SIZE] {
        let mut buf = [0u8; COLOR_HEADER_SIZE];
        put_u32(&mut buf, 0, self.red_mask);
        put_u32(&mut buf, 4, self.green_mask);
        put_u32(&mut buf, 8, self.blue_mask);
        put_u32(&mut buf, 12, self.alpha_mask);
        put_u32(&mut buf, 16, self.color_space);
        for (i, word) in self.reserved.iter().enumerate() {
            put_u32(&mut buf, 20 + i * 4, *word);
        }
        buf
    }
}
