/// In-memory pixel layout of a [`crate::BitmapImage`] buffer.
///
/// Channel order matches the on-disk BMP order, so rows are copied to and
/// from the file without swizzling.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 channels, 8-bit BGR (24 bits per pixel on disk).
    Bgr8,
    /// 4 channels, 8-bit BGRA (32 bits per pixel on disk).
    Bgra8,
}

impl PixelLayout {
    /// Layout for the given alpha mode.
    pub fn from_alpha(has_alpha: bool) -> Self {
        if has_alpha { Self::Bgra8 } else { Self::Bgr8 }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.bytes_per_pixel()
    }

    /// Whether the 4th channel carries alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Bgra8)
    }
}

/// Pixel types usable for typed views of a [`crate::BitmapImage`] buffer.
pub trait BitmapPixel: Copy {
    /// The buffer layout this pixel type reinterprets.
    fn layout() -> PixelLayout;
}

impl BitmapPixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}

impl BitmapPixel for rgb::alt::BGRA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}
