//! Validation of the 32-bit color mask header.

use super::header::{
    ALPHA_MASK, BLUE_MASK, ColorMaskHeader, GREEN_MASK, RED_MASK, SRGB_COLOR_SPACE,
};
use crate::error::BitmapError;

impl ColorMaskHeader {
    /// Accept only BGRA byte order in the sRGB color space.
    ///
    /// No remapping is attempted; any other arrangement is rejected.
    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.red_mask != RED_MASK
            || self.green_mask != GREEN_MASK
            || self.blue_mask != BLUE_MASK
            || self.alpha_mask != ALPHA_MASK
        {
            return Err(BitmapError::UnsupportedFormat(format!(
                "channel masks r={:#010x} g={:#010x} b={:#010x} a={:#010x}, expected BGRA byte order",
                self.red_mask, self.green_mask, self.blue_mask, self.alpha_mask
            )));
        }
        if self.color_space != SRGB_COLOR_SPACE {
            return Err(BitmapError::UnsupportedFormat(format!(
                "color space {:#010x}, expected sRGB",
                self.color_space
            )));
        }
        Ok(())
    }
}
