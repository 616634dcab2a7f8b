//! Row layout arithmetic: unpadded stride, 4-byte aligned stride, padding.

/// On-disk rows are padded to a multiple of this many bytes.
pub const ROW_ALIGNMENT: usize = 4;

/// Unpadded bytes in one row, or `None` on overflow.
pub fn row_stride(width: usize, bytes_per_pixel: usize) -> Option<usize> {
    width.checked_mul(bytes_per_pixel)
}

/// Smallest multiple of [`ROW_ALIGNMENT`] that holds `row_stride` bytes.
pub fn aligned_stride(row_stride: usize) -> Option<usize> {
    row_stride
        .checked_add(ROW_ALIGNMENT - 1)
        .map(|r| r & !(ROW_ALIGNMENT - 1))
}

/// Padding bytes appended after each row on disk.
pub fn row_padding(row_stride: usize) -> usize {
    (ROW_ALIGNMENT - row_stride % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

/// Total on-disk bytes of pixel data including row padding.
pub fn padded_data_size(width: usize, height: usize, bytes_per_pixel: usize) -> Option<usize> {
    row_stride(width, bytes_per_pixel)
        .and_then(aligned_stride)
        .and_then(|stride| stride.checked_mul(height))
}
