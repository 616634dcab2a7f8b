//! Synthetic corpus: decode/encode across sizes, patterns and layouts.

use std::io::Cursor;

use bmpfile::*;
use enough::StopReason;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 200 + (c as u8 * 20);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn image_with(w: usize, h: usize, alpha: bool, pixels: &[u8]) -> BitmapImage {
    let mut image = allocate(w as i32, h as i32, alpha).unwrap();
    image.pixels_mut().copy_from_slice(pixels);
    image
}

fn roundtrip(image: &BitmapImage) -> BitmapImage {
    let encoded = image.to_bytes().unwrap();
    assert_eq!(encoded.len() as u32, image.file_header().file_size);
    BitmapImage::from_bytes(&encoded).unwrap()
}

// ── Round trips ─────────────────────────────────────────────────────

#[test]
fn checkerboard_bgr_all_paddings() {
    for w in 1..=8 {
        let pixels = checkerboard(w, 5, 3);
        let image = image_with(w, 5, false, &pixels);
        let decoded = roundtrip(&image);
        assert_eq!(decoded.pixels(), &pixels[..], "width {w}");
        assert_eq!(decoded, image);
    }
}

#[test]
fn noise_bgra_sizes() {
    for (w, h) in [(1, 1), (2, 9), (13, 3), (64, 64)] {
        let pixels = noise_pattern(w, h, 4);
        let image = image_with(w, h, true, &pixels);
        let decoded = roundtrip(&image);
        assert_eq!(decoded.pixels(), &pixels[..], "{w}x{h}");
    }
}

#[test]
fn large_padded_image() {
    let pixels = noise_pattern(301, 37, 3);
    let image = image_with(301, 37, false, &pixels);
    let decoded = roundtrip(&image);
    assert_eq!(decoded.pixels().len(), 301 * 37 * 3);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn encode_request_matches_to_bytes() {
    let image = image_with(5, 5, false, &checkerboard(5, 5, 3));
    let via_request = EncodeRequest::new(&image)
        .encode_to_vec(Unstoppable)
        .unwrap();
    assert_eq!(via_request, image.to_bytes().unwrap());
}

// ── Decode options ──────────────────────────────────────────────────

#[test]
fn decode_request_applies_limits() {
    let encoded = image_with(20, 10, true, &noise_pattern(20, 10, 4))
        .to_bytes()
        .unwrap();

    let roomy = Limits {
        max_width: Some(20),
        max_height: Some(10),
        ..Default::default()
    };
    assert!(
        DecodeRequest::new()
            .with_limits(&roomy)
            .decode_bytes(&encoded, Unstoppable)
            .is_ok()
    );

    let tight = Limits {
        max_memory_bytes: Some(799),
        ..Default::default()
    };
    assert!(matches!(
        DecodeRequest::new()
            .with_limits(&tight)
            .decode_bytes(&encoded, Unstoppable),
        Err(BitmapError::LimitExceeded(_))
    ));
}

struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn stop_token_cancels() {
    let image = image_with(3, 3, false, &checkerboard(3, 3, 3));
    let encoded = image.to_bytes().unwrap();
    assert!(matches!(
        DecodeRequest::new().decode_reader(&mut Cursor::new(&encoded), Cancelled),
        Err(BitmapError::Cancelled(_))
    ));
    assert!(matches!(
        EncodeRequest::new(&image).encode_to_vec(Cancelled),
        Err(BitmapError::Cancelled(_))
    ));
}

// ── Malformed input ─────────────────────────────────────────────────

#[test]
fn every_truncation_fails_cleanly() {
    let encoded = image_with(3, 2, true, &noise_pattern(3, 2, 4))
        .to_bytes()
        .unwrap();
    for len in 0..encoded.len() {
        assert!(
            BitmapImage::from_bytes(&encoded[..len]).is_err(),
            "truncated to {len} bytes"
        );
    }
}

#[test]
fn top_down_is_rejected() {
    let mut encoded = image_with(2, 2, false, &checkerboard(2, 2, 3))
        .to_bytes()
        .unwrap();
    encoded[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    assert!(matches!(
        BitmapImage::from_bytes(&encoded),
        Err(BitmapError::UnsupportedOrientation { height: -2 })
    ));
}

#[test]
fn non_srgb_color_space_is_rejected() {
    let mut encoded = image_with(1, 1, true, &[1, 2, 3, 4]).to_bytes().unwrap();
    encoded[70..74].copy_from_slice(b" niW");
    assert!(matches!(
        BitmapImage::from_bytes(&encoded),
        Err(BitmapError::UnsupportedFormat(_))
    ));
}

#[test]
fn oversized_header_dimensions_are_rejected() {
    let mut encoded = image_with(1, 1, false, &[1, 2, 3]).to_bytes().unwrap();
    encoded.truncate(54);
    encoded[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    encoded[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    assert!(matches!(
        BitmapImage::from_bytes(&encoded),
        Err(BitmapError::DimensionsTooLarge { .. })
    ));
}
