#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must reproduce the image
    let limits = bmpfile::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(decoded) = bmpfile::DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(data, bmpfile::Unstoppable)
    else {
        return;
    };

    let reencoded = decoded.to_bytes().expect("encoding a decoded image");
    assert_eq!(reencoded.len() as u32, decoded.file_header().file_size);

    let Ok(decoded2) = bmpfile::BitmapImage::from_bytes(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip mismatch");
});
