#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, and a decoded buffer must match its dimensions
    let limits = bmpfile::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(image) = bmpfile::DecodeRequest::new()
        .with_limits(&limits)
        .decode_bytes(data, bmpfile::Unstoppable)
    else {
        return;
    };
    let expected =
        image.width() as usize * image.height() as usize * image.layout().bytes_per_pixel();
    assert_eq!(image.pixels().len(), expected);
});
