#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp_24(width: i32, height: i32) -> Vec<u8> {
    let stride = (width as usize * 3).div_ceil(4) * 4;
    let data_size = stride * height as usize;
    let mut bmp = vec![0u8; 54 + data_size];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((54 + data_size) as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}

fn bmp_32(width: i32, height: i32) -> Vec<u8> {
    let data_size = width as usize * 4 * height as usize;
    let mut bmp = vec![0u8; 138 + data_size];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((138 + data_size) as u32).to_le_bytes());
    bmp[10..14].copy_from_slice(&138u32.to_le_bytes());
    bmp[14..18].copy_from_slice(&124u32.to_le_bytes());
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes());
    bmp[28..30].copy_from_slice(&32u16.to_le_bytes());
    bmp[30..34].copy_from_slice(&3u32.to_le_bytes()); // BI_BITFIELDS
    bmp[54..58].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
    bmp[58..62].copy_from_slice(&0x0000_FF00u32.to_le_bytes());
    bmp[62..66].copy_from_slice(&0x0000_00FFu32.to_le_bytes());
    bmp[66..70].copy_from_slice(&0xFF00_0000u32.to_le_bytes());
    bmp[70..74].copy_from_slice(&0x7352_4742u32.to_le_bytes()); // sRGB
    for (i, b) in bmp[138..].iter_mut().enumerate() {
        *b = (i * 53) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bgr_1x1.bmp"), bmp_24(1, 1)).unwrap();
    fs::write(format!("{dir}/bgr_5x3.bmp"), bmp_24(5, 3)).unwrap();
    fs::write(format!("{dir}/bgr_8x2.bmp"), bmp_24(8, 2)).unwrap();
    fs::write(format!("{dir}/bgra_3x3.bmp"), bmp_32(3, 3)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut top_down = bmp_24(2, 2);
    top_down[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    fs::write(format!("{dir}/bgr_top_down.bmp"), top_down).unwrap();

    println!("Generated seed corpus in {dir}/");
}
