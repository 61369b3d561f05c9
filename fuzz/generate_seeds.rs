#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: i32, height: i32, fill: u8) -> Vec<u8> {
    let padding = (4 - (width as usize * 3) % 4) % 4;
    let stride = width as usize * 3 + padding;
    let rows = height.unsigned_abs() as usize;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((54 + stride * rows) as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for _ in 0..rows {
        bmp.extend(std::iter::repeat_n(fill, width as usize * 3));
        bmp.extend(std::iter::repeat_n(0u8, padding));
    }
    bmp
}

fn main() {
    use std::fs;
    for target in ["fuzz_decode", "fuzz_roundtrip"] {
        let dir = format!("fuzz/corpus/{target}");
        fs::create_dir_all(&dir).unwrap();

        fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, 0x80)).unwrap();
        fs::write(format!("{dir}/bmp_3x3.bmp"), bmp24(3, 3, 0xff)).unwrap();
        fs::write(format!("{dir}/bmp_4x2.bmp"), bmp24(4, 2, 0x10)).unwrap();
        fs::write(format!("{dir}/bmp_5x2_topdown.bmp"), bmp24(5, -2, 0x42)).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        let mut truncated = bmp24(7, 7, 0x33);
        truncated.truncate(100);
        fs::write(format!("{dir}/bmp_truncated.bmp"), truncated).unwrap();
        let mut bad_magic = bmp24(2, 2, 0);
        bad_magic[0] = b'X'; bad_magic[1] = b'X';
        fs::write(format!("{dir}/bad_magic.bin"), bad_magic).unwrap();
    }
    println!("Generated seed corpus in fuzz/corpus/");
}
