#![no_main]
use bmpfilter::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    // Re-encoding and decoding again must produce identical pixels
    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("encode of decoded image");
    let decoded2 = decode_bmp(&reencoded, enough::Unstoppable)
        .unwrap_or_else(|e| panic!("re-encoded data failed to decode: {e}"));
    assert_eq!(decoded, decoded2, "roundtrip mismatch");

    // Every transform keeps the buffer shape
    let t = Transform::ALL[data.len() % Transform::ALL.len()];
    let mut filtered = decoded2;
    t.apply(filtered.pixels_mut());
    assert_eq!(filtered.width(), decoded.width());
    assert_eq!(filtered.height(), decoded.height());
    assert_eq!(
        filtered.pixels().as_bytes().len(),
        decoded.pixels().as_bytes().len()
    );
});
