#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and decode must never panic
    let _ = bmpfilter::ImageInfo::from_bytes(data);
    let _ = bmpfilter::decode_bmp(data, enough::Unstoppable);
});
