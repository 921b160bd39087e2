#![no_main]

use libfuzzer_sys::fuzz_target;
use unyaz::yaz0::measure;
use unyaz::Yaz0Decoder;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the requested size, the rest is the token stream
    if data.len() < 2 {
        return;
    }
    let size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let payload = &data[2..];

    // Arbitrary input must fail cleanly, never panic
    if let Ok((out, progress)) = Yaz0Decoder::new().decode(payload, size) {
        assert!(out.len() >= size);
        assert_eq!(out.len(), progress.dst_pos);
        assert!(progress.src_pos <= payload.len());

        // Walking the tokens must land on the same cursors
        assert_eq!(measure(payload, size).unwrap(), progress);
    }
});
