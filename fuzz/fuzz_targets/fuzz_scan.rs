#![no_main]

use libfuzzer_sys::fuzz_target;
use unyaz::{extract, MemorySink, ScanConfig};

fuzz_target!(|data: &[u8]| {
    // Lead with a magic tag so the decoder is actually reached
    let mut blob = b"Yaz0\x00\x00".to_vec();
    blob.extend_from_slice(data);

    let mut sink = MemorySink::new();
    if extract(&blob, &mut sink, ScanConfig::default()).is_ok() {
        for artifact in &sink.artifacts {
            assert_eq!(artifact.data.len(), artifact.header.uncompressed_size as usize);
        }
    }
});
