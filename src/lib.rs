pub mod error;
pub mod scanner;
pub mod yaz0;

pub use error::{Error, Result};
pub use scanner::{
    locate_streams, ArtifactSink, FileSink, MemorySink, ParallelExtractor, SequentialExtractor,
    StreamExtent,
};
pub use yaz0::{decompress, DecodeProgress, Yaz0Decoder, Yaz0Header, Yaz0Token};

use yaz0::{DEFAULT_OUTPUT_SLACK, YAZ0_HEADER_SIZE};

/// Configuration for extraction
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Number of decoding threads (0 = auto, 1 = sequential)
    pub num_threads: usize,
    /// Capacity reserved past each stream's declared size
    pub output_slack: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { num_threads: 1, output_slack: DEFAULT_OUTPUT_SLACK }
    }
}

/// Statistics from an extraction run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub input_bytes: u64,
    pub streams_extracted: u64,
    /// Header and token bytes of every extracted stream
    pub compressed_bytes: u64,
    /// Decompressed bytes handed to the sink
    pub bytes_written: u64,
}

impl ScanStats {
    fn record(&mut self, extent: &StreamExtent) {
        self.streams_extracted += 1;
        self.compressed_bytes += (YAZ0_HEADER_SIZE + extent.consumed) as u64;
        self.bytes_written += extent.uncompressed_size() as u64;
    }
}

/// Trait for the complete locate-decode-persist operation
pub trait StreamExtractor {
    /// Decode every Yaz0 stream in `input`, handing each payload to `sink`
    fn extract<S: ArtifactSink>(&mut self, input: &[u8], sink: &mut S) -> Result<ScanStats>;
}

/// Extract with the implementation `config` calls for
pub fn extract<S: ArtifactSink>(
    input: &[u8],
    sink: &mut S,
    config: ScanConfig,
) -> Result<ScanStats> {
    if config.num_threads == 1 {
        SequentialExtractor::new(config).extract(input, sink)
    } else {
        ParallelExtractor::new(config).extract(input, sink)
    }
}
