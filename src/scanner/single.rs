use tracing::debug;

use super::locate::{MagicFinder, StreamExtent};
use super::sink::ArtifactSink;
use crate::error::Result;
use crate::yaz0::{Yaz0Decoder, Yaz0Header, YAZ0_HEADER_SIZE};
use crate::{ScanConfig, ScanStats, StreamExtractor};

/// Single-threaded extractor: find, decode, write, repeat
pub struct SequentialExtractor {
    config: ScanConfig,
}

impl SequentialExtractor {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }
}

impl StreamExtractor for SequentialExtractor {
    fn extract<S: ArtifactSink>(&mut self, input: &[u8], sink: &mut S) -> Result<ScanStats> {
        let finder = MagicFinder::new();
        let decoder = Yaz0Decoder::with_output_slack(self.config.output_slack);

        let mut stats = ScanStats { input_bytes: input.len() as u64, ..Default::default() };
        let mut read_bytes = 0usize;

        while read_bytes < input.len() {
            let Some(offset) = finder.find_from(input, read_bytes) else {
                break;
            };

            let header = Yaz0Header::read_at(input, offset).map_err(|e| e.at_stream(offset))?;
            let size = header.uncompressed_size as usize;
            debug!("Found Yaz0 stream at 0x{:X}, 0x{:X} bytes declared", offset, size);

            let payload = &input[offset + YAZ0_HEADER_SIZE..];
            let (mut data, progress) =
                decoder.decode(payload, size).map_err(|e| e.at_stream(offset))?;
            data.truncate(size);

            let extent = StreamExtent { offset, header, consumed: progress.src_pos };
            read_bytes = extent.end();
            debug!("Read 0x{:X} bytes from input", read_bytes);

            sink.write_artifact(&extent, &data)?;
            stats.record(&extent);
        }

        Ok(stats)
    }
}
