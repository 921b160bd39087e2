//! Parallel extractor using a producer-consumer pipeline.
//!
//! Architecture:
//! - Main thread: locate every stream (token structure only, no output)
//! - Dispatcher thread: feed stream extents to the worker pool
//! - Worker pool: decode streams into independent buffers
//! - Main thread: receive decoded streams in offset order, write to the sink
//!
//! Writing stops at the first failure in offset order, so the artifacts
//! produced and the error reported match `SequentialExtractor`.

use std::collections::BTreeMap;

use crossbeam::channel::{bounded, Receiver, Sender};
use tracing::{debug, warn};

use super::locate::{StreamExtent, StreamLocator};
use super::single::SequentialExtractor;
use super::sink::ArtifactSink;
use crate::error::{Error, Result};
use crate::yaz0::{Yaz0Decoder, Yaz0Header, YAZ0_HEADER_SIZE};
use crate::{ScanConfig, ScanStats, StreamExtractor};

/// A stream to decode
struct DecodeJob {
    /// Sequence number for ordering output
    stream_id: usize,
    extent: StreamExtent,
}

/// Result of decoding a single stream
struct DecodedStream {
    /// Sequence number for ordering output
    stream_id: usize,
    extent: StreamExtent,
    /// Payload truncated to the declared size
    data: Result<Vec<u8>>,
}

/// Parallel extractor implementation
pub struct ParallelExtractor {
    config: ScanConfig,
}

impl ParallelExtractor {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    fn effective_threads(&self) -> usize {
        match self.config.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }
}

impl StreamExtractor for ParallelExtractor {
    fn extract<S: ArtifactSink>(&mut self, input: &[u8], sink: &mut S) -> Result<ScanStats> {
        let num_threads = self.effective_threads();

        // For single thread, delegate to the sequential implementation
        if num_threads == 1 {
            return SequentialExtractor::new(self.config.clone()).extract(input, sink);
        }

        self.extract_parallel(input, sink, num_threads)
    }
}

impl ParallelExtractor {
    fn extract_parallel<S: ArtifactSink>(
        &self,
        input: &[u8],
        sink: &mut S,
        num_threads: usize,
    ) -> Result<ScanStats> {
        // Stream boundaries first; a structural failure ends the list
        let mut extents = Vec::new();
        let mut locate_failure = None;
        for located in StreamLocator::new(input) {
            match located {
                Ok(extent) => extents.push(extent),
                Err(e) => {
                    locate_failure = Some(self.decode_failure(input, e));
                    break;
                }
            }
        }
        debug!("Located {} Yaz0 streams, decoding on {} threads", extents.len(), num_threads);

        let channel_capacity = num_threads * 2;
        let decoder = Yaz0Decoder::with_output_slack(self.config.output_slack);

        let result = crossbeam::scope(|scope| {
            let (job_tx, job_rx): (Sender<DecodeJob>, Receiver<DecodeJob>) =
                bounded(channel_capacity);
            let (result_tx, result_rx): (Sender<DecodedStream>, Receiver<DecodedStream>) =
                bounded(channel_capacity);

            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let decoder = decoder.clone();

                scope.spawn(move |_| {
                    worker_thread(input, &decoder, job_rx, result_tx);
                });
            }

            scope.spawn(move |_| {
                for (stream_id, extent) in extents.into_iter().enumerate() {
                    if job_tx.send(DecodeJob { stream_id, extent }).is_err() {
                        break;
                    }
                }
            });

            // Drop our copies of the channels that workers use
            drop(job_rx);
            drop(result_tx);

            write_in_order(input.len(), sink, result_rx)
        });

        let stats = result.map_err(|_| Error::Internal("Thread panicked".to_string()))??;

        match locate_failure {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    }
}

impl ParallelExtractor {
    /// Re-run a stream that failed to locate through the decoder.
    ///
    /// Locating never checks back-reference distances, so a stream can
    /// fail there on exhausted source while decoding fails earlier on an
    /// out-of-range back-reference. The decoder's error is the one reported.
    fn decode_failure(&self, input: &[u8], located: Error) -> Error {
        let offset = match located {
            Error::Stream { offset, ref source }
                if matches!(source.root(), Error::SourceExhausted { .. }) =>
            {
                offset
            }
            other => return other,
        };

        let decoder = Yaz0Decoder::with_output_slack(self.config.output_slack);
        let decoded = Yaz0Header::read_at(input, offset).and_then(|header| {
            decoder.decode(&input[offset + YAZ0_HEADER_SIZE..], header.uncompressed_size as usize)
        });

        match decoded {
            Err(e) => e.at_stream(offset),
            Ok(_) => located,
        }
    }
}

/// Receive decoded streams and hand them to the sink in offset order
fn write_in_order<S: ArtifactSink>(
    input_len: usize,
    sink: &mut S,
    result_rx: Receiver<DecodedStream>,
) -> Result<ScanStats> {
    let mut stats = ScanStats { input_bytes: input_len as u64, ..Default::default() };
    let mut pending: BTreeMap<usize, DecodedStream> = BTreeMap::new();
    let mut next_id = 0usize;

    for decoded in result_rx.iter() {
        pending.insert(decoded.stream_id, decoded);

        while let Some(ready) = pending.remove(&next_id) {
            let offset = ready.extent.offset;
            let data = ready.data.map_err(|e| {
                warn!("Stream at 0x{:X} failed to decode", offset);
                e.at_stream(offset)
            })?;

            sink.write_artifact(&ready.extent, &data)?;
            stats.record(&ready.extent);
            next_id += 1;
        }
    }

    Ok(stats)
}

fn worker_thread(
    input: &[u8],
    decoder: &Yaz0Decoder,
    job_rx: Receiver<DecodeJob>,
    result_tx: Sender<DecodedStream>,
) {
    for job in job_rx {
        let extent = job.extent;
        let size = extent.uncompressed_size();

        let data = decoder.decode(&input[extent.payload_start()..], size).map(|(mut data, _)| {
            data.truncate(size);
            data
        });

        let decoded = DecodedStream { stream_id: job.stream_id, extent, data };
        if result_tx.send(decoded).is_err() {
            break;
        }
    }
}
