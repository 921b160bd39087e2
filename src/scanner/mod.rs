pub mod locate;
pub mod parallel;
pub mod single;
pub mod sink;

pub use locate::{locate_streams, MagicFinder, StreamExtent, StreamLocator};
pub use parallel::ParallelExtractor;
pub use single::SequentialExtractor;
pub use sink::{Artifact, ArtifactSink, FileSink, MemorySink, DEFAULT_EXTENSION};
