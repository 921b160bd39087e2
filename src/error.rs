use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Header errors
    #[error("Invalid Yaz0 magic bytes: expected \"Yaz0\", got {0:02x?}")]
    InvalidMagic([u8; 4]),

    #[error("Truncated Yaz0 header at offset 0x{offset:x}: {available} of 16 bytes available")]
    TruncatedHeader { offset: usize, available: usize },

    // Token stream errors
    #[error("Compressed data exhausted at source position {position}")]
    SourceExhausted { position: usize },

    #[error("Back-reference distance {distance} exceeds available output {available}")]
    BackReferenceOutOfRange { distance: u16, available: usize },

    #[error("Could not reserve {size} bytes for decompressed output")]
    OutputAllocation { size: usize },

    // Scanner errors
    #[error("Stream at offset 0x{offset:x}: {source}")]
    Stream {
        offset: usize,
        #[source]
        source: Box<Error>,
    },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Attach the offset of the stream's magic tag to a per-stream failure
    pub fn at_stream(self, offset: usize) -> Self {
        match self {
            // I/O failures are about the sink, not the stream
            Error::Io(_) | Error::Stream { .. } => self,
            other => Error::Stream { offset, source: Box::new(other) },
        }
    }

    /// The underlying failure, looking through any `Stream` wrapper
    pub fn root(&self) -> &Error {
        match self {
            Error::Stream { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
