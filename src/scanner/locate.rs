//! Magic search and stream boundary detection.
//!
//! A stream's extent depends only on its token structure, never on the bytes
//! it produces, so boundaries can be found without decoding anything.

use memchr::memmem::Finder;

use crate::error::Result;
use crate::yaz0::{measure, Yaz0Header, YAZ0_HEADER_SIZE, YAZ0_MAGIC};

/// Location and size of one embedded stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamExtent {
    /// Offset of the magic tag in the scanned buffer
    pub offset: usize,
    /// Parsed header
    pub header: Yaz0Header,
    /// Token stream bytes consumed by decoding
    pub consumed: usize,
}

impl StreamExtent {
    /// Offset of the first token stream byte
    pub fn payload_start(&self) -> usize {
        self.offset + YAZ0_HEADER_SIZE
    }

    /// Offset just past the last consumed byte; scanning resumes here
    pub fn end(&self) -> usize {
        self.payload_start() + self.consumed
    }

    /// Declared decompressed size
    pub fn uncompressed_size(&self) -> usize {
        self.header.uncompressed_size as usize
    }
}

/// Searches for the Yaz0 magic tag
pub struct MagicFinder {
    finder: Finder<'static>,
}

impl MagicFinder {
    pub fn new() -> Self {
        Self { finder: Finder::new(&YAZ0_MAGIC).into_owned() }
    }

    /// Offset of the next magic tag at or after `from`
    pub fn find_from(&self, haystack: &[u8], from: usize) -> Option<usize> {
        let tail = haystack.get(from..)?;
        self.finder.find(tail).map(|pos| from + pos)
    }
}

impl Default for MagicFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterates over the streams in a buffer without decoding them.
///
/// Each search resumes after the previous stream's consumed bytes. The
/// iterator stops after the first error.
pub struct StreamLocator<'a> {
    input: &'a [u8],
    finder: MagicFinder,
    pos: usize,
    done: bool,
}

impl<'a> StreamLocator<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, finder: MagicFinder::new(), pos: 0, done: false }
    }

    fn locate_at(&self, offset: usize) -> Result<StreamExtent> {
        let header = Yaz0Header::read_at(self.input, offset)?;
        let payload = &self.input[offset + YAZ0_HEADER_SIZE..];
        let progress = measure(payload, header.uncompressed_size as usize)?;
        Ok(StreamExtent { offset, header, consumed: progress.src_pos })
    }
}

impl Iterator for StreamLocator<'_> {
    type Item = Result<StreamExtent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.input.len() {
            return None;
        }

        let Some(offset) = self.finder.find_from(self.input, self.pos) else {
            self.done = true;
            return None;
        };

        match self.locate_at(offset) {
            Ok(extent) => {
                self.pos = extent.end();
                Some(Ok(extent))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.at_stream(offset)))
            }
        }
    }
}

/// List every stream in `input`
pub fn locate_streams(input: &[u8]) -> Result<Vec<StreamExtent>> {
    StreamLocator::new(input).collect()
}
