use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::locate::StreamExtent;
use crate::error::Result;
use crate::yaz0::Yaz0Header;

/// Default extension for extracted payloads (RARC archives)
pub const DEFAULT_EXTENSION: &str = "rarc";

/// Destination for decoded stream payloads
pub trait ArtifactSink {
    /// Persist the decoded payload of `stream`.
    ///
    /// `data` is exactly the declared uncompressed size.
    fn write_artifact(&mut self, stream: &StreamExtent, data: &[u8]) -> Result<()>;
}

/// Writes each payload to `<source> <offset>.rarc`, offset in lowercase hex
pub struct FileSink {
    source: PathBuf,
    output_dir: Option<PathBuf>,
    extension: String,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            written: Vec::new(),
        }
    }

    /// Place artifacts in `dir`, named after the source's file name
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path the artifact for a stream at `offset` is written to
    pub fn artifact_path(&self, offset: usize) -> PathBuf {
        let suffix = format!(" {:x}.{}", offset, self.extension);

        match &self.output_dir {
            Some(dir) => {
                let mut name: OsString = self
                    .source
                    .file_name()
                    .map(|n| n.to_os_string())
                    .unwrap_or_else(|| OsString::from("stream"));
                name.push(suffix);
                dir.join(name)
            }
            None => {
                let mut name = self.source.clone().into_os_string();
                name.push(suffix);
                PathBuf::from(name)
            }
        }
    }

    /// Paths written so far, in stream order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl ArtifactSink for FileSink {
    fn write_artifact(&mut self, stream: &StreamExtent, data: &[u8]) -> Result<()> {
        let path = self.artifact_path(stream.offset);

        let mut output = BufWriter::new(File::create(&path)?);
        output.write_all(data)?;
        output.flush()?;

        info!("Wrote 0x{:X} bytes to {}", data.len(), path.display());
        self.written.push(path);
        Ok(())
    }
}

/// A decoded stream held in memory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub offset: usize,
    pub header: Yaz0Header,
    pub data: Vec<u8>,
}

/// Collects payloads in memory
#[derive(Default)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }
}

impl ArtifactSink for MemorySink {
    fn write_artifact(&mut self, stream: &StreamExtent, data: &[u8]) -> Result<()> {
        self.artifacts.push(Artifact {
            offset: stream.offset,
            header: stream.header,
            data: data.to_vec(),
        });
        Ok(())
    }
}
