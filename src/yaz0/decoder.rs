use super::constants::{DEFAULT_OUTPUT_SLACK, MAX_EXPANSION, YAZ0_HEADER_SIZE};
use super::header::Yaz0Header;
use super::parser::TokenParser;
use super::tokens::Yaz0Token;
use crate::error::{Error, Result};

/// Cursor positions after decoding (or measuring) one stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Bytes consumed from the compressed source
    pub src_pos: usize,
    /// Bytes produced, including any overshoot from the final run
    pub dst_pos: usize,
    /// Length that was requested
    pub requested: usize,
}

impl DecodeProgress {
    /// Bytes produced past the requested length by a final run
    pub fn overshoot(&self) -> usize {
        self.dst_pos.saturating_sub(self.requested)
    }
}

/// Yaz0 payload decoder
///
/// Runs are always copied in full, one byte at a time, even when the last
/// one carries the output past the requested length. Callers that need the
/// exact payload truncate to `requested` afterwards.
#[derive(Clone, Debug)]
pub struct Yaz0Decoder {
    /// Extra capacity reserved beyond the requested length
    output_slack: usize,
}

impl Yaz0Decoder {
    pub fn new() -> Self {
        Self { output_slack: DEFAULT_OUTPUT_SLACK }
    }

    pub fn with_output_slack(output_slack: usize) -> Self {
        Self { output_slack }
    }

    /// Decode `src` until at least `uncompressed_size` bytes are produced.
    ///
    /// `dst` is cleared first; back-references can only reach bytes written
    /// by this call.
    pub fn decode_into(
        &self,
        src: &[u8],
        uncompressed_size: usize,
        dst: &mut Vec<u8>,
    ) -> Result<DecodeProgress> {
        dst.clear();
        // The declared size is untrusted; never reserve more than `src` can produce
        let reachable = src.len().saturating_mul(MAX_EXPANSION);
        let capacity = uncompressed_size.min(reachable).saturating_add(self.output_slack);
        dst.try_reserve(capacity).map_err(|_| Error::OutputAllocation { size: capacity })?;

        let mut parser = TokenParser::new(src);

        while dst.len() < uncompressed_size {
            match parser.next_token()? {
                Yaz0Token::Literal(byte) => dst.push(byte),
                Yaz0Token::BackRef { distance, length } => {
                    let available = dst.len();
                    if distance as usize > available {
                        return Err(Error::BackReferenceOutOfRange { distance, available });
                    }

                    // Source and destination may overlap: copy forward byte by byte
                    let mut copy_src = available - distance as usize;
                    for _ in 0..length {
                        let byte = dst[copy_src];
                        dst.push(byte);
                        copy_src += 1;
                    }
                }
            }
        }

        Ok(DecodeProgress {
            src_pos: parser.position(),
            dst_pos: dst.len(),
            requested: uncompressed_size,
        })
    }

    /// Decode into a freshly allocated buffer
    pub fn decode(
        &self,
        src: &[u8],
        uncompressed_size: usize,
    ) -> Result<(Vec<u8>, DecodeProgress)> {
        let mut dst = Vec::new();
        let progress = self.decode_into(src, uncompressed_size, &mut dst)?;
        Ok((dst, progress))
    }
}

impl Default for Yaz0Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the token stream without producing output.
///
/// Reports the same cursors `decode_into` would on a stream whose
/// back-references are valid. Back-reference distances are not checked.
pub fn measure(src: &[u8], uncompressed_size: usize) -> Result<DecodeProgress> {
    let mut parser = TokenParser::new(src);
    let mut produced = 0usize;

    while produced < uncompressed_size {
        produced += parser.next_token()?.uncompressed_size();
    }

    Ok(DecodeProgress {
        src_pos: parser.position(),
        dst_pos: produced,
        requested: uncompressed_size,
    })
}

/// Decompress a complete Yaz0 stream (header at offset 0).
///
/// Returns exactly the declared number of bytes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let header = Yaz0Header::parse(data)?;
    let size = header.uncompressed_size as usize;

    let (mut out, _) = Yaz0Decoder::new().decode(&data[YAZ0_HEADER_SIZE..], size)?;
    out.truncate(size);
    Ok(out)
}
