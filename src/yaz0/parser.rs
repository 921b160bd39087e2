use super::constants::{LONG_LENGTH_BIAS, TOKENS_PER_GROUP};
use super::tokens::Yaz0Token;
use crate::error::{Error, Result};

/// Reads Yaz0 tokens from a payload, one control bit at a time.
///
/// Each control byte governs the next eight tokens, most significant bit
/// first. A new control byte is only fetched when the next token is
/// requested, so a group cut short at the end of a stream never consumes
/// bytes it doesn't use.
pub struct TokenParser<'a> {
    src: &'a [u8],
    /// Next unread byte in `src`
    pos: usize,
    /// Current control byte, shifted so the next bit is the MSB
    control: u8,
    /// Control bits not yet used (0-8)
    bits_left: u8,
}

impl<'a> TokenParser<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0, control: 0, bits_left: 0 }
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.src.get(self.pos).ok_or(Error::SourceExhausted { position: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Parse the next token
    pub fn next_token(&mut self) -> Result<Yaz0Token> {
        if self.bits_left == 0 {
            self.control = self.read_byte()?;
            self.bits_left = TOKENS_PER_GROUP;
        }

        let token = if self.control & 0x80 != 0 {
            Yaz0Token::Literal(self.read_byte()?)
        } else {
            let byte1 = self.read_byte()?;
            let byte2 = self.read_byte()?;

            let distance = ((((byte1 & 0x0F) as u16) << 8) | byte2 as u16) + 1;
            let length = match byte1 >> 4 {
                0 => self.read_byte()? as u16 + LONG_LENGTH_BIAS,
                code => code as u16 + 2,
            };

            Yaz0Token::BackRef { distance, length }
        };

        self.control <<= 1;
        self.bits_left -= 1;

        Ok(token)
    }

    /// Bytes consumed from the source so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Control bits left in the current group
    pub fn bits_left(&self) -> u8 {
        self.bits_left
    }
}
