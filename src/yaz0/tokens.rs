use super::constants::MAX_SHORT_LENGTH;

/// A single token in a Yaz0 payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Yaz0Token {
    /// A literal byte (control bit set)
    Literal(u8),
    /// A back-reference (control bit clear): copy `length` bytes starting
    /// `distance` bytes back from the current output position.
    ///
    /// `distance` is the decoded value (raw 12-bit field + 1, so 1..=4096)
    /// and `length` is 3..=273.
    BackRef { distance: u16, length: u16 },
}

impl Yaz0Token {
    /// Returns the number of output bytes this token produces
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Yaz0Token::Literal(_) => 1,
            Yaz0Token::BackRef { length, .. } => *length as usize,
        }
    }

    /// Returns the number of payload bytes this token occupies
    /// (excluding its share of the control byte)
    pub fn encoded_size(&self) -> usize {
        match self {
            Yaz0Token::Literal(_) => 1,
            Yaz0Token::BackRef { length, .. } if *length <= MAX_SHORT_LENGTH => 2,
            Yaz0Token::BackRef { .. } => 3,
        }
    }
}
