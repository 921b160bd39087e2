/// Magic tag at the start of every Yaz0 stream
pub const YAZ0_MAGIC: [u8; 4] = *b"Yaz0";

/// Full header size: magic + uncompressed size + 8 reserved bytes
pub const YAZ0_HEADER_SIZE: usize = 16;

/// Size of the magic tag
pub const YAZ0_MAGIC_SIZE: usize = 4;

/// Number of tokens governed by a single control byte
pub const TOKENS_PER_GROUP: u8 = 8;

/// Back-references encode `distance - 1` in 12 bits
pub const MAX_DISTANCE: u16 = 0x1000;

/// Longest run encodable in a 2-byte back-reference (length code 15)
pub const MAX_SHORT_LENGTH: u16 = 17;

/// Bias added to the extra byte of a 3-byte back-reference
pub const LONG_LENGTH_BIAS: u16 = 0x12;

/// Longest run of any back-reference (0xFF + 0x12)
pub const MAX_LENGTH: u16 = 0xFF + LONG_LENGTH_BIAS;

/// Upper bound on output bytes per source byte: a control byte followed by
/// eight 3-byte runs of `MAX_LENGTH` yields 2184 bytes from 25
pub const MAX_EXPANSION: usize = 88;

/// Output capacity reserved past the declared size, covering a final run
/// that overshoots the requested length
pub const DEFAULT_OUTPUT_SLACK: usize = 0x1000;
