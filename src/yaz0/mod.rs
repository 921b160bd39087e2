pub mod constants;
pub mod decoder;
pub mod header;
pub mod parser;
pub mod tokens;

pub use constants::*;
pub use decoder::{decompress, measure, DecodeProgress, Yaz0Decoder};
pub use header::Yaz0Header;
pub use parser::TokenParser;
pub use tokens::Yaz0Token;
