#[cfg(test)]
mod decoder;
mod encoder;
mod types;

#[cfg(test)]
pub(crate) use decoder::*;
pub use encoder::*;
pub use types::*;

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Codec proptesting
//------------------------------------------------------------------------------
