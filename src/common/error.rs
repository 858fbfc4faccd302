use thiserror::Error;

use super::codec::Mode;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Boundary
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    // Parameters
    #[error("Invalid version {0}, expected a value from 1 to 40")]
    InvalidVersion(usize),
    #[error("Invalid error correction level, expected one of L, M, Q, H")]
    InvalidECLevel,
    #[error("Invalid encoding mode, expected one of numeric, alphanumeric, byte, kanji")]
    InvalidMode,
    #[error("Invalid masking pattern {0}, expected a value from 0 to 7")]
    InvalidMaskingPattern(u8),

    // Encoder
    #[error("Invalid character {ch:?} for {mode:?} mode")]
    InvalidChar { ch: char, mode: Mode },
    #[error("Capacity exceeded: {required} bits required, {capacity} bits available")]
    CapacityExceeded { required: usize, capacity: usize },

    // Error corrector
    #[error("Data length must be {expected} codewords, got {actual}")]
    InvalidBlockLength { expected: usize, actual: usize },
}

pub type QRResult<T> = Result<T, QRError>;
