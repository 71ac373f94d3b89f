//! Error types for stuffing operations

use thiserror::Error;

/// Error type for stuffing operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("output too small: {0} < {1}")]
    OutputTooSmall(usize, usize), // capacity, required
    #[error("invalid escape codes: e1={0:#04x} e2={1:#04x}")]
    InvalidEscapes(u8, u8), // e1, e2
    #[error("generator seed is zero")]
    ZeroSeed,
}
