//! Remove zero bytes from a message with rotating escape codes.
//!
//! # Overview
//!
//! Cuckoo stuffing transforms an arbitrary byte sequence into one that contains no zero bytes
//! (so that an external transport can delimit messages with zero) and inverts that transform
//! losslessly.
//!
//! At any point two escape codes, `e1` and `e2`, are active. They are never zero and never
//! equal to each other. Unlike single-escape schemes (like COBS or SLIP), neither code is a
//! fixed constant: whenever a code collides with a real data byte it is "consumed" and replaced
//! with the next value of a deterministic pseudo-random sequence. An adversary that does not
//! observe the sequence cannot pick a byte value that is guaranteed to be expensive across a
//! whole stream.
//!
//! # Format
//!
//! Decoding rules:
//! - `e1` -> `0`
//! - `e2 e1` -> `e1`, then replace `e1`
//! - `e2 e2` -> `e2`, then replace `e2`
//! - `e2 x` (`x` not in `{e1, e2}`) -> `e2 x`
//! - `x` -> `x`
//!
//! Encoding rules are the inverse. In typical data, the encoded output grows by well under one
//! percent. The absolute worst case (every byte colliding with the current `e1`) doubles it.
//!
//! # Batch vs. Streaming
//!
//! The [batch] codec encodes and decodes whole buffers and uses one byte of lookahead to avoid
//! doubling a lone `e2`. The [stream] codec handles one byte at a time (for transports that do
//! not buffer) and trades a little extra expansion for the lack of lookahead. Both encoders
//! produce output that either decoder understands.
//!
//! # Synchronization
//!
//! Escape codes are never transmitted. An encoder and the matching decoder stay in lockstep
//! only if they start from the same [Config] and process the same bytes in the same order.
//! Any divergence (a skipped or duplicated byte, a different seed) silently corrupts every
//! subsequent byte of that stream; there is no detection or recovery. Start a fresh context on
//! both sides for each independent stream.
//!
//! # Example
//!
//! ```
//! use cuckoo_stuff::{batch, max_stuffed_len};
//!
//! let message = [0xFF, 0x00, 0xF8, 0xC1, 0x00];
//! let mut stuffed = [0u8; max_stuffed_len(5)];
//! let n = batch::stuff(&message, &mut stuffed).unwrap();
//! assert_eq!(&stuffed[..n], &[0xFF, 0xC1, 0xF8, 0xF8, 0xA0, 0xC1, 0x5B]);
//!
//! let mut unstuffed = [0u8; 7];
//! let n = batch::unstuff(&stuffed[..n], &mut unstuffed).unwrap();
//! assert_eq!(&unstuffed[..n], &message);
//! ```

pub mod batch;
mod error;
pub use error::Error;
mod escapes;
pub use escapes::Escapes;
mod generator;
pub use generator::Generator;
pub mod stream;

/// Initial value of the first escape code.
pub const INITIAL_E1: u8 = 0xC1;

/// Initial value of the second escape code.
pub const INITIAL_E2: u8 = 0xF8;

/// Initial registers (`x`, `y`, `z`, `w`) of the escape code generator.
pub const INITIAL_SEED: [u8; 4] = [21, 229, 181, 51];

/// Initialization values for a fresh coder context.
///
/// An encoder and decoder only interoperate if they are created from identical configurations.
/// Unless both ends of a link agree otherwise, use [Config::PROTOCOL].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Initial value of the first escape code (the stand-in for zero).
    pub e1: u8,

    /// Initial value of the second escape code (the prefix of escape sequences).
    pub e2: u8,

    /// Initial registers of the escape code generator.
    pub seed: [u8; 4],
}

impl Config {
    /// The fixed protocol constants.
    pub const PROTOCOL: Self = Self {
        e1: INITIAL_E1,
        e2: INITIAL_E2,
        seed: INITIAL_SEED,
    };

    /// Checks that the configuration can start a coder context.
    ///
    /// Escape codes must be non-zero and distinct. The seed must not be all zero (an all-zero
    /// generator never produces a non-zero value).
    pub fn validate(&self) -> Result<(), Error> {
        if self.e1 == 0 || self.e2 == 0 || self.e1 == self.e2 {
            return Err(Error::InvalidEscapes(self.e1, self.e2));
        }
        if self.seed == [0; 4] {
            return Err(Error::ZeroSeed);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::PROTOCOL
    }
}

/// Returns the largest possible stuffed size for a message of `raw_len` bytes.
///
/// Use this to size the output of [batch::stuff].
pub const fn max_stuffed_len(raw_len: usize) -> usize {
    raw_len.saturating_mul(2)
}

/// Returns the largest possible unstuffed size for a stuffed message of `stuffed_len` bytes.
///
/// Use this to size the output of [batch::unstuff].
pub const fn max_unstuffed_len(stuffed_len: usize) -> usize {
    stuffed_len
}
