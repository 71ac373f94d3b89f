//! Stuff and unstuff one byte at a time.
//!
//! Useful for transports that do not buffer (like a UART interrupt handler). Without lookahead,
//! the [Encoder] doubles every data byte equal to `e2`, so its output is slightly larger than that
//! of [crate::batch::stuff] (but decodes with either decoder).
//!
//! The [Decoder] cannot resolve an `e2` until it sees the byte after it. Once the stuffed message
//! has been fed, pass [END_OF_STREAM] (or call [Decoder::finish]) to flush a trailing `e2`. Zero
//! never occurs in stuffed data, so it is free to act as the sentinel.
//!
//! # Example
//!
//! ```
//! use cuckoo_stuff::stream::{Decoder, Encoder};
//!
//! let mut encoder = Encoder::default();
//! let mut stuffed: Vec<u8> = Vec::new();
//! encoder.encode(b"\x00cuckoo\x00", &mut stuffed);
//! assert!(!stuffed.contains(&0));
//!
//! let mut decoder = Decoder::default();
//! let mut unstuffed: Vec<u8> = Vec::new();
//! decoder.decode(&stuffed, &mut unstuffed);
//! decoder.finish(&mut unstuffed);
//! assert_eq!(unstuffed, b"\x00cuckoo\x00");
//! ```

use crate::{Config, Error, Escapes};
use bytes::BufMut;
use std::ops::Deref;
use tracing::debug;

/// Byte passed to [Decoder::unstuff_byte] to signal the end of the stuffed stream.
pub const END_OF_STREAM: u8 = 0;

/// Bytes produced by a single streaming step (at most two).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Output {
    bytes: [u8; 2],
    len: u8,
}

impl Output {
    const EMPTY: Self = Self {
        bytes: [0; 2],
        len: 0,
    };

    const fn one(byte: u8) -> Self {
        Self {
            bytes: [byte, 0],
            len: 1,
        }
    }

    const fn two(first: u8, second: u8) -> Self {
        Self {
            bytes: [first, second],
            len: 2,
        }
    }

    /// Returns the number of bytes produced.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the produced bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Returns the number of bytes produced and the backing array.
    ///
    /// Only the first `count` bytes of the array are meaningful.
    pub fn into_parts(self) -> (usize, [u8; 2]) {
        (self.len(), self.bytes)
    }
}

impl Deref for Output {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Output {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Stuffs a stream one byte at a time.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    escapes: Escapes,
}

impl Encoder {
    /// Creates an encoder for a fresh stream.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        Ok(Self {
            escapes: Escapes::new(cfg)?,
        })
    }

    /// Returns the active escape codes.
    pub fn escapes(&self) -> &Escapes {
        &self.escapes
    }

    /// Stuffs a single byte, producing one or two bytes.
    pub fn stuff_byte(&mut self, byte: u8) -> Output {
        let (e1, e2) = (self.escapes.e1(), self.escapes.e2());
        if byte == e2 {
            self.escapes.rotate_e2();
            Output::two(e2, e2)
        } else if byte == e1 {
            self.escapes.rotate_e1();
            Output::two(e2, e1)
        } else if byte == 0 {
            Output::one(e1)
        } else {
            Output::one(byte)
        }
    }

    /// Stuffs every byte of `input` into `out`.
    pub fn encode(&mut self, input: &[u8], out: &mut impl BufMut) {
        for &byte in input {
            out.put_slice(&self.stuff_byte(byte));
        }
    }
}

/// Decoder state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// The previous byte was fully resolved.
    #[default]
    Idle,

    /// The previous byte was `e2` (or [END_OF_STREAM]) and its meaning depends on the next byte.
    PendingResolve,
}

/// Unstuffs a stream one byte at a time.
///
/// [END_OF_STREAM] terminates the stream: once it has been fed, the decoder must not be fed again
/// (create a new one, alongside a new [Encoder], for the next stream).
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    escapes: Escapes,
    state: State,
}

impl Decoder {
    /// Creates a decoder for a fresh stream.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        Ok(Self {
            escapes: Escapes::new(cfg)?,
            state: State::Idle,
        })
    }

    /// Returns the active escape codes.
    pub fn escapes(&self) -> &Escapes {
        &self.escapes
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true if the previous byte has not been resolved yet.
    pub fn is_pending(&self) -> bool {
        self.state == State::PendingResolve
    }

    /// Unstuffs a single byte, producing zero, one, or two bytes.
    ///
    /// Pass [END_OF_STREAM] after the last stuffed byte to flush a pending `e2`.
    pub fn unstuff_byte(&mut self, byte: u8) -> Output {
        let (e1, e2) = (self.escapes.e1(), self.escapes.e2());
        match self.state {
            State::PendingResolve => {
                self.state = State::Idle;
                if byte == e1 {
                    self.escapes.rotate_e1();
                    Output::one(e1)
                } else if byte == e2 {
                    self.escapes.rotate_e2();
                    Output::one(e2)
                } else if byte == END_OF_STREAM {
                    debug!(e2, "resolved trailing e2");
                    Output::one(e2)
                } else {
                    // The pending e2 was not doubled
                    Output::two(e2, byte)
                }
            }
            State::Idle => {
                if byte == END_OF_STREAM || byte == e2 {
                    self.state = State::PendingResolve;
                    Output::EMPTY
                } else if byte == e1 {
                    Output::one(0)
                } else {
                    Output::one(byte)
                }
            }
        }
    }

    /// Unstuffs every byte of `input` into `out`.
    ///
    /// `input` must not contain [END_OF_STREAM]; use [Decoder::finish] to end the stream.
    pub fn decode(&mut self, input: &[u8], out: &mut impl BufMut) {
        for &byte in input {
            out.put_slice(&self.unstuff_byte(byte));
        }
    }

    /// Ends the stream, flushing a pending `e2` into `out`.
    pub fn finish(mut self, out: &mut impl BufMut) {
        out.put_slice(&self.unstuff_byte(END_OF_STREAM));
    }
}
