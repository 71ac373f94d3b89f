//! Stuff and unstuff whole messages.
//!
//! The encoder looks one byte ahead: a data byte equal to `e2` is only doubled when the byte
//! after it would itself be ambiguous (`0`, `e1`, or `e2`). A lone `e2` at the end of a message
//! is never doubled.
//!
//! Outputs are caller-provided slices. Size them with [crate::max_stuffed_len] and
//! [crate::max_unstuffed_len]; a smaller output is rejected before anything is written.

use crate::{max_stuffed_len, max_unstuffed_len, Config, Error, Escapes};

/// Stuffs `input` into `output` using [Config::PROTOCOL], returning the number of bytes written.
///
/// `output` must hold at least [max_stuffed_len] of `input.len()` bytes.
pub fn stuff(input: &[u8], output: &mut [u8]) -> Result<usize, Error> {
    check_capacity(output.len(), max_stuffed_len(input.len()))?;
    Ok(encode(&mut Escapes::default(), input, output))
}

/// Stuffs `input` into `output` using `cfg`, returning the number of bytes written.
pub fn stuff_with(cfg: &Config, input: &[u8], output: &mut [u8]) -> Result<usize, Error> {
    let mut escapes = Escapes::new(cfg)?;
    check_capacity(output.len(), max_stuffed_len(input.len()))?;
    Ok(encode(&mut escapes, input, output))
}

/// Stuffs `input` using [Config::PROTOCOL] into a new vector.
pub fn stuff_to_vec(input: &[u8]) -> Vec<u8> {
    let mut output = vec![0u8; max_stuffed_len(input.len())];
    let n = encode(&mut Escapes::default(), input, &mut output);
    output.truncate(n);
    output
}

/// Unstuffs `input` into `output` using [Config::PROTOCOL], returning the number of bytes
/// written.
///
/// `output` must hold at least `input.len()` bytes. Every input decodes to something: stuffed
/// data produced with a different configuration (or damaged in transit) decodes to garbage
/// rather than an error.
pub fn unstuff(input: &[u8], output: &mut [u8]) -> Result<usize, Error> {
    let len = input.len();
    check_capacity(output.len(), max_unstuffed_len(len))?;
    output[..len].copy_from_slice(input);
    Ok(decode(&mut Escapes::default(), &mut output[..len]))
}

/// Unstuffs `input` into `output` using `cfg`, returning the number of bytes written.
pub fn unstuff_with(cfg: &Config, input: &[u8], output: &mut [u8]) -> Result<usize, Error> {
    let mut escapes = Escapes::new(cfg)?;
    let len = input.len();
    check_capacity(output.len(), max_unstuffed_len(len))?;
    output[..len].copy_from_slice(input);
    Ok(decode(&mut escapes, &mut output[..len]))
}

/// Unstuffs `buf` in place using [Config::PROTOCOL].
///
/// The unstuffed message occupies the first `n` bytes of `buf`, where `n` is the returned
/// length. The remaining bytes are left in an unspecified state.
pub fn unstuff_in_place(buf: &mut [u8]) -> usize {
    decode(&mut Escapes::default(), buf)
}

/// Unstuffs `buf` in place using `cfg`.
pub fn unstuff_in_place_with(cfg: &Config, buf: &mut [u8]) -> Result<usize, Error> {
    let mut escapes = Escapes::new(cfg)?;
    Ok(decode(&mut escapes, buf))
}

/// Unstuffs `input` using [Config::PROTOCOL] into a new vector.
pub fn unstuff_to_vec(input: &[u8]) -> Vec<u8> {
    let mut output = input.to_vec();
    let n = decode(&mut Escapes::default(), &mut output);
    output.truncate(n);
    output
}

fn check_capacity(capacity: usize, required: usize) -> Result<(), Error> {
    if capacity < required {
        return Err(Error::OutputTooSmall(capacity, required));
    }
    Ok(())
}

/// Assumes `output` holds at least `2 * input.len()` bytes.
fn encode(escapes: &mut Escapes, input: &[u8], output: &mut [u8]) -> usize {
    let mut o = 0;
    for (i, &byte) in input.iter().enumerate() {
        let (e1, e2) = (escapes.e1(), escapes.e2());
        if byte == 0 {
            output[o] = e1;
            o += 1;
        } else if byte == e1 {
            output[o] = e2;
            output[o + 1] = e1;
            o += 2;
            escapes.rotate_e1();
        } else if byte == e2 {
            output[o] = e2;
            o += 1;

            // Only double if what follows would be mistaken for the end of an escape sequence
            if let Some(&next) = input.get(i + 1) {
                if next == 0 || next == e1 || next == e2 {
                    output[o] = e2;
                    o += 1;
                    escapes.rotate_e2();
                }
            }
        } else {
            output[o] = byte;
            o += 1;
        }
    }
    o
}

/// Every iteration consumes at least as many bytes as it writes, so the write cursor never
/// passes the read cursor.
fn decode(escapes: &mut Escapes, buf: &mut [u8]) -> usize {
    let len = buf.len();
    let mut i = 0;
    let mut o = 0;
    while i < len {
        let (e1, e2) = (escapes.e1(), escapes.e2());
        let byte = buf[i];
        buf[o] = if byte == e1 {
            0
        } else if byte == e2 && i + 1 < len {
            let next = buf[i + 1];
            if next == e1 {
                i += 1;
                escapes.rotate_e1();
                e1
            } else if next == e2 {
                i += 1;
                escapes.rotate_e2();
                e2
            } else {
                e2
            }
        } else {
            byte
        };
        i += 1;
        o += 1;
    }
    o
}
