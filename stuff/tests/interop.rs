//! Interoperability between the batch and streaming codecs.

use cuckoo_stuff::{
    batch,
    stream::{Decoder, Encoder, END_OF_STREAM},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn stream_stuff(input: &[u8]) -> Vec<u8> {
    let mut encoder = Encoder::default();
    let mut out: Vec<u8> = Vec::new();
    for &byte in input {
        out.extend_from_slice(&encoder.stuff_byte(byte));
    }
    out
}

fn stream_unstuff(input: &[u8]) -> Vec<u8> {
    let mut decoder = Decoder::default();
    let mut out: Vec<u8> = Vec::new();
    for &byte in input {
        out.extend_from_slice(&decoder.unstuff_byte(byte));
    }
    out.extend_from_slice(&decoder.unstuff_byte(END_OF_STREAM));
    out
}

/// Returns true if every data byte that collides with `e2` is followed by a byte that would be
/// ambiguous (in which case the batch encoder doubles it just like the streaming encoder).
fn doubles_every_e2(input: &[u8]) -> bool {
    let mut encoder = Encoder::default();
    for (i, &byte) in input.iter().enumerate() {
        let (e1, e2) = (encoder.escapes().e1(), encoder.escapes().e2());
        if byte == e2 {
            match input.get(i + 1) {
                Some(&next) if next == 0 || next == e1 || next == e2 => {}
                _ => return false,
            }
        }
        encoder.stuff_byte(byte);
    }
    true
}

fn random_message(rng: &mut StdRng) -> Vec<u8> {
    let len = rng.gen_range(0..200);
    (0..len)
        .map(|_| match rng.gen_range(0..5) {
            0 => 0x00,
            1 => 0xC1,
            2 => 0xF8,
            3 => 0xA0,
            _ => rng.gen(),
        })
        .collect()
}

#[test]
fn test_decoders_accept_both_encodings() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..2_000 {
        let input = random_message(&mut rng);
        let batch_stuffed = batch::stuff_to_vec(&input);
        let stream_stuffed = stream_stuff(&input);

        assert!(!batch_stuffed.contains(&0));
        assert!(!stream_stuffed.contains(&0));

        assert_eq!(batch::unstuff_to_vec(&batch_stuffed), input);
        assert_eq!(batch::unstuff_to_vec(&stream_stuffed), input);
        assert_eq!(stream_unstuff(&batch_stuffed), input);
        assert_eq!(stream_unstuff(&stream_stuffed), input);
    }
}

#[test]
fn test_encoders_agree_when_e2_is_doubled() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut checked = 0;
    for _ in 0..2_000 {
        let input = random_message(&mut rng);
        if !doubles_every_e2(&input) {
            continue;
        }
        assert_eq!(stream_stuff(&input), batch::stuff_to_vec(&input));
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn test_encoders_diverge_on_lone_e2() {
    let input = [0x41, 0xF8, 0x42];
    assert_eq!(batch::stuff_to_vec(&input), [0x41, 0xF8, 0x42]);
    assert_eq!(stream_stuff(&input), [0x41, 0xF8, 0xF8, 0x42]);
}

#[test]
fn test_trailing_e2_cross_check() {
    // Rotate e2 once (0xF8 -> 0xA0), then end the message with the current e2
    let input = [0x10, 0xF8, 0xF8, 0x20, 0xA0];
    let stuffed = batch::stuff_to_vec(&input);
    assert_eq!(stuffed, [0x10, 0xF8, 0xF8, 0xF8, 0x20, 0xA0]);
    assert_eq!(stuffed.last(), Some(&0xA0));

    // Batch decoder treats the trailing e2 as literal
    assert_eq!(batch::unstuff_to_vec(&stuffed), input);

    // Streaming decoder holds it back until the sentinel
    let mut decoder = Decoder::default();
    let mut out: Vec<u8> = Vec::new();
    for &byte in &stuffed {
        out.extend_from_slice(&decoder.unstuff_byte(byte));
    }
    assert!(decoder.is_pending());
    assert_eq!(&out[..], &input[..4]);
    out.extend_from_slice(&decoder.unstuff_byte(END_OF_STREAM));
    assert_eq!(out, input);
}

#[test]
fn test_in_place_matches_stream() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let input = random_message(&mut rng);
        let mut buf = batch::stuff_to_vec(&input);
        let expected = stream_unstuff(&buf);
        let n = batch::unstuff_in_place(&mut buf);
        assert_eq!(&buf[..n], &expected[..]);
    }
}
