#![no_main]

use bytes::BytesMut;
use cuckoo_stuff::{
    batch,
    stream::{Decoder, Encoder},
};
use libfuzzer_sys::fuzz_target;

fn fuzz(data: &[u8]) {
    let mut encoder = Encoder::default();
    let mut stuffed = BytesMut::new();
    for &byte in data {
        let out = encoder.stuff_byte(byte);
        assert!(!out.is_empty() && out.len() <= 2);
        stuffed.extend_from_slice(&out);
    }
    assert!(!stuffed.contains(&0), "stuffed output contains zero");
    assert!(stuffed.len() <= 2 * data.len());

    let escapes = encoder.escapes();
    assert_ne!(escapes.e1(), 0);
    assert_ne!(escapes.e2(), 0);
    assert_ne!(escapes.e1(), escapes.e2());

    // Streaming decode of the streaming encoding
    let mut decoder = Decoder::default();
    let mut unstuffed = BytesMut::new();
    decoder.decode(&stuffed, &mut unstuffed);
    decoder.finish(&mut unstuffed);
    assert_eq!(&unstuffed[..], data);

    // Batch decode of the streaming encoding
    assert_eq!(batch::unstuff_to_vec(&stuffed), data);

    // Streaming decode of the batch encoding
    let mut decoder = Decoder::default();
    let mut unstuffed: Vec<u8> = Vec::new();
    decoder.decode(&batch::stuff_to_vec(data), &mut unstuffed);
    decoder.finish(&mut unstuffed);
    assert_eq!(unstuffed, data);
}

fuzz_target!(|data: &[u8]| {
    fuzz(data);
});
