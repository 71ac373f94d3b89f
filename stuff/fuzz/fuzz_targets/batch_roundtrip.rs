#![no_main]

use arbitrary::Arbitrary;
use cuckoo_stuff::{batch, max_stuffed_len, Config};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    e1: u8,
    e2: u8,
    seed: [u8; 4],
    data: Vec<u8>,
}

fn fuzz(input: FuzzInput) {
    let cfg = Config {
        e1: input.e1,
        e2: input.e2,
        seed: input.seed,
    };
    let data = input.data;

    let mut stuffed = vec![0u8; max_stuffed_len(data.len())];
    let n = match batch::stuff_with(&cfg, &data, &mut stuffed) {
        Ok(n) => n,
        Err(_) => {
            assert!(cfg.validate().is_err());
            return;
        }
    };
    let stuffed = &stuffed[..n];
    assert!(!stuffed.contains(&0), "stuffed output contains zero");
    assert!(n >= data.len());

    let mut unstuffed = vec![0u8; n];
    let m = batch::unstuff_with(&cfg, stuffed, &mut unstuffed).expect("decode failed");
    assert_eq!(&unstuffed[..m], &data[..]);

    let mut in_place = stuffed.to_vec();
    let m = batch::unstuff_in_place_with(&cfg, &mut in_place).expect("decode failed");
    assert_eq!(&in_place[..m], &data[..]);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
