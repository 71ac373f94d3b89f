use criterion::criterion_main;
use rand::{rngs::StdRng, Rng, SeedableRng};


/// Message sizes exercised by every benchmark.
pub(crate) const SIZES: [usize; 4] = [64, 1024, 16 * 1024, 1024 * 1024];

/// Generates a message of `len` bytes where roughly one in `zero_every` bytes is zero.
pub(crate) fn message(rng: &mut StdRng, len: usize, zero_every: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, zero_every) {
                0
            } else {
                rng.gen()
            }
        })
        .collect()
}

pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

criterion_main!(batch::benches, stream::benches);
