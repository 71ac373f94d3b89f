//! Escape code generator.
//!
//! A xorshift sequence over four byte-wide registers. It is not cryptographically secure: it only
//! needs to be hard to predict for a passive observer trying to force expansion.

/// Upper bound on the number of advances performed by a single [Generator::next] call.
///
/// At most two of the 256 byte values are excluded, so a valid sequence escapes the excluded set
/// within a handful of advances.
const MAX_DRAWS: usize = 1 << 16;

/// Deterministic generator of escape codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generator {
    x: u8,
    y: u8,
    z: u8,
    w: u8,
}

impl Generator {
    /// Creates a generator from its initial registers (`x`, `y`, `z`, `w`).
    pub const fn new(seed: [u8; 4]) -> Self {
        let [x, y, z, w] = seed;
        Self { x, y, z, w }
    }

    /// Returns the current registers.
    pub const fn state(&self) -> [u8; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Advances the registers once and returns the new `w`.
    #[inline]
    fn advance(&mut self) -> u8 {
        let t = self.x ^ (self.x << 3);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 5) ^ (t ^ (t >> 2));
        self.w
    }

    /// Returns the next escape code that is neither zero nor `verboten`.
    ///
    /// The registers advance at least once, and keep advancing (without reseeding) until an
    /// acceptable value is produced.
    ///
    /// # Panics
    ///
    /// Panics if no acceptable value appears within `MAX_DRAWS` advances. An all-zero seed (rejected
    /// by [crate::Config::validate]) is the only known way to get there.
    pub fn next(&mut self, verboten: u8) -> u8 {
        for _ in 0..MAX_DRAWS {
            let code = self.advance();
            if code != 0 && code != verboten {
                return code;
            }
        }
        panic!("escape code generator is stuck: state={:?}", self.state());
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(crate::INITIAL_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_protocol_sequence() {
        // The first two rotations of the protocol (e2 with e1=0xC1, then e1 with e2=0xA0)
        let mut generator = Generator::default();
        assert_eq!(generator.next(0xC1), 0xA0);
        assert_eq!(generator.next(0xA0), 0x5B);
    }

    #[test]
    fn test_unconstrained_sequence() {
        let mut generator = Generator::default();
        let codes: Vec<u8> = (0..8).map(|_| generator.next(0)).collect();
        assert_eq!(codes, [0xA0, 0x5B, 0x43, 0xC0, 0x4E, 0xEF, 0xA5, 0x50]);
    }

    #[test]
    fn test_verboten_skipped() {
        // Forbidding the value that would have been produced skips ahead to the next one
        let mut generator = Generator::default();
        assert_eq!(generator.next(0xA0), 0x5B);
        assert_eq!(generator.next(0), 0x43);
    }

    #[test]
    fn test_deterministic() {
        let mut a = Generator::new([1, 2, 3, 4]);
        let mut b = Generator::new([1, 2, 3, 4]);
        for i in 0..1_000u32 {
            let verboten = (i % 256) as u8;
            assert_eq!(a.next(verboten), b.next(verboten));
            assert_eq!(a.state(), b.state());
        }
    }

    #[test]
    fn test_never_zero_or_verboten() {
        let mut generator = Generator::default();
        for i in 0..10_000u32 {
            let verboten = (i.wrapping_mul(31) % 256) as u8;
            let code = generator.next(verboten);
            assert_ne!(code, 0);
            assert_ne!(code, verboten);
        }
    }

    #[test]
    fn test_covers_codes() {
        // Every non-zero byte is eventually drawn
        let mut generator = Generator::default();
        let mut seen = HashSet::new();
        for _ in 0..100_000 {
            seen.insert(generator.next(0));
        }
        assert_eq!(seen.len(), 255);
    }

    #[test]
    #[should_panic(expected = "escape code generator is stuck")]
    fn test_zero_seed_panics() {
        Generator::new([0; 4]).next(0);
    }
}
