use crate::{Config, Error, Generator};
use tracing::trace;

/// The active escape codes of a coder context, and the generator that replaces them.
///
/// `e1` stands in for zero; `e2` prefixes escape sequences. At every observable point both are
/// non-zero and distinct. A consumed code is replaced with a generator draw that excludes the
/// other code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Escapes {
    generator: Generator,
    e1: u8,
    e2: u8,
}

impl Escapes {
    /// Creates the escape codes of a fresh context.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self {
            generator: Generator::new(cfg.seed),
            e1: cfg.e1,
            e2: cfg.e2,
        })
    }

    /// Returns the first escape code.
    #[inline]
    pub fn e1(&self) -> u8 {
        self.e1
    }

    /// Returns the second escape code.
    #[inline]
    pub fn e2(&self) -> u8 {
        self.e2
    }

    /// Returns the generator backing these codes.
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Replaces `e1` after it collided with a data byte.
    pub(crate) fn rotate_e1(&mut self) {
        let old = self.e1;
        self.e1 = self.generator.next(self.e2);
        trace!(old, new = self.e1, "rotated e1");
    }

    /// Replaces `e2` after it collided with a data byte.
    pub(crate) fn rotate_e2(&mut self) {
        let old = self.e2;
        self.e2 = self.generator.next(self.e1);
        trace!(old, new = self.e2, "rotated e2");
    }
}

impl Default for Escapes {
    fn default() -> Self {
        Self {
            generator: Generator::default(),
            e1: crate::INITIAL_E1,
            e2: crate::INITIAL_E2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_protocol() {
        let escapes = Escapes::new(&Config::PROTOCOL).unwrap();
        assert_eq!(escapes, Escapes::default());
        assert_eq!(escapes.e1(), 0xC1);
        assert_eq!(escapes.e2(), 0xF8);
        assert_eq!(escapes.generator().state(), crate::INITIAL_SEED);
    }

    #[test]
    fn test_invalid_config() {
        let cfg = Config {
            e1: 0x10,
            e2: 0x10,
            ..Config::PROTOCOL
        };
        assert!(matches!(
            Escapes::new(&cfg),
            Err(Error::InvalidEscapes(0x10, 0x10))
        ));
    }

    #[test]
    fn test_rotation() {
        let mut escapes = Escapes::default();

        escapes.rotate_e2();
        assert_eq!(escapes.e1(), 0xC1);
        assert_eq!(escapes.e2(), 0xA0);

        escapes.rotate_e1();
        assert_eq!(escapes.e1(), 0x5B);
        assert_eq!(escapes.e2(), 0xA0);
    }

    #[test]
    fn test_invariant_holds() {
        let mut escapes = Escapes::default();
        for i in 0..10_000 {
            if i % 3 == 0 {
                escapes.rotate_e2();
            } else {
                escapes.rotate_e1();
            }
            assert_ne!(escapes.e1(), 0);
            assert_ne!(escapes.e2(), 0);
            assert_ne!(escapes.e1(), escapes.e2());
        }
    }
}
