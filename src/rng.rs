//! Xorshift32 generator for round-to-round randomness.

#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng(u32);

impl Rng {
    pub(crate) const fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift.
        Self(if seed == 0 { 0x9E37_79B9 } else { seed })
    }

    pub(crate) const fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    /// Uniform-ish value in `lo..=hi`. Expects `lo <= hi`.
    pub(crate) const fn between(&mut self, lo: u32, hi: u32) -> u32 {
        let span = hi - lo;
        if span == u32::MAX {
            return self.next();
        }
        lo + self.next() % (span + 1)
    }

    /// Mix in outside entropy, e.g. the moment a player pressed a button.
    pub(crate) const fn stir(&mut self, entropy: u32) {
        self.0 ^= entropy.wrapping_mul(0x9E37_79B9);
        if self.0 == 0 {
            self.0 = 0x9E37_79B9;
        }
        self.next();
    }
}
