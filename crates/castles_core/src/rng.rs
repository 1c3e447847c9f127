//! Simple deterministic RNG for the engine.
//!
//! Every source of randomness in the simulation - obstacle scatter, the
//! enemy builder's kind and site choices - draws from one seeded [`GameRng`]
//! owned by the engine, so a whole run replays from `config.seed`.

/// Seeded linear-congruential generator.
///
/// Not cryptographic and not statistically strong; good enough for game
/// placement decisions while staying dependency-free and deterministic
/// across platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    /// Next raw state value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5DE_ECE6_6D).wrapping_add(11);
        self.state
    }

    /// Next value with usable randomness.
    ///
    /// The low-order bits of a power-of-two-modulus LCG cycle with tiny
    /// periods (bit 0 alternates every step), so every decision draws from
    /// the high 31 bits only.
    fn next_draw(&mut self) -> u64 {
        self.next_u64() >> 33
    }

    /// Uniform value in `[min, max]` (inclusive).
    pub fn next_range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (max - min) as u64 + 1;
        min + (self.next_draw() % span) as i32
    }

    /// Uniform index into a collection of `len` elements.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty collection");
        (self.next_draw() % len as u64) as usize
    }

    /// Fair coin flip.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 0
    }

    /// Raw generator state, for state hashing.
    #[must_use]
    pub const fn state(&self) -> u64 {
        self.state
    }
}
