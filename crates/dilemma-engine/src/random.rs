//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG so the Random opponent can be replayed from a seed.
//! Uses xorshift64*.

/// Seeded random number generator
///
/// Deterministic: same seed + round = same sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

/// xorshift never leaves the all-zero state
const ZERO_STATE_FALLBACK: u64 = 0x853c49e6748fea9b;

fn non_zero(state: u64) -> u64 {
    if state == 0 { ZERO_STATE_FALLBACK } else { state }
}

impl SeededRng {
    /// Create a new RNG from a session seed
    pub fn new(seed: u64) -> Self {
        // splitmix64 finalizer spreads small seeds across the state
        let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;

        let mut rng = Self { state: non_zero(z) };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Create RNG for a specific round of the session
    pub fn for_round(&self, round: u32) -> Self {
        let state = self.state ^ (round as u64).wrapping_mul(0x9e3779b97f4a7c15);

        let mut rng = Self { state: non_zero(state) };
        rng.next_u64(); // Mix
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Fair coin flip
    pub fn next_bool(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}
