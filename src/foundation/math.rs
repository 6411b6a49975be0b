/// Small deterministic generator for random-walk targets.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a generator with a non-deterministic seed.
    pub fn from_entropy() -> Self {
        Self::new(fastrand::u64(..))
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1]`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision, divided by 2^53 - 1 so both ends are reachable.
        let v = self.next_u64() >> 11;
        (v as f64) / (((1u64 << 53) - 1) as f64)
    }
}
