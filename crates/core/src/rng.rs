use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().next_u64())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Fisher–Yates; every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}
