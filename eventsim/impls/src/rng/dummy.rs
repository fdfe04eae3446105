use eventsim_core::cogs::RngCore;

/// Replays a fixed sequence of uniform samples in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct DummyRng(Vec<f64>);

impl DummyRng {
    pub fn new(mut vec: Vec<f64>) -> Self {
        vec.reverse();

        Self(vec)
    }

    fn sample_f64(&mut self) -> f64 {
        self.0.pop().unwrap()
    }

    pub fn is_exhausted(&self) -> bool {
        self.0.is_empty()
    }
}

impl RngCore for DummyRng {
    type Seed = [u8; 0];

    #[must_use]
    fn from_seed(_seed: Self::Seed) -> Self {
        Self(Vec::new())
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample_u64(&mut self) -> u64 {
        ((self.sample_f64() / f64::from_bits(0x3CA0_0000_0000_0000_u64)) as u64) << 11
    }
}
