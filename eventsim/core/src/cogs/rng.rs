use std::fmt;

use eventsim_core_bond::{ClosedOpenUnitF64, NonNegativeF64, OpenClosedUnitF64};

#[allow(clippy::module_name_repetitions)]
pub trait RngCore: Sized + Clone + fmt::Debug {
    type Seed: AsMut<[u8]> + Default + Sized;

    #[must_use]
    fn from_seed(seed: Self::Seed) -> Self;

    #[must_use]
    fn sample_u64(&mut self) -> u64;
}

#[allow(clippy::module_name_repetitions)]
pub trait SeedableRng: RngCore {
    #[must_use]
    fn seed_from_u64(mut state: u64) -> Self {
        // Implementation from:
        // https://docs.rs/rand/0.7.3/rand/trait.SeedableRng.html#method.seed_from_u64

        // We use PCG32 to generate a u32 sequence, and copy to the seed
        const MUL: u64 = 6_364_136_223_846_793_005_u64;
        const INC: u64 = 11_634_580_027_462_260_723_u64;

        let mut seed = Self::Seed::default();

        for chunk in seed.as_mut().chunks_mut(4) {
            // We advance the state first (to get away from the input value,
            // in case it has low Hamming Weight).
            state = state.wrapping_mul(MUL).wrapping_add(INC);

            // Use PCG output function with to_le to generate x:
            #[allow(clippy::cast_possible_truncation)]
            let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let rot = (state >> 59) as u32;
            let x = xorshifted.rotate_right(rot).to_le_bytes();

            chunk.copy_from_slice(&x[..chunk.len()]);
        }

        Self::from_seed(seed)
    }
}

impl<R: RngCore> SeedableRng for R {}

/// Derived draws on top of the raw `u64` stream.
///
/// Every method consumes a fixed number of `u64`s from the generator, except
/// for `sample_poisson`, which consumes one uniform (or one Box-Muller pair
/// for very large means).
#[allow(clippy::module_name_repetitions)]
pub trait RngSampler: RngCore {
    #[must_use]
    #[inline]
    fn sample_uniform_closed_open(&mut self) -> ClosedOpenUnitF64 {
        // http://prng.di.unimi.it -> Generating uniform doubles in the unit interval
        #[allow(clippy::cast_precision_loss)]
        let u01 = ((self.sample_u64() >> 11) as f64) * f64::from_bits(0x3CA0_0000_0000_0000_u64); // 0x1.0p-53

        // Safety: a 53 bit integer times 2^-53 is in [0, 1)
        unsafe { ClosedOpenUnitF64::new_unchecked(u01) }
    }

    #[must_use]
    #[inline]
    fn sample_uniform_open_closed(&mut self) -> OpenClosedUnitF64 {
        #[allow(clippy::cast_precision_loss)]
        let u01 =
            (((self.sample_u64() >> 11) + 1) as f64) * f64::from_bits(0x3CA0_0000_0000_0000_u64); // 0x1.0p-53

        // Safety: a 53 bit integer plus one times 2^-53 is in (0, 1]
        unsafe { OpenClosedUnitF64::new_unchecked(u01) }
    }

    #[must_use]
    fn sample_standard_normal_2d(&mut self) -> (f64, f64) {
        // Basic Box-Muller transform
        let u0 = self.sample_uniform_open_closed();
        let u1 = self.sample_uniform_closed_open();

        let r = (-2.0_f64 * u0.ln()).sqrt();
        let theta = -std::f64::consts::TAU * u1.get();

        (r * theta.sin(), r * theta.cos())
    }

    #[must_use]
    fn sample_normal(&mut self, mu: f64, sigma: NonNegativeF64) -> f64 {
        let (z0, _z1) = self.sample_standard_normal_2d();

        z0 * sigma.get() + mu
    }

    /// Samples `Poisson(lambda)`, where `Poisson(0)` is always `0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    fn sample_poisson(&mut self, lambda: NonNegativeF64) -> u64 {
        if lambda == 0.0_f64 {
            return 0;
        }

        let no_event_probability = (-lambda.get()).exp();

        if !no_event_probability.is_normal() {
            // Fallback in case no_event_probability underflows, subnormal
            //  values are too imprecise for the inversion to sum to one
            // Note: rust clamps f64 as u64 to [0, 2^64 - 1]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let normal_as_poisson = self
                .sample_normal(lambda.get(), lambda.sqrt())
                .round() as u64;

            return normal_as_poisson;
        }

        // https://en.wikipedia.org/w/index.php?title=Poisson_distribution&oldid=1088559556#cite_ref-Devroye1986_61-0
        let mut poisson = 0_u64;
        let mut prod = no_event_probability;
        let mut acc = no_event_probability;

        let u = self.sample_uniform_closed_open();

        while u > acc && prod > 0.0_f64 {
            poisson += 1;
            prod *= lambda.get() / (poisson as f64);
            acc += prod;
        }

        poisson
    }
}

impl<R: RngCore> RngSampler for R {}
