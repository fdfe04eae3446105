//! Sampling of discretised densities by inversion of their cumulative sum.
//!
//! A density assigns a non-negative weight to every integer bin `k`. The
//! samplers here return fractional positions `k + f`, where `k` is drawn with
//! probability proportional to its weight and `f in [0, 1)` places the sample
//! uniformly inside the bin, i.e. `floor(sample)` is always the drawn bin.

use std::convert::TryFrom;

use eventsim_core::{
    cogs::{RngCore, RngSampler},
    error::SamplingError,
};
use eventsim_core_bond::{ClosedOpenUnitF64, NonNegativeF64};
use float_next_after::NextAfter;

mod batch;

pub use batch::{Axis, BatchInverseCdfSampler, DensityBatch};

#[cfg(test)]
mod tests;

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct InverseCdfSampler {
    cumulative: Box<[f64]>,
}

impl InverseCdfSampler {
    /// Creates a new `InverseCdfSampler` from the `density` weights.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDensity` if `density` has no bins, `ZeroDensity` if all
    /// weights are zero, and `NonFiniteDensity` if the total weight is not
    /// finite.
    #[debug_ensures(
        ret.as_ref().map_or(true, |sampler| sampler.cumulative.len() == density.len()),
        "one cumulative value per density bin"
    )]
    pub fn new(density: &[NonNegativeF64]) -> Result<Self, SamplingError> {
        let cumulative = cumulative_distribution(density.iter().copied()).map_err(|err| {
            log::debug!("Cannot build an inverse CDF sampler: {}", err);
            err
        })?;

        Ok(Self { cumulative })
    }

    /// The number of bins of the sampled density.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws `n` independent fractional bin positions, in draw order.
    #[must_use]
    #[debug_ensures(ret.len() == n, "draws exactly n samples")]
    #[debug_ensures(
        ret.iter().all(|x| *x >= 0.0_f64 && *x < self.len() as f64),
        "samples lie inside the density"
    )]
    pub fn sample<G: RngCore>(&self, rng: &mut G, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| invert(&self.cumulative, rng.sample_uniform_closed_open()))
            .collect()
    }

    /// Draws `n` independent fractional bin positions like `sample`, but
    /// fails instead of aborting if `n` samples do not fit into memory.
    ///
    /// # Errors
    ///
    /// Returns `TooManySamples` if the samples cannot be allocated.
    #[debug_ensures(
        ret.as_ref().map_or(true, |samples| samples.len() == n),
        "draws exactly n samples"
    )]
    pub fn try_sample<G: RngCore>(&self, rng: &mut G, n: usize) -> Result<Vec<f64>, SamplingError> {
        let mut samples = Vec::new();

        samples
            .try_reserve_exact(n)
            .map_err(|_| SamplingError::TooManySamples(u64::try_from(n).unwrap_or(u64::MAX)))?;

        samples.extend(
            (0..n).map(|_| invert(&self.cumulative, rng.sample_uniform_closed_open())),
        );

        Ok(samples)
    }
}

/// Computes the running sum of `weights`, normalised to end at exactly `1.0`.
pub(crate) fn cumulative_distribution<I: IntoIterator<Item = NonNegativeF64>>(
    weights: I,
) -> Result<Box<[f64]>, SamplingError> {
    let mut acc = NonNegativeF64::zero();

    let mut cumulative = weights
        .into_iter()
        .map(|weight| {
            acc += weight;
            acc.get()
        })
        .collect::<Box<[f64]>>();

    if cumulative.is_empty() {
        return Err(SamplingError::EmptyDensity);
    }

    if !acc.is_finite() {
        return Err(SamplingError::NonFiniteDensity);
    }

    let Some(total) = acc.positive() else {
        return Err(SamplingError::ZeroDensity);
    };

    for c in cumulative.iter_mut() {
        *c /= total.get();
    }

    // Guard against rounding, the final bin must absorb every u < 1.0
    if let Some(last) = cumulative.last_mut() {
        *last = 1.0_f64;
    }

    Ok(cumulative)
}

/// Maps the uniform sample `u` onto the fractional bin position whose
/// cumulative probability is `u`.
///
/// The bin is the first one whose cumulative value exceeds `u`, such that
/// bins with zero weight are never returned.
#[debug_requires(
    cumulative.last().copied() == Some(1.0_f64),
    "the cumulative distribution is normalised"
)]
pub(crate) fn invert(cumulative: &[f64], u: ClosedOpenUnitF64) -> f64 {
    let u = u.get();

    let bin = cumulative
        .partition_point(|c| *c <= u)
        .min(cumulative.len() - 1);

    let lower = if bin == 0 { 0.0_f64 } else { cumulative[bin - 1] };
    let upper = cumulative[bin];

    let offset = if upper > lower {
        ClosedOpenUnitF64::saturating((u - lower) / (upper - lower))
    } else {
        ClosedOpenUnitF64::saturating(0.0_f64)
    };

    #[allow(clippy::cast_precision_loss)]
    let (start, end) = (bin as f64, (bin + 1) as f64);

    // Rounding must not carry the sample into the next bin
    (start + offset.get()).min(end.next_after(start))
}
