use std::convert::TryFrom;

use array2d::Array2D;

use eventsim_core::{
    cogs::{RngCore, RngSampler},
    error::{ConfigError, SamplingError},
};
use eventsim_core_bond::NonNegativeF64;

use super::{cumulative_distribution, invert};

/// The axis of a `DensityBatch` along which the densities are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Axis `0`: every column is one density, sampled down its rows.
    Rows,
    /// Axis `1`: every row is one density, sampled along its columns.
    Columns,
}

impl TryFrom<usize> for Axis {
    type Error = ConfigError;

    fn try_from(axis: usize) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(Self::Rows),
            1 => Ok(Self::Columns),
            axis => Err(ConfigError::InvalidAxis(axis)),
        }
    }
}

impl From<Axis> for usize {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Rows => 0,
            Axis::Columns => 1,
        }
    }
}

/// A two-dimensional batch of independent densities.
#[derive(Clone, Debug)]
pub struct DensityBatch {
    weights: Array2D<NonNegativeF64>,
    axis: Axis,
}

impl DensityBatch {
    #[must_use]
    pub fn new(weights: Array2D<NonNegativeF64>, axis: Axis) -> Self {
        Self { weights, axis }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The number of independent densities in the batch.
    #[must_use]
    pub fn num_lanes(&self) -> usize {
        match self.axis {
            Axis::Rows => self.weights.num_columns(),
            Axis::Columns => self.weights.num_rows(),
        }
    }

    /// The number of bins of every density in the batch.
    #[must_use]
    pub fn lane_len(&self) -> usize {
        match self.axis {
            Axis::Rows => self.weights.num_rows(),
            Axis::Columns => self.weights.num_columns(),
        }
    }

    fn lane(&self, lane: usize) -> impl Iterator<Item = NonNegativeF64> + '_ {
        (0..self.lane_len()).map(move |bin| match self.axis {
            Axis::Rows => self.weights[(bin, lane)],
            Axis::Columns => self.weights[(lane, bin)],
        })
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct BatchInverseCdfSampler {
    cumulative: Box<[f64]>,
    lane_len: usize,
}

impl BatchInverseCdfSampler {
    /// Creates a new `BatchInverseCdfSampler` with one cumulative
    /// distribution per lane of the `batch`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDensity` if the lanes have no bins, `ZeroDensityLane`
    /// if any lane has zero total weight, and `NonFiniteDensity` if any
    /// lane's total weight is not finite.
    pub fn new(batch: &DensityBatch) -> Result<Self, SamplingError> {
        let lane_len = batch.lane_len();

        if lane_len == 0 && batch.num_lanes() > 0 {
            return Err(SamplingError::EmptyDensity);
        }

        let mut cumulative = Vec::with_capacity(lane_len * batch.num_lanes());

        for lane in 0..batch.num_lanes() {
            let lane_cumulative =
                cumulative_distribution(batch.lane(lane)).map_err(|err| match err {
                    SamplingError::ZeroDensity => SamplingError::ZeroDensityLane { lane },
                    err => err,
                })?;

            cumulative.extend_from_slice(&lane_cumulative);
        }

        Ok(Self {
            cumulative: cumulative.into_boxed_slice(),
            lane_len,
        })
    }

    #[must_use]
    pub fn num_lanes(&self) -> usize {
        if self.lane_len == 0 {
            0
        } else {
            self.cumulative.len() / self.lane_len
        }
    }

    /// Draws one fractional bin position per lane, in lane order.
    #[must_use]
    #[debug_ensures(ret.len() == self.num_lanes(), "draws one sample per lane")]
    pub fn sample_axis<G: RngCore>(&self, rng: &mut G) -> Vec<f64> {
        if self.lane_len == 0 {
            return Vec::new();
        }

        self.cumulative
            .chunks_exact(self.lane_len)
            .map(|lane| invert(lane, rng.sample_uniform_closed_open()))
            .collect()
    }
}
