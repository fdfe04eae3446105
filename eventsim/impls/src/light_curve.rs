use std::convert::TryFrom;

use serde::Deserialize;

use eventsim_core::{cogs::LightCurve, error::ConfigError};
use eventsim_core_bond::NonNegativeF64;

/// A light curve tabulated at strictly increasing times.
///
/// Between the tabulated times the normalisation is interpolated linearly,
/// outside of the table it is held at the first or last value.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "TableLightCurveRaw")]
pub struct TableLightCurve {
    times: Vec<f64>,
    norms: Vec<NonNegativeF64>,
}

impl TableLightCurve {
    /// # Errors
    ///
    /// Returns `InvalidLightCurve` if the table is empty, the columns differ
    /// in length, or the times are not finite and strictly increasing.
    pub fn new(times: Vec<f64>, norms: Vec<NonNegativeF64>) -> Result<Self, ConfigError> {
        if times.is_empty() {
            return Err(ConfigError::InvalidLightCurve("the table is empty"));
        }

        if times.len() != norms.len() {
            return Err(ConfigError::InvalidLightCurve(
                "the time and norm columns differ in length",
            ));
        }

        if !times.iter().all(|time| time.is_finite())
            || !times.windows(2).all(|pair| pair[0] < pair[1])
        {
            return Err(ConfigError::InvalidLightCurve(
                "the times must be finite and strictly increasing",
            ));
        }

        Ok(Self { times, norms })
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn norms(&self) -> &[NonNegativeF64] {
        &self.norms
    }
}

impl LightCurve for TableLightCurve {
    fn evaluate_norm_at_time(&self, time: f64) -> NonNegativeF64 {
        let upper = self.times.partition_point(|t| *t <= time);

        if upper == 0 {
            return self.norms[0];
        }

        if upper == self.times.len() {
            return self.norms[upper - 1];
        }

        let (t0, t1) = (self.times[upper - 1], self.times[upper]);
        let (n0, n1) = (self.norms[upper - 1].get(), self.norms[upper].get());

        let norm = n0 + (time - t0) * (n1 - n0) / (t1 - t0);

        // A convex combination of non-negative norms is non-negative
        NonNegativeF64::new(norm).unwrap_or_else(|_| NonNegativeF64::zero())
    }
}

#[derive(Deserialize)]
#[serde(rename = "LightCurve")]
#[serde(deny_unknown_fields)]
struct TableLightCurveRaw {
    time: Vec<f64>,
    norm: Vec<NonNegativeF64>,
}

impl TryFrom<TableLightCurveRaw> for TableLightCurve {
    type Error = ConfigError;

    fn try_from(raw: TableLightCurveRaw) -> Result<Self, Self::Error> {
        Self::new(raw.time, raw.norm)
    }
}
