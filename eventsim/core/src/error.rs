use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    #[error("axis {0} is invalid, a density batch only has the axes 0 and 1")]
    InvalidAxis(usize),
    #[error("the time window [{tmin}, {tmax}) must be finite and non-empty")]
    InvalidTimeWindow { tmin: f64, tmax: f64 },
    #[error("the time grid must have at least one bin")]
    InvalidTimeBins,
    #[error("invalid light curve table: {0}")]
    InvalidLightCurve(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum SamplingError {
    #[error("the density has no bins")]
    EmptyDensity,
    #[error("the density has zero total weight, there is nothing to sample")]
    ZeroDensity,
    #[error("lane {lane} of the density batch has zero total weight")]
    ZeroDensityLane { lane: usize },
    #[error("the density has a non-finite total weight")]
    NonFiniteDensity,
    #[error("cannot hold {0} samples in memory")]
    TooManySamples(u64),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum ShapeError {
    #[error("the map shape {shape:?} does not match its {len} values")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
    #[error("the map shape {shape:?} has {names} axis names")]
    AxisNamesMismatch { shape: Vec<usize>, names: usize },
    #[error("the flat index {index} is out of range for a map with {len} bins")]
    IndexOutOfRange { index: f64, len: usize },
    #[error("the index {index:?} does not fit the map shape {shape:?}")]
    IndexShapeMismatch { index: Vec<f64>, shape: Vec<usize> },
}

#[derive(Error, Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum EventSamplerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("drew {coordinates} event coordinates but {times} event times")]
    CountMismatch { coordinates: usize, times: usize },
}
