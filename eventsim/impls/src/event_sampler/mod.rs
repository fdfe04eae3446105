//! Simulation of event lists from a predicted-count map and a light curve.

use std::convert::TryFrom;

use eventsim_core::{
    cogs::{IntensityMap, LightCurve, RngCore, RngSampler},
    error::{ConfigError, EventSamplerError, SamplingError},
    event::{Event, EventList},
};
use eventsim_core_bond::NonNegativeF64;

use crate::{
    intensity::{unravel_index, validate_shape},
    inverse_cdf::InverseCdfSampler,
};

mod window;

pub use window::TimeWindow;


pub const DEFAULT_TIME_BINS: usize = 1000;

/// The light curve of a source that is constant in time.
#[allow(clippy::empty_enum)]
#[derive(Debug)]
pub enum NoLightCurve {}

impl LightCurve for NoLightCurve {
    fn evaluate_norm_at_time(&self, _time: f64) -> NonNegativeF64 {
        match *self {}
    }
}

/// The drawn event count and the flat, fractional map positions of the
/// events.
#[derive(Clone, Debug, PartialEq)]
pub struct NpredSample {
    pub n_events: usize,
    pub coordinates: Vec<f64>,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct MapEventSampler<M: IntensityMap, L: LightCurve> {
    map: M,
    window: TimeWindow,
    light_curve: Option<L>,
    time_bins: usize,
}

impl<M: IntensityMap> MapEventSampler<M, NoLightCurve> {
    /// Creates a sampler whose events arrive uniformly over the `window`.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError` if the `map` shape does not describe its values.
    pub fn uniform_in_time(map: M, window: TimeWindow) -> Result<Self, EventSamplerError> {
        Self::new(map, window, None)
    }
}

impl<M: IntensityMap, L: LightCurve> MapEventSampler<M, L> {
    /// # Errors
    ///
    /// Returns a `ShapeError` if the `map` shape does not describe its values.
    pub fn new(
        map: M,
        window: TimeWindow,
        light_curve: Option<L>,
    ) -> Result<Self, EventSamplerError> {
        validate_shape(map.axis_names(), map.shape(), map.values().len())?;

        Ok(Self {
            map,
            window,
            light_curve,
            time_bins: DEFAULT_TIME_BINS,
        })
    }

    /// Sets the number of equal bins the time window is split into.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimeBins` if `time_bins` is zero.
    pub fn with_time_bins(mut self, time_bins: usize) -> Result<Self, ConfigError> {
        if time_bins == 0 {
            return Err(ConfigError::InvalidTimeBins);
        }

        self.time_bins = time_bins;

        Ok(self)
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    #[must_use]
    pub fn light_curve(&self) -> Option<&L> {
        self.light_curve.as_ref()
    }

    #[must_use]
    pub fn time_bins(&self) -> usize {
        self.time_bins
    }

    /// The `time_bins + 1` edges of the time grid, the last edge is `tmax`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    #[debug_ensures(ret.len() == self.time_bins + 1)]
    pub fn time_grid(&self) -> Vec<f64> {
        let mut edges = (0..=self.time_bins)
            .map(|edge| self.grid_to_time(edge as f64))
            .collect::<Vec<_>>();

        if let Some(last) = edges.last_mut() {
            *last = self.window.tmax();
        }

        edges
    }

    /// Draws the total number of events from a Poisson distribution whose
    /// mean is the sum of the map.
    ///
    /// Every call is an independent draw.
    #[must_use]
    pub fn npred_total<G: RngCore>(&self, rng: &mut G) -> u64 {
        let mean = self.map.total();
        let n_events = rng.sample_poisson(mean);

        log::debug!("Drew {} events for a predicted mean of {}", n_events, mean);

        n_events
    }

    /// Draws the event count once and then as many flat map positions.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if the map cannot be sampled, e.g. because
    /// its total is not finite, or if the drawn count is too large to hold
    /// its positions in memory.
    #[debug_ensures(
        ret.as_ref().map_or(true, |npred| npred.coordinates.len() == npred.n_events),
        "one position per event"
    )]
    pub fn sample_npred<G: RngCore>(&self, rng: &mut G) -> Result<NpredSample, EventSamplerError> {
        if !self.map.total().is_finite() {
            return Err(SamplingError::NonFiniteDensity.into());
        }

        let count = self.npred_total(rng);
        let n_events = usize::try_from(count).map_err(|_| SamplingError::TooManySamples(count))?;

        if n_events == 0 {
            return Ok(NpredSample {
                n_events,
                coordinates: Vec::new(),
            });
        }

        let sampler = InverseCdfSampler::new(self.map.values())?;

        Ok(NpredSample {
            n_events,
            coordinates: sampler.try_sample(rng, n_events)?,
        })
    }

    /// Draws `n_events` arrival times inside the time window, following the
    /// light curve if there is one and uniformly otherwise.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if the light curve is zero across the whole
    /// time window.
    #[debug_ensures(
        ret.as_ref().map_or(true, |times| times.len() == n_events),
        "one time per event"
    )]
    #[allow(clippy::cast_precision_loss)]
    #[debug_ensures(
        ret.as_ref().map_or(true, |times| times.iter().all(|t| self.window.contains(*t))),
        "times lie inside the window"
    )]
    pub fn sample_timepred<G: RngCore>(
        &self,
        rng: &mut G,
        n_events: usize,
    ) -> Result<Vec<f64>, EventSamplerError> {
        if n_events == 0 {
            return Ok(Vec::new());
        }

        let weights = match &self.light_curve {
            None => vec![NonNegativeF64::from(1_u32); self.time_bins],
            Some(light_curve) => (0..self.time_bins)
                .map(|bin| light_curve.evaluate_norm_at_time(self.grid_to_time(bin as f64 + 0.5)))
                .collect(),
        };

        log::trace!(
            "Built a time grid of {} bins over [{}, {})",
            weights.len(),
            self.window.tmin(),
            self.window.tmax()
        );

        let sampler = InverseCdfSampler::new(&weights)?;

        Ok(sampler
            .try_sample(rng, n_events)?
            .into_iter()
            .map(|position| self.window.clamp(self.grid_to_time(position)))
            .collect())
    }

    /// Simulates one event list: the count, then the map positions, then
    /// the arrival times are drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if the map or light curve cannot be sampled
    /// and `CountMismatch` if fewer times than positions were drawn.
    #[debug_ensures(
        ret.as_ref().map_or(true, |events| events.columns().len() == self.map.shape().len() + 1),
        "one column per axis plus time"
    )]
    pub fn sample_events<G: RngCore>(&self, rng: &mut G) -> Result<EventList, EventSamplerError> {
        let npred = self.sample_npred(rng)?;
        let times = self.sample_timepred(rng, npred.n_events)?;

        if npred.coordinates.len() != times.len() {
            return Err(EventSamplerError::CountMismatch {
                coordinates: npred.coordinates.len(),
                times: times.len(),
            });
        }

        let events = npred
            .coordinates
            .into_iter()
            .zip(times)
            .map(|(flat_index, time)| {
                unravel_index(flat_index, self.map.shape()).map(|index| Event::new(index, time))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Sampled {} events inside [{}, {})",
            events.len(),
            self.window.tmin(),
            self.window.tmax()
        );

        Ok(EventList::new(self.map.axis_names(), events))
    }

    #[allow(clippy::cast_precision_loss)]
    fn grid_to_time(&self, position: f64) -> f64 {
        self.window.tmin()
            + position * self.window.duration().get() / (self.time_bins as f64)
    }
}
