use float_next_after::NextAfter;

use eventsim_core::error::ConfigError;
use eventsim_core_bond::PositiveF64;

/// The observation time window `[tmin, tmax)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    tmin: f64,
    tmax: f64,
}

impl TimeWindow {
    /// # Errors
    ///
    /// Returns `InvalidTimeWindow` if either bound or the duration
    /// `tmax - tmin` is not finite, or if `tmin >= tmax`.
    pub fn new(tmin: f64, tmax: f64) -> Result<Self, ConfigError> {
        if tmin < tmax && (tmax - tmin).is_finite() {
            Ok(Self { tmin, tmax })
        } else {
            Err(ConfigError::InvalidTimeWindow { tmin, tmax })
        }
    }

    #[must_use]
    pub fn tmin(&self) -> f64 {
        self.tmin
    }

    #[must_use]
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    #[must_use]
    pub fn duration(&self) -> PositiveF64 {
        // Safety: tmin < tmax and a finite difference are checked on construction
        unsafe { PositiveF64::new_unchecked(self.tmax - self.tmin) }
    }

    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.tmin && time < self.tmax
    }

    /// Clamps `time` into `[tmin, tmax)`.
    #[must_use]
    pub fn clamp(&self, time: f64) -> f64 {
        time.max(self.tmin).min(self.tmax.next_after(self.tmin))
    }
}
