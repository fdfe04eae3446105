use eventsim_core_bond::NonNegativeF64;

/// A relative flux normalisation over time.
pub trait LightCurve: std::fmt::Debug {
    #[must_use]
    fn evaluate_norm_at_time(&self, time: f64) -> NonNegativeF64;
}

impl<T: LightCurve + ?Sized> LightCurve for &T {
    fn evaluate_norm_at_time(&self, time: f64) -> NonNegativeF64 {
        (**self).evaluate_norm_at_time(time)
    }
}
