use eventsim_core_bond::NonNegativeF64;

/// A read-only predicted-count map, flattened in row-major order.
///
/// The sum over all bins is the expected total number of events.
pub trait IntensityMap: std::fmt::Debug {
    /// The number of bins along each map axis, outermost axis first.
    #[must_use]
    fn shape(&self) -> &[usize];

    /// The name of each map axis, in the same order as `shape`.
    #[must_use]
    fn axis_names(&self) -> &[String];

    /// The flattened bin values, with the last axis varying fastest.
    #[must_use]
    fn values(&self) -> &[NonNegativeF64];

    #[must_use]
    fn total(&self) -> NonNegativeF64 {
        self.values().iter().sum()
    }
}

impl<T: IntensityMap + ?Sized> IntensityMap for &T {
    fn shape(&self) -> &[usize] {
        (**self).shape()
    }

    fn axis_names(&self) -> &[String] {
        (**self).axis_names()
    }

    fn values(&self) -> &[NonNegativeF64] {
        (**self).values()
    }

    fn total(&self) -> NonNegativeF64 {
        (**self).total()
    }
}
