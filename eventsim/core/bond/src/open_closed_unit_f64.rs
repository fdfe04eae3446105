use std::fmt;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OpenClosedUnitF64Error(f64);

impl fmt::Display for OpenClosedUnitF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not in (0.0, 1.0].", self.0)
    }
}

impl std::error::Error for OpenClosedUnitF64Error {}

#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct OpenClosedUnitF64(f64);

impl fmt::Debug for OpenClosedUnitF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        struct OpenClosedUnitF64Range(f64);

        impl fmt::Debug for OpenClosedUnitF64Range {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "0.0 < {} <= 1.0", self.0)
            }
        }

        fmt.debug_tuple("OpenClosedUnitF64")
            .field(&OpenClosedUnitF64Range(self.0))
            .finish()
    }
}

impl OpenClosedUnitF64 {
    /// # Errors
    ///
    /// Returns `OpenClosedUnitF64Error` if not `0.0 < value <= 1.0`
    pub fn new(value: f64) -> Result<Self, OpenClosedUnitF64Error> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(OpenClosedUnitF64Error(value))
        }
    }

    /// # Safety
    ///
    /// Only safe iff `0.0 < value <= 1.0`
    #[must_use]
    pub const unsafe fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// `ln(x)` is finite and non-positive on `(0.0, 1.0]`
    #[must_use]
    pub fn ln(self) -> f64 {
        self.0.ln()
    }
}
