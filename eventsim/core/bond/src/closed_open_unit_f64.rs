use std::{cmp::Ordering, fmt};

use float_next_after::NextAfter;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ClosedOpenUnitF64Error(f64);

impl fmt::Display for ClosedOpenUnitF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not in [0.0, 1.0).", self.0)
    }
}

impl std::error::Error for ClosedOpenUnitF64Error {}

#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct ClosedOpenUnitF64(f64);

impl fmt::Debug for ClosedOpenUnitF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        struct ClosedOpenUnitF64Range(f64);

        impl fmt::Debug for ClosedOpenUnitF64Range {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "0.0 <= {} < 1.0", self.0)
            }
        }

        fmt.debug_tuple("ClosedOpenUnitF64")
            .field(&ClosedOpenUnitF64Range(self.0))
            .finish()
    }
}

impl ClosedOpenUnitF64 {
    /// # Errors
    ///
    /// Returns `ClosedOpenUnitF64Error` if not `0.0 <= value < 1.0`
    pub fn new(value: f64) -> Result<Self, ClosedOpenUnitF64Error> {
        if (0.0..1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClosedOpenUnitF64Error(value))
        }
    }

    /// # Safety
    ///
    /// Only safe iff `0.0 <= value < 1.0`
    #[must_use]
    pub const unsafe fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// Clamps `value` into `[0.0, 1.0)`, mapping NaN to `0.0`.
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value >= 1.0 {
            Self(1.0_f64.next_after(0.0_f64))
        } else if value > 0.0 {
            Self(value)
        } else {
            Self(0.0_f64)
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq<f64> for ClosedOpenUnitF64 {
    fn eq(&self, other: &f64) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<f64> for ClosedOpenUnitF64 {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::ClosedOpenUnitF64;

    #[test]
    fn excludes_one() {
        assert!(ClosedOpenUnitF64::new(0.0_f64).is_ok());
        assert!(ClosedOpenUnitF64::new(1.0_f64).is_err());
        assert!(ClosedOpenUnitF64::new(-0.1_f64).is_err());
    }

    #[test]
    fn saturates_into_range() {
        assert!(ClosedOpenUnitF64::saturating(1.0_f64) < 1.0_f64);
        assert!(ClosedOpenUnitF64::saturating(1.0_f64) > 0.999_f64);
        assert_eq!(ClosedOpenUnitF64::saturating(f64::NAN), 0.0_f64);
        assert_eq!(ClosedOpenUnitF64::saturating(0.25_f64), 0.25_f64);
    }
}
