#![deny(clippy::pedantic)]

mod closed_open_unit_f64;
mod non_negative_f64;
mod open_closed_unit_f64;
mod positive_f64;

pub use closed_open_unit_f64::{ClosedOpenUnitF64, ClosedOpenUnitF64Error};
pub use non_negative_f64::{NonNegativeF64, NonNegativeF64Error};
pub use open_closed_unit_f64::{OpenClosedUnitF64, OpenClosedUnitF64Error};
pub use positive_f64::{PositiveF64, PositiveF64Error};
