pub mod intensity_map;
pub use intensity_map::IntensityMap;

pub mod light_curve;
pub use light_curve::LightCurve;

pub mod rng;
pub use rng::{RngCore, RngSampler, SeedableRng};
