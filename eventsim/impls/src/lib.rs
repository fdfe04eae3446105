#![deny(clippy::pedantic)]

#[macro_use]
extern crate contracts;

pub mod event_sampler;
pub mod intensity;
pub mod inverse_cdf;
pub mod light_curve;
pub mod rng;
