use std::convert::TryFrom;

use array2d::Array2D;

use eventsim_core::{
    cogs::SeedableRng,
    error::{ConfigError, SamplingError},
};
use eventsim_core_bond::NonNegativeF64;

use crate::rng::{dummy::DummyRng, WyHash};

use super::{Axis, BatchInverseCdfSampler, DensityBatch, InverseCdfSampler};

fn density(weights: &[f64]) -> Vec<NonNegativeF64> {
    weights
        .iter()
        .map(|weight| NonNegativeF64::new(*weight).unwrap())
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (stop - start) * (i as f64) / ((n - 1) as f64))
        .collect()
}

/// Linear interpolation of the fractional `index` into the `grid` values.
fn interp(index: f64, grid: &[f64]) -> f64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = (index.floor() as usize).min(grid.len() - 1);
    let upper = (lower + 1).min(grid.len() - 1);

    grid[lower] + (index - index.floor()) * (grid[upper] - grid[lower])
}

fn mean_and_std(samples: &[f64]) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f64;

    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

fn uniform_pdf(x: f64, a: f64, b: f64) -> f64 {
    if x <= a || x >= b {
        0.0_f64
    } else {
        1.0_f64 / (b - a)
    }
}

fn gauss_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5_f64 * ((x - mu) / sigma).powi(2)).exp()
        / (sigma * (2.0_f64 * std::f64::consts::PI).sqrt())
}

#[test]
fn uniform_dist_sampling() {
    let x = linspace(-2.0, 2.0, 1000);
    let (a, b) = (-1.0_f64, 1.0_f64);

    let pdf = density(&x.iter().map(|x| uniform_pdf(*x, a, b)).collect::<Vec<_>>());
    let sampler = InverseCdfSampler::new(&pdf).unwrap();

    let mut rng = WyHash::seed_from_u64(0);
    let x_sampled = sampler
        .sample(&mut rng, 100_000)
        .into_iter()
        .map(|index| interp(index, &x))
        .collect::<Vec<_>>();

    let (mean, std) = mean_and_std(&x_sampled);

    assert!((mean - 0.5 * (a + b)).abs() < 0.01, "mean = {mean}");
    assert!(
        (std - ((b - a).powi(2) / 12.0).sqrt()).abs() < 0.01,
        "std = {std}"
    );
    assert!(x_sampled.iter().all(|x| *x >= a - 0.01 && *x <= b + 0.01));
}

#[test]
fn norm_dist_sampling() {
    let x = linspace(-2.0, 2.0, 1000);
    let (mu, sigma) = (0.0_f64, 0.1_f64);

    let pdf = density(&x.iter().map(|x| gauss_pdf(*x, mu, sigma)).collect::<Vec<_>>());
    let sampler = InverseCdfSampler::new(&pdf).unwrap();

    let mut rng = WyHash::seed_from_u64(0);
    let x_sampled = sampler
        .sample(&mut rng, 100_000)
        .into_iter()
        .map(|index| interp(index, &x))
        .collect::<Vec<_>>();

    let (mean, std) = mean_and_std(&x_sampled);

    assert!((mean - mu).abs() < 0.01, "mean = {mean}");
    assert!((std - sigma).abs() < 0.005, "std = {std}");
}

#[test]
fn zero_samples_is_empty() {
    let sampler = InverseCdfSampler::new(&density(&[1.0, 2.0, 3.0])).unwrap();

    let mut rng = WyHash::seed_from_u64(42);

    assert!(sampler.sample(&mut rng, 0).is_empty());
}

#[test]
fn unallocatable_sample_count_fails() {
    let sampler = InverseCdfSampler::new(&density(&[1.0, 2.0, 3.0])).unwrap();

    let mut rng = DummyRng::new(Vec::new());

    assert_eq!(
        sampler.try_sample(&mut rng, usize::MAX).unwrap_err(),
        SamplingError::TooManySamples(u64::try_from(usize::MAX).unwrap())
    );

    let mut rng = DummyRng::new(vec![0.5, 0.0]);

    assert_eq!(sampler.try_sample(&mut rng, 2).unwrap(), vec![2.0, 0.0]);
    assert!(rng.is_exhausted());
}

#[test]
fn all_zero_density_fails() {
    assert_eq!(
        InverseCdfSampler::new(&density(&[0.0, 0.0, 0.0])).unwrap_err(),
        SamplingError::ZeroDensity
    );
    assert_eq!(
        InverseCdfSampler::new(&[]).unwrap_err(),
        SamplingError::EmptyDensity
    );
    assert_eq!(
        InverseCdfSampler::new(&density(&[1.0, f64::INFINITY])).unwrap_err(),
        SamplingError::NonFiniteDensity
    );
}

#[test]
fn single_nonzero_bin_is_deterministic() {
    let sampler = InverseCdfSampler::new(&density(&[0.0, 0.0, 4.2, 0.0, 0.0])).unwrap();

    let mut rng = WyHash::seed_from_u64(13);

    assert!(sampler
        .sample(&mut rng, 10_000)
        .into_iter()
        .all(|index| index.floor() == 2.0_f64));
}

#[test]
fn zero_maps_to_first_nonzero_bin() {
    let sampler = InverseCdfSampler::new(&density(&[0.0, 0.0, 1.0, 1.0])).unwrap();

    let mut rng = DummyRng::new(vec![0.0]);

    assert_eq!(sampler.sample(&mut rng, 1), vec![2.0]);
    assert!(rng.is_exhausted());
}

#[test]
fn interpolates_within_bins() {
    // cumulative distribution: [0.25, 0.5, 1.0]
    let sampler = InverseCdfSampler::new(&density(&[1.0, 1.0, 2.0])).unwrap();

    let mut rng = DummyRng::new(vec![0.125, 0.25, 0.375, 0.5, 0.75, 0.875]);

    assert_eq!(
        sampler.sample(&mut rng, 6),
        vec![0.5, 1.0, 1.5, 2.0, 2.5, 2.75]
    );
}

#[test]
fn skips_interior_zero_bins() {
    let sampler = InverseCdfSampler::new(&density(&[1.0, 0.0, 0.0, 1.0])).unwrap();

    let mut rng = WyHash::seed_from_u64(5);

    assert!(sampler
        .sample(&mut rng, 10_000)
        .into_iter()
        .all(|index| index < 1.0_f64 || index >= 3.0_f64));
}

#[test]
fn sample_axis_one_draw_per_row() {
    let x = linspace(-2.0, 2.0, 1000);

    let gauss = density(&x.iter().map(|x| gauss_pdf(*x, 0.0, 0.1)).collect::<Vec<_>>());
    let uniform = density(&x.iter().map(|x| uniform_pdf(*x, -1.0, 1.0)).collect::<Vec<_>>());

    let batch = DensityBatch::new(
        Array2D::from_rows(&[gauss, uniform]).unwrap(),
        Axis::try_from(1).unwrap(),
    );
    let sampler = BatchInverseCdfSampler::new(&batch).unwrap();

    assert_eq!(sampler.num_lanes(), 2);

    let mut rng = WyHash::seed_from_u64(0);
    let first = sampler.sample_axis(&mut rng);

    let mut rng = WyHash::seed_from_u64(0);
    let second = sampler.sample_axis(&mut rng);

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);

    let gauss_x = interp(first[0], &x);
    let uniform_x = interp(first[1], &x);

    assert!(gauss_x.abs() < 0.6, "gauss_x = {gauss_x}");
    assert!(uniform_x.abs() <= 1.01, "uniform_x = {uniform_x}");
}

#[test]
fn sample_axis_columns_as_lanes() {
    let rows = vec![density(&[0.0, 1.0, 1.0]), density(&[1.0, 0.0, 1.0])];

    let batch = DensityBatch::new(Array2D::from_rows(&rows).unwrap(), Axis::Rows);
    assert_eq!(batch.num_lanes(), 3);
    assert_eq!(batch.lane_len(), 2);

    let sampler = BatchInverseCdfSampler::new(&batch).unwrap();

    let mut rng = DummyRng::new(vec![0.5, 0.5, 0.75]);

    // lane 0 = [0, 1], lane 1 = [1, 0], lane 2 = [1, 1]
    assert_eq!(sampler.sample_axis(&mut rng), vec![1.5, 0.5, 1.5]);
}

#[test]
fn sample_axis_zero_lane_fails() {
    let rows = vec![density(&[1.0, 2.0]), density(&[0.0, 0.0])];

    let batch = DensityBatch::new(Array2D::from_rows(&rows).unwrap(), Axis::Columns);

    assert_eq!(
        BatchInverseCdfSampler::new(&batch).unwrap_err(),
        SamplingError::ZeroDensityLane { lane: 1 }
    );
}

#[test]
fn invalid_axis() {
    assert_eq!(Axis::try_from(0), Ok(Axis::Rows));
    assert_eq!(Axis::try_from(1), Ok(Axis::Columns));
    assert_eq!(Axis::try_from(2), Err(ConfigError::InvalidAxis(2)));
    assert_eq!(usize::from(Axis::Columns), 1);
}
