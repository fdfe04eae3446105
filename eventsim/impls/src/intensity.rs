use std::convert::TryFrom;

use array2d::Array2D;
use serde::Deserialize;

use eventsim_core::{cogs::IntensityMap, error::ShapeError};
use eventsim_core_bond::NonNegativeF64;

/// An intensity map held in memory in row-major order.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "InMemoryIntensityMapRaw")]
pub struct InMemoryIntensityMap {
    axis_names: Vec<String>,
    shape: Vec<usize>,
    values: Vec<NonNegativeF64>,
}

impl InMemoryIntensityMap {
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `shape` is empty or its product is not the
    /// number of `values`, and `AxisNamesMismatch` if there is not exactly
    /// one name per axis.
    pub fn new(
        axis_names: Vec<String>,
        shape: Vec<usize>,
        values: Vec<NonNegativeF64>,
    ) -> Result<Self, ShapeError> {
        validate_shape(&axis_names, &shape, values.len())?;

        Ok(Self {
            axis_names,
            shape,
            values,
        })
    }

    /// Creates a two-dimensional map, e.g. energy x pixel, from the rows of
    /// `array`.
    #[must_use]
    pub fn from_array2d(axis_names: [String; 2], array: &Array2D<NonNegativeF64>) -> Self {
        let shape = vec![array.num_rows(), array.num_columns()];

        let mut values = Vec::with_capacity(array.num_elements());

        for row in 0..array.num_rows() {
            for column in 0..array.num_columns() {
                values.push(array[(row, column)]);
            }
        }

        Self {
            axis_names: axis_names.to_vec(),
            shape,
            values,
        }
    }
}

impl IntensityMap for InMemoryIntensityMap {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    fn values(&self) -> &[NonNegativeF64] {
        &self.values
    }
}

/// Checks that `shape` describes exactly `len` bins with one name per axis.
///
/// # Errors
///
/// Returns `ShapeMismatch` or `AxisNamesMismatch` otherwise.
pub fn validate_shape(
    axis_names: &[String],
    shape: &[usize],
    len: usize,
) -> Result<(), ShapeError> {
    if shape.is_empty() || checked_len(shape) != Some(len) {
        return Err(ShapeError::ShapeMismatch {
            shape: shape.to_vec(),
            len,
        });
    }

    if axis_names.len() != shape.len() {
        return Err(ShapeError::AxisNamesMismatch {
            shape: shape.to_vec(),
            names: axis_names.len(),
        });
    }

    Ok(())
}

/// The number of bins described by `shape`, or `None` if it overflows.
fn checked_len(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1_usize, |len, size| len.checked_mul(*size))
}

/// Converts the fractional `flat_index` into one position per axis of
/// `shape`.
///
/// The integer part is unravelled in row-major order. The sub-bin fraction is
/// carried by the last, fastest varying, axis so that `ravel_index` restores
/// the original `flat_index`.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if `flat_index` does not lie inside the map and
/// `IndexShapeMismatch` if `shape` has no axes.
#[debug_ensures(
    ret.as_ref().map_or(true, |index| index.len() == shape.len()),
    "returns one position per axis"
)]
pub fn unravel_index(flat_index: f64, shape: &[usize]) -> Result<Vec<f64>, ShapeError> {
    if shape.is_empty() {
        return Err(ShapeError::IndexShapeMismatch {
            index: vec![flat_index],
            shape: Vec::new(),
        });
    }

    let Some(len) = checked_len(shape) else {
        return Err(ShapeError::IndexShapeMismatch {
            index: vec![flat_index],
            shape: shape.to_vec(),
        });
    };

    #[allow(clippy::cast_precision_loss)]
    let in_range = flat_index >= 0.0_f64 && flat_index < len as f64;

    if !in_range {
        return Err(ShapeError::IndexOutOfRange {
            index: flat_index,
            len,
        });
    }

    let floor = flat_index.floor();
    let fraction = flat_index - floor;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut remainder = floor as usize;

    let mut index = vec![0.0_f64; shape.len()];

    for (position, size) in index.iter_mut().zip(shape).rev() {
        #[allow(clippy::cast_precision_loss)]
        let bin = (remainder % size) as f64;

        *position = bin;
        remainder /= size;
    }

    if let Some(last) = index.last_mut() {
        *last += fraction;
    }

    Ok(index)
}

/// Converts one position per axis of `shape` into a fractional flat index,
/// the inverse of `unravel_index`.
///
/// # Errors
///
/// Returns `IndexShapeMismatch` if `index` does not have one position inside
/// the map per axis of `shape`.
pub fn ravel_index(index: &[f64], shape: &[usize]) -> Result<f64, ShapeError> {
    #[allow(clippy::cast_precision_loss)]
    let in_bounds = index.len() == shape.len()
        && !shape.is_empty()
        && checked_len(shape).is_some()
        && index
            .iter()
            .zip(shape)
            .all(|(position, size)| *position >= 0.0_f64 && *position < *size as f64);

    if !in_bounds {
        return Err(ShapeError::IndexShapeMismatch {
            index: index.to_vec(),
            shape: shape.to_vec(),
        });
    }

    let mut stride = 1_usize;
    let mut flat_index = 0.0_f64;

    for (position, size) in index.iter().zip(shape).rev() {
        #[allow(clippy::cast_precision_loss)]
        let stride_f64 = stride as f64;

        flat_index += position * stride_f64;
        stride *= size;
    }

    Ok(flat_index)
}

#[derive(Deserialize)]
#[serde(rename = "IntensityMap")]
#[serde(deny_unknown_fields)]
struct InMemoryIntensityMapRaw {
    axes: Vec<String>,
    shape: Vec<usize>,
    values: Vec<NonNegativeF64>,
}

impl TryFrom<InMemoryIntensityMapRaw> for InMemoryIntensityMap {
    type Error = ShapeError;

    fn try_from(raw: InMemoryIntensityMapRaw) -> Result<Self, Self::Error> {
        Self::new(raw.axes, raw.shape, raw.values)
    }
}
