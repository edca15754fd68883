//! Percentile statistics and outlier clipping.

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::error::{Error, Result};

/// Lower percentile used by [`remove_extrema`].
pub const LOWER_PERCENTILE: f64 = 1.0;
/// Upper percentile used by [`remove_extrema`].
pub const UPPER_PERCENTILE: f64 = 99.0;

/// Compute the `q`-th percentile over all elements of `data`.
///
/// Uses linear interpolation between the two closest ranks of the sorted
/// samples, so `q = 0` is the minimum and `q = 100` the maximum. NaN values
/// sort above every finite value.
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty array and
/// [`Error::InvalidPercentile`] when `q` is outside `[0, 100]`.
pub fn percentile<S, D>(data: &ArrayBase<S, D>, q: f64) -> Result<f32>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if !(0.0..=100.0).contains(&q) {
        return Err(Error::InvalidPercentile(q));
    }
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut sorted: Vec<f32> = data.iter().copied().collect();
    sorted.sort_unstable_by(f32::total_cmp);
    Ok(interpolate_rank(&sorted, q))
}

/// Compute several percentiles with a single sort.
///
/// # Errors
/// Same conditions as [`percentile`].
pub fn percentiles<S, D, const N: usize>(data: &ArrayBase<S, D>, qs: [f64; N]) -> Result<[f32; N]>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if let Some(&bad) = qs.iter().find(|q| !(0.0..=100.0).contains(*q)) {
        return Err(Error::InvalidPercentile(bad));
    }
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut sorted: Vec<f32> = data.iter().copied().collect();
    sorted.sort_unstable_by(f32::total_cmp);
    Ok(qs.map(|q| interpolate_rank(&sorted, q)))
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn interpolate_rank(sorted: &[f32], q: f64) -> f32 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lo_val = f64::from(sorted[lo]);
    let hi_val = f64::from(sorted[hi]);
    (lo_val + (hi_val - lo_val) * (rank - lo as f64)) as f32
}

/// Clamp `data` into its 1st..99th percentile range.
///
/// Outliers are clamped to the bounds, not removed; every other value is
/// left untouched. The array is modified in place and handed back. Data
/// containing NaN has no meaningful percentiles and is returned unchanged.
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty array.
pub fn remove_extrema<D: Dimension>(mut data: Array<f32, D>) -> Result<Array<f32, D>> {
    if data.iter().any(|v| v.is_nan()) {
        return Ok(data);
    }
    let [lower, upper] = percentiles(&data, [LOWER_PERCENTILE, UPPER_PERCENTILE])?;
    data.mapv_inplace(|v| {
        if v > upper {
            upper
        } else if v < lower {
            lower
        } else {
            v
        }
    });
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array1};

    #[test]
    fn test_percentile_bounds() {
        let data = arr1(&[3.0_f32, 1.0, 2.0, 5.0, 4.0]);
        assert_relative_eq!(percentile(&data, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&data, 100.0).unwrap(), 5.0);
        assert_relative_eq!(percentile(&data, 50.0).unwrap(), 3.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        // rank = 0.25 * 3 = 0.75 between 10 and 20
        let data = arr1(&[10.0_f32, 20.0, 30.0, 40.0]);
        assert_relative_eq!(percentile(&data, 25.0).unwrap(), 17.5);
        // rank = 0.99 * 3 = 2.97 between 30 and 40
        assert_relative_eq!(percentile(&data, 99.0).unwrap(), 39.7, epsilon = 1e-4);
    }

    #[test]
    fn test_percentile_single_value() {
        let data = arr1(&[7.0_f32]);
        assert_relative_eq!(percentile(&data, 1.0).unwrap(), 7.0);
        assert_relative_eq!(percentile(&data, 99.0).unwrap(), 7.0);
    }

    #[test]
    fn test_percentile_rejects_bad_input() {
        let empty = Array1::<f32>::zeros(0);
        assert_eq!(percentile(&empty, 50.0), Err(Error::EmptyInput));
        let data = arr1(&[1.0_f32]);
        assert_eq!(percentile(&data, 101.0), Err(Error::InvalidPercentile(101.0)));
        assert_eq!(percentile(&data, -1.0), Err(Error::InvalidPercentile(-1.0)));
    }

    #[test]
    fn test_remove_extrema_clamps_outliers() {
        let mut values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        values[0] = -1000.0;
        values[99] = 1000.0;
        let data = Array1::from(values);

        let [lower, upper] = percentiles(&data, [1.0, 99.0]).unwrap();
        let clipped = remove_extrema(data.clone()).unwrap();

        assert_relative_eq!(clipped[0], lower);
        assert_relative_eq!(clipped[99], upper);
        for i in 1..99 {
            if data[i] > lower && data[i] < upper {
                assert_relative_eq!(clipped[i], data[i]);
            }
        }
    }

    #[test]
    fn test_remove_extrema_leaves_nan_data_unchanged() {
        let mut values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        values[50] = f32::NAN;
        let data = Array1::from(values);

        let clipped = remove_extrema(data.clone()).unwrap();
        assert_relative_eq!(clipped[0], 0.0);
        assert_relative_eq!(clipped[99], 99.0);
        assert!(clipped[50].is_nan());
    }

    #[test]
    fn test_remove_extrema_keeps_shape() {
        let data = arr2(&[[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let clipped = remove_extrema(data).unwrap();
        assert_eq!(clipped.shape(), &[2, 3]);
    }

    #[test]
    fn test_remove_extrema_constant_input() {
        let data = Array1::from_elem(16, 4.0_f32);
        let clipped = remove_extrema(data).unwrap();
        assert!(clipped.iter().all(|&v| (v - 4.0).abs() < f32::EPSILON));
    }
}
