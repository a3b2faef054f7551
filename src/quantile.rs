use ndarray::{Array1, ArrayView1};

/// Empirical quantile of pre-sorted data at fraction `q` in [0, 1], using
/// linear interpolation between the two nearest order statistics.
///
/// For n observations the virtual index is `h = q * (n - 1)`; the result
/// interpolates between `sorted[floor(h)]` and `sorted[ceil(h)]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    let n = sorted.len();
    let h = q * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Empirical quantiles of `data` at each of `fractions`, sorting once.
///
/// Callers are expected to have validated `data` as non-empty and finite;
/// NaN values would otherwise poison the sort order.
pub fn quantiles(data: ArrayView1<'_, f64>, fractions: &[f64]) -> Array1<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    fractions
        .iter()
        .map(|&q| quantile_sorted(&sorted, q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array1;

    #[test]
    fn quantile_endpoints_are_min_and_max() {
        let sorted = [1.0, 2.0, 4.0, 8.0];
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_abs_diff_eq!(quantile_sorted(&sorted, 1.0), 8.0);
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        // h = 0.5 * 3 = 1.5, halfway between 2.0 and 4.0.
        let sorted = [1.0, 2.0, 4.0, 8.0];
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.5), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_of_single_observation_is_that_observation() {
        let sorted = [7.5];
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.0), 7.5);
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.5), 7.5);
        assert_abs_diff_eq!(quantile_sorted(&sorted, 1.0), 7.5);
    }

    #[test]
    fn quantiles_sort_unordered_input() {
        let data = Array1::from(vec![9.0, 1.0, 5.0, 3.0, 7.0]);
        let q = quantiles(data.view(), &[0.0, 0.5, 1.0]);
        assert_abs_diff_eq!(q[0], 1.0);
        assert_abs_diff_eq!(q[1], 5.0);
        assert_abs_diff_eq!(q[2], 9.0);
    }

    #[test]
    fn quantiles_match_reference_values_on_1_to_100() {
        let data: Array1<f64> = (1..=100).map(|v| v as f64).collect();
        let q = quantiles(data.view(), &[0.1, 0.5, 0.9]);
        assert_abs_diff_eq!(q[0], 10.9, epsilon = 1e-9);
        assert_abs_diff_eq!(q[1], 50.5, epsilon = 1e-9);
        assert_abs_diff_eq!(q[2], 90.1, epsilon = 1e-9);
    }
}
