use crate::quantile::quantiles;
use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

/// Smallest supported knot count.
pub const MIN_KNOTS: i32 = 3;
/// Largest supported knot count.
pub const MAX_KNOTS: i32 = 7;

/// A comprehensive error type for all operations within this crate.
#[derive(Error, Debug)]
pub enum BasisError {
    #[error(
        "Knot count k={0} is not supported. Set k between {MIN_KNOTS} and {MAX_KNOTS}, or any negative value to disable the transform."
    )]
    UnsupportedKnotCount(i32),

    #[error("transform was called before fit; fit the transform on training data first.")]
    NotFitted,

    #[error("Input data is invalid: {0}")]
    InvalidData(String),

    #[error(
        "Knot placement is degenerate: {0}. The training distribution is too concentrated to span distinct knots."
    )]
    DegenerateKnots(String),
}

/// Knot placement fractions for a restricted cubic spline with `k` knots,
/// from Harrell's *Regression Modeling Strategies* quantile table.
///
/// Returns `None` for knot counts outside the supported range [3, 7].
/// The table is process-wide constant data.
pub fn knot_quantiles(k: i32) -> Option<&'static [f64]> {
    match k {
        3 => Some(&[0.1, 0.5, 0.9]),
        4 => Some(&[0.05, 0.365, 0.65, 0.95]),
        5 => Some(&[0.05, 0.275, 0.5, 0.725, 0.95]),
        6 => Some(&[0.05, 0.23, 0.41, 0.59, 0.77, 0.95]),
        7 => Some(&[0.025, 0.1833, 0.3417, 0.5, 0.6583, 0.8167, 0.975]),
        _ => None,
    }
}

/// Validates a single-feature observation vector: non-empty, all finite.
///
/// Structural concerns (raggedness, non-numeric entries) are unrepresentable
/// in an `ArrayView1<f64>`, so validation reduces to these two checks.
pub(crate) fn validate_input(x: ArrayView1<'_, f64>) -> Result<(), BasisError> {
    if x.is_empty() {
        return Err(BasisError::InvalidData(
            "expected at least 1 observation, got an empty array".to_string(),
        ));
    }
    if let Some((idx, value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(BasisError::InvalidData(format!(
            "observation {idx} is not finite (value {value})"
        )));
    }
    Ok(())
}

/// Places `k` knots at the empirical quantiles of `x` given by the fixed
/// knot-quantile table.
///
/// Fails with [`BasisError::UnsupportedKnotCount`] for `k` outside [3, 7],
/// with [`BasisError::InvalidData`] for empty or non-finite input, and with
/// [`BasisError::DegenerateKnots`] when the placed knots would introduce a
/// zero divisor into the basis (equal first/last or last-two knots).
pub fn place_knots(x: ArrayView1<'_, f64>, k: i32) -> Result<Array1<f64>, BasisError> {
    let fractions = knot_quantiles(k).ok_or(BasisError::UnsupportedKnotCount(k))?;
    validate_input(x)?;

    let knots = quantiles(x, fractions);
    check_knot_spacing(knots.view())?;

    let has_ties = knots
        .as_slice()
        .map(|t| t.windows(2).any(|w| w[0] == w[1]))
        .unwrap_or(false);
    if has_ties {
        log::warn!("placed knots contain ties ({knots}); interior basis columns will be collinear");
    }

    Ok(knots)
}

/// Checks the two divisor invariants of the restricted cubic basis:
/// the last two knots must differ, and the first and last knots must differ.
fn check_knot_spacing(t: ArrayView1<'_, f64>) -> Result<(), BasisError> {
    let k = t.len();
    if t[k - 1] == t[k - 2] {
        return Err(BasisError::DegenerateKnots(format!(
            "last two knots are equal ({} == {})",
            t[k - 2],
            t[k - 1]
        )));
    }
    if t[k - 1] == t[0] {
        return Err(BasisError::DegenerateKnots(format!(
            "first and last knots are equal ({} == {})",
            t[0],
            t[k - 1]
        )));
    }
    Ok(())
}

#[inline]
fn positive_part(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

/// Evaluates the restricted cubic spline basis expansion of `x` over `knots`.
///
/// For k knots the output has shape (n, k-1): column 0 is the raw input and
/// column j+1, for j in 0..k-2, is
///
/// ```text
/// [ (x - t_j)_+^3
///   - (x - t_{k-2})_+^3 * (t_{k-1} - t_j) / (t_{k-1} - t_{k-2})
///   + (x - t_{k-1})_+^3 * (t_{k-2} - t_j) / (t_{k-1} - t_{k-2}) ]
/// / (t_{k-1} - t_0)^2
/// ```
///
/// where `(v)_+` is the positive part. The two subtractions in the tail
/// terms force the expansion to be linear beyond the boundary knots.
/// Evaluation is deterministic: fixed knots and input always produce
/// bit-identical output.
pub fn rcs_basis(
    x: ArrayView1<'_, f64>,
    knots: ArrayView1<'_, f64>,
) -> Result<Array2<f64>, BasisError> {
    let k = knots.len();
    if !(MIN_KNOTS as usize..=MAX_KNOTS as usize).contains(&k) {
        return Err(BasisError::UnsupportedKnotCount(k as i32));
    }
    check_knot_spacing(knots)?;

    let t_first = knots[0];
    let t_penult = knots[k - 2];
    let t_last = knots[k - 1];
    let tail_span = t_last - t_penult;
    let full_span_sq = (t_last - t_first) * (t_last - t_first);

    let n = x.len();
    let mut basis = Array2::zeros((n, k - 1));
    basis.column_mut(0).assign(&x);

    for j in 0..k - 2 {
        let t_j = knots[j];
        let penult_weight = (t_last - t_j) / tail_span;
        let last_weight = (t_penult - t_j) / tail_span;
        for (i, &xi) in x.iter().enumerate() {
            let term = positive_part(xi - t_j).powi(3)
                - positive_part(xi - t_penult).powi(3) * penult_weight
                + positive_part(xi - t_last).powi(3) * last_weight;
            basis[[i, j + 1]] = term / full_span_sq;
        }
    }

    Ok(basis)
}
