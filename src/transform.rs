use crate::basis::{BasisError, place_knots, rcs_basis, validate_input};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// The fit/transform contract expected by a pipeline orchestrator.
///
/// `y` is accepted and ignored by both operations; it exists purely so the
/// transform slots into generic supervised-style pipelines that pass a
/// target alongside the features.
pub trait FitTransform {
    /// Learns transform state from training data, returning `self` so calls
    /// can be chained.
    fn fit(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: Option<ArrayView1<'_, f64>>,
    ) -> Result<&mut Self, BasisError>;

    /// Maps observations to their expanded representation. A pure read of
    /// fitted state.
    fn transform(
        &self,
        x: ArrayView1<'_, f64>,
        y: Option<ArrayView1<'_, f64>>,
    ) -> Result<Array2<f64>, BasisError>;

    /// Fits on `x` and immediately transforms it.
    fn fit_transform(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: Option<ArrayView1<'_, f64>>,
    ) -> Result<Array2<f64>, BasisError> {
        self.fit(x, y)?;
        self.transform(x, y)
    }
}

/// Restricted cubic spline basis expansion of a single numeric feature.
///
/// [`FitTransform::fit`] places `k` knots at fixed quantiles of the training
/// distribution; [`FitTransform::transform`] then maps observations to an
/// (n, k-1) basis matrix whose column 0 is the raw input and whose remaining
/// columns are truncated-cubic terms constrained to be linear beyond the
/// boundary knots.
///
/// `k` is validated at first fit, not at construction. Any negative `k`
/// disables the transform: fit becomes a no-op and transform passes the
/// input through unchanged, so a pipeline step can be toggled off without
/// being removed.
///
/// The instance is reusable and re-fittable indefinitely; each successful
/// fit replaces the stored knots wholesale, and a failed fit leaves prior
/// state intact. Knot state is written only by `fit`, so concurrent `fit`
/// and `transform` on one instance from multiple threads is unsafe; callers
/// must serialize access (wrap in a `Mutex` or fit before sharing).
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictedCubicSpline {
    k: i32,
    knots: Option<Array1<f64>>,
}

impl Default for RestrictedCubicSpline {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RestrictedCubicSpline {
    /// Creates an unfitted transform with `k` knots. `k` is not validated
    /// here; an unsupported value surfaces as an error at fit time.
    pub fn new(k: i32) -> Self {
        Self { k, knots: None }
    }

    /// The configured knot count.
    pub fn k(&self) -> i32 {
        self.k
    }

    /// The fitted knot locations, or `None` before the first successful fit.
    pub fn knots(&self) -> Option<ArrayView1<'_, f64>> {
        self.knots.as_ref().map(Array1::view)
    }

    fn disabled(&self) -> bool {
        self.k < 0
    }
}

impl FitTransform for RestrictedCubicSpline {
    /// Computes and stores the knot locations from `x`.
    ///
    /// With `k < 0` this is a no-op that returns `self` unchanged, skipping
    /// all validation. Otherwise it fails with
    /// [`BasisError::UnsupportedKnotCount`] for `k` outside [3, 7],
    /// [`BasisError::InvalidData`] for malformed input, or
    /// [`BasisError::DegenerateKnots`] for a degenerate training
    /// distribution; on any failure the previously stored knots survive.
    fn fit(
        &mut self,
        x: ArrayView1<'_, f64>,
        _y: Option<ArrayView1<'_, f64>>,
    ) -> Result<&mut Self, BasisError> {
        if self.disabled() {
            return Ok(self);
        }
        let knots = place_knots(x, self.k)?;
        self.knots = Some(knots);
        Ok(self)
    }

    /// Expands `x` into the (n, k-1) basis matrix.
    ///
    /// With `k < 0` the input is passed through unchanged as an (n, 1)
    /// column, regardless of fit state. Otherwise fails with
    /// [`BasisError::NotFitted`] before the first successful fit.
    fn transform(
        &self,
        x: ArrayView1<'_, f64>,
        _y: Option<ArrayView1<'_, f64>>,
    ) -> Result<Array2<f64>, BasisError> {
        validate_input(x)?;
        if self.disabled() {
            return Ok(x.to_owned().insert_axis(Axis(1)));
        }
        let knots = self.knots.as_ref().ok_or(BasisError::NotFitted)?;
        rcs_basis(x, knots.view())
    }
}
