//! Restricted cubic spline basis expansion of a single numeric feature.
//!
//! A restricted cubic spline models a nonlinear effect with a piecewise
//! cubic that is constrained to be linear beyond its boundary knots, which
//! keeps the tails of a fitted curve from oscillating. This crate provides
//! the preprocessing half of that model: [`RestrictedCubicSpline`] places
//! `k` knots at fixed quantiles of the training distribution (Harrell's
//! table, supported for `k` in 3..=7) and expands observations into an
//! `(n, k-1)` design matrix for a downstream linear model.
//!
//! # Example
//! ```
//! use ndarray::Array1;
//! use rcspline::{FitTransform, RestrictedCubicSpline};
//!
//! let x: Array1<f64> = (1..=100).map(|v| v as f64).collect();
//!
//! let mut rcs = RestrictedCubicSpline::new(4);
//! let basis = rcs.fit(x.view(), None).unwrap().transform(x.view(), None).unwrap();
//!
//! assert_eq!(basis.shape(), &[100, 3]);
//! assert_eq!(basis[[0, 0]], 1.0); // column 0 is the raw input
//! ```
//!
//! Fit and transform are synchronous in-memory computations with no
//! locking; callers sharing one instance across threads must serialize
//! access themselves.

#![deny(dead_code)]
#![deny(unused_imports)]

pub mod basis;
pub mod quantile;
pub mod transform;

pub use basis::{BasisError, MAX_KNOTS, MIN_KNOTS, knot_quantiles, place_knots, rcs_basis};
pub use transform::{FitTransform, RestrictedCubicSpline};
