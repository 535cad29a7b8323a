//! Matrix factorizations: LU/LUP, QR/LQ, closed-form 2×2 RQ and SVD kernels,
//! and one- and two-sided Jacobi SVD.
//!
//! Every algorithm is written once against [`LinalgScalar`] and the
//! [`Layout`](crate::Layout) / [`Order`](crate::Order) tags, so the same body
//! serves real and complex input under all four storage/multiplication
//! conventions. Shape requirements (`M ≥ N` for QR, `K = min(M, N)` for SVD)
//! are checked at compile time.

pub(crate) mod kernels;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod svd;

pub use kernels::{decompose_rq_2x2, decompose_svd_2x2, Rq2x2};
pub use lu::{decompose_lu, decompose_lup, LuDecomposition, LupDecomposition};
pub use qr::{decompose_lq, decompose_qr, LqDecomposition, QrDecomposition};
pub use svd::{
    decompose_svd, decompose_svd_two_sided, decompose_svd_two_sided_with, decompose_svd_with,
    SvdDecomposition,
};

use num_traits::Float;

use crate::traits::{FloatScalar, LinalgScalar};

/// Errors from linear algebra operations.
///
/// The factorizations themselves never fail on degenerate input: they produce
/// NaN/Inf or rank-deficient factors instead. Errors are reserved for the
/// convenience solvers and for iteration budgets.
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::LinalgError;
///
/// let singular = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// A pivot was exactly zero during `Matrix::solve` / `Matrix::inverse`.
    Singular,
    /// A Jacobi SVD did not converge within its sweep budget.
    ConvergenceFailure {
        /// Sweeps performed before giving up.
        sweeps: usize,
    },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::ConvergenceFailure { sweeps } => {
                write!(f, "Jacobi SVD did not converge after {sweeps} sweeps")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Convergence settings for the Jacobi SVD drivers.
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::{decompose_svd_two_sided_with, JacobiSettings, SvdDecomposition};
///
/// let a = Matrix::new([[4.0_f64, 1.0], [2.0, 3.0]]);
/// let settings = JacobiSettings { tolerance: 1e-6, max_sweeps: 10 };
/// let svd: SvdDecomposition<f64, 2, 2, 2> = decompose_svd_two_sided_with(&a, settings).unwrap();
/// assert!(svd.sweeps <= 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiSettings<R> {
    /// Relative off-diagonal (two-sided) or column-coupling (one-sided)
    /// threshold below which the iteration stops.
    pub tolerance: R,
    /// Hard cap on full sweeps over all index pairs.
    pub max_sweeps: usize,
}

impl<R: FloatScalar> Default for JacobiSettings<R> {
    fn default() -> Self {
        Self {
            tolerance: <R as Float>::epsilon(),
            max_sweeps: 64,
        }
    }
}

/// `sqrt(|a|² + |b|²)` without intermediate overflow or underflow.
#[inline]
pub(crate) fn hypot2<T: LinalgScalar>(a: T, b: T) -> T::Real {
    a.modulus().hypot(b.modulus())
}

/// Scale-invariant 2-norm of a slice.
pub(crate) fn norm_precise<T: LinalgScalar>(x: &[T]) -> T::Real {
    let zero = <T::Real as num_traits::Zero>::zero();
    let scale = x.iter().fold(zero, |acc, v| acc.max(v.modulus()));
    if scale == zero {
        return zero;
    }
    let sum = x.iter().fold(zero, |acc, v| {
        let r = v.modulus() / scale;
        acc + r * r
    });
    scale * sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let s = JacobiSettings::<f64>::default();
        assert_eq!(s.tolerance, f64::EPSILON);
        assert_eq!(s.max_sweeps, 64);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", LinalgError::Singular), "matrix is singular");
        assert_eq!(
            format!("{}", LinalgError::ConvergenceFailure { sweeps: 3 }),
            "Jacobi SVD did not converge after 3 sweeps"
        );
    }

    #[test]
    fn precise_norm_is_scale_invariant() {
        assert_eq!(norm_precise::<f64>(&[0.0, 0.0]), 0.0);
        let big = norm_precise(&[3e300_f64, 4e300]);
        assert!((big / 5e300 - 1.0).abs() < 1e-15);
        assert_eq!(hypot2(3.0_f64, -4.0), 5.0);
    }
}
