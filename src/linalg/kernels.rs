use num_traits::Zero;

use crate::layout::{ColumnMajor, FollowVector, Layout, Order};
use crate::linalg::{hypot2, SvdDecomposition};
use crate::traits::{FloatScalar, LinalgScalar};
use crate::Matrix;

// ── 2×2 RQ ──────────────────────────────────────────────────────────

/// RQ decomposition `A = R·Q` of a 2×2 matrix.
///
/// `r` is upper-triangular with a real, non-negative `r[(1, 1)]`; `q` is
/// unitary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rq2x2<T: Copy, O: Order = FollowVector, L: Layout = ColumnMajor> {
    /// Upper-triangular factor.
    pub r: Matrix<T, 2, 2, O, L>,
    /// Unitary factor.
    pub q: Matrix<T, 2, 2, O, L>,
}

/// Closed-form RQ decomposition of a 2×2 matrix.
///
/// The second row `(c, d)` is normalized by its overflow-safe norm `n` and
/// becomes the second row of `Q`; the first row of `Q` is its orthogonal
/// complement. An all-zero second row returns `Q = I`, `R = A`.
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::decompose_rq_2x2;
///
/// let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0]]);
/// let rq = decompose_rq_2x2(&a);
/// assert_eq!(rq.r[(1, 0)], 0.0);
/// assert!((rq.r[(1, 1)] - 5.0).abs() < 1e-12);
/// assert!((rq.r * rq.q - a).frobenius_norm() < 1e-12);
/// ```
pub fn decompose_rq_2x2<T: LinalgScalar, O: Order, L: Layout>(a: &Matrix<T, 2, 2, O, L>) -> Rq2x2<T, O, L> {
    let (a00, a01, a10, a11) = (a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
    let n = hypot2(a10, a11);
    if n == <T::Real as Zero>::zero() {
        return Rq2x2 {
            r: *a,
            q: Matrix::eye(),
        };
    }

    let nt = T::from_real(n);
    let cn = a10 / nt;
    let dn = a11 / nt;
    let q = Matrix::from_rows([[dn.conj(), T::zero() - cn.conj()], [cn, dn]]);
    let r = Matrix::from_rows([
        [a00 * dn - a01 * cn, a00 * cn.conj() + a01 * dn.conj()],
        [T::zero(), nt],
    ]);
    Rq2x2 { r, q }
}

// ── 2×2 SVD ─────────────────────────────────────────────────────────

fn rotation<R: FloatScalar>(angle: R) -> [[R; 2]; 2] {
    let (s, c) = angle.sin_cos();
    [[c, R::zero() - s], [s, c]]
}

/// SVD of the real upper-triangular `[[f, g], [0, h]]` with `f, g, h ≥ 0`.
///
/// Two-angle closed form: with `E = (f+h)/2`, `F = (f−h)/2`, `G = g/2`,
/// `H = −g/2`, the singular values are `hypot(E, H) ± hypot(F, G)` and the
/// rotations are `(atan2(H, E) ± atan2(G, F))/2`. Every step is a `hypot` or
/// `atan2`, so zero inputs give identity rotations.
fn upper_svd_real<R: FloatScalar>(f: R, g: R, h: R) -> ([[R; 2]; 2], [R; 2], [[R; 2]; 2]) {
    let half = R::one() / (R::one() + R::one());
    let e = (f + h) * half;
    let ff = (f - h) * half;
    let gg = g * half;
    let hh = R::zero() - gg;

    let qn = e.hypot(hh);
    let rn = ff.hypot(gg);
    let sx = qn + rn;
    let mut sy = qn - rn;

    let a1 = gg.atan2(ff);
    let a2 = hh.atan2(e);
    let theta = (a2 - a1) * half;
    let phi = (a2 + a1) * half;

    let u = rotation(phi);
    let mut v = rotation(theta);
    if sy < R::zero() {
        sy = R::zero() - sy;
        v[1] = [R::zero() - v[1][0], R::zero() - v[1][1]];
    }
    (u, [sx, sy], v)
}

/// Closed-form SVD `A = U·S·V` of a 2×2 matrix.
///
/// Preconditions with [`decompose_rq_2x2`], moves the phases of the
/// triangular factor into diagonal unitaries, solves the remaining real
/// triangular problem in closed form and folds `Q` back into `V`. The
/// singular values come out sorted and non-negative. The zero matrix gives
/// `U = V = I`, `S = 0`.
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::decompose_svd_2x2;
///
/// let a = Matrix::new([[3.0_f64, 0.0], [4.0, 5.0]]);
/// let svd = decompose_svd_2x2(&a);
/// let s = svd.singular_values();
/// assert!((s[0] - 45.0_f64.sqrt()).abs() < 1e-12);
/// assert!((s[1] - 5.0_f64.sqrt()).abs() < 1e-12);
/// assert!((svd.u * svd.s * svd.v - a).frobenius_norm() < 1e-12);
/// ```
pub fn decompose_svd_2x2<T: LinalgScalar, O: Order, L: Layout>(
    a: &Matrix<T, 2, 2, O, L>,
) -> SvdDecomposition<T, 2, 2, 2, O, L> {
    let rq = decompose_rq_2x2(a);
    let (x, y, z) = (rq.r[(0, 0)], rq.r[(0, 1)], rq.r[(1, 1)]);

    let p0 = x.phase();
    let r1 = y.phase() * p0.conj();
    let p1 = z.phase() * r1.conj();

    let (ur, s, vr) = upper_svd_real(x.modulus(), y.modulus(), z.modulus());

    let row_phase = [p0, p1];
    let u = Matrix::from_fn(|i, j| row_phase[i] * T::from_real(ur[i][j]));
    let col_phase = [T::one(), r1];
    let vd: Matrix<T, 2, 2, O, L> = Matrix::from_fn(|i, j| T::from_real(vr[i][j]) * col_phase[j]);
    let v = vd * rq.q;
    let s = Matrix::from_fn(|i, j| if i == j { T::from_real(s[i]) } else { T::zero() });

    SvdDecomposition { u, s, v, sweeps: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PrecedeVector, RowMajor};

    const TOL: f64 = 1e-12;

    fn check<O: Order, L: Layout>(a: &Matrix<f64, 2, 2, O, L>) {
        let svd = decompose_svd_2x2(a);
        assert!((svd.u * svd.s * svd.v - *a).frobenius_norm() < TOL);
        assert!((svd.u.adjoint() * svd.u - Matrix::eye()).frobenius_norm() < TOL);
        assert!((svd.v * svd.v.adjoint() - Matrix::eye()).frobenius_norm() < TOL);
        let s = svd.singular_values();
        assert!(s[0] >= s[1] && s[1] >= 0.0);
        assert_eq!(svd.s[(0, 1)], 0.0);
        assert_eq!(svd.s[(1, 0)], 0.0);
    }

    #[test]
    fn rq_reconstructs() {
        let a = Matrix::<f64, 2, 2, PrecedeVector, RowMajor>::from_rows([[-2.0, 1.5], [0.5, -3.0]]);
        let rq = decompose_rq_2x2(&a);
        assert_eq!(rq.r[(1, 0)], 0.0);
        assert!(rq.r[(1, 1)] > 0.0);
        assert!((rq.r * rq.q - a).frobenius_norm() < TOL);
        assert!((rq.q * rq.q.adjoint() - Matrix::eye()).frobenius_norm() < TOL);
    }

    #[test]
    fn rq_zero_second_row() {
        let a = Matrix::new([[1.0, 2.0], [0.0, 0.0]]);
        let rq = decompose_rq_2x2(&a);
        assert_eq!(rq.q, Matrix::eye());
        assert_eq!(rq.r, a);
    }

    #[test]
    fn svd_assorted() {
        check(&Matrix::new([[1.0, 2.0], [3.0, 4.0]]));
        check(&Matrix::new([[0.0, 1.0], [1.0, 0.0]]));
        check(&Matrix::new([[-1.0, 0.0], [0.0, -2.0]]));
        check(&Matrix::new([[1.0, 1.0], [1.0, 1.0]]));
        check(&Matrix::new([[0.0, 5.0], [0.0, 0.0]]));
        check(&Matrix::<f64, 2, 2, PrecedeVector, RowMajor>::from_rows([[1e-200, 3e-200], [2e-200, -1e-200]]));
        check(&Matrix::<f64, 2, 2, FollowVector, RowMajor>::from_rows([[7.0, -3.0], [0.0, 2.0]]));
    }

    #[test]
    fn svd_zero_matrix_is_identity() {
        let a: Matrix<f64, 2, 2> = Matrix::zeros();
        let svd = decompose_svd_2x2(&a);
        assert_eq!(svd.u, Matrix::eye());
        assert_eq!(svd.v, Matrix::eye());
        assert_eq!(svd.s, Matrix::zeros());
        assert_eq!(svd.sweeps, 0);
    }

    #[test]
    fn svd_diagonal() {
        let a = Matrix::new([[2.0_f64, 0.0], [0.0, 3.0]]);
        let svd = decompose_svd_2x2(&a);
        let s = svd.singular_values();
        assert!((s[0] - 3.0).abs() < TOL);
        assert!((s[1] - 2.0).abs() < TOL);
    }
}
