use num_traits::Float;

use crate::layout::{ColumnMajor, FollowVector, Layout, Order, PrecedeVector};
use crate::linalg::norm_precise;
use crate::matrix::vector::Vector;
use crate::traits::LinalgScalar;
use crate::Matrix;

// ── Householder kernel ──────────────────────────────────────────────

/// Householder QR of an `M×N` matrix with `M ≥ N`, no shape check.
///
/// The input is scaled by the reciprocal of its largest element modulus
/// (clamped to the smallest positive normal) before any norm is taken, and the
/// factors are un-scaled at the end. Each reflector `u` is chosen so that
/// `x − α·e₀` never cancels: `α = −phase(x₀)·‖x‖`. An all-zero column gets the
/// unit reflector `e₀`.
pub(crate) fn householder_qr<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
) -> QrDecomposition<T, M, N, O, L> {
    let tiny = <T::Real as Float>::min_positive_value();
    let scale = a.max_modulus().max(tiny);
    let mut r = *a * T::from_real(scale.recip());
    let mut qt = Matrix::<T, M, M, O, L>::eye();
    let two = T::one() + T::one();

    for k in 0..N.min(M) {
        let mut u = [T::zero(); M];
        for i in k..M {
            u[i] = r[(i, k)];
        }
        let x0 = u[k];
        let alpha = T::zero() - x0.phase() * T::from_real(norm_precise(&u[k..]));
        u[k] = x0 - alpha;

        let un = norm_precise(&u[k..]);
        if un < tiny {
            u = [T::zero(); M];
            u[k] = T::one();
        } else {
            let inv = T::from_real(un.recip());
            for ui in u[k..].iter_mut() {
                *ui = *ui * inv;
            }
        }

        // M ← M − 2·u·(uᴴ·M) on the active rows
        for j in k..N {
            let mut w = T::zero();
            for i in k..M {
                w = w + u[i].conj() * r[(i, j)];
            }
            let w = w * two;
            for i in k..M {
                r[(i, j)] = r[(i, j)] - u[i] * w;
            }
        }
        for j in 0..M {
            let mut w = T::zero();
            for i in k..M {
                w = w + u[i].conj() * qt[(i, j)];
            }
            let w = w * two;
            for i in k..M {
                qt[(i, j)] = qt[(i, j)] - u[i] * w;
            }
        }
    }

    let s = T::from_real(scale);
    let q = Matrix::from_fn(|i, j| qt[(j, i)].conj());
    let r = Matrix::from_fn(|i, j| if i > j { T::zero() } else { r[(i, j)] * s });
    QrDecomposition { q, r }
}

/// Back substitution `R·x = y` for upper-triangular `R`.
fn back_substitute<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    r: &Matrix<T, N, N, O, L>,
    y: &Vector<T, N>,
) -> Vector<T, N> {
    let mut x = *y;
    for i in (0..N).rev() {
        let mut sum = x[i];
        for j in (i + 1)..N {
            sum = sum - r[(i, j)] * x[j];
        }
        x[i] = sum / r[(i, i)];
    }
    x
}

// ── QR ──────────────────────────────────────────────────────────────

/// QR decomposition `A = Q·R` of an `M×N` matrix, `M ≥ N`.
///
/// `q` is `M×N` with orthonormal columns, `r` is `N×N` upper-triangular with
/// an exactly zero strict lower triangle.
///
/// # Example
///
/// ```
/// use fixmat::{Matrix, Vector};
///
/// let a = Matrix::new([[12.0_f64, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]]);
/// let qr = a.qr();
/// assert!((qr.r[(0, 0)] + 14.0).abs() < 1e-10);
/// assert!((qr.r[(2, 2)] - 35.0).abs() < 1e-10);
///
/// let b = Vector::from_array([1.0, 2.0, 3.0]);
/// let x = qr.solve(&b);
/// let ax = a * x;
/// assert!((ax - b).norm() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrDecomposition<T: Copy, const M: usize, const N: usize, O: Order = FollowVector, L: Layout = ColumnMajor> {
    /// Factor with orthonormal columns.
    pub q: Matrix<T, M, N, O, L>,
    /// Upper-triangular factor.
    pub r: Matrix<T, N, N, O, L>,
}

/// Decompose `A = Q·R` with Householder reflections. Requires `M ≥ N`,
/// checked at compile time.
pub fn decompose_qr<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
) -> QrDecomposition<T, M, N, O, L> {
    const { assert!(M >= N, "QR decomposition requires M >= N") };
    householder_qr(a)
}

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> QrDecomposition<T, M, N, O, L> {
    /// Pseudo-inverse `R⁻¹·Qᴴ` (the inverse for square input).
    pub fn inverse(&self) -> Matrix<T, N, M, O, L> {
        let mut out = Matrix::zeros();
        for c in 0..M {
            let y = Vector::from_array(core::array::from_fn(|j| self.q[(c, j)].conj()));
            out.set_col(c, &back_substitute(&self.r, &y));
        }
        out
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, L: Layout> QrDecomposition<T, M, N, FollowVector, L> {
    /// Solve `A·x = b`; the least-squares solution when `M > N`.
    pub fn solve(&self, b: &Vector<T, M>) -> Vector<T, N> {
        let mut y = Vector::<T, N>::zeros();
        for j in 0..N {
            let mut sum = T::zero();
            for i in 0..M {
                sum = sum + self.q[(i, j)].conj() * b[i];
            }
            y[j] = sum;
        }
        back_substitute(&self.r, &y)
    }

    /// Solve `A·X = B` column by column.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, M, P, FollowVector, L2>,
    ) -> Matrix<T, N, P, FollowVector, L2> {
        let mut x = Matrix::zeros();
        for j in 0..P {
            x.set_col(j, &self.solve(&b.col(j)));
        }
        x
    }
}

// ── LQ ──────────────────────────────────────────────────────────────

/// LQ decomposition `A = L·Q` of an `M×N` matrix, `M ≤ N`.
///
/// Computed as the QR decomposition of `a.flip()` with both factors flipped
/// back, so it shares the Householder kernel with [`QrDecomposition`].
///
/// # Example
///
/// ```
/// use fixmat::{Matrix, PrecedeVector, RowMajor, Vector};
///
/// let a = Matrix::<f64, 2, 3, PrecedeVector, RowMajor>::from_rows([
///     [1.0, 2.0, 2.0],
///     [0.0, 1.0, 4.0],
/// ]);
/// let lq = a.lq();
/// assert_eq!(lq.l[(0, 1)], 0.0);
/// assert!((lq.l * lq.q - a).frobenius_norm() < 1e-12);
///
/// let x = Vector::from_array([2.0, -1.0]);
/// let y = lq.solve(&(x * a));
/// assert!((y - x).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LqDecomposition<T: Copy, const M: usize, const N: usize, O: Order = FollowVector, L: Layout = ColumnMajor> {
    /// Lower-triangular factor.
    pub l: Matrix<T, M, M, O, L>,
    /// Factor with orthonormal rows.
    pub q: Matrix<T, M, N, O, L>,
}

/// Decompose `A = L·Q`. Requires `M ≤ N`, checked at compile time.
pub fn decompose_lq<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
) -> LqDecomposition<T, M, N, O, L> {
    const { assert!(M <= N, "LQ decomposition requires M <= N") };
    householder_lq(a)
}

/// LQ without the shape check.
pub(crate) fn householder_lq<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
) -> LqDecomposition<T, M, N, O, L> {
    let qr = householder_qr(&a.flip());
    LqDecomposition {
        l: qr.r.flip(),
        q: qr.q.flip(),
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> LqDecomposition<T, M, N, O, L> {
    /// The QR decomposition of the flipped matrix this was built from.
    pub fn flip(&self) -> QrDecomposition<T, N, M, O::Flip, L::Flip> {
        QrDecomposition {
            q: self.q.flip(),
            r: self.l.flip(),
        }
    }

    /// Pseudo-inverse `Qᴴ·L⁻¹` (the inverse for square input).
    pub fn inverse(&self) -> Matrix<T, N, M, O, L> {
        self.flip().inverse().flip()
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, L: Layout> LqDecomposition<T, M, N, PrecedeVector, L> {
    /// Solve `x·A = b`; the least-squares solution when `N > M`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, M> {
        self.flip().solve(b)
    }

    /// Solve `X·A = B` row by row.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, P, N, PrecedeVector, L2>,
    ) -> Matrix<T, P, M, PrecedeVector, L2> {
        let mut x = Matrix::zeros();
        for i in 0..P {
            x.set_row(i, &self.solve(&b.row(i)));
        }
        x
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// QR decomposition. See [`decompose_qr`].
    pub fn qr(&self) -> QrDecomposition<T, M, N, O, L> {
        decompose_qr(self)
    }

    /// LQ decomposition. See [`decompose_lq`].
    pub fn lq(&self) -> LqDecomposition<T, M, N, O, L> {
        decompose_lq(self)
    }
}
