use core::cmp::Ordering;

use num_traits::{Float, One, Zero};

use crate::layout::{ColumnMajor, FollowVector, Layout, Order, PrecedeVector};
use crate::linalg::kernels::decompose_svd_2x2;
use crate::linalg::qr::{householder_lq, householder_qr};
use crate::linalg::{norm_precise, JacobiSettings, LinalgError};
use crate::matrix::vector::Vector;
use crate::traits::LinalgScalar;
use crate::Matrix;

/// Singular value decomposition `A = U·S·V` of an `M×N` matrix.
///
/// `K` must equal `min(M, N)`; this is checked at compile time and is usually
/// inferred from a type annotation on the result.
///
/// - `u`: `M×K`, orthonormal columns
/// - `s`: `K×K`, diagonal, real and non-negative
/// - `v`: `K×N`, orthonormal rows
///
/// The one-sided driver ([`decompose_svd`]) returns the singular values in
/// non-increasing order. The two-sided driver ([`decompose_svd_two_sided`])
/// guarantees non-negativity and reconstruction only.
///
/// # Example
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::SvdDecomposition;
///
/// let a = Matrix::new([[3.0_f64, 2.0, 2.0], [2.0, 3.0, -2.0]]);
/// let svd: SvdDecomposition<f64, 2, 3, 2> = a.svd().unwrap();
/// let s = svd.singular_values();
/// assert!((s[0] - 5.0).abs() < 1e-12);
/// assert!((s[1] - 3.0).abs() < 1e-12);
/// assert!((svd.u * svd.s * svd.v - a).frobenius_norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdDecomposition<
    T: Copy,
    const M: usize,
    const N: usize,
    const K: usize,
    O: Order = FollowVector,
    L: Layout = ColumnMajor,
> {
    /// Left singular vectors (columns).
    pub u: Matrix<T, M, K, O, L>,
    /// Singular values on the diagonal.
    pub s: Matrix<T, K, K, O, L>,
    /// Right singular vectors (rows).
    pub v: Matrix<T, K, N, O, L>,
    /// Jacobi sweeps performed.
    pub sweeps: usize,
}

impl<T: LinalgScalar, const M: usize, const N: usize, const K: usize, O: Order, L: Layout>
    SvdDecomposition<T, M, N, K, O, L>
{
    /// The diagonal of `s`.
    pub fn singular_values(&self) -> Vector<T::Real, K> {
        Vector::from_array(core::array::from_fn(|i| self.s[(i, i)].re()))
    }

    /// Number of singular values above `tol`.
    pub fn rank(&self, tol: T::Real) -> usize {
        self.singular_values().iter().filter(|&&s| s > tol).count()
    }

    /// Ratio of the largest to the smallest singular value.
    ///
    /// Infinite when the smallest one is zero.
    pub fn condition_number(&self) -> T::Real {
        let s = self.singular_values();
        let (mut lo, mut hi) = (<T::Real as Float>::infinity(), <T::Real as Zero>::zero());
        for &x in s.iter() {
            lo = lo.min(x);
            hi = hi.max(x);
        }
        if lo == <T::Real as Zero>::zero() {
            <T::Real as Float>::infinity()
        } else {
            hi / lo
        }
    }

    /// Moore-Penrose pseudo-inverse `Vᴴ·S⁺·Uᴴ`.
    ///
    /// Singular values at or below `ε·max(M, N)·s_max` are treated as zero.
    pub fn pseudo_inverse(&self) -> Matrix<T, N, M, O, L> {
        let s = self.singular_values();
        let s_max = s.iter().fold(<T::Real as Zero>::zero(), |acc, &x| acc.max(x));
        let cutoff = T::lepsilon() * real_count::<T::Real>(M.max(N)) * s_max;
        let s_inv: Matrix<T, K, K, O, L> = Matrix::from_fn(|i, j| {
            if i == j && s[i] > cutoff {
                T::from_real(s[i].recip())
            } else {
                T::zero()
            }
        });
        self.v.adjoint() * s_inv * self.u.adjoint()
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, const K: usize, L: Layout>
    SvdDecomposition<T, M, N, K, FollowVector, L>
{
    /// Minimum-norm least-squares solution of `A·x = b`.
    pub fn solve(&self, b: &Vector<T, M>) -> Vector<T, N> {
        self.pseudo_inverse() * *b
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, const K: usize, L: Layout>
    SvdDecomposition<T, M, N, K, PrecedeVector, L>
{
    /// Minimum-norm least-squares solution of `x·A = b`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, M> {
        *b * self.pseudo_inverse()
    }
}

/// `n` as a real, without a fallible cast.
fn real_count<R: Float>(n: usize) -> R {
    (0..n).fold(R::zero(), |acc, _| acc + R::one())
}

// ── Two-sided Jacobi ────────────────────────────────────────────────

/// Cyclic two-sided Jacobi on a square `K×K` matrix.
///
/// Each pair `(i, j)` is diagonalized with the closed-form 2×2 SVD and the
/// rotations are applied to the rows and columns of `B` and accumulated into
/// `U` and `V`. Stops when `Σ_{i≠j} |B_ij|² ≤ tol²·‖B‖²`, checked before every
/// sweep. `B` is kept divided by the largest element modulus of `a` so neither
/// sum can overflow or underflow.
fn two_sided_square<T: LinalgScalar, const K: usize, O: Order, L: Layout>(
    a: &Matrix<T, K, K, O, L>,
    settings: JacobiSettings<T::Real>,
) -> Result<SvdDecomposition<T, K, K, K, O, L>, LinalgError> {
    let scale = a.max_modulus().max(<T::Real as Float>::min_positive_value());
    let mut b = *a * T::from_real(scale.recip());
    let mut u = Matrix::<T, K, K, O, L>::eye();
    let mut v = Matrix::<T, K, K, O, L>::eye();
    let tol2 = settings.tolerance * settings.tolerance;

    let mut sweeps = 0;
    loop {
        let mut off = <T::Real as Zero>::zero();
        for i in 0..K {
            for j in 0..K {
                if i != j {
                    off = off + b[(i, j)].modulus_squared();
                }
            }
        }
        if off <= tol2 * b.frobenius_norm_squared() {
            break;
        }
        if sweeps == settings.max_sweeps {
            return Err(LinalgError::ConvergenceFailure { sweeps });
        }
        sweeps += 1;

        for i in 0..K {
            for j in (i + 1)..K {
                let sub: Matrix<T, 2, 2, O, L> =
                    Matrix::from_rows([[b[(i, i)], b[(i, j)]], [b[(j, i)], b[(j, j)]]]);
                let k2 = decompose_svd_2x2(&sub);
                let (u00, u01, u10, u11) = (k2.u[(0, 0)], k2.u[(0, 1)], k2.u[(1, 0)], k2.u[(1, 1)]);
                let (v00, v01, v10, v11) = (k2.v[(0, 0)], k2.v[(0, 1)], k2.v[(1, 0)], k2.v[(1, 1)]);

                // B ← uᴴ·B on rows i, j
                for c in 0..K {
                    let (bi, bj) = (b[(i, c)], b[(j, c)]);
                    b[(i, c)] = u00.conj() * bi + u10.conj() * bj;
                    b[(j, c)] = u01.conj() * bi + u11.conj() * bj;
                }
                // B ← B·vᴴ on columns i, j
                for r in 0..K {
                    let (bi, bj) = (b[(r, i)], b[(r, j)]);
                    b[(r, i)] = bi * v00.conj() + bj * v01.conj();
                    b[(r, j)] = bi * v10.conj() + bj * v11.conj();
                }
                b[(i, i)] = k2.s[(0, 0)];
                b[(j, j)] = k2.s[(1, 1)];
                b[(i, j)] = T::zero();
                b[(j, i)] = T::zero();

                for r in 0..K {
                    let (ui, uj) = (u[(r, i)], u[(r, j)]);
                    u[(r, i)] = ui * u00 + uj * u10;
                    u[(r, j)] = ui * u01 + uj * u11;
                }
                for c in 0..K {
                    let (vi, vj) = (v[(i, c)], v[(j, c)]);
                    v[(i, c)] = v00 * vi + v01 * vj;
                    v[(j, c)] = v10 * vi + v11 * vj;
                }
            }
        }
    }

    // Move any remaining phase of the diagonal into U.
    let mut s = Matrix::<T, K, K, O, L>::zeros();
    for i in 0..K {
        let d = b[(i, i)];
        s[(i, i)] = T::from_real(d.modulus() * scale);
        let p = d.phase();
        for r in 0..K {
            u[(r, i)] = u[(r, i)] * p;
        }
    }

    Ok(SvdDecomposition { u, s, v, sweeps })
}

/// SVD by two-sided (cyclic) Jacobi with the default [`JacobiSettings`].
///
/// Tall input is first reduced with QR and wide input with LQ, so the Jacobi
/// iteration always runs on a square `K×K` triangle.
///
/// ```
/// use fixmat::Matrix;
/// use fixmat::linalg::{decompose_svd_two_sided, SvdDecomposition};
///
/// let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
/// let svd: SvdDecomposition<f64, 3, 2, 2> = decompose_svd_two_sided(&a).unwrap();
/// assert!((svd.u * svd.s * svd.v - a).frobenius_norm() < 1e-12);
/// ```
pub fn decompose_svd_two_sided<
    T: LinalgScalar,
    const M: usize,
    const N: usize,
    const K: usize,
    O: Order,
    L: Layout,
>(
    a: &Matrix<T, M, N, O, L>,
) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
    decompose_svd_two_sided_with(a, JacobiSettings::default())
}

/// [`decompose_svd_two_sided`] with explicit convergence settings.
pub fn decompose_svd_two_sided_with<
    T: LinalgScalar,
    const M: usize,
    const N: usize,
    const K: usize,
    O: Order,
    L: Layout,
>(
    a: &Matrix<T, M, N, O, L>,
    settings: JacobiSettings<T::Real>,
) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
    const { assert!(K == if M < N { M } else { N }, "SVD requires K == min(M, N)") };

    if M > N {
        let qr = householder_qr(a);
        let core = two_sided_square(&qr.r.resize::<K, K>(), settings)?;
        Ok(SvdDecomposition {
            u: qr.q.resize::<M, K>() * core.u,
            s: core.s,
            v: core.v.resize::<K, N>(),
            sweeps: core.sweeps,
        })
    } else if M < N {
        let lq = householder_lq(a);
        let core = two_sided_square(&lq.l.resize::<K, K>(), settings)?;
        Ok(SvdDecomposition {
            u: core.u.resize::<M, K>(),
            s: core.s,
            v: core.v * lq.q.resize::<K, N>(),
            sweeps: core.sweeps,
        })
    } else {
        let core = two_sided_square(&a.resize::<K, K>(), settings)?;
        Ok(SvdDecomposition {
            u: core.u.resize::<M, K>(),
            s: core.s,
            v: core.v.resize::<K, N>(),
            sweeps: core.sweeps,
        })
    }
}

// ── One-sided Jacobi ────────────────────────────────────────────────

/// Squared norms of columns `p` and `q` and their inner product, if the pair
/// still needs a rotation.
///
/// A pair is left alone when `|γ| ≤ tol·√(αβ)`, or when either squared
/// column norm is at or below `floor`. Columns that small are rounding noise
/// and never become orthogonal to each other.
fn coupling<T: LinalgScalar, const K: usize, O: Order, L: Layout>(
    w: &Matrix<T, K, K, O, L>,
    p: usize,
    q: usize,
    tol: T::Real,
    floor: T::Real,
) -> Option<(T::Real, T::Real, T)> {
    let zero = <T::Real as Zero>::zero();
    let mut alpha = zero;
    let mut beta = zero;
    let mut gamma = T::zero();
    for i in 0..K {
        alpha = alpha + w[(i, p)].modulus_squared();
        beta = beta + w[(i, q)].modulus_squared();
        gamma = gamma + w[(i, p)].conj() * w[(i, q)];
    }
    let g = gamma.modulus();
    if alpha <= floor || beta <= floor || g == zero || g <= tol * (alpha * beta).sqrt() {
        None
    } else {
        Some((alpha, beta, gamma))
    }
}

/// Whether every column pair of `w` is already orthogonal to within `tol`.
fn columns_orthogonal<T: LinalgScalar, const K: usize, O: Order, L: Layout>(
    w: &Matrix<T, K, K, O, L>,
    tol: T::Real,
    floor: T::Real,
) -> bool {
    (0..K).all(|p| ((p + 1)..K).all(|q| coupling(w, p, q, tol, floor).is_none()))
}

/// One Hestenes sweep over all column pairs of `w`, accumulating the same
/// rotations into `vacc`.
fn one_sided_sweep<T: LinalgScalar, const K: usize, O: Order, L: Layout>(
    w: &mut Matrix<T, K, K, O, L>,
    vacc: &mut Matrix<T, K, K, O, L>,
    tol: T::Real,
    floor: T::Real,
) {
    let one = <T::Real as One>::one();
    let two = one + one;

    for p in 0..K {
        for q in (p + 1)..K {
            let Some((alpha, beta, gamma)) = coupling(w, p, q, tol, floor) else {
                continue;
            };
            let g = gamma.modulus();
            let e = gamma.phase().conj();
            let zeta = (beta - alpha) / (two * g);
            let t = one.copysign(zeta) / (zeta.abs() + one.hypot(zeta));
            let c = one / one.hypot(t);
            let s = c * t;
            let (j00, j01) = (T::from_real(c), T::from_real(s));
            let (j10, j11) = (T::zero() - T::from_real(s) * e, T::from_real(c) * e);

            for m in [&mut *w, &mut *vacc] {
                for i in 0..K {
                    let (xp, xq) = (m[(i, p)], m[(i, q)]);
                    m[(i, p)] = xp * j00 + xq * j10;
                    m[(i, q)] = xp * j01 + xq * j11;
                }
            }
        }
    }
}

/// One-sided Jacobi SVD of an `M×N` matrix with `M ≥ N` (so `K == N`).
fn one_sided_tall<T: LinalgScalar, const M: usize, const N: usize, const K: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
    settings: JacobiSettings<T::Real>,
) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
    let (mut w, q) = if M > N {
        let qr = householder_qr(a);
        (qr.r.resize::<K, K>(), Some(qr.q))
    } else {
        (a.resize::<K, K>(), None)
    };

    let scale = w.max_modulus().max(<T::Real as Float>::min_positive_value());
    w = w * T::from_real(scale.recip());

    let kf = real_count::<T::Real>(K);
    let tol = settings.tolerance * kf;
    let cutoff = w.frobenius_norm() * T::lepsilon() * kf;
    let floor = cutoff * cutoff;
    let mut vacc = Matrix::<T, K, K, O, L>::eye();

    let mut sweeps = 0;
    while !columns_orthogonal(&w, tol, floor) {
        if sweeps == settings.max_sweeps {
            return Err(LinalgError::ConvergenceFailure { sweeps });
        }
        sweeps += 1;
        one_sided_sweep(&mut w, &mut vacc, tol, floor);
    }

    // Columns of W are now mutually orthogonal: W = U·S.
    let mut norms = [<T::Real as Zero>::zero(); K];
    let mut col = [T::zero(); K];
    for (j, nj) in norms.iter_mut().enumerate() {
        for (i, ci) in col.iter_mut().enumerate() {
            *ci = w[(i, j)];
        }
        *nj = norm_precise(&col);
    }
    let mut order: [usize; K] = core::array::from_fn(|i| i);
    order.sort_unstable_by(|&x, &y| norms[y].partial_cmp(&norms[x]).unwrap_or(Ordering::Equal));

    let mut u = Matrix::<T, K, K, O, L>::zeros();
    let mut s = Matrix::<T, K, K, O, L>::zeros();
    let mut v = Matrix::<T, K, K, O, L>::zeros();
    let mut filled = [false; K];
    for (c, &j) in order.iter().enumerate() {
        let nj = norms[j];
        s[(c, c)] = T::from_real(nj * scale);
        for k in 0..K {
            v[(c, k)] = vacc[(k, j)].conj();
        }
        if nj > cutoff && nj > <T::Real as Zero>::zero() {
            let inv = T::from_real(nj.recip());
            for i in 0..K {
                u[(i, c)] = w[(i, j)] * inv;
            }
            filled[c] = true;
        }
    }
    complete_orthonormal(&mut u, &mut filled);

    let u = match q {
        Some(q) => q.resize::<M, K>() * u,
        None => u.resize::<M, K>(),
    };
    Ok(SvdDecomposition {
        u,
        s,
        v: v.resize::<K, N>(),
        sweeps,
    })
}

/// Fill the columns of `u` not marked in `filled` with unit vectors orthogonal
/// to every filled column, by Gram-Schmidt on the standard basis.
fn complete_orthonormal<T: LinalgScalar, const K: usize, O: Order, L: Layout>(
    u: &mut Matrix<T, K, K, O, L>,
    filled: &mut [bool; K],
) {
    let half = <T::Real as One>::one() / (<T::Real as One>::one() + <T::Real as One>::one());
    for c in 0..K {
        if filled[c] {
            continue;
        }
        for e in 0..K {
            let mut x = [T::zero(); K];
            x[e] = T::one();
            for f in (0..K).filter(|&f| filled[f]) {
                let mut d = T::zero();
                for i in 0..K {
                    d = d + u[(i, f)].conj() * x[i];
                }
                for (i, xi) in x.iter_mut().enumerate() {
                    *xi = *xi - d * u[(i, f)];
                }
            }
            let n = norm_precise(&x);
            if n > half {
                let inv = T::from_real(n.recip());
                for (i, xi) in x.iter().enumerate() {
                    u[(i, c)] = *xi * inv;
                }
                filled[c] = true;
                break;
            }
        }
    }
}

/// SVD by one-sided (Hestenes) Jacobi with the default [`JacobiSettings`].
///
/// Tall input is reduced with QR first; wide input is handled as the flipped
/// tall problem with `U` and `V` exchanged. Singular values are returned in
/// non-increasing order; rank-deficient input gets an orthonormal completion
/// of `U`.
pub fn decompose_svd<T: LinalgScalar, const M: usize, const N: usize, const K: usize, O: Order, L: Layout>(
    a: &Matrix<T, M, N, O, L>,
) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
    decompose_svd_with(a, JacobiSettings::default())
}

/// [`decompose_svd`] with explicit convergence settings.
///
/// The column-coupling threshold is `settings.tolerance · K`.
pub fn decompose_svd_with<
    T: LinalgScalar,
    const M: usize,
    const N: usize,
    const K: usize,
    O: Order,
    L: Layout,
>(
    a: &Matrix<T, M, N, O, L>,
    settings: JacobiSettings<T::Real>,
) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
    const { assert!(K == if M < N { M } else { N }, "SVD requires K == min(M, N)") };

    if M < N {
        let t = one_sided_tall::<T, N, M, K, O::Flip, L::Flip>(&a.flip(), settings)?;
        Ok(SvdDecomposition {
            u: t.v.flip(),
            s: t.s.flip(),
            v: t.u.flip(),
            sweeps: t.sweeps,
        })
    } else {
        one_sided_tall(a, settings)
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// One-sided Jacobi SVD. See [`decompose_svd`].
    pub fn svd<const K: usize>(&self) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
        decompose_svd(self)
    }

    /// Two-sided Jacobi SVD. See [`decompose_svd_two_sided`].
    pub fn svd_two_sided<const K: usize>(&self) -> Result<SvdDecomposition<T, M, N, K, O, L>, LinalgError> {
        decompose_svd_two_sided(self)
    }

    /// Singular values in non-increasing order.
    pub fn singular_values<const K: usize>(&self) -> Result<Vector<T::Real, K>, LinalgError> {
        Ok(decompose_svd::<T, M, N, K, O, L>(self)?.singular_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowMajor;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn check<const M: usize, const N: usize, const K: usize, O: Order, L: Layout>(
        a: &Matrix<f64, M, N, O, L>,
        svd: &SvdDecomposition<f64, M, N, K, O, L>,
    ) {
        let scale = a.frobenius_norm().max(1.0);
        assert!((svd.u * svd.s * svd.v - *a).frobenius_norm() < TOL * scale, "U·S·V != A");
        assert!((svd.u.adjoint() * svd.u - Matrix::eye()).frobenius_norm() < TOL, "UᴴU != I");
        assert!((svd.v * svd.v.adjoint() - Matrix::eye()).frobenius_norm() < TOL, "VVᴴ != I");
        for i in 0..K {
            assert!(svd.s[(i, i)] >= 0.0);
            for j in 0..K {
                if i != j {
                    assert_eq!(svd.s[(i, j)], 0.0);
                }
            }
        }
    }

    fn sample() -> Matrix<f64, 3, 3> {
        Matrix::new([[2.0, -1.0, 0.5], [1.0, 3.0, -2.0], [0.0, 1.5, 4.0]])
    }

    #[test]
    fn one_sided_square_sorted() {
        let a = sample();
        let svd: SvdDecomposition<f64, 3, 3, 3> = a.svd().unwrap();
        check(&a, &svd);
        let s = svd.singular_values();
        assert!(s[0] >= s[1] && s[1] >= s[2]);
        assert_near(svd.u.det().abs(), 1.0, TOL, "|det U|");
        assert_near(svd.v.det().abs(), 1.0, TOL, "|det V|");
    }

    #[test]
    fn two_sided_square() {
        let a = sample();
        let svd: SvdDecomposition<f64, 3, 3, 3> = a.svd_two_sided().unwrap();
        check(&a, &svd);
        let mut s1 = svd.singular_values().into_array();
        let mut s2 = a.singular_values::<3>().unwrap().into_array();
        s1.sort_by(|x, y| y.partial_cmp(x).unwrap());
        s2.sort_by(|x, y| y.partial_cmp(x).unwrap());
        for i in 0..3 {
            assert_near(s1[i], s2[i], 1e-10, "one- vs two-sided singular values");
        }
    }

    #[test]
    fn tall_and_wide() {
        let tall = Matrix::<f64, 4, 2, FollowVector, RowMajor>::from_rows([
            [1.0, 2.0],
            [3.0, 4.0],
            [5.0, 6.0],
            [7.0, 8.0],
        ]);
        let s1: SvdDecomposition<f64, 4, 2, 2, FollowVector, RowMajor> = tall.svd().unwrap();
        check(&tall, &s1);
        let s2: SvdDecomposition<f64, 4, 2, 2, FollowVector, RowMajor> = tall.svd_two_sided().unwrap();
        check(&tall, &s2);

        let wide = Matrix::<f64, 2, 4, PrecedeVector, ColumnMajor>::from_rows([
            [1.0, 0.0, -2.0, 3.0],
            [4.0, 1.0, 0.0, 1.0],
        ]);
        let s3: SvdDecomposition<f64, 2, 4, 2, PrecedeVector, ColumnMajor> = wide.svd().unwrap();
        check(&wide, &s3);
        assert!(s3.singular_values()[0] >= s3.singular_values()[1]);
        let s4: SvdDecomposition<f64, 2, 4, 2, PrecedeVector, ColumnMajor> = wide.svd_two_sided().unwrap();
        check(&wide, &s4);
    }

    #[test]
    fn rank_deficient() {
        let a = Matrix::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [-1.0, -2.0, -3.0]]);
        let svd: SvdDecomposition<f64, 3, 3, 3> = a.svd().unwrap();
        check(&a, &svd);
        assert_eq!(svd.rank(1e-10), 1);
        assert!(svd.condition_number() > 1e12);
        let svd2: SvdDecomposition<f64, 3, 3, 3> = a.svd_two_sided().unwrap();
        check(&a, &svd2);
        assert_eq!(svd2.rank(1e-10), 1);
    }

    #[test]
    fn zero_and_diagonal_take_no_sweeps() {
        let z: Matrix<f64, 3, 3> = Matrix::zeros();
        let svd: SvdDecomposition<f64, 3, 3, 3> = z.svd_two_sided().unwrap();
        assert_eq!(svd.sweeps, 0);
        assert_eq!(svd.s, Matrix::zeros());
        let svd: SvdDecomposition<f64, 3, 3, 3> = z.svd().unwrap();
        assert_eq!(svd.sweeps, 0);
        check(&z, &svd);
        assert_eq!(svd.condition_number(), f64::INFINITY);

        let d = Matrix::new([[3.0, 0.0], [0.0, -2.0]]);
        let svd: SvdDecomposition<f64, 2, 2, 2> = d.svd_two_sided().unwrap();
        assert_eq!(svd.sweeps, 0);
        assert_near(svd.singular_values()[0], 3.0, TOL, "s0");
        assert_near(svd.singular_values()[1], 2.0, TOL, "s1");
        check(&d, &svd);
    }

    #[test]
    fn sweep_budget_is_enforced() {
        let a = sample();
        let settings = JacobiSettings { tolerance: 0.0, max_sweeps: 1 };
        let r: Result<SvdDecomposition<f64, 3, 3, 3>, _> = decompose_svd_two_sided_with(&a, settings);
        assert_eq!(r.unwrap_err(), LinalgError::ConvergenceFailure { sweeps: 1 });
    }

    #[test]
    fn one_sided_cap_is_checked_before_sweeping() {
        let settings = JacobiSettings { tolerance: f64::EPSILON, max_sweeps: 0 };
        let r: Result<SvdDecomposition<f64, 3, 3, 3>, _> = decompose_svd_with(&sample(), settings);
        assert_eq!(r.unwrap_err(), LinalgError::ConvergenceFailure { sweeps: 0 });

        let d = Matrix::new([[0.0, 2.0], [5.0, 0.0]]);
        let svd: SvdDecomposition<f64, 2, 2, 2> = decompose_svd_with(&d, settings).unwrap();
        assert_eq!(svd.sweeps, 0);
        assert_near(svd.singular_values()[0], 5.0, TOL, "s0");
        assert_near(svd.singular_values()[1], 2.0, TOL, "s1");
        check(&d, &svd);
    }

    #[test]
    fn extreme_scales() {
        let base = sample();
        let mut reference = base.singular_values::<3>().unwrap().into_array();
        reference.sort_by(|x, y| y.partial_cmp(x).unwrap());
        for k in [1e160, 1e-170] {
            let a = base * k;
            let one: SvdDecomposition<f64, 3, 3, 3> = a.svd().unwrap();
            let two: SvdDecomposition<f64, 3, 3, 3> = a.svd_two_sided().unwrap();
            assert!(two.sweeps > 0);
            for svd in [one, two] {
                let r = (svd.u * svd.s * svd.v - a) * (1.0 / k);
                assert!(r.frobenius_norm() < 1e-12, "U·S·V != A at scale {}", k);
                assert!((svd.u.adjoint() * svd.u - Matrix::eye()).frobenius_norm() < TOL);
                assert!((svd.v * svd.v.adjoint() - Matrix::eye()).frobenius_norm() < TOL);
                let mut s = svd.singular_values().into_array();
                s.sort_by(|x, y| y.partial_cmp(x).unwrap());
                for i in 0..3 {
                    assert_near(s[i] / k, reference[i], 1e-12, "scaled singular value");
                }
            }
        }
    }

    fn rank_two_rows() -> [[f64; 4]; 4] {
        [[1.0, 2.0, 3.0, 4.0], [2.0, 4.0, 6.0, 8.0], [0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 1.0, 0.0]]
    }

    #[test]
    fn one_sided_converges_on_collapsed_columns() {
        let a = Matrix::<f64, 4, 4>::from_rows(rank_two_rows());
        let svd: SvdDecomposition<f64, 4, 4, 4> = a.svd().unwrap();
        check(&a, &svd);
        assert_eq!(svd.rank(1e-10), 2);

        let b = Matrix::<f64, 4, 4, PrecedeVector, RowMajor>::from_rows(rank_two_rows());
        let svd: SvdDecomposition<f64, 4, 4, 4, PrecedeVector, RowMajor> = b.svd().unwrap();
        check(&b, &svd);
        assert_eq!(svd.rank(1e-10), 2);

        let two: SvdDecomposition<f64, 4, 4, 4> = a.svd_two_sided().unwrap();
        let mut s = two.singular_values().into_array();
        s.sort_by(|x, y| y.partial_cmp(x).unwrap());
        for i in 0..2 {
            assert_near(s[i], svd.singular_values()[i], 1e-10, "one- vs two-sided");
        }
    }

    #[test]
    fn pseudo_inverse_and_solve() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let svd: SvdDecomposition<f64, 3, 2, 2> = a.svd().unwrap();
        let pinv = svd.pseudo_inverse();
        assert!((pinv - a.qr().inverse()).frobenius_norm() < 1e-10);

        let b = Vector::from_array([1.0, 3.0, 4.0]);
        let x = svd.solve(&b);
        let y = a.qr().solve(&b);
        assert!((x - y).norm() < 1e-10);

        let ap = a.flip();
        let svdp: SvdDecomposition<f64, 2, 3, 2, PrecedeVector, RowMajor> = ap.svd().unwrap();
        let xp = svdp.solve(&b);
        assert!((xp - x).norm() < 1e-10);
    }

    #[test]
    fn pseudo_inverse_rank_deficient() {
        let a = Matrix::new([[1.0, 1.0], [1.0, 1.0]]);
        let svd: SvdDecomposition<f64, 2, 2, 2> = a.svd().unwrap();
        let pinv = svd.pseudo_inverse();
        for i in 0..2 {
            for j in 0..2 {
                assert_near(pinv[(i, j)], 0.25, TOL, "pinv of all-ones");
            }
        }
    }
}
