use crate::layout::{ColumnMajor, FollowVector, Layout, Order, PrecedeVector};
use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::traits::LinalgScalar;
use crate::Matrix;

// ── Elimination ─────────────────────────────────────────────────────

/// Doolittle elimination on a copy of `a`, optionally with partial pivoting.
///
/// Returns `(l, u, perm, even)`. Without pivoting `perm` is the identity and a
/// zero pivot divides through (NaN/Inf). With pivoting a column whose best
/// pivot is exactly zero is left as is.
#[allow(clippy::type_complexity)]
fn eliminate<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, N, N, O, L>,
    pivoting: bool,
) -> (Matrix<T, N, N, O, L>, Matrix<T, N, N, O, L>, [usize; N], bool) {
    let mut l = Matrix::<T, N, N, O, L>::eye();
    let mut u = *a;
    let mut perm = core::array::from_fn(|i| i);
    let mut even = true;

    for k in 0..N {
        if pivoting {
            let mut p = k;
            let mut best = u[(k, k)].modulus();
            for i in (k + 1)..N {
                let m = u[(i, k)].modulus();
                if m > best {
                    best = m;
                    p = i;
                }
            }
            if p != k {
                u.swap_rows(k, p);
                for j in 0..k {
                    let tmp = l[(k, j)];
                    l[(k, j)] = l[(p, j)];
                    l[(p, j)] = tmp;
                }
                perm.swap(k, p);
                even = !even;
            }
            if u[(k, k)] == T::zero() {
                continue;
            }
        }

        let pivot = u[(k, k)];
        for i in (k + 1)..N {
            let scale = u[(i, k)] / pivot;
            for j in (k + 1)..N {
                u[(i, j)] = u[(i, j)] - scale * u[(k, j)];
            }
            u[(i, k)] = T::zero();
            l[(i, k)] = scale;
        }
    }

    (l, u, perm, even)
}

/// Solve `L·U·x = b` (column vector following the matrix).
fn solve_follow<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    l: &Matrix<T, N, N, O, L>,
    u: &Matrix<T, N, N, O, L>,
    b: &Vector<T, N>,
) -> Vector<T, N> {
    let mut x = *b;
    // Forward substitution through unit-lower L
    for i in 0..N {
        let mut sum = x[i];
        for j in 0..i {
            sum = sum - l[(i, j)] * x[j];
        }
        x[i] = sum;
    }
    // Back substitution through U
    for i in (0..N).rev() {
        let mut sum = x[i];
        for j in (i + 1)..N {
            sum = sum - u[(i, j)] * x[j];
        }
        x[i] = sum / u[(i, i)];
    }
    x
}

/// Solve `x·L·U = b` (row vector preceding the matrix).
fn solve_precede<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    l: &Matrix<T, N, N, O, L>,
    u: &Matrix<T, N, N, O, L>,
    b: &Vector<T, N>,
) -> Vector<T, N> {
    let mut x = *b;
    // y·U = b, left to right
    for j in 0..N {
        let mut sum = x[j];
        for i in 0..j {
            sum = sum - x[i] * u[(i, j)];
        }
        x[j] = sum / u[(j, j)];
    }
    // z·L = y, right to left
    for i in (0..N).rev() {
        let mut sum = x[i];
        for j in (i + 1)..N {
            sum = sum - x[j] * l[(j, i)];
        }
        x[i] = sum;
    }
    x
}

fn diag_product<T: LinalgScalar, const N: usize, O: Order, L: Layout>(u: &Matrix<T, N, N, O, L>) -> T {
    (0..N).fold(T::one(), |d, i| d * u[(i, i)])
}

// ── LU ──────────────────────────────────────────────────────────────

/// LU decomposition without pivoting: `A = L·U`.
///
/// `l` is unit lower-triangular and `u` upper-triangular, both in the
/// conventions of the input.
///
/// # Example
///
/// ```
/// use fixmat::{Matrix, Vector};
///
/// let a = Matrix::new([[4.0_f64, 3.0], [6.0, 3.0]]);
/// let lu = a.lu();
/// assert_eq!(lu.l, Matrix::new([[1.0, 0.0], [1.5, 1.0]]));
/// assert_eq!(lu.u, Matrix::new([[4.0, 3.0], [0.0, -1.5]]));
///
/// let x = lu.solve(&Vector::from_array([10.0, 12.0]));
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuDecomposition<T: Copy, const N: usize, O: Order = FollowVector, L: Layout = ColumnMajor> {
    /// Unit lower-triangular factor.
    pub l: Matrix<T, N, N, O, L>,
    /// Upper-triangular factor.
    pub u: Matrix<T, N, N, O, L>,
}

/// Decompose a square matrix as `L·U` without pivoting.
///
/// A zero pivot propagates NaN/Inf through the factors; use
/// [`decompose_lup`] for rank-deficient or ill-conditioned input.
pub fn decompose_lu<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, N, N, O, L>,
) -> LuDecomposition<T, N, O, L> {
    let (l, u, _, _) = eliminate(a, false);
    LuDecomposition { l, u }
}

impl<T: LinalgScalar, const N: usize, O: Order, L: Layout> LuDecomposition<T, N, O, L> {
    /// Determinant, the product of the diagonal of `U`.
    pub fn det(&self) -> T {
        diag_product(&self.u)
    }

    /// Matrix inverse.
    pub fn inverse(&self) -> Matrix<T, N, N, O, L> {
        let mut inv = Matrix::zeros();
        for j in 0..N {
            let mut e = Vector::zeros();
            e[j] = T::one();
            inv.set_col(j, &solve_follow(&self.l, &self.u, &e));
        }
        inv
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> LuDecomposition<T, N, FollowVector, L> {
    /// Solve `A·x = b`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        solve_follow(&self.l, &self.u, b)
    }

    /// Solve `A·X = B` column by column.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, N, P, FollowVector, L2>,
    ) -> Matrix<T, N, P, FollowVector, L2> {
        let mut x = *b;
        for j in 0..P {
            x.set_col(j, &self.solve(&b.col(j)));
        }
        x
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> LuDecomposition<T, N, PrecedeVector, L> {
    /// Solve `x·A = b`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        solve_precede(&self.l, &self.u, b)
    }

    /// Solve `X·A = B` row by row.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, P, N, PrecedeVector, L2>,
    ) -> Matrix<T, P, N, PrecedeVector, L2> {
        let mut x = *b;
        for i in 0..P {
            x.set_row(i, &self.solve(&b.row(i)));
        }
        x
    }
}

// ── LUP ─────────────────────────────────────────────────────────────

/// LU decomposition with partial pivoting: `P·A = L·U`.
///
/// `permutation[i]` is the row of `A` that became row `i` of the factored
/// matrix.
///
/// # Example
///
/// ```
/// use fixmat::Matrix;
///
/// let a = Matrix::new([
///     [1.92_f64, 1.17, 0.85],
///     [0.78, 0.09, -1.21],
///     [3.98, 0.07, -2.92],
/// ]);
/// let lup = a.lup();
/// assert_eq!(lup.permutation, [2, 0, 1]);
///
/// let pa = lup.expand_permutation() * a;
/// let lu = lup.l * lup.u;
/// assert!((pa - lu).frobenius_norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LupDecomposition<T: Copy, const N: usize, O: Order = FollowVector, L: Layout = ColumnMajor> {
    /// Unit lower-triangular factor.
    pub l: Matrix<T, N, N, O, L>,
    /// Upper-triangular factor.
    pub u: Matrix<T, N, N, O, L>,
    /// Row permutation.
    pub permutation: [usize; N],
    even: bool,
}

/// Decompose a square matrix as `P·A = L·U` with partial pivoting.
///
/// Never divides by zero: a column without a non-zero pivot candidate is
/// skipped and leaves a zero on the diagonal of `U`.
pub fn decompose_lup<T: LinalgScalar, const N: usize, O: Order, L: Layout>(
    a: &Matrix<T, N, N, O, L>,
) -> LupDecomposition<T, N, O, L> {
    let (l, u, permutation, even) = eliminate(a, true);
    LupDecomposition {
        l,
        u,
        permutation,
        even,
    }
}

impl<T: LinalgScalar, const N: usize, O: Order, L: Layout> LupDecomposition<T, N, O, L> {
    /// `true` if a pivot was exactly zero (the input is singular).
    pub fn is_singular(&self) -> bool {
        (0..N).any(|i| self.u[(i, i)] == T::zero())
    }

    /// Determinant, including the sign of the permutation.
    pub fn det(&self) -> T {
        let d = diag_product(&self.u);
        if self.even {
            d
        } else {
            T::zero() - d
        }
    }

    /// Reorder `v` the way the rows of `A` were reordered: `out[i] = v[P[i]]`.
    pub fn permute(&self, v: &Vector<T, N>) -> Vector<T, N> {
        let mut out = *v;
        for (i, &p) in self.permutation.iter().enumerate() {
            out[i] = v[p];
        }
        out
    }

    /// Undo [`permute`](Self::permute): `out[P[i]] = v[i]`.
    pub fn inverse_permute(&self, v: &Vector<T, N>) -> Vector<T, N> {
        let mut out = *v;
        for (i, &p) in self.permutation.iter().enumerate() {
            out[p] = v[i];
        }
        out
    }

    /// Permutation matrix `P` with `P·A = L·U`.
    pub fn expand_permutation(&self) -> Matrix<T, N, N, O, L> {
        let mut p = Matrix::zeros();
        for (i, &j) in self.permutation.iter().enumerate() {
            p[(i, j)] = T::one();
        }
        p
    }

    /// Matrix inverse.
    ///
    /// Contains NaN/Inf when [`is_singular`](Self::is_singular).
    pub fn inverse(&self) -> Matrix<T, N, N, O, L> {
        let mut inv = Matrix::zeros();
        for j in 0..N {
            let mut e = Vector::zeros();
            e[j] = T::one();
            inv.set_col(j, &solve_follow(&self.l, &self.u, &self.permute(&e)));
        }
        inv
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> LupDecomposition<T, N, FollowVector, L> {
    /// Solve `A·x = b`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        solve_follow(&self.l, &self.u, &self.permute(b))
    }

    /// Solve `A·X = B` column by column.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, N, P, FollowVector, L2>,
    ) -> Matrix<T, N, P, FollowVector, L2> {
        let mut x = *b;
        for j in 0..P {
            x.set_col(j, &self.solve(&b.col(j)));
        }
        x
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> LupDecomposition<T, N, PrecedeVector, L> {
    /// Solve `x·A = b`.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        self.inverse_permute(&solve_precede(&self.l, &self.u, b))
    }

    /// Solve `X·A = B` row by row.
    pub fn solve_matrix<const P: usize, L2: Layout>(
        &self,
        b: &Matrix<T, P, N, PrecedeVector, L2>,
    ) -> Matrix<T, P, N, PrecedeVector, L2> {
        let mut x = *b;
        for i in 0..P {
            x.set_row(i, &self.solve(&b.row(i)));
        }
        x
    }
}

// ── Convenience methods on square matrices ──────────────────────────

impl<T: LinalgScalar, const N: usize, O: Order, L: Layout> Matrix<T, N, N, O, L> {
    /// LU decomposition without pivoting. See [`decompose_lu`].
    pub fn lu(&self) -> LuDecomposition<T, N, O, L> {
        decompose_lu(self)
    }

    /// LU decomposition with partial pivoting. See [`decompose_lup`].
    pub fn lup(&self) -> LupDecomposition<T, N, O, L> {
        decompose_lup(self)
    }

    /// Determinant via LUP.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let a = Matrix::new([[0.0_f64, 1.0], [2.0, 3.0]]);
    /// assert!((a.det() + 2.0).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> T {
        self.lup().det()
    }

    /// Matrix inverse via LUP.
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        let lup = self.lup();
        if lup.is_singular() {
            return Err(LinalgError::Singular);
        }
        Ok(lup.inverse())
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> Matrix<T, N, N, FollowVector, L> {
    /// Solve `A·x = b` via LUP.
    ///
    /// ```
    /// use fixmat::{Matrix, Vector};
    /// let a = Matrix::new([[2.0_f64, 1.0], [5.0, 3.0]]);
    /// let x = a.solve(&Vector::from_array([4.0, 11.0])).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>, LinalgError> {
        let lup = self.lup();
        if lup.is_singular() {
            return Err(LinalgError::Singular);
        }
        Ok(lup.solve(b))
    }
}

impl<T: LinalgScalar, const N: usize, L: Layout> Matrix<T, N, N, PrecedeVector, L> {
    /// Solve `x·A = b` via LUP.
    pub fn solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>, LinalgError> {
        let lup = self.lup();
        if lup.is_singular() {
            return Err(LinalgError::Singular);
        }
        Ok(lup.solve(b))
    }
}
