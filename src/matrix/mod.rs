pub mod aliases;
mod block;
mod norm;
mod ops;
mod slice;
mod square;
mod util;
pub mod vector;

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::layout::{ColumnMajor, FollowVector, Layout, Order};
use crate::traits::{LinalgScalar, Scalar};

/// Fixed-size matrix with `M` rows and `N` columns.
///
/// `O` is the multiplication convention ([`FollowVector`] for `M·v`,
/// [`PrecedeVector`](crate::PrecedeVector) for `v·M`) and `L` the storage
/// layout ([`ColumnMajor`] or [`RowMajor`](crate::RowMajor)). Element `(i, j)`
/// is addressed the same way under every layout.
/// Stack-allocated, no-std compatible.
///
/// # Examples
///
/// ```
/// use fixmat::Matrix;
///
/// let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b: Matrix<f64, 3, 3> = Matrix::eye();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
pub struct Matrix<T: Copy, const M: usize, const N: usize, O: Order = FollowVector, L: Layout = ColumnMajor> {
    pub(crate) data: L::Storage<T, M, N>,
    order: PhantomData<O>,
}

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    #[inline]
    pub(crate) fn from_storage(data: L::Storage<T, M, N>) -> Self {
        Self {
            data,
            order: PhantomData,
        }
    }

    /// Number of rows.
    #[inline]
    pub const fn nrows(&self) -> usize {
        M
    }

    /// Number of columns.
    #[inline]
    pub const fn ncols(&self) -> usize {
        N
    }

    /// Zero-copy reinterpretation as the transpose under the flipped
    /// conventions.
    ///
    /// `a.flip()[(j, i)] == a[(i, j)]`, and since both the order and the layout
    /// flip, the result describes the same linear map: `a * v` and
    /// `v * a.flip()` agree.
    #[inline]
    pub fn flip(self) -> Matrix<T, N, M, O::Flip, L::Flip> {
        Matrix::from_storage(L::flip::<T, M, N>(self.data))
    }
}

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix from a row-major 2D array, with the default
    /// conventions (`FollowVector`, `ColumnMajor`).
    ///
    /// The input is `[[row0], [row1], ...]` (M arrays of N elements each).
    /// Use [`Matrix::from_rows`] for other conventions.
    #[inline]
    pub fn new(rows: [[T; N]; M]) -> Self {
        Self::from_rows(rows)
    }
}

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Create a matrix from a row-major 2D array, under any convention.
    ///
    /// ```
    /// use fixmat::{Matrix, PrecedeVector, RowMajor};
    /// let m = Matrix::<f64, 2, 2, PrecedeVector, RowMajor>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(rows: [[T; N]; M]) -> Self {
        let mut out = Self::zeros();
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        out
    }

    /// Create a matrix from an array of columns.
    pub fn from_cols(cols: [[T; M]; N]) -> Self {
        let mut out = Self::zeros();
        for (j, col) in cols.iter().enumerate() {
            for (i, &v) in col.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        out
    }

    /// Create a matrix filled with zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::fill(T::zero())
    }

    /// Create a matrix with every element set to `value`.
    #[inline]
    pub fn fill(value: T) -> Self {
        Self::from_storage(L::filled::<T, M, N>(value))
    }

    /// Copy into another storage layout, keeping the convention.
    ///
    /// ```
    /// use fixmat::{Matrix, RowMajor};
    /// let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// let b = a.to_layout::<RowMajor>();
    /// assert_eq!(b.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(a.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn to_layout<L2: Layout>(&self) -> Matrix<T, M, N, O, L2> {
        Matrix::from_fn(|i, j| self[(i, j)])
    }
}

impl<T: Scalar, const N: usize, O: Order, L: Layout> Matrix<T, N, N, O, L> {
    /// Create an identity matrix (square matrices only).
    pub fn eye() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m[(i, i)] = T::one();
        }
        m
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Conjugate transpose `Aᴴ` (plain transpose for reals).
    pub fn adjoint(&self) -> Matrix<T, N, M, O, L> {
        Matrix::from_fn(|i, j| self[(j, i)].conj())
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Self {
        Matrix::from_fn(|i, j| self[(i, j)].conj())
    }
}

// ── Value semantics ─────────────────────────────────────────────────

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Clone for Matrix<T, M, N, O, L> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Copy for Matrix<T, M, N, O, L> {}

impl<T: Copy + PartialEq, const M: usize, const N: usize, O: Order, L: Layout> PartialEq
    for Matrix<T, M, N, O, L>
{
    fn eq(&self, other: &Self) -> bool {
        L::flatten::<T, M, N>(&self.data) == L::flatten::<T, M, N>(&other.data)
    }
}

/// One row, for `Debug` output without allocating.
struct RowDebug<'a, T: Copy, const M: usize, const N: usize, O: Order, L: Layout>(
    &'a Matrix<T, M, N, O, L>,
    usize,
);

impl<T: Copy + fmt::Debug, const M: usize, const N: usize, O: Order, L: Layout> fmt::Debug
    for RowDebug<'_, T, M, N, O, L>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..N).map(|j| &self.0[(self.1, j)]))
            .finish()
    }
}

impl<T: Copy + fmt::Debug, const M: usize, const N: usize, O: Order, L: Layout> fmt::Debug
    for Matrix<T, M, N, O, L>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matrix")?;
        f.debug_list()
            .entries((0..M).map(|i| RowDebug(self, i)))
            .finish()
    }
}

// Index by (row, col) tuple
impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Index<(usize, usize)>
    for Matrix<T, M, N, O, L>
{
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        L::at::<T, M, N>(&self.data, row, col)
    }
}

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> IndexMut<(usize, usize)>
    for Matrix<T, M, N, O, L>
{
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        L::at_mut::<T, M, N>(&mut self.data, row, col)
    }
}

pub use aliases::*;
