//! Storage layout and multiplication-order conventions.
//!
//! Both are zero-sized tag types resolved at compile time. A [`Layout`] owns
//! the physical storage of a matrix and exposes it one *stripe* at a time: a
//! column for [`ColumnMajor`], a row for [`RowMajor`]. An [`Order`] records
//! whether a vector is a column vector that follows the matrix (`M·v`,
//! [`FollowVector`]) or a row vector that precedes it (`v·M`,
//! [`PrecedeVector`]).
//!
//! Every layout and order has a `Flip` partner. Flipping both at once while
//! swapping the dimensions reinterprets the same bytes as the transpose, which
//! keeps the meaning of a transform intact:
//!
//! ```
//! use fixmat::{Matrix, PrecedeVector, RowMajor};
//!
//! let a = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
//! let f: Matrix<f64, 3, 2, PrecedeVector, RowMajor> = a.flip();
//! assert_eq!(f[(2, 1)], 6.0);
//! assert_eq!(a.as_slice(), f.as_slice());
//! ```

use core::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Physical storage convention of a matrix.
///
/// Closed set: implemented by [`ColumnMajor`] and [`RowMajor`] only.
pub trait Layout: sealed::Sealed + Copy + Default + Debug + PartialEq + Eq + 'static {
    /// The other layout.
    type Flip: Layout<Flip = Self>;

    /// `true` if stripes are rows.
    const ROW_MAJOR: bool;

    /// Backing array of an `M×N` matrix.
    type Storage<T: Copy, const M: usize, const N: usize>: Copy;

    /// Storage with every element set to `value`.
    fn filled<T: Copy, const M: usize, const N: usize>(value: T) -> Self::Storage<T, M, N>;

    /// Element at `(row, col)`.
    fn at<T: Copy, const M: usize, const N: usize>(
        s: &Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &T;

    /// Mutable element at `(row, col)`.
    fn at_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &mut T;

    /// Number of stripes in an `M×N` matrix.
    fn stripe_count<const M: usize, const N: usize>() -> usize;

    /// Length of each stripe in an `M×N` matrix.
    fn stripe_len<const M: usize, const N: usize>() -> usize;

    /// Contiguous stripe `i`.
    fn stripe<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>, i: usize) -> &[T];

    /// Mutable contiguous stripe `i`.
    fn stripe_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        i: usize,
    ) -> &mut [T];

    /// All elements in storage order.
    fn flatten<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>) -> &[T];

    /// All elements in storage order, mutably.
    fn flatten_mut<T: Copy, const M: usize, const N: usize>(s: &mut Self::Storage<T, M, N>) -> &mut [T];

    /// Reinterpret `M×N` storage as `N×M` storage of the flipped layout.
    ///
    /// The array is moved unchanged: stripes of one layout are the stripes of
    /// the other, so element `(i, j)` becomes element `(j, i)`.
    fn flip<T: Copy, const M: usize, const N: usize>(
        s: Self::Storage<T, M, N>,
    ) -> <Self::Flip as Layout>::Storage<T, N, M>;
}

/// Column-major storage: `data[col][row]`, stripes are columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

/// Row-major storage: `data[row][col]`, stripes are rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

impl sealed::Sealed for ColumnMajor {}
impl sealed::Sealed for RowMajor {}

impl Layout for ColumnMajor {
    type Flip = RowMajor;
    const ROW_MAJOR: bool = false;

    type Storage<T: Copy, const M: usize, const N: usize> = [[T; M]; N];

    #[inline]
    fn filled<T: Copy, const M: usize, const N: usize>(value: T) -> Self::Storage<T, M, N> {
        [[value; M]; N]
    }

    #[inline]
    fn at<T: Copy, const M: usize, const N: usize>(
        s: &Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &T {
        &s[col][row]
    }

    #[inline]
    fn at_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &mut T {
        &mut s[col][row]
    }

    #[inline]
    fn stripe_count<const M: usize, const N: usize>() -> usize {
        N
    }

    #[inline]
    fn stripe_len<const M: usize, const N: usize>() -> usize {
        M
    }

    #[inline]
    fn stripe<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>, i: usize) -> &[T] {
        &s[i]
    }

    #[inline]
    fn stripe_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        i: usize,
    ) -> &mut [T] {
        &mut s[i]
    }

    #[inline]
    fn flatten<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>) -> &[T] {
        s.as_flattened()
    }

    #[inline]
    fn flatten_mut<T: Copy, const M: usize, const N: usize>(s: &mut Self::Storage<T, M, N>) -> &mut [T] {
        s.as_flattened_mut()
    }

    #[inline]
    fn flip<T: Copy, const M: usize, const N: usize>(
        s: Self::Storage<T, M, N>,
    ) -> <Self::Flip as Layout>::Storage<T, N, M> {
        s
    }
}

impl Layout for RowMajor {
    type Flip = ColumnMajor;
    const ROW_MAJOR: bool = true;

    type Storage<T: Copy, const M: usize, const N: usize> = [[T; N]; M];

    #[inline]
    fn filled<T: Copy, const M: usize, const N: usize>(value: T) -> Self::Storage<T, M, N> {
        [[value; N]; M]
    }

    #[inline]
    fn at<T: Copy, const M: usize, const N: usize>(
        s: &Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &T {
        &s[row][col]
    }

    #[inline]
    fn at_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        row: usize,
        col: usize,
    ) -> &mut T {
        &mut s[row][col]
    }

    #[inline]
    fn stripe_count<const M: usize, const N: usize>() -> usize {
        M
    }

    #[inline]
    fn stripe_len<const M: usize, const N: usize>() -> usize {
        N
    }

    #[inline]
    fn stripe<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>, i: usize) -> &[T] {
        &s[i]
    }

    #[inline]
    fn stripe_mut<T: Copy, const M: usize, const N: usize>(
        s: &mut Self::Storage<T, M, N>,
        i: usize,
    ) -> &mut [T] {
        &mut s[i]
    }

    #[inline]
    fn flatten<T: Copy, const M: usize, const N: usize>(s: &Self::Storage<T, M, N>) -> &[T] {
        s.as_flattened()
    }

    #[inline]
    fn flatten_mut<T: Copy, const M: usize, const N: usize>(s: &mut Self::Storage<T, M, N>) -> &mut [T] {
        s.as_flattened_mut()
    }

    #[inline]
    fn flip<T: Copy, const M: usize, const N: usize>(
        s: Self::Storage<T, M, N>,
    ) -> <Self::Flip as Layout>::Storage<T, N, M> {
        s
    }
}

/// Matrix/vector multiplication convention.
///
/// Closed set: implemented by [`FollowVector`] and [`PrecedeVector`] only.
pub trait Order: sealed::Sealed + Copy + Default + Debug + PartialEq + Eq + 'static {
    /// The other convention.
    type Flip: Order<Flip = Self>;

    /// `true` for column vectors multiplied as `M·v`.
    const FOLLOWS_VECTOR: bool;
}

/// Column vectors follow the matrix: `y = M·x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FollowVector;

/// Row vectors precede the matrix: `y = x·M`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PrecedeVector;

impl sealed::Sealed for FollowVector {}
impl sealed::Sealed for PrecedeVector {}

impl Order for FollowVector {
    type Flip = PrecedeVector;
    const FOLLOWS_VECTOR: bool = true;
}

impl Order for PrecedeVector {
    type Flip = FollowVector;
    const FOLLOWS_VECTOR: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_stripes_are_columns() {
        let mut s = ColumnMajor::filled::<f64, 2, 3>(0.0);
        *ColumnMajor::at_mut::<f64, 2, 3>(&mut s, 1, 2) = 7.0;
        assert_eq!(ColumnMajor::stripe::<f64, 2, 3>(&s, 2), &[0.0, 7.0]);
        assert_eq!(ColumnMajor::stripe_count::<2, 3>(), 3);
        assert_eq!(ColumnMajor::stripe_len::<2, 3>(), 2);
        assert_eq!(ColumnMajor::flatten::<f64, 2, 3>(&s)[5], 7.0);
    }

    #[test]
    fn row_major_stripes_are_rows() {
        let mut s = RowMajor::filled::<f64, 2, 3>(0.0);
        *RowMajor::at_mut::<f64, 2, 3>(&mut s, 1, 2) = 7.0;
        assert_eq!(RowMajor::stripe::<f64, 2, 3>(&s, 1), &[0.0, 0.0, 7.0]);
        assert_eq!(RowMajor::stripe_count::<2, 3>(), 2);
        assert_eq!(RowMajor::stripe_len::<2, 3>(), 3);
    }

    #[test]
    fn flip_transposes_indices() {
        let mut s = ColumnMajor::filled::<i32, 2, 3>(0);
        for i in 0..2 {
            for j in 0..3 {
                *ColumnMajor::at_mut::<i32, 2, 3>(&mut s, i, j) = (10 * i + j) as i32;
            }
        }
        let f = ColumnMajor::flip::<i32, 2, 3>(s);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(*RowMajor::at::<i32, 3, 2>(&f, j, i), (10 * i + j) as i32);
            }
        }
    }

    #[test]
    fn flip_partners() {
        assert!(!<ColumnMajor as Layout>::ROW_MAJOR);
        assert!(<<ColumnMajor as Layout>::Flip as Layout>::ROW_MAJOR);
        assert!(FollowVector::FOLLOWS_VECTOR);
        assert!(!<<FollowVector as Order>::Flip as Order>::FOLLOWS_VECTOR);
    }
}
