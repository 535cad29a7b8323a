use crate::layout::{Layout, Order};
use crate::Matrix;

// ── Slice access ────────────────────────────────────────────────────
// Storage is a sequence of contiguous stripes: columns for ColumnMajor,
// rows for RowMajor.

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// View the entire matrix as a flat slice in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        L::flatten::<T, M, N>(&self.data)
    }

    /// View the entire matrix as a mutable flat slice in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        L::flatten_mut::<T, M, N>(&mut self.data)
    }

    /// Number of stripes: `N` for column-major, `M` for row-major.
    #[inline]
    pub fn stripe_count(&self) -> usize {
        L::stripe_count::<M, N>()
    }

    /// Length of one stripe: `M` for column-major, `N` for row-major.
    #[inline]
    pub fn stripe_len(&self) -> usize {
        L::stripe_len::<M, N>()
    }

    /// Stripe `i` as a contiguous slice.
    ///
    /// ```
    /// use fixmat::{Matrix, FollowVector, RowMajor};
    /// let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.stripe(1), &[2.0, 4.0]);
    ///
    /// let r = Matrix::<f64, 2, 2, FollowVector, RowMajor>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(r.stripe(1), &[3.0, 4.0]);
    /// ```
    #[inline]
    pub fn stripe(&self, i: usize) -> &[T] {
        L::stripe::<T, M, N>(&self.data, i)
    }

    /// Stripe `i` as a mutable contiguous slice.
    #[inline]
    pub fn stripe_mut(&mut self, i: usize) -> &mut [T] {
        L::stripe_mut::<T, M, N>(&mut self.data, i)
    }

    /// Iterate over all elements in storage order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable iterator over all elements in storage order.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterate over stripes.
    pub fn iter_stripes(&self) -> impl Iterator<Item = &[T]> {
        (0..self.stripe_count()).map(move |i| self.stripe(i))
    }
}

impl<'a, T: Copy, const M: usize, const N: usize, O: Order, L: Layout> IntoIterator
    for &'a Matrix<T, M, N, O, L>
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
