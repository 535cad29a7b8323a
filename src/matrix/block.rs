use crate::layout::{Layout, Order};
use crate::traits::Scalar;
use crate::Matrix;

// ── Block extraction & insertion ────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Extract a P×Q sub-matrix starting at position `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    /// let b: Matrix<f64, 2, 2> = m.submatrix(1, 1);
    /// assert_eq!(b, Matrix::new([[5.0, 6.0], [8.0, 9.0]]));
    /// ```
    pub fn submatrix<const P: usize, const Q: usize>(&self, i: usize, j: usize) -> Matrix<T, P, Q, O, L> {
        assert!(
            i + P <= M && j + Q <= N,
            "submatrix ({i},{j}) size {P}×{Q} out of bounds for {M}×{N} matrix"
        );
        Matrix::from_fn(|r, c| self[(i + r, j + c)])
    }

    /// Write a P×Q sub-matrix into self starting at position `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn set_submatrix<const P: usize, const Q: usize, L2: Layout>(
        &mut self,
        i: usize,
        j: usize,
        src: &Matrix<T, P, Q, O, L2>,
    ) {
        assert!(
            i + P <= M && j + Q <= N,
            "set_submatrix ({i},{j}) size {P}×{Q} out of bounds for {M}×{N} matrix"
        );
        for r in 0..P {
            for c in 0..Q {
                self[(i + r, j + c)] = src[(r, c)];
            }
        }
    }

    /// Copy into a P×Q matrix: the overlapping top-left block is kept and the
    /// rest is zero.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// let g: Matrix<f64, 3, 2> = m.resize();
    /// assert_eq!(g, Matrix::new([[1.0, 2.0], [3.0, 4.0], [0.0, 0.0]]));
    /// let s: Matrix<f64, 1, 2> = m.resize();
    /// assert_eq!(s, Matrix::new([[1.0, 2.0]]));
    /// ```
    pub fn resize<const P: usize, const Q: usize>(&self) -> Matrix<T, P, Q, O, L> {
        let mut out = Matrix::zeros();
        for r in 0..P.min(M) {
            for c in 0..Q.min(N) {
                out[(r, c)] = self[(r, c)];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{PrecedeVector, RowMajor};
    use crate::Matrix;

    #[test]
    fn submatrix_keeps_conventions() {
        let m = Matrix::<i32, 3, 3, PrecedeVector, RowMajor>::from_fn(|i, j| (3 * i + j) as i32);
        let b: Matrix<i32, 2, 3, PrecedeVector, RowMajor> = m.submatrix(1, 0);
        assert_eq!(b.as_slice(), &[3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn set_submatrix_across_layouts() {
        let mut m: Matrix<i32, 3, 3> = Matrix::zeros();
        let patch = Matrix::<i32, 2, 2, _, RowMajor>::from_rows([[1, 2], [3, 4]]);
        m.set_submatrix(1, 1, &patch);
        assert_eq!(m, Matrix::new([[0, 0, 0], [0, 1, 2], [0, 3, 4]]));
    }

    #[test]
    #[should_panic]
    fn submatrix_out_of_bounds() {
        let m: Matrix<f64, 3, 3> = Matrix::zeros();
        let _: Matrix<f64, 2, 2> = m.submatrix(2, 0);
    }

    #[test]
    fn resize_wide_to_tall() {
        let m = Matrix::new([[1, 2, 3]]);
        let t: Matrix<i32, 3, 1> = m.resize();
        assert_eq!(t, Matrix::new([[1], [0], [0]]));
    }
}
