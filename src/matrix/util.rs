use core::fmt::{self, Write as _};

use crate::layout::{Layout, Order};
use crate::matrix::vector::Vector;
use crate::traits::Scalar;
use crate::Matrix;

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m: Matrix<f64, 3, 3> = Matrix::from_fn(|i, j| {
    ///     if i == j { 1.0 } else { 0.0 }
    /// });
    /// assert_eq!(m, Matrix::eye());
    /// ```
    pub fn from_fn(f: impl Fn(usize, usize) -> T) -> Self {
        let mut out = Self::zeros();
        for i in 0..M {
            for j in 0..N {
                out[(i, j)] = f(i, j);
            }
        }
        out
    }

    /// Apply a function to every element, producing a new matrix with the
    /// same conventions.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0_f64, 4.0], [9.0, 16.0]]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Matrix<U, M, N, O, L> {
        Matrix::from_fn(|i, j| f(self[(i, j)]))
    }

    /// Copy with rows and columns exchanged, keeping the conventions.
    ///
    /// Unlike [`flip`](Matrix::flip) this moves data and describes the
    /// transposed linear map.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// let t: Matrix<f64, 3, 2> = m.transpose();
    /// assert_eq!(t[(2, 0)], 3.0);
    /// ```
    pub fn transpose(&self) -> Matrix<T, N, M, O, L> {
        Matrix::from_fn(|i, j| self[(j, i)])
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x)
    }
}

// ── Row / Column access ─────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Extract row `i`.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.row(0).as_slice(), &[1.0, 2.0]);
    /// ```
    pub fn row(&self, i: usize) -> Vector<T, N> {
        let mut v = Vector::zeros();
        for j in 0..N {
            v[j] = self[(i, j)];
        }
        v
    }

    /// Set row `i`.
    pub fn set_row(&mut self, i: usize, v: &Vector<T, N>) {
        for j in 0..N {
            self[(i, j)] = v[j];
        }
    }

    /// Extract column `j`.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.col(1).as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn col(&self, j: usize) -> Vector<T, M> {
        let mut v = Vector::zeros();
        for i in 0..M {
            v[i] = self[(i, j)];
        }
        v
    }

    /// Set column `j`.
    pub fn set_col(&mut self, j: usize, v: &Vector<T, M>) {
        for i in 0..M {
            self[(i, j)] = v[i];
        }
    }
}

impl<T: Copy, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let mut m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..N {
            let tmp = self[(a, j)];
            self[(a, j)] = self[(b, j)];
            self[(b, j)] = tmp;
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for i in 0..M {
            let tmp = self[(i, a)];
            self[(i, a)] = self[(i, b)];
            self[(i, b)] = tmp;
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: Copy + fmt::Display, const M: usize, const N: usize, O: Order, L: Layout> fmt::Display
    for Matrix<T, M, N, O, L>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Find max width per column for alignment
        let mut widths = [0usize; N];
        for (j, w) in widths.iter_mut().enumerate() {
            for i in 0..M {
                *w = (*w).max(WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)])));
            }
        }

        for i in 0..M {
            f.write_str("│")?;
            for (j, &width) in widths.iter().enumerate() {
                if j > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)])?;
            }
            f.write_str("│")?;
            if i + 1 < M {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Counts characters written, without allocating.
struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PrecedeVector, RowMajor};

    #[test]
    fn from_fn_any_layout() {
        let m: Matrix<i32, 2, 3, PrecedeVector, RowMajor> = Matrix::from_fn(|i, j| (10 * i + j) as i32);
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn map_type_change() {
        let m = Matrix::new([[1.5_f64, 2.0], [3.0, 4.0]]);
        let rounded = m.map(|x| x as i32);
        assert_eq!(rounded[(0, 0)], 1);
        assert_eq!(rounded[(1, 1)], 4);
    }

    #[test]
    fn transpose_keeps_conventions() {
        let m = Matrix::<f64, 2, 3, PrecedeVector, RowMajor>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t: Matrix<f64, 3, 2, PrecedeVector, RowMajor> = m.transpose();
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn row_col_access() {
        let mut m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.row(1), Vector::from_array([4.0, 5.0, 6.0]));
        assert_eq!(m.col(2), Vector::from_array([3.0, 6.0]));

        m.set_row(0, &Vector::from_array([7.0, 8.0, 9.0]));
        m.set_col(1, &Vector::from_array([0.0, 0.0]));
        assert_eq!(m, Matrix::new([[7.0, 0.0, 9.0], [4.0, 0.0, 6.0]]));
    }

    #[test]
    fn swap_rows_and_cols() {
        let mut m = Matrix::<i32, 2, 2, PrecedeVector, RowMajor>::from_rows([[1, 2], [3, 4]]);
        m.swap_rows(0, 1);
        assert_eq!(m.as_slice(), &[3, 4, 1, 2]);
        m.swap_cols(0, 1);
        assert_eq!(m.as_slice(), &[4, 3, 2, 1]);
        m.swap_cols(1, 1);
        assert_eq!(m.as_slice(), &[4, 3, 2, 1]);
    }

    #[test]
    fn sum() {
        assert_eq!(Matrix::new([[1, 2], [3, 4]]).sum(), 10);
    }

    #[test]
    fn display_aligns_columns() {
        let m = Matrix::new([[1.0, -20.5], [300.0, 4.0]]);
        let s = format!("{}", m);
        assert_eq!(s, "│  1  -20.5│\n│300      4│");
    }
}
