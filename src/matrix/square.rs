use crate::layout::{Layout, Order};
use crate::matrix::vector::Vector;
use crate::traits::{LinalgScalar, Scalar};
use crate::Matrix;

impl<T: Scalar, const N: usize, O: Order, L: Layout> Matrix<T, N, N, O, L> {
    /// Sum of diagonal elements.
    pub fn trace(&self) -> T {
        (0..N).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }

    /// Extract the diagonal.
    pub fn diag(&self) -> Vector<T, N> {
        let mut v = Vector::zeros();
        for i in 0..N {
            v[i] = self[(i, i)];
        }
        v
    }

    /// Diagonal matrix from a vector.
    ///
    /// ```
    /// use fixmat::{Matrix, Vector};
    /// let d: Matrix<f64, 2, 2> = Matrix::from_diag(&Vector::from_array([2.0, 3.0]));
    /// assert_eq!(d, Matrix::new([[2.0, 0.0], [0.0, 3.0]]));
    /// ```
    pub fn from_diag(v: &Vector<T, N>) -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m[(i, i)] = v[i];
        }
        m
    }

    /// Check if the matrix is symmetric (A == Aᵀ).
    pub fn is_symmetric(&self) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: LinalgScalar, const N: usize, O: Order, L: Layout> Matrix<T, N, N, O, L> {
    /// Check if the matrix equals its conjugate transpose exactly.
    pub fn is_hermitian(&self) -> bool {
        for i in 0..N {
            for j in i..N {
                if self[(i, j)] != self[(j, i)].conj() {
                    return false;
                }
            }
        }
        true
    }
}
