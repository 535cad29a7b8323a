use num_traits::{Float, Zero};

use crate::layout::{Layout, Order};
use crate::traits::{LinalgScalar, Scalar};
use crate::Matrix;

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Sum of all elements squared, without conjugation. Works with integers.
    pub fn sum_of_squares(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x * x)
    }
}

impl<T: LinalgScalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Squared Frobenius norm `Σ |aᵢⱼ|²`.
    pub fn frobenius_norm_squared(&self) -> T::Real {
        self.iter()
            .fold(T::Real::zero(), |acc, &x| acc + x.modulus_squared())
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> T::Real {
        self.frobenius_norm_squared().sqrt()
    }

    /// Largest element modulus.
    pub fn max_modulus(&self) -> T::Real {
        self.iter().fold(T::Real::zero(), |acc, &x| {
            let m = x.modulus();
            if m > acc {
                m
            } else {
                acc
            }
        })
    }

    /// Infinity norm (maximum absolute row sum).
    pub fn norm_inf(&self) -> T::Real {
        let mut max = T::Real::zero();
        for i in 0..M {
            let mut row_sum = T::Real::zero();
            for j in 0..N {
                row_sum = row_sum + self[(i, j)].modulus();
            }
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// One norm (maximum absolute column sum).
    pub fn norm_one(&self) -> T::Real {
        let mut max = T::Real::zero();
        for j in 0..N {
            let mut col_sum = T::Real::zero();
            for i in 0..M {
                col_sum = col_sum + self[(i, j)].modulus();
            }
            if col_sum > max {
                max = col_sum;
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{PrecedeVector, RowMajor};
    use crate::Matrix;

    #[test]
    fn frobenius_norm() {
        let m = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0]]);
        assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.frobenius_norm_squared(), 30.0);
    }

    #[test]
    fn sum_of_squares_integer() {
        let m = Matrix::new([[1, 2], [3, 4]]);
        assert_eq!(m.sum_of_squares(), 30);
    }

    #[test]
    fn max_modulus() {
        let m = Matrix::new([[1.0_f64, -7.0], [3.0, 4.0]]);
        assert_eq!(m.max_modulus(), 7.0);
    }

    #[test]
    fn norm_inf_and_one_ignore_layout() {
        let rows = [[1.0_f64, -2.0], [3.0, 4.0]];
        let a = Matrix::new(rows);
        let b = Matrix::<f64, 2, 2, PrecedeVector, RowMajor>::from_rows(rows);
        // row sums 3, 7; column sums 4, 6
        assert_eq!(a.norm_inf(), 7.0);
        assert_eq!(b.norm_inf(), 7.0);
        assert_eq!(a.norm_one(), 6.0);
        assert_eq!(b.norm_one(), 6.0);
    }
}
