use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::layout::{FollowVector, Layout, Order, PrecedeVector};
use crate::matrix::vector::Vector;
use crate::traits::Scalar;
use crate::Matrix;

// ── Element-wise addition and subtraction ───────────────────────────

macro_rules! elementwise_binop {
    ($Op:ident, $method:ident, $OpAssign:ident, $assign:ident, $op:tt) => {
        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> $Op
            for Matrix<T, M, N, O, L>
        {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                let mut out = self;
                let dst = L::flatten_mut::<T, M, N>(&mut out.data);
                let src = L::flatten::<T, M, N>(&rhs.data);
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = *d $op s;
                }
                out
            }
        }

        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> $OpAssign
            for Matrix<T, M, N, O, L>
        {
            fn $assign(&mut self, rhs: Self) {
                *self = (*self).$method(rhs);
            }
        }

        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout>
            $OpAssign<&Matrix<T, M, N, O, L>> for Matrix<T, M, N, O, L>
        {
            fn $assign(&mut self, rhs: &Matrix<T, M, N, O, L>) {
                *self = (*self).$method(*rhs);
            }
        }

        // Matrix is Copy, so &Matrix ops just deref and delegate.
        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout>
            $Op<Matrix<T, M, N, O, L>> for &Matrix<T, M, N, O, L>
        {
            type Output = Matrix<T, M, N, O, L>;
            fn $method(self, rhs: Matrix<T, M, N, O, L>) -> Matrix<T, M, N, O, L> {
                (*self).$method(rhs)
            }
        }

        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout>
            $Op<&Matrix<T, M, N, O, L>> for Matrix<T, M, N, O, L>
        {
            type Output = Matrix<T, M, N, O, L>;
            fn $method(self, rhs: &Matrix<T, M, N, O, L>) -> Matrix<T, M, N, O, L> {
                self.$method(*rhs)
            }
        }

        impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout>
            $Op<&Matrix<T, M, N, O, L>> for &Matrix<T, M, N, O, L>
        {
            type Output = Matrix<T, M, N, O, L>;
            fn $method(self, rhs: &Matrix<T, M, N, O, L>) -> Matrix<T, M, N, O, L> {
                (*self).$method(*rhs)
            }
        }
    };
}

elementwise_binop!(Add, add, AddAssign, add_assign, +);
elementwise_binop!(Sub, sub, SubAssign, sub_assign, -);

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Neg for Matrix<T, M, N, O, L> {
    type Output = Self;

    fn neg(self) -> Self {
        let mut out = self;
        for x in L::flatten_mut::<T, M, N>(&mut out.data) {
            *x = T::zero() - *x;
        }
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Neg for &Matrix<T, M, N, O, L> {
    type Output = Matrix<T, M, N, O, L>;

    fn neg(self) -> Matrix<T, M, N, O, L> {
        (*self).neg()
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────
// The right operand may use either layout; the product keeps the left one.

impl<T, const M: usize, const N: usize, const P: usize, O, L, L2> Mul<Matrix<T, N, P, O, L2>>
    for Matrix<T, M, N, O, L>
where
    T: Scalar,
    O: Order,
    L: Layout,
    L2: Layout,
{
    type Output = Matrix<T, M, P, O, L>;

    fn mul(self, rhs: Matrix<T, N, P, O, L2>) -> Matrix<T, M, P, O, L> {
        let mut out = Matrix::<T, M, P, O, L>::zeros();
        for i in 0..M {
            for j in 0..P {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = sum;
            }
        }
        out
    }
}

impl<T, const M: usize, const N: usize, const P: usize, O, L, L2> Mul<&Matrix<T, N, P, O, L2>>
    for &Matrix<T, M, N, O, L>
where
    T: Scalar,
    O: Order,
    L: Layout,
    L2: Layout,
{
    type Output = Matrix<T, M, P, O, L>;

    fn mul(self, rhs: &Matrix<T, N, P, O, L2>) -> Matrix<T, M, P, O, L> {
        (*self).mul(*rhs)
    }
}

impl<T, const M: usize, const N: usize, const P: usize, O, L, L2> Mul<&Matrix<T, N, P, O, L2>>
    for Matrix<T, M, N, O, L>
where
    T: Scalar,
    O: Order,
    L: Layout,
    L2: Layout,
{
    type Output = Matrix<T, M, P, O, L>;

    fn mul(self, rhs: &Matrix<T, N, P, O, L2>) -> Matrix<T, M, P, O, L> {
        self.mul(*rhs)
    }
}

// ── Matrix-vector products ──────────────────────────────────────────
// A vector follows a FollowVector matrix and precedes a PrecedeVector one.

impl<T: Scalar, const M: usize, const N: usize, L: Layout> Mul<Vector<T, N>>
    for Matrix<T, M, N, FollowVector, L>
{
    type Output = Vector<T, M>;

    fn mul(self, rhs: Vector<T, N>) -> Vector<T, M> {
        let mut out = Vector::<T, M>::zeros();
        for i in 0..M {
            let mut sum = T::zero();
            for k in 0..N {
                sum = sum + self[(i, k)] * rhs[k];
            }
            out[i] = sum;
        }
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, L: Layout> Mul<&Vector<T, N>>
    for &Matrix<T, M, N, FollowVector, L>
{
    type Output = Vector<T, M>;

    fn mul(self, rhs: &Vector<T, N>) -> Vector<T, M> {
        (*self).mul(*rhs)
    }
}

impl<T: Scalar, const M: usize, const N: usize, L: Layout> Mul<Matrix<T, M, N, PrecedeVector, L>>
    for Vector<T, M>
{
    type Output = Vector<T, N>;

    fn mul(self, rhs: Matrix<T, M, N, PrecedeVector, L>) -> Vector<T, N> {
        let mut out = Vector::<T, N>::zeros();
        for j in 0..N {
            let mut sum = T::zero();
            for k in 0..M {
                sum = sum + self[k] * rhs[(k, j)];
            }
            out[j] = sum;
        }
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, L: Layout> Mul<&Matrix<T, M, N, PrecedeVector, L>>
    for &Vector<T, M>
{
    type Output = Vector<T, N>;

    fn mul(self, rhs: &Matrix<T, M, N, PrecedeVector, L>) -> Vector<T, N> {
        (*self).mul(*rhs)
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Mul<T> for Matrix<T, M, N, O, L> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        out *= rhs;
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> MulAssign<T>
    for Matrix<T, M, N, O, L>
{
    fn mul_assign(&mut self, rhs: T) {
        for x in L::flatten_mut::<T, M, N>(&mut self.data) {
            *x = *x * rhs;
        }
    }
}

// scalar * matrix and scalar * vector for primitive floats
macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl<const M: usize, const N: usize, O: Order, L: Layout> Mul<Matrix<$t, M, N, O, L>> for $t {
                type Output = Matrix<$t, M, N, O, L>;

                fn mul(self, rhs: Matrix<$t, M, N, O, L>) -> Matrix<$t, M, N, O, L> {
                    rhs * self
                }
            }

            impl<const N: usize> Mul<Vector<$t, N>> for $t {
                type Output = Vector<$t, N>;

                fn mul(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64);

// ── Element-wise product ────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize, O: Order, L: Layout> Matrix<T, M, N, O, L> {
    /// Element-wise (Hadamard) product.
    ///
    /// ```
    /// use fixmat::Matrix;
    /// let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// let b = Matrix::new([[5.0, 6.0], [7.0, 8.0]]);
    /// assert_eq!(a.element_mul(&b), Matrix::new([[5.0, 12.0], [21.0, 32.0]]));
    /// ```
    pub fn element_mul(&self, rhs: &Self) -> Self {
        let mut out = *self;
        let dst = L::flatten_mut::<T, M, N>(&mut out.data);
        for (d, &s) in dst.iter_mut().zip(L::flatten::<T, M, N>(&rhs.data)) {
            *d = *d * s;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ColumnMajor, RowMajor};

    #[test]
    fn add_sub_neg() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::new([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(a + b, Matrix::new([[6.0, 8.0], [10.0, 12.0]]));
        assert_eq!(b - a, Matrix::fill(4.0));
        assert_eq!(-a, Matrix::new([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(&a + &b, a + b);

        let mut c = a;
        c += b;
        c -= &a;
        assert_eq!(c, b);
    }

    #[test]
    fn mul_mixed_layouts() {
        let a = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<f64, 3, 2, FollowVector, RowMajor>::from_rows([
            [7.0, 8.0],
            [9.0, 10.0],
            [11.0, 12.0],
        ]);
        let c: Matrix<f64, 2, 2, FollowVector, ColumnMajor> = a * b;
        assert_eq!(c, Matrix::new([[58.0, 64.0], [139.0, 154.0]]));
        assert_eq!(&a * &b, c);
    }

    #[test]
    fn matrix_times_vector() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let v = Vector::from_array([7.0, 8.0, 9.0]);
        assert_eq!(m * v, Vector::from_array([50.0, 122.0]));
        assert_eq!(&m * &v, Vector::from_array([50.0, 122.0]));
    }

    #[test]
    fn vector_times_matrix() {
        let m = Matrix::<f64, 2, 3, PrecedeVector, RowMajor>::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
        ]);
        let v = Vector::from_array([1.0, 2.0]);
        assert_eq!(v * m, Vector::from_array([9.0, 12.0, 15.0]));
    }

    #[test]
    fn flip_preserves_the_transform() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let v = Vector::from_array([7.0, 8.0, 9.0]);
        assert_eq!(v * m.flip(), m * v);
    }

    #[test]
    fn scalar_both_sides() {
        let a = Matrix::new([[1.0_f32, 2.0], [3.0, 4.0]]);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!((2.0 * a)[(1, 1)], 8.0);
        let v = Vector::from_array([1.0_f64, -1.0]);
        assert_eq!(3.0 * v, Vector::from_array([3.0, -3.0]));
    }

    #[test]
    fn integer_ops() {
        let a = Matrix::new([[1, 2], [3, 4]]);
        let id: Matrix<i32, 2, 2> = Matrix::eye();
        assert_eq!(a * id, a);
        assert_eq!(a * 2, Matrix::new([[2, 4], [6, 8]]));
    }
}
