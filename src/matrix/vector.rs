use core::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{Float, Zero};

use crate::traits::{LinalgScalar, Scalar};

/// A fixed-size vector.
///
/// Vectors carry no orientation: whether one acts as a column (`M·v`) or a
/// row (`v·M`) is decided by the [`Order`](crate::Order) of the matrix it is
/// multiplied with.
///
/// # Examples
///
/// ```
/// use fixmat::Vector;
///
/// let v = Vector::from_array([3.0_f64, 4.0]);
/// assert_eq!(v[0], 3.0);
/// assert_eq!(v.dot(&v), 25.0);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector<T, const N: usize> {
    pub(crate) data: [T; N],
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Create a vector from a 1D array.
    #[inline]
    pub const fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    /// Create a vector filled with a single value.
    #[inline]
    pub fn fill(value: T) -> Self {
        Self { data: [value; N] }
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for the zero-length vector.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume into the backing array.
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.data
    }

    /// Iterate over the elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Apply `f` to every element.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Vector<U, N> {
        Vector::from_array(self.data.map(f))
    }
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Vector of zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::fill(T::zero())
    }

    /// Plain dot product `Σ aᵢ·bᵢ`, no conjugation.
    ///
    /// ```
    /// use fixmat::Vector;
    /// let a = Vector::from_array([1.0, 2.0, 3.0]);
    /// let b = Vector::from_array([4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self.data[i] * rhs.data[i];
        }
        sum
    }

    /// Elementwise product.
    pub fn element_mul(&self, rhs: &Self) -> Self {
        let mut out = *self;
        for i in 0..N {
            out.data[i] = self.data[i] * rhs.data[i];
        }
        out
    }
}

impl<T: LinalgScalar, const N: usize> Vector<T, N> {
    /// Inner product `Σ conj(aᵢ)·bᵢ`; equals [`dot`](Self::dot) for reals.
    #[inline]
    pub fn inner(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self.data[i].conj() * rhs.data[i];
        }
        sum
    }

    /// Squared L2 norm.
    pub fn norm_squared(&self) -> T::Real {
        let mut sum = T::Real::zero();
        for i in 0..N {
            sum = sum + self.data[i].modulus_squared();
        }
        sum
    }

    /// L2 (Euclidean) norm.
    pub fn norm(&self) -> T::Real {
        self.norm_squared().sqrt()
    }

    /// L2 norm computed on elements scaled by the largest modulus.
    ///
    /// Does not overflow or underflow when the plain sum of squares would.
    ///
    /// ```
    /// use fixmat::Vector;
    /// let v = Vector::from_array([3e200_f64, 4e200]);
    /// assert!((v.norm_precise() / 5e200 - 1.0).abs() < 1e-15);
    /// assert!(v.norm().is_infinite());
    /// ```
    pub fn norm_precise(&self) -> T::Real {
        let zero = T::Real::zero();
        let mut scale = zero;
        for i in 0..N {
            let m = self.data[i].modulus();
            if m > scale {
                scale = m;
            }
        }
        if scale == zero {
            return zero;
        }
        let mut sum = zero;
        for i in 0..N {
            let r = self.data[i].modulus() / scale;
            sum = sum + r * r;
        }
        scale * sum.sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector yields NaN elements.
    pub fn normalize(&self) -> Self {
        let n = self.norm_precise();
        *self * T::from_real(n.recip())
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Self {
        self.map(|x| x.conj())
    }
}

impl<T: Scalar> Vector<T, 3> {
    /// Cross product of two 3-vectors.
    ///
    /// ```
    /// use fixmat::Vector3;
    /// let x = Vector3::from_array([1.0, 0.0, 0.0]);
    /// let y = Vector3::from_array([0.0, 1.0, 0.0]);
    /// let z = x.cross(&y);
    /// assert_eq!(z[2], 1.0);
    /// ```
    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        let (a, b) = (&self.data, &rhs.data);
        Self::from_array([
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ])
    }
}

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

macro_rules! vector_binop {
    ($Op:ident, $method:ident, $OpAssign:ident, $assign:ident, $op:tt) => {
        impl<T: Scalar, const N: usize> $Op for Vector<T, N> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                let mut out = self;
                for i in 0..N {
                    out.data[i] = self.data[i] $op rhs.data[i];
                }
                out
            }
        }

        impl<T: Scalar, const N: usize> $Op<&Vector<T, N>> for Vector<T, N> {
            type Output = Self;

            fn $method(self, rhs: &Self) -> Self {
                self.$method(*rhs)
            }
        }

        impl<T: Scalar, const N: usize> $Op for &Vector<T, N> {
            type Output = Vector<T, N>;

            fn $method(self, rhs: Self) -> Vector<T, N> {
                (*self).$method(*rhs)
            }
        }

        impl<T: Scalar, const N: usize> $OpAssign for Vector<T, N> {
            fn $assign(&mut self, rhs: Self) {
                *self = (*self).$method(rhs);
            }
        }
    };
}

vector_binop!(Add, add, AddAssign, add_assign, +);
vector_binop!(Sub, sub, SubAssign, sub_assign, -);

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|x| T::zero() - x)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.map(|x| x * rhs)
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_array_and_index() {
        let v = Vector::from_array([1.0, 2.0, 3.0]);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 3.0);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn index_mut() {
        let mut v = Vector::<f64, 3>::zeros();
        v[1] = 5.0;
        assert_eq!(v.as_slice(), &[0.0, 5.0, 0.0]);
    }

    #[test]
    fn fill() {
        let v = Vector::<f64, 4>::fill(7.0);
        assert!(v.iter().all(|&x| x == 7.0));
    }

    #[test]
    fn arithmetic() {
        let a = Vector::from_array([1.0, 2.0, 3.0]);
        let b = Vector::from_array([4.0, 5.0, 6.0]);
        assert_eq!(a + b, Vector::from_array([5.0, 7.0, 9.0]));
        assert_eq!(b - a, Vector::from_array([3.0, 3.0, 3.0]));
        assert_eq!(a * 2.0, Vector::from_array([2.0, 4.0, 6.0]));
        assert_eq!(-a, Vector::from_array([-1.0, -2.0, -3.0]));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn cross_product_anticommutative() {
        let a = Vector::from_array([1.0, 2.0, 3.0]);
        let b = Vector::from_array([4.0, 5.0, 6.0]);
        assert_eq!(a.cross(&b), -b.cross(&a));
        assert_eq!(a.cross(&a), Vector::zeros());
    }

    #[test]
    fn norms() {
        let v = Vector::from_array([3.0_f64, 0.0, -4.0]);
        assert_eq!(v.norm_squared(), 25.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.norm_precise(), 5.0);
        let u = v.normalize();
        assert!((u.norm() - 1.0).abs() < 1e-15);
        assert!((u[2] + 0.8).abs() < 1e-15);
    }

    #[test]
    fn norm_precise_zero_vector() {
        assert_eq!(Vector::<f64, 3>::zeros().norm_precise(), 0.0);
    }

    #[test]
    fn norm_precise_tiny_values() {
        let v = Vector::from_array([3e-200_f64, 4e-200]);
        assert_eq!(v.norm(), 0.0);
        assert!((v.norm_precise() / 5e-200 - 1.0).abs() < 1e-15);
    }
}
