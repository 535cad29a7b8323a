use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by inherently-real operations: quaternions, transform builders,
/// the real 2×2 SVD kernel.
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support decompositions.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). Every factorization in [`crate::linalg`] is written against
/// this trait, so a single algorithm body serves real and complex input.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// Squared modulus `z · conj(z)`, without the square root.
    #[inline]
    fn modulus_squared(self) -> Self::Real {
        (self * self.conj()).re()
    }

    /// Unit-modulus phase `z / |z|`; `1` for an exact zero.
    ///
    /// For reals this is the sign, with `phase(0) == 1`.
    #[inline]
    fn phase(self) -> Self {
        let m = self.modulus();
        if m == <Self::Real as Zero>::zero() {
            Self::one()
        } else {
            self / Self::from_real(m)
        }
    }
}

/// Concrete impls for real floats — trivial delegation.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
                #[inline] fn modulus_squared(self) -> $t { self * self }
                #[inline]
                fn phase(self) -> $t {
                    if self < 0.0 { -1.0 } else { 1.0 }
                }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }

    #[inline]
    fn modulus_squared(self) -> T {
        self.norm_sqr()
    }
}
