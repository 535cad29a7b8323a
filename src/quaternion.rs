//! Unit quaternions for 3D rotations.
//!
//! Scalar-first `[w, x, y, z]`. Conversions to and from rotation matrices
//! respect the matrix's [`Order`]: a `FollowVector` matrix rotates with
//! `R·v`, a `PrecedeVector` matrix with `v·R`, and both describe the same
//! rotation as the quaternion.

use core::ops::{Mul, Neg};

use crate::layout::{Layout, Order};
use crate::matrix::aliases::Vector3;
use crate::traits::FloatScalar;
use crate::transform::oriented;
use crate::Matrix;

/// Quaternion `w + x·i + y·j + z·k`.
///
/// ```
/// use fixmat::{Quaternion, Vector3};
///
/// let z = Vector3::from_array([0.0_f64, 0.0, 1.0]);
/// let q = Quaternion::from_axis_angle(&z, core::f64::consts::FRAC_PI_2);
/// let v = q.rotate(&Vector3::from_array([1.0, 0.0, 0.0]));
/// assert!((v - Vector3::from_array([0.0, 1.0, 0.0])).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: FloatScalar> Quaternion<T> {
    #[inline]
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// The rotation that does nothing.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Rotation by `angle` radians about `axis`.
    ///
    /// The axis is normalized here; a zero axis gives the identity.
    pub fn from_axis_angle(axis: &Vector3<T>, angle: T) -> Self {
        let n = axis.norm();
        if n == T::zero() {
            return Self::identity();
        }
        let (s, c) = (angle / (T::one() + T::one())).sin_cos();
        let k = s / n;
        Self::new(c, axis[0] * k, axis[1] * k, axis[2] * k)
    }

    /// Quaternion of a proper rotation matrix.
    ///
    /// The matrix is read under its own order: for `PrecedeVector` the stored
    /// matrix is the transpose of the `FollowVector` one. Picks the largest of
    /// `4w², 4x², 4y², 4z²` to divide by, so no branch loses precision. The
    /// result has `w ≥ 0`.
    pub fn from_rotation_matrix<O: Order, L: Layout>(m: &Matrix<T, 3, 3, O, L>) -> Self {
        let r = |i: usize, j: usize| if O::FOLLOWS_VECTOR { m[(i, j)] } else { m[(j, i)] };
        let one = T::one();
        let quarter = one / (one + one + one + one);
        let (d0, d1, d2) = (r(0, 0), r(1, 1), r(2, 2));

        // 4·{w², x², y², z²}
        let sq = [one + d0 + d1 + d2, one + d0 - d1 - d2, one - d0 + d1 - d2, one - d0 - d1 + d2];
        let big = (1..4).fold(0, |b, i| if sq[i] > sq[b] { i } else { b });

        let (zy, yz) = (r(2, 1), r(1, 2));
        let (xz, zx) = (r(0, 2), r(2, 0));
        let (yx, xy) = (r(1, 0), r(0, 1));
        let half_root = (sq[big] * quarter).sqrt();
        let k = quarter / half_root;
        let q = match big {
            0 => Self::new(half_root, (zy - yz) * k, (xz - zx) * k, (yx - xy) * k),
            1 => Self::new((zy - yz) * k, half_root, (xy + yx) * k, (xz + zx) * k),
            2 => Self::new((xz - zx) * k, (xy + yx) * k, half_root, (yz + zy) * k),
            _ => Self::new((yx - xy) * k, (xz + zx) * k, (yz + zy) * k, half_root),
        };
        if q.w < T::zero() {
            -q
        } else {
            q
        }
    }

    /// `(w, −x, −y, −z)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }

    /// Scale to unit norm.
    pub fn normalize(&self) -> Self {
        let inv = self.norm().recip();
        Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
    }

    /// `conjugate / norm²`; equal to the conjugate for unit quaternions.
    pub fn inverse(&self) -> Self {
        let inv = self.dot(self).recip();
        let c = self.conjugate();
        Self::new(c.w * inv, c.x * inv, c.y * inv, c.z * inv)
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Rotation matrix in the requested conventions.
    ///
    /// ```
    /// use fixmat::{FollowVector, Matrix, PrecedeVector, Quaternion, RowMajor, Vector3};
    ///
    /// let q = Quaternion::from_axis_angle(&Vector3::from_array([1.0_f64, 2.0, 3.0]), 0.7);
    /// let v = Vector3::from_array([0.5, -1.0, 2.0]);
    /// let follow: Matrix<f64, 3, 3, FollowVector, RowMajor> = q.to_rotation_matrix();
    /// let precede: Matrix<f64, 3, 3, PrecedeVector, RowMajor> = q.to_rotation_matrix();
    /// assert!((follow * v - v * precede).norm() < 1e-12);
    /// assert!((follow * v - q.rotate(&v)).norm() < 1e-12);
    /// ```
    pub fn to_rotation_matrix<O: Order, L: Layout>(&self) -> Matrix<T, 3, 3, O, L> {
        let two = T::one() + T::one();
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        oriented([
            [T::one() - two * (yy + zz), two * (xy - wz), two * (xz + wy)],
            [two * (xy + wz), T::one() - two * (xx + zz), two * (yz - wx)],
            [two * (xz - wy), two * (yz + wx), T::one() - two * (xx + yy)],
        ])
    }

    /// `(unit axis, angle)` with the angle in `[0, 2π]`.
    ///
    /// A rotation with no vector part returns the x axis and angle zero.
    pub fn to_axis_angle(&self) -> (Vector3<T>, T) {
        let n = Vector3::from_array([self.x, self.y, self.z]).norm();
        if n <= T::epsilon() {
            return (Vector3::from_array([T::one(), T::zero(), T::zero()]), T::zero());
        }
        let inv = n.recip();
        let angle = (T::one() + T::one()) * n.atan2(self.w);
        (Vector3::from_array([self.x * inv, self.y * inv, self.z * inv]), angle)
    }

    /// Rotate `v` by this (unit) quaternion: `q·v·q*`.
    pub fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        let two = T::one() + T::one();
        let u = Vector3::from_array([self.x, self.y, self.z]);
        let t = u.cross(v) * two;
        *v + t * self.w + u.cross(&t)
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// `t = 0` gives `self`, `t = 1` gives `other` (or `−other`). Nearly
    /// parallel inputs fall back to normalized linear interpolation.
    pub fn slerp(&self, other: &Self, t: T) -> Self {
        let mut d = self.dot(other);
        let other = if d < T::zero() {
            d = -d;
            -*other
        } else {
            *other
        };

        let (a, b) = if d > T::one() - T::epsilon().sqrt() {
            (T::one() - t, t)
        } else {
            let theta = d.min(T::one()).acos();
            let s = theta.sin();
            (((T::one() - t) * theta).sin() / s, (t * theta).sin() / s)
        };
        let q = Self::new(
            self.w * a + other.w * b,
            self.x * a + other.x * b,
            self.y * a + other.y * b,
            self.z * a + other.z * b,
        );
        q.normalize()
    }
}

/// Hamilton product; `a * b` applies `b` first.
impl<T: FloatScalar> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, r: Self) -> Self {
        Self::new(
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
            self.w * r.x + self.x * r.w + self.y * r.z - self.z * r.y,
            self.w * r.y - self.x * r.z + self.y * r.w + self.z * r.x,
            self.w * r.z + self.x * r.y - self.y * r.x + self.z * r.w,
        )
    }
}

impl<T: FloatScalar> Mul<&Quaternion<T>> for &Quaternion<T> {
    type Output = Quaternion<T>;

    #[inline]
    fn mul(self, rhs: &Quaternion<T>) -> Quaternion<T> {
        *self * *rhs
    }
}

impl<T: FloatScalar> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, v: Vector3<T>) -> Vector3<T> {
        self.rotate(&v)
    }
}

impl<T: FloatScalar> Neg for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}
