//! Transform-matrix builders.
//!
//! Every builder is generic over the [`Order`] of the result. The
//! `FollowVector` matrix acts as `M·v`; the `PrecedeVector` matrix is its
//! transpose and acts as `v·M`, so both describe the same transform.
//!
//! ```
//! use fixmat::transform::rotation_z;
//! use fixmat::{Matrix, PrecedeVector, RowMajor, Vector3};
//!
//! let v = Vector3::from_array([1.0_f64, 0.0, 0.0]);
//! let f: Matrix<f64, 3, 3> = rotation_z(core::f64::consts::FRAC_PI_2);
//! let p: Matrix<f64, 3, 3, PrecedeVector, RowMajor> = rotation_z(core::f64::consts::FRAC_PI_2);
//! assert!((f * v - Vector3::from_array([0.0, 1.0, 0.0])).norm() < 1e-12);
//! assert!((v * p - f * v).norm() < 1e-12);
//! ```

use crate::layout::{Layout, Order};
use crate::matrix::aliases::Vector3;
use crate::matrix::vector::Vector;
use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

/// Build a square matrix from its `FollowVector` rows, transposing for
/// `PrecedeVector`.
pub(crate) fn oriented<T: Scalar, const N: usize, O: Order, L: Layout>(rows: [[T; N]; N]) -> Matrix<T, N, N, O, L> {
    Matrix::from_fn(|i, j| if O::FOLLOWS_VECTOR { rows[i][j] } else { rows[j][i] })
}

/// Counter-clockwise rotation of the plane by `angle` radians.
pub fn rotation_2d<T: FloatScalar, O: Order, L: Layout>(angle: T) -> Matrix<T, 2, 2, O, L> {
    let (s, c) = angle.sin_cos();
    oriented([[c, -s], [s, c]])
}

/// Rotation about the x axis.
pub fn rotation_x<T: FloatScalar, O: Order, L: Layout>(angle: T) -> Matrix<T, 3, 3, O, L> {
    let (s, c) = angle.sin_cos();
    let (o, z) = (T::one(), T::zero());
    oriented([[o, z, z], [z, c, -s], [z, s, c]])
}

/// Rotation about the y axis.
pub fn rotation_y<T: FloatScalar, O: Order, L: Layout>(angle: T) -> Matrix<T, 3, 3, O, L> {
    let (s, c) = angle.sin_cos();
    let (o, z) = (T::one(), T::zero());
    oriented([[c, z, s], [z, o, z], [-s, z, c]])
}

/// Rotation about the z axis.
pub fn rotation_z<T: FloatScalar, O: Order, L: Layout>(angle: T) -> Matrix<T, 3, 3, O, L> {
    let (s, c) = angle.sin_cos();
    let (o, z) = (T::one(), T::zero());
    oriented([[c, -s, z], [s, c, z], [z, z, o]])
}

/// Rotation by `angle` radians about `axis` (Rodrigues' formula).
///
/// The axis is normalized here; a zero axis gives the identity.
pub fn rotation_axis_angle<T: FloatScalar, O: Order, L: Layout>(axis: &Vector3<T>, angle: T) -> Matrix<T, 3, 3, O, L> {
    let n = axis.norm();
    if n == T::zero() {
        return Matrix::eye();
    }
    let k = *axis * n.recip();
    let (x, y, z) = (k[0], k[1], k[2]);
    let (s, c) = angle.sin_cos();
    let t = T::one() - c;
    oriented([
        [t * x * x + c, t * x * y - s * z, t * x * z + s * y],
        [t * x * y + s * z, t * y * y + c, t * y * z - s * x],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c],
    ])
}

/// Axis-aligned scaling; identical in both orders.
pub fn scale<T: FloatScalar, const N: usize, O: Order, L: Layout>(factors: &Vector<T, N>) -> Matrix<T, N, N, O, L> {
    Matrix::from_diag(factors)
}

/// Homogeneous 4×4 translation by `t`.
///
/// The offset sits in the last column for `FollowVector` and in the last row
/// for `PrecedeVector`.
pub fn translation<T: FloatScalar, O: Order, L: Layout>(t: &Vector3<T>) -> Matrix<T, 4, 4, O, L> {
    let (o, z) = (T::one(), T::zero());
    oriented([[o, z, z, t[0]], [z, o, z, t[1]], [z, z, o, t[2]], [z, z, z, o]])
}

/// Right-handed perspective projection mapping view depth `[-near, -far]`
/// to clip depth `[-1, 1]`.
///
/// `fov_y` is the full vertical field of view in radians and `aspect` is
/// width over height. No argument checks: `near == far` or a zero `fov_y`
/// produce infinities.
pub fn perspective<T: FloatScalar, O: Order, L: Layout>(fov_y: T, aspect: T, near: T, far: T) -> Matrix<T, 4, 4, O, L> {
    let two = T::one() + T::one();
    let f = (fov_y / two).tan().recip();
    let depth = (near - far).recip();
    let z = T::zero();
    oriented([
        [f / aspect, z, z, z],
        [z, f, z, z],
        [z, z, (far + near) * depth, two * far * near * depth],
        [z, z, -T::one(), z],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ColumnMajor, FollowVector, PrecedeVector, RowMajor};
    use crate::matrix::aliases::Vector4;
    use core::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-12;

    type F3 = Matrix<f64, 3, 3, FollowVector, ColumnMajor>;
    type P3 = Matrix<f64, 3, 3, PrecedeVector, RowMajor>;

    fn v3(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::from_array([x, y, z])
    }

    #[test]
    fn axis_rotations_follow_right_hand_rule() {
        let (x, y, z) = (v3(1.0, 0.0, 0.0), v3(0.0, 1.0, 0.0), v3(0.0, 0.0, 1.0));
        assert!((rotation_x::<f64, FollowVector, ColumnMajor>(FRAC_PI_2) * y - z).norm() < TOL);
        assert!((rotation_y::<f64, FollowVector, ColumnMajor>(FRAC_PI_2) * z - x).norm() < TOL);
        assert!((rotation_z::<f64, FollowVector, ColumnMajor>(FRAC_PI_2) * x - y).norm() < TOL);
        assert!((y * rotation_x::<f64, PrecedeVector, ColumnMajor>(FRAC_PI_2) - z).norm() < TOL);
    }

    #[test]
    fn precede_is_transpose_of_follow() {
        let f: F3 = rotation_y(0.3);
        let p: P3 = rotation_y(0.3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(f[(i, j)], p[(j, i)]);
            }
        }
        let f2: Matrix<f64, 2, 2> = rotation_2d(0.3);
        let p2: Matrix<f64, 2, 2, PrecedeVector, ColumnMajor> = rotation_2d(0.3);
        assert_eq!(f2[(0, 1)], p2[(1, 0)]);
    }

    #[test]
    fn axis_angle_matches_axis_builders() {
        let a: F3 = rotation_axis_angle(&v3(0.0, 0.0, 2.0), 0.7);
        let b: F3 = rotation_z(0.7);
        assert!((a - b).frobenius_norm() < TOL);
        let a: P3 = rotation_axis_angle(&v3(-3.0, 0.0, 0.0), 0.7);
        let b: P3 = rotation_x(-0.7);
        assert!((a - b).frobenius_norm() < TOL);
        let i: F3 = rotation_axis_angle(&v3(0.0, 0.0, 0.0), 1.0);
        assert_eq!(i, Matrix::eye());
    }

    #[test]
    fn rotations_are_proper() {
        let r: F3 = rotation_axis_angle(&v3(1.0, 2.0, -0.5), 2.2);
        assert!((r.transpose() * r - F3::eye()).frobenius_norm() < TOL);
        assert!((r.det() - 1.0).abs() < TOL);
    }

    #[test]
    fn scale_and_translation() {
        let s: Matrix<f64, 3, 3> = scale(&v3(2.0, 3.0, 4.0));
        assert_eq!(s * v3(1.0, 1.0, 1.0), v3(2.0, 3.0, 4.0));

        let p = Vector4::from_array([1.0, 2.0, 3.0, 1.0]);
        let tf: Matrix<f64, 4, 4> = translation(&v3(10.0, 20.0, 30.0));
        let tp: Matrix<f64, 4, 4, PrecedeVector, RowMajor> = translation(&v3(10.0, 20.0, 30.0));
        let moved = Vector4::from_array([11.0, 22.0, 33.0, 1.0]);
        assert_eq!(tf * p, moved);
        assert_eq!(p * tp, moved);
        assert_eq!(tp[(3, 0)], 10.0);
        // directions (w = 0) are unaffected
        let d = Vector4::from_array([1.0, 0.0, 0.0, 0.0]);
        assert_eq!(tf * d, d);
    }

    #[test]
    fn perspective_maps_near_and_far() {
        let m: Matrix<f64, 4, 4> = perspective(FRAC_PI_2, 2.0, 1.0, 10.0);
        let project = |z: f64| {
            let c = m * Vector4::from_array([0.0, 0.0, z, 1.0]);
            c[2] / c[3]
        };
        assert!((project(-1.0) + 1.0).abs() < TOL);
        assert!((project(-10.0) - 1.0).abs() < TOL);
        assert!((m[(1, 1)] - 1.0).abs() < TOL);
        assert!((m[(0, 0)] - 0.5).abs() < TOL);

        let p: Matrix<f64, 4, 4, PrecedeVector, ColumnMajor> = perspective(FRAC_PI_2, 2.0, 1.0, 10.0);
        assert_eq!(p[(2, 3)], -1.0);
        assert_eq!(m[(3, 2)], -1.0);
    }
}
