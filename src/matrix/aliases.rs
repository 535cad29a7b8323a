//! Pre-defined type aliases for common matrix and vector sizes.
//!
//! Matrix aliases carry the default conventions (`FollowVector`,
//! `ColumnMajor`); spell out `Matrix<T, M, N, O, L>` for the others.

use crate::matrix::vector::Vector;
use crate::Matrix;

// ── Square matrix aliases ──────────────────────────────────────────

/// 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;
/// 3×3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;
/// 4×4 matrix.
pub type Matrix4<T> = Matrix<T, 4, 4>;
/// 6×6 matrix.
pub type Matrix6<T> = Matrix<T, 6, 6>;

// ── Rectangular matrix aliases ─────────────────────────────────────

/// 2×3 matrix.
pub type Matrix2x3<T> = Matrix<T, 2, 3>;
/// 3×2 matrix.
pub type Matrix3x2<T> = Matrix<T, 3, 2>;
/// 3×4 matrix.
pub type Matrix3x4<T> = Matrix<T, 3, 4>;
/// 4×3 matrix.
pub type Matrix4x3<T> = Matrix<T, 4, 3>;

// ── Vector aliases ─────────────────────────────────────────────────

/// 2-element vector.
pub type Vector2<T> = Vector<T, 2>;
/// 3-element vector.
pub type Vector3<T> = Vector<T, 3>;
/// 4-element vector.
pub type Vector4<T> = Vector<T, 4>;
