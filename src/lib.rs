//! # fixmat
//!
//! Fixed-size dense linear algebra with explicit storage-layout and
//! vector-multiplication conventions. `no_std`, no heap allocation.
//!
//! ## Quick start
//!
//! ```
//! use fixmat::{Matrix, Vector};
//! use fixmat::linalg::SvdDecomposition;
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::new([
//!     [2.0_f64, 1.0, -1.0],
//!     [-3.0, -1.0, 2.0],
//!     [-2.0, 1.0, 2.0],
//! ]);
//! let b = Vector::from_array([8.0, -11.0, -3.0]);
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x - Vector::from_array([2.0, 3.0, -1.0])).norm() < 1e-12);
//!
//! // Singular values, largest first
//! let svd: SvdDecomposition<f64, 3, 3, 3> = a.svd().unwrap();
//! assert!((svd.u * svd.s * svd.v - a).frobenius_norm() < 1e-12);
//! ```
//!
//! ## Conventions
//!
//! `Matrix<T, M, N, O, L>` carries two zero-sized tags:
//!
//! - [`Layout`]: [`ColumnMajor`] (default) or [`RowMajor`] storage. Element
//!   `(i, j)` means the same thing under both; only [`Matrix::stripe`] and
//!   [`Matrix::as_slice`] expose the difference.
//! - [`Order`]: [`FollowVector`] (default, `M·v`) or [`PrecedeVector`]
//!   (`v·M`). Only the matching matrix-vector product exists, and the `solve`
//!   methods of the decompositions follow the same rule.
//!
//! [`Matrix::flip`] reinterprets the same storage as the transpose in the
//! opposite conventions at no cost.
//!
//! ## Modules
//!
//! - [`matrix`] — `Matrix`, `Vector`, arithmetic, norms, blocks, stripes.
//! - [`linalg`] — LU/LUP, QR/LQ, closed-form 2×2 RQ and SVD, one- and
//!   two-sided Jacobi SVD.
//! - [`quaternion`] — unit quaternions and conversion to rotation matrices.
//! - [`transform`] — order-aware rotation, scale, translation and
//!   perspective builders.
//! - [`traits`] — [`Scalar`], [`FloatScalar`], [`LinalgScalar`].
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm |
//! | `libm`    | baseline | Pure-Rust software float fallback |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `all`     | no       | `std` + `complex` |

#![cfg_attr(not(feature = "std"), no_std)]

pub mod layout;
pub mod linalg;
pub mod matrix;
pub mod quaternion;
pub mod traits;
pub mod transform;

pub use layout::{ColumnMajor, FollowVector, Layout, Order, PrecedeVector, RowMajor};
pub use linalg::{JacobiSettings, LinalgError, SvdDecomposition};
pub use matrix::aliases::*;
pub use matrix::vector::Vector;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use traits::{FloatScalar, LinalgScalar, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
