//! # sparse-matrix: sparse integer matrices
//!
//! A matrix type that stores only its non-zero elements, keyed by
//! `(row, col)`, together with a small canonical text format and the three
//! arithmetic operations addition, subtraction and multiplication.
//!
//! ## Overview
//!
//! - **Storage**: [`SparseMatrix`] keeps non-zero entries in an ordered map.
//!   Writing zero removes an entry; writes outside the matrix are rejected.
//! - **Arithmetic**: [`SparseMatrix::add`], [`SparseMatrix::subtract`] and
//!   [`SparseMatrix::multiply`] never mutate their operands and report shape
//!   mismatches and integer overflow as errors.
//! - **Text format**: [`parse_lines`], [`TextFormat`] and the `FromStr` /
//!   `Display` impls read and write
//!
//! ```text
//! rows=2
//! cols=2
//! (0, 0, 4)
//! (0, 1, 4)
//! (1, 1, 2)
//! ```
//!
//! - **Interop**: conversions to and from `sprs` and `ndarray` live in
//!   [`utils`].
//!
//! ## Usage
//!
//! ```
//! use sparse_matrix::SparseMatrix;
//!
//! let a: SparseMatrix = "rows=2\ncols=2\n(0, 0, 1)\n(1, 1, 2)".parse().unwrap();
//! let b: SparseMatrix = "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, 4)".parse().unwrap();
//!
//! let c = a.add(&b).unwrap();
//! assert_eq!(c.to_string(), "rows=2\ncols=2\n(0, 0, 4)\n(0, 1, 4)\n(1, 1, 2)");
//! ```

pub mod error;
pub mod io;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{MatrixError, Result};
pub use io::{parse_lines, TextFormat};
pub use matrix::{Element, Operation, SparseMatrix};
pub use utils::{from_dense, from_sprs, to_dense, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
