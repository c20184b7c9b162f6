//! Error types for sparse matrix operations
//!
//! Every fallible operation in the crate returns [`MatrixError`]. Nothing is
//! retried: all operations are deterministic, so the error is terminal for
//! the call that raised it.

use crate::matrix::Operation;
use thiserror::Error;

/// Errors that can occur while building, parsing or combining matrices.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A line of the text format could not be parsed.
    #[error("line {line}: {reason} (got {content:?})")]
    Format {
        /// 1-based line number in the input
        line: usize,
        /// The offending line, trimmed
        content: String,
        /// What was expected
        reason: &'static str,
    },

    /// An element write addressed a cell outside the matrix.
    ///
    /// Indices are signed so that negative indices read from text are
    /// reported as written.
    #[error("index ({row}, {col}) out of range for matrix of size {rows}x{cols}")]
    IndexOutOfBounds {
        /// Requested row
        row: i128,
        /// Requested column
        col: i128,
        /// Number of rows in the matrix
        rows: usize,
        /// Number of columns in the matrix
        cols: usize,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error("cannot {op} a {}x{} matrix and a {}x{} matrix", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    DimensionMismatch {
        /// The operation that was attempted
        op: Operation,
        /// Shape of the left operand
        lhs: (usize, usize),
        /// Shape of the right operand
        rhs: (usize, usize),
    },

    /// An intermediate value does not fit in the element type.
    #[error("integer overflow during {op} at ({row}, {col})")]
    Overflow {
        /// The operation that overflowed
        op: Operation,
        /// Row of the result cell being computed
        row: usize,
        /// Column of the result cell being computed
        col: usize,
    },

    /// Reading or writing a matrix failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    /// Returns `true` if this is a text format error.
    pub fn is_format_error(&self) -> bool {
        matches!(self, MatrixError::Format { .. })
    }

    /// Returns `true` if this is an out-of-range index error.
    pub fn is_index_error(&self) -> bool {
        matches!(self, MatrixError::IndexOutOfBounds { .. })
    }

    /// Returns `true` if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, MatrixError::DimensionMismatch { .. })
    }

    /// Returns `true` if this is an arithmetic overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self, MatrixError::Overflow { .. })
    }

    pub(crate) fn format(line: usize, content: &str, reason: &'static str) -> Self {
        MatrixError::Format {
            line,
            content: content.to_string(),
            reason,
        }
    }
}
