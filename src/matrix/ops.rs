//! Addition, subtraction and multiplication of sparse matrices
//!
//! All three operations leave their operands untouched and return a freshly
//! allocated result. Every write into the result goes through
//! [`SparseMatrix::set`], so the sparsity and bounds invariants hold for the
//! output exactly as they do for parsed input.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use num_traits::cast;

use crate::error::{MatrixError, Result};
use crate::matrix::{Element, SparseMatrix};

/// The binary operations supported on sparse matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Element-wise sum, operands must have equal shapes
    Add,
    /// Element-wise difference, operands must have equal shapes
    Subtract,
    /// Matrix product, `lhs.cols` must equal `rhs.rows`
    Multiply,
}

impl Operation {
    /// Applies this operation to `lhs` and `rhs`
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_matrix::{Operation, SparseMatrix};
    ///
    /// let a = SparseMatrix::<i64>::identity(2);
    /// let b = Operation::Add.apply(&a, &a).unwrap();
    /// assert_eq!(b.get(1, 1), 2);
    /// ```
    pub fn apply<T: Element>(
        self,
        lhs: &SparseMatrix<T>,
        rhs: &SparseMatrix<T>,
    ) -> Result<SparseMatrix<T>> {
        match self {
            Operation::Add => lhs.add(rhs),
            Operation::Subtract => lhs.subtract(rhs),
            Operation::Multiply => lhs.multiply(rhs),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        };
        write!(f, "{name}")
    }
}

impl<T> SparseMatrix<T>
where
    T: Element,
{
    /// Adds two sparse matrices
    ///
    /// # Errors
    ///
    /// - [`MatrixError::DimensionMismatch`] if the shapes differ
    /// - [`MatrixError::Overflow`] if a sum does not fit in `T`
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_matrix::SparseMatrix;
    ///
    /// let a = SparseMatrix::from_triplets(2, 2, [(0, 0, 1), (1, 1, 2)]).unwrap();
    /// let b = SparseMatrix::from_triplets(2, 2, [(0, 0, 3), (0, 1, 4)]).unwrap();
    ///
    /// let c = a.add(&b).unwrap();
    /// assert_eq!(c.get(0, 0), 4);
    /// assert_eq!(c.get(0, 1), 4);
    /// assert_eq!(c.get(1, 1), 2);
    /// ```
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.combine(other, Operation::Add, |a, b| a.checked_add(&b))
    }

    /// Subtracts `other` from this matrix
    ///
    /// # Errors
    ///
    /// - [`MatrixError::DimensionMismatch`] if the shapes differ
    /// - [`MatrixError::Overflow`] if a difference does not fit in `T`
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.combine(other, Operation::Subtract, |a, b| a.checked_sub(&b))
    }

    /// Multiplies this matrix by `other`
    ///
    /// The result has shape `(self.rows, other.cols)`. For every stored
    /// `(i, k, v)` of `self`, each stored `(j, w)` in row `k` of `other`
    /// contributes `v * w` to cell `(i, j)` of the result. Only the stored
    /// entries of row `k` are visited, so the cost is proportional to the
    /// number of non-zero partial products rather than `nnz(self) * other.cols`.
    ///
    /// Each result row is accumulated in `i128` and narrowed to `T` once the
    /// row is complete, so intermediate sums may leave the range of `T` as
    /// long as the final cell value fits.
    ///
    /// # Errors
    ///
    /// - [`MatrixError::DimensionMismatch`] if `self.cols != other.rows`
    /// - [`MatrixError::Overflow`] if a final cell value does not fit in `T`,
    ///   or an intermediate value does not fit in `i128`
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_matrix::SparseMatrix;
    ///
    /// let a = SparseMatrix::from_triplets(1, 2, [(0, 0, 2), (0, 1, 3)]).unwrap();
    /// let b = SparseMatrix::from_triplets(2, 1, [(0, 0, 5), (1, 0, 7)]).unwrap();
    ///
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.shape(), (1, 1));
    /// assert_eq!(c.get(0, 0), 31);
    /// ```
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                op: Operation::Multiply,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut result = Self::new(self.rows(), other.cols());
        let mut row_acc: BTreeMap<usize, i128> = BTreeMap::new();
        let mut entries = self.iter().peekable();

        while let Some((i, k, a_val)) = entries.next() {
            for (j, b_val) in other.row_iter(k) {
                let overflow = || MatrixError::Overflow {
                    op: Operation::Multiply,
                    row: i,
                    col: j,
                };

                let product = a_val
                    .to_i128()
                    .zip(b_val.to_i128())
                    .and_then(|(a, b)| a.checked_mul(b))
                    .ok_or_else(overflow)?;

                let sum = row_acc.entry(j).or_insert(0);
                *sum = sum.checked_add(product).ok_or_else(overflow)?;
            }

            // Row `i` is complete once the next entry starts another row
            if entries.peek().map_or(true, |&(next, _, _)| next != i) {
                for (j, sum) in std::mem::take(&mut row_acc) {
                    if sum == 0 {
                        continue;
                    }
                    let value = cast::<i128, T>(sum).ok_or(MatrixError::Overflow {
                        op: Operation::Multiply,
                        row: i,
                        col: j,
                    })?;
                    result.set(i, j, value)?;
                }
            }
        }

        debug!(
            "multiply {:?} x {:?} -> {:?}, nnz {}",
            self.shape(),
            other.shape(),
            result.shape(),
            result.nnz()
        );

        Ok(result)
    }

    /// Shared body of `add` and `subtract`
    ///
    /// Starts from a copy of `self`, then folds each entry of `other` into
    /// the result with `op_fn(result.get(r, c), v)`.
    fn combine<F>(&self, other: &Self, op: Operation, op_fn: F) -> Result<Self>
    where
        F: Fn(T, T) -> Option<T>,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut result = Self::new(self.rows(), self.cols());
        for (row, col, value) in self.iter() {
            result.set(row, col, value)?;
        }

        for (row, col, value) in other.iter() {
            let combined = op_fn(result.get(row, col), value)
                .ok_or(MatrixError::Overflow { op, row, col })?;
            result.set(row, col, combined)?;
        }

        debug!(
            "{} {:?}: nnz {} and {} -> {}",
            op,
            self.shape(),
            self.nnz(),
            other.nnz(),
            result.nnz()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, entries: &[(usize, usize, i64)]) -> SparseMatrix<i64> {
        SparseMatrix::from_triplets(rows, cols, entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_add_overlapping_entries() {
        let a = matrix(2, 2, &[(0, 0, 1), (1, 1, 2)]);
        let b = matrix(2, 2, &[(0, 0, 3), (0, 1, 4)]);

        let c = a.add(&b).unwrap();
        assert_eq!(c, matrix(2, 2, &[(0, 0, 4), (0, 1, 4), (1, 1, 2)]));
    }

    #[test]
    fn test_add_cancellation_removes_entry() {
        let a = matrix(2, 2, &[(0, 0, 5), (1, 0, 1)]);
        let b = matrix(2, 2, &[(0, 0, -5)]);

        let c = a.add(&b).unwrap();
        assert_eq!(c.nnz(), 1);
        assert_eq!(c.get(0, 0), 0);
        assert_eq!(c.get(1, 0), 1);
    }

    #[test]
    fn test_subtract() {
        let a = matrix(2, 3, &[(0, 0, 4), (1, 2, 6)]);
        let b = matrix(2, 3, &[(0, 0, 1), (0, 1, 2)]);

        let c = a.subtract(&b).unwrap();
        assert_eq!(c, matrix(2, 3, &[(0, 0, 3), (0, 1, -2), (1, 2, 6)]));
    }

    #[test]
    fn test_subtract_self_is_empty() {
        let a = matrix(3, 2, &[(0, 0, 4), (2, 1, -6)]);

        let c = a.subtract(&a).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.shape(), (3, 2));
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let a = matrix(2, 2, &[]);
        let b = matrix(2, 3, &[]);

        match a.add(&b).unwrap_err() {
            MatrixError::DimensionMismatch { op, lhs, rhs } => {
                assert_eq!(op, Operation::Add);
                assert_eq!(lhs, (2, 2));
                assert_eq!(rhs, (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(a.subtract(&b).unwrap_err().is_dimension_mismatch());
    }

    #[test]
    fn test_multiply_row_by_column() {
        let a = matrix(1, 2, &[(0, 0, 2), (0, 1, 3)]);
        let b = matrix(2, 1, &[(0, 0, 5), (1, 0, 7)]);

        let c = a.multiply(&b).unwrap();
        assert_eq!(c, matrix(1, 1, &[(0, 0, 31)]));
    }

    #[test]
    fn test_multiply_square() {
        // A = [1 2; 0 3]
        // B = [4 5; 6 7]
        // Expected result: C = A*B = [16 19; 18 21]
        let a = matrix(2, 2, &[(0, 0, 1), (0, 1, 2), (1, 1, 3)]);
        let b = matrix(2, 2, &[(0, 0, 4), (0, 1, 5), (1, 0, 6), (1, 1, 7)]);

        let c = a.multiply(&b).unwrap();
        assert_eq!(
            c,
            matrix(2, 2, &[(0, 0, 16), (0, 1, 19), (1, 0, 18), (1, 1, 21)])
        );
    }

    #[test]
    fn test_multiply_cancellation() {
        // [1 1] * [1; -1] = [0]
        let a = matrix(1, 2, &[(0, 0, 1), (0, 1, 1)]);
        let b = matrix(2, 1, &[(0, 0, 1), (1, 0, -1)]);

        let c = a.multiply(&b).unwrap();
        assert_eq!(c.shape(), (1, 1));
        assert!(c.is_empty());
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = matrix(2, 3, &[]);
        let b = matrix(2, 3, &[]);

        let err = a.multiply(&b).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(err.to_string(), "cannot multiply a 2x3 matrix and a 2x3 matrix");
    }

    #[test]
    fn test_operands_unchanged() {
        let a = matrix(2, 2, &[(0, 0, 1), (1, 0, 2)]);
        let b = matrix(2, 2, &[(0, 0, 3), (0, 1, 4)]);
        let (a_before, b_before) = (a.clone(), b.clone());

        a.add(&b).unwrap();
        a.subtract(&b).unwrap();
        a.multiply(&b).unwrap();

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_add_overflow() {
        let a = SparseMatrix::<i8>::from_triplets(1, 1, [(0, 0, 100)]).unwrap();

        match a.add(&a).unwrap_err() {
            MatrixError::Overflow { op, row, col } => {
                assert_eq!(op, Operation::Add);
                assert_eq!((row, col), (0, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_subtract_unsigned_underflow() {
        let a = SparseMatrix::<u32>::from_triplets(1, 2, [(0, 1, 1)]).unwrap();
        let b = SparseMatrix::<u32>::from_triplets(1, 2, [(0, 1, 2)]).unwrap();

        assert!(a.subtract(&b).unwrap_err().is_overflow());
    }

    #[test]
    fn test_multiply_overflow() {
        let a = SparseMatrix::<i16>::from_triplets(1, 1, [(0, 0, 300)]).unwrap();

        let err = a.multiply(&a).unwrap_err();
        assert!(err.is_overflow());
        assert_eq!(err.to_string(), "integer overflow during multiply at (0, 0)");
    }

    #[test]
    fn test_multiply_exact_when_partial_sums_overflow() {
        // [MAX 1 -1] * [1; 1; 1] = MAX, although MAX + 1 overflows on the way
        let a = matrix(1, 3, &[(0, 0, i64::MAX), (0, 1, 1), (0, 2, -1)]);
        let b = matrix(3, 1, &[(0, 0, 1), (1, 0, 1), (2, 0, 1)]);

        let c = a.multiply(&b).unwrap();
        assert_eq!(c, matrix(1, 1, &[(0, 0, i64::MAX)]));
    }

    #[test]
    fn test_multiply_partial_products_cancel() {
        // 100 * 2 and 100 * -2 overflow i8 individually but sum to 0
        let a = SparseMatrix::<i8>::from_triplets(2, 2, [(1, 0, 100), (1, 1, 100)]).unwrap();
        let b = SparseMatrix::<i8>::from_triplets(2, 1, [(0, 0, 2), (1, 0, -2)]).unwrap();

        let c = a.multiply(&b).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert!(c.is_empty());
    }

    #[test]
    fn test_multiply_overflow_reports_cell() {
        let a = SparseMatrix::<i8>::from_triplets(2, 2, [(0, 0, 1), (1, 0, 100)]).unwrap();
        let b = SparseMatrix::<i8>::from_triplets(2, 2, [(0, 0, 1), (0, 1, 2)]).unwrap();

        match a.multiply(&b).unwrap_err() {
            MatrixError::Overflow { op, row, col } => {
                assert_eq!(op, Operation::Multiply);
                assert_eq!((row, col), (1, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_operation_apply() {
        let a = matrix(2, 2, &[(0, 0, 2), (1, 1, 3)]);
        let i = SparseMatrix::<i64>::identity(2);

        assert_eq!(Operation::Add.apply(&a, &i).unwrap().get(0, 0), 3);
        assert_eq!(Operation::Subtract.apply(&a, &i).unwrap().get(1, 1), 2);
        assert_eq!(Operation::Multiply.apply(&a, &i).unwrap(), a);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Add.to_string(), "add");
        assert_eq!(Operation::Subtract.to_string(), "subtract");
        assert_eq!(Operation::Multiply.to_string(), "multiply");
    }
}
