//! Map-backed sparse matrix storage
//!
//! Only non-zero cells are stored, keyed by `(row, col)` in an ordered map so
//! that iteration is always ascending by row, then column.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MatrixError, Result};
use crate::matrix::Element;

/// A sparse integer matrix storing only its non-zero elements
///
/// The matrix upholds three invariants:
/// - no stored entry is zero; writing zero removes the entry
/// - every stored `(row, col)` lies inside `rows x cols`
/// - each cell has at most one entry; absent cells read as zero
///
/// [`set`](Self::set) is the only way to change an entry and enforces all
/// three. Reads through [`get`](Self::get) are permissive and return zero for
/// anything not stored, including out-of-range cells.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SparseMatrix<T = i64> {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), T>,
}

impl<T> SparseMatrix<T>
where
    T: Element,
{
    /// Creates an empty matrix with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Creates an all-zero matrix with the given dimensions
    ///
    /// Same as [`new`](Self::new); reads better next to [`identity`](Self::identity).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols)
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let entries = (0..n).map(|i| ((i, i), T::one())).collect();

        Self {
            rows: n,
            cols: n,
            entries,
        }
    }

    /// Builds a matrix from `(row, col, value)` triplets
    ///
    /// Each triplet goes through [`set`](Self::set), so zeros are dropped and
    /// a later triplet for the same cell overwrites an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfBounds`] for the first triplet that
    /// falls outside `rows x cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_matrix::SparseMatrix;
    ///
    /// let m = SparseMatrix::from_triplets(2, 2, [(0, 0, 1), (1, 1, 2), (0, 1, 0)]).unwrap();
    /// assert_eq!(m.nnz(), 2);
    /// assert_eq!(m.get(1, 1), 2);
    /// ```
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(rows, cols);
        for (row, col, value) in triplets {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no element is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value at `(row, col)`, or zero if nothing is stored there
    ///
    /// Never fails: out-of-range cells also read as zero.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.entries
            .get(&(row, col))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Sets the value at `(row, col)`
    ///
    /// A zero value removes the stored entry; any other value overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfBounds`] if `row >= rows` or
    /// `col >= cols`, regardless of `value`. The matrix is left unchanged.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: row as i128,
                col: col as i128,
                rows: self.rows,
                cols: self.cols,
            });
        }

        if value.is_zero() {
            self.entries.remove(&(row, col));
        } else {
            self.entries.insert((row, col), value);
        }
        Ok(())
    }

    /// Returns an iterator over all non-zero elements
    ///
    /// Items are `(row, col, value)` in ascending `(row, col)` order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.entries.iter().map(|(&(row, col), &value)| (row, col, value))
    }

    /// Returns an iterator over the non-zero elements in row `row`
    ///
    /// Each item is a tuple `(col, value)`, ascending by column. A row with no
    /// entries, or outside the matrix, yields nothing.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.entries
            .range((row, 0)..=(row, usize::MAX))
            .map(|(&(_, col), &value)| (col, value))
    }
}

impl<T: Element> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.rows, self.cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_entries_to_print = 8.min(self.nnz());

        if max_entries_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for (row, col, value) in self.iter().take(max_entries_to_print) {
                writeln!(f, "    ({}, {}) = {:?}", row, col, value)?;
            }

            if self.nnz() > max_entries_to_print {
                writeln!(f, "    ... ({} more)", self.nnz() - max_entries_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
