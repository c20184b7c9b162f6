//! Utilities for converting between our matrix format and external libraries

use crate::error::Result;
use crate::matrix::{Element, SparseMatrix};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use sprs::CsMat;

/// Converts our sparse matrix to sprs CsMat format (as CSR)
///
/// Entries come out of the matrix sorted by `(row, col)`, which is exactly
/// the CSR layout with sorted column indices.
pub fn to_sprs_csr<T>(matrix: &SparseMatrix<T>) -> CsMat<T>
where
    T: Element,
{
    let mut row_ptr = Vec::with_capacity(matrix.rows() + 1);
    let mut col_idx = Vec::with_capacity(matrix.nnz());
    let mut values = Vec::with_capacity(matrix.nnz());

    row_ptr.push(0);
    for row in 0..matrix.rows() {
        for (col, value) in matrix.row_iter(row) {
            col_idx.push(col);
            values.push(value);
        }
        row_ptr.push(col_idx.len());
    }

    CsMat::new(matrix.shape(), row_ptr, col_idx, values)
}

/// Converts a sprs CsMat (CSR or CSC) to our sparse matrix
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs<T>(matrix: &CsMat<T>) -> Result<SparseMatrix<T>>
where
    T: Element,
{
    let (n_rows, n_cols) = matrix.shape();
    SparseMatrix::from_triplets(
        n_rows,
        n_cols,
        matrix.iter().map(|(&value, (row, col))| (row, col, value)),
    )
}

/// Expands a sparse matrix into a dense ndarray
pub fn to_dense<T>(matrix: &SparseMatrix<T>) -> Array2<T>
where
    T: Element,
{
    let mut dense = Array2::zeros(matrix.shape());
    for (row, col, value) in matrix.iter() {
        dense[[row, col]] = value;
    }
    dense
}

/// Collects the non-zero elements of a dense 2-D array into a sparse matrix
pub fn from_dense<T, S>(dense: &ArrayBase<S, Ix2>) -> Result<SparseMatrix<T>>
where
    T: Element,
    S: Data<Elem = T>,
{
    let (n_rows, n_cols) = dense.dim();
    SparseMatrix::from_triplets(
        n_rows,
        n_cols,
        dense
            .indexed_iter()
            .map(|((row, col), &value)| (row, col, value)),
    )
}
