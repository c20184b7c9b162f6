//! Canonical text format reader/writer
//!
//! ```text
//! rows=<non-negative integer>
//! cols=<non-negative integer>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! Blank lines are ignored on input. Output lists only non-zero entries,
//! sorted ascending by `(row, col)`, so rendering is deterministic and
//! round-trips exactly.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::{MatrixError, Result};
use crate::matrix::{Element, SparseMatrix};

const EXPECTED_ROWS: &str = "expected `rows=<non-negative integer>`";
const EXPECTED_COLS: &str = "expected `cols=<non-negative integer>`";
const EXPECTED_PARENS: &str = "entry must be wrapped in parentheses";
const EXPECTED_THREE_FIELDS: &str = "entry must have exactly three comma-separated fields";
const EXPECTED_INTEGERS: &str = "entry fields must be integers";

/// Parses a matrix from a sequence of text lines
///
/// Lines are trimmed and blank lines skipped. The first two remaining lines
/// are the `rows=` and `cols=` headers; every further line is one
/// `(row, col, value)` entry. Zero-valued entries are dropped before they
/// reach the matrix; every other entry is written with [`SparseMatrix::set`].
/// A repeated cell therefore keeps the last non-zero value, and a zero entry
/// never clears an earlier one.
///
/// Headers must start with `rows=` / `cols=` with no space before the `=`;
/// whitespace around the number is allowed.
///
/// # Errors
///
/// - [`MatrixError::Format`] for a missing or malformed header or entry line,
///   carrying the 1-based line number
/// - [`MatrixError::IndexOutOfBounds`] for a non-zero entry outside the
///   declared dimensions, negative indices included
///
/// No partially built matrix is ever returned.
///
/// # Examples
///
/// ```
/// use sparse_matrix::{parse_lines, SparseMatrix};
///
/// let m: SparseMatrix = parse_lines(["rows=2", "cols=2", "", "(1, 0, 9)"]).unwrap();
/// assert_eq!(m.get(1, 0), 9);
/// ```
pub fn parse_lines<T, I, S>(lines: I) -> Result<SparseMatrix<T>>
where
    T: Element,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut numbered = lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.as_ref().trim().is_empty());

    let (rows_line, line) = numbered
        .next()
        .ok_or_else(|| MatrixError::format(1, "", EXPECTED_ROWS))?;
    let rows = parse_header(rows_line, line.as_ref().trim(), "rows", EXPECTED_ROWS)?;

    let (cols_line, line) = numbered
        .next()
        .ok_or_else(|| MatrixError::format(rows_line + 1, "", EXPECTED_COLS))?;
    let cols = parse_header(cols_line, line.as_ref().trim(), "cols", EXPECTED_COLS)?;

    debug!("parsed header: {}x{}", rows, cols);

    let mut matrix = SparseMatrix::new(rows, cols);
    let mut entry_lines = 0usize;

    for (line_no, line) in numbered {
        let line = line.as_ref().trim();
        let (row, col, value) = parse_entry::<T>(line_no, line)?;
        entry_lines += 1;

        if value.is_zero() {
            trace!("line {}: dropping zero entry ({}, {})", line_no, row, col);
            continue;
        }

        let out_of_range = || MatrixError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        };
        let r = usize::try_from(row).map_err(|_| out_of_range())?;
        let c = usize::try_from(col).map_err(|_| out_of_range())?;
        matrix.set(r, c, value)?;
    }

    debug!(
        "parsed {} entry lines into {} non-zeros",
        entry_lines,
        matrix.nnz()
    );

    Ok(matrix)
}

/// Parses `key=<usize>`; the key and `=` must be adjacent
fn parse_header(line_no: usize, line: &str, key: &str, reason: &'static str) -> Result<usize> {
    let invalid = || MatrixError::format(line_no, line, reason);

    let value = line
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(invalid)?
        .trim();

    // `usize::from_str` takes a leading `+`, the format does not
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    value.parse().map_err(|_| invalid())
}

/// Parses `(<int>, <int>, <int>)`
///
/// Indices are read as wide signed integers so that negative or oversized
/// indices surface as index errors rather than format errors.
fn parse_entry<T: Element>(line_no: usize, line: &str) -> Result<(i128, i128, T)> {
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| MatrixError::format(line_no, line, EXPECTED_PARENS))?;

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [row, col, value] = fields.as_slice() else {
        return Err(MatrixError::format(line_no, line, EXPECTED_THREE_FIELDS));
    };

    let not_integer = |_| MatrixError::format(line_no, line, EXPECTED_INTEGERS);
    let row = row.parse::<i128>().map_err(not_integer)?;
    let col = col.parse::<i128>().map_err(not_integer)?;
    let value = value
        .parse::<T>()
        .map_err(|_| MatrixError::format(line_no, line, EXPECTED_INTEGERS))?;

    Ok((row, col, value))
}

/// Renders the canonical text form, without a trailing newline
impl<T: Element> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows={}\ncols={}", self.rows(), self.cols())?;
        for (row, col, value) in self.iter() {
            write!(f, "\n({}, {}, {})", row, col, value)?;
        }
        Ok(())
    }
}

impl<T: Element> FromStr for SparseMatrix<T> {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        parse_lines(s.lines())
    }
}

/// Reader/writer for the canonical text format
pub struct TextFormat;

impl TextFormat {
    /// Read a matrix from any buffered reader
    pub fn read<T: Element, R: BufRead>(reader: R) -> Result<SparseMatrix<T>> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        parse_lines(lines)
    }

    /// Write a matrix exactly as its `Display` form, with no trailing newline
    pub fn write<T: Element, W: Write>(mut writer: W, matrix: &SparseMatrix<T>) -> Result<()> {
        write!(writer, "{}", matrix)?;
        Ok(())
    }

    /// Read a matrix from a file
    pub fn read_file<T: Element, P: AsRef<Path>>(path: P) -> Result<SparseMatrix<T>> {
        let path = path.as_ref();
        debug!("reading matrix from {}", path.display());

        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Write a matrix to a file, replacing any existing content
    ///
    /// The file holds the canonical text with no trailing newline.
    pub fn write_file<T: Element, P: AsRef<Path>>(path: P, matrix: &SparseMatrix<T>) -> Result<()> {
        let path = path.as_ref();
        debug!(
            "writing {}x{} matrix ({} non-zeros) to {}",
            matrix.rows(),
            matrix.cols(),
            matrix.nnz(),
            path.display()
        );

        let mut writer = BufWriter::new(File::create(path)?);
        Self::write(&mut writer, matrix)?;
        writer.flush()?;
        Ok(())
    }
}
