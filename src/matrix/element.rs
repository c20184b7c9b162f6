//! Element types a sparse matrix can hold

use num_traits::PrimInt;
use std::fmt;
use std::str::FromStr;

/// Integer types that can be stored in a [`SparseMatrix`](super::SparseMatrix)
///
/// `PrimInt` brings zero/one and the checked operations used by the
/// arithmetic routines; `FromStr` and `Display` cover the text format.
/// Implemented for every primitive integer type.
pub trait Element: PrimInt + FromStr + fmt::Display + fmt::Debug + Default {}

impl<T> Element for T where T: PrimInt + FromStr + fmt::Display + fmt::Debug + Default {}
