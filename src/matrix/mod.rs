// Matrix data structure and arithmetic

pub mod element;
pub mod ops;
pub mod sparse;

pub use element::Element;
pub use ops::Operation;
pub use sparse::SparseMatrix;
