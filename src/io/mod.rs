//! Reading and writing matrices as text

pub mod text;

pub use text::{parse_lines, TextFormat};
