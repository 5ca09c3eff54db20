//! Document model: a flat, position-addressed view over a PDF page tree.

mod pdf;
mod sequence;

pub use pdf::{PageId, PdfDocument};
pub use sequence::PageSequence;
