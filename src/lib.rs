//! # pdfriffle
//!
//! Riffle-interleave the pages of a PDF document.
//!
//! The two halves of the document are merged page by page, so a document
//! with pages `[1, 2, 3, 4, 5, 6]` comes out as `[1, 4, 2, 5, 3, 6]`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfriffle::riffle_file;
//!
//! fn main() -> pdfriffle::Result<()> {
//!     let outcome = riffle_file("input.pdf", "output.pdf")?;
//!     if !outcome.is_completed() {
//!         eprintln!("nothing written: {:?}", outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`interleave`]: the riffle itself, over any [`PageSequence`]
//! - [`PdfDocument`]: a lopdf document with a flat, reorderable page list
//! - [`Splitter`]: cut a document into consecutive page ranges
//! - [`RifflePipeline`]: load, interleave, persist, reload, split, save

pub mod document;
pub mod error;
pub mod interleave;
pub mod pipeline;
pub mod split;

pub use document::{PageId, PageSequence, PdfDocument};
pub use error::{Error, Result};
pub use interleave::{expected_interleaved_count, interleave, InterleaveReport};
pub use pipeline::{Outcome, PipelineOptions, RifflePipeline, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use split::Splitter;

use std::path::Path;

/// Interleave the PDF at `input` and write the result to `output` using
/// default options.
///
/// # Example
///
/// ```no_run
/// use pdfriffle::riffle_file;
///
/// let outcome = riffle_file("scan.pdf", "riffled.pdf").unwrap();
/// println!("{}", outcome.to_json().unwrap());
/// ```
pub fn riffle_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Outcome> {
    RifflePipeline::default().process(input, output)
}

/// Interleave the PDF at `input` with custom options.
pub fn riffle_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: PipelineOptions,
) -> Result<Outcome> {
    RifflePipeline::new(options).process(input, output)
}
