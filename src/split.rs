//! Split a document into consecutive page chunks.

use std::ops::Range;

use crate::document::PdfDocument;
use crate::error::{Error, Result};

/// Splits pages `start_page..=end_page` (1-based) into documents of at most
/// `split_at_page` pages each.
///
/// An end page past the document's last page is clamped to it.
///
/// # Example
///
/// ```no_run
/// use pdfriffle::{PdfDocument, Splitter};
///
/// let doc = PdfDocument::load("document.pdf")?;
/// let parts = Splitter::new()
///     .with_start_page(1)
///     .with_end_page(4)
///     .with_split_at_page(5)
///     .split(&doc)?;
/// assert_eq!(parts.len(), 1);
/// # Ok::<(), pdfriffle::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    /// First page to include (1-based)
    pub start_page: usize,
    /// Last page to include (1-based); `None` means the last page
    pub end_page: Option<usize>,
    /// Pages per output document
    pub split_at_page: usize,
}

impl Splitter {
    /// Create a splitter producing one document per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first page to include.
    pub fn with_start_page(mut self, page: usize) -> Self {
        self.start_page = page;
        self
    }

    /// Set the last page to include.
    pub fn with_end_page(mut self, page: usize) -> Self {
        self.end_page = Some(page);
        self
    }

    /// Set how many pages go into each output document.
    pub fn with_split_at_page(mut self, pages: usize) -> Self {
        self.split_at_page = pages;
        self
    }

    /// 0-based position ranges of each output document.
    pub fn chunk_ranges(&self, page_count: usize) -> Result<Vec<Range<usize>>> {
        if self.start_page == 0 {
            return Err(Error::InvalidSplit("start page must be at least 1".to_string()));
        }
        if self.split_at_page == 0 {
            return Err(Error::InvalidSplit(
                "split size must be at least 1 page".to_string(),
            ));
        }
        let end_page = self.end_page.unwrap_or(page_count);
        if end_page < self.start_page {
            return Err(Error::InvalidSplit(format!(
                "end page {} is before start page {}",
                end_page, self.start_page
            )));
        }
        if self.start_page > page_count {
            return Err(Error::InvalidSplit(format!(
                "start page {} is beyond the last page {}",
                self.start_page, page_count
            )));
        }

        let end = end_page.min(page_count);
        Ok((self.start_page - 1..end)
            .step_by(self.split_at_page)
            .map(|from| from..(from + self.split_at_page).min(end))
            .collect())
    }

    /// Split `doc` into independent documents.
    pub fn split(&self, doc: &PdfDocument) -> Result<Vec<PdfDocument>> {
        let ranges = self.chunk_ranges(doc.page_count())?;
        log::debug!(
            "splitting {} pages into {} document(s)",
            doc.page_count(),
            ranges.len()
        );

        Ok(ranges
            .into_iter()
            .map(|range| doc.with_pages(doc.page_ids()[range].to_vec()))
            .collect())
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            start_page: 1,
            end_page: None,
            split_at_page: 1,
        }
    }
}
