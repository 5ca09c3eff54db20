//! Positional page sequence abstraction.
//!
//! The interleave engine only needs three operations from a document:
//! count the pages, look one up by position, and insert a reference after a
//! position. Keeping them behind a trait lets the engine run against a real
//! PDF page tree or a plain vector.

use crate::error::{Error, Result};

/// An ordered, position-addressed sequence of page references.
pub trait PageSequence {
    /// Opaque page reference. Copying it never copies page content.
    type Page: Copy;

    /// Current number of positions in the sequence.
    fn page_count(&self) -> usize;

    /// Reference at a 0-based position.
    fn page_at(&self, index: usize) -> Result<Self::Page>;

    /// Insert `page` immediately after `position`.
    ///
    /// Insertion is additive: if `page` already occupies another position it
    /// stays there, so the same content becomes reachable twice.
    fn insert_after(&mut self, page: Self::Page, position: usize) -> Result<()>;
}

impl<T: Copy> PageSequence for Vec<T> {
    type Page = T;

    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_at(&self, index: usize) -> Result<T> {
        self.get(index)
            .copied()
            .ok_or(Error::PageOutOfRange(index, self.len()))
    }

    fn insert_after(&mut self, page: T, position: usize) -> Result<()> {
        if position >= self.len() {
            return Err(Error::PageOutOfRange(position, self.len()));
        }
        self.insert(position + 1, page);
        Ok(())
    }
}
