//! Riffle interleave of a page sequence.
//!
//! The first and second halves of the sequence are merged by inserting, after
//! every even position `i`, a reference to the page found at `i + half`.
//! Insertion is additive, so the sequence grows from `2 * half` to
//! `3 * half` positions. The first `2 * half` positions then hold the riffle
//! `[0, h, 1, h + 1, ...]` and the trailing `half` positions are leftovers
//! that the split step discards.

use serde::Serialize;

use crate::document::PageSequence;
use crate::error::{Error, Result};

/// Smallest page count the interleave accepts (two pairs).
pub const MIN_PAGE_COUNT: usize = 4;

/// Summary of a successful interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterleaveReport {
    /// Page count before the interleave
    pub original_count: usize,
    /// Size of each half
    pub half: usize,
    /// Page count after the interleave, always `3 * half`
    pub interleaved_count: usize,
}

/// Check the interleave preconditions without touching any document.
pub fn validate_page_count(page_count: usize) -> Result<()> {
    if page_count % 2 != 0 {
        return Err(Error::OddPageCount(page_count));
    }
    if page_count < MIN_PAGE_COUNT {
        return Err(Error::TooFewPages(page_count));
    }
    Ok(())
}

/// Page count the interleave must end with.
pub fn expected_interleaved_count(page_count: usize) -> usize {
    3 * (page_count / 2)
}

/// Interleave `seq` in place.
///
/// `page_count` is the sequence's current length. Nothing is mutated when a
/// precondition fails. When the post-condition fails the sequence has
/// already been mutated and must be discarded by the caller.
pub fn interleave<S>(seq: &mut S, page_count: usize) -> Result<InterleaveReport>
where
    S: PageSequence + ?Sized,
{
    validate_page_count(page_count)?;

    let half = page_count / 2;
    log::debug!("interleaving {} pages, half = {}", page_count, half);

    for stable_index in (0..page_count).step_by(2) {
        let move_index = stable_index + half;
        let page = seq.page_at(move_index)?;
        seq.insert_after(page, stable_index)?;
    }

    let expected = expected_interleaved_count(page_count);
    let actual = seq.page_count();
    if actual != expected {
        return Err(Error::UnexpectedPageCount { expected, actual });
    }

    Ok(InterleaveReport {
        original_count: page_count,
        half,
        interleaved_count: actual,
    })
}

/// Source positions of the first `page_count` pages after an interleave.
///
/// ```
/// use pdfriffle::interleave::riffle_order;
///
/// assert_eq!(riffle_order(6).unwrap(), vec![0, 3, 1, 4, 2, 5]);
/// ```
pub fn riffle_order(page_count: usize) -> Result<Vec<usize>> {
    let mut order: Vec<usize> = (0..page_count).collect();
    interleave(&mut order, page_count)?;
    order.truncate(page_count);
    Ok(order)
}
