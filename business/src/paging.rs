//! Page arithmetic shared by every table view. Pages are 1-based.

use std::num::NonZeroUsize;
use std::ops::Range;

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of `page` within a collection of `len` rows.
pub fn page_range(page: usize, page_size: NonZeroUsize, len: usize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}
