//! Page slicing.

use crate::domain::{Issue, IssuePage};
use std::ops::Range;

/// `ceil(total / page_size)`; 0 when `total` is 0.
#[must_use]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Index range of `page` (1-based, values below 1 read as 1), clamped to
/// `total`. Pages past the end yield an empty range.
fn page_bounds(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

pub(super) fn paginate(sorted: &[&Issue], page: usize, page_size: usize) -> IssuePage {
    let total = sorted.len();
    let items = sorted[page_bounds(total, page, page_size)]
        .iter()
        .map(|issue| (*issue).clone())
        .collect();

    IssuePage {
        items,
        page: page.max(1),
        page_size,
        total,
        total_pages: total_pages(total, page_size),
    }
}
