//! Slice derivation (pure).
//!
//! These never panic: out-of-range pages and counts are clamped to the
//! bounds of the source list.

use super::types::PageSize;

/// `ceil(len / page_size)`; zero for an empty list.
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get())
}

/// Items on 1-based `page`: `source[(page-1)*size .. page*size]`.
///
/// Page `0` is treated as page `1`. A page past the end yields an empty
/// slice.
pub fn derive_paged_slice<T>(source: &[T], page_size: PageSize, page: usize) -> &[T] {
    let size = page_size.get();
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    if start >= source.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(source.len());
    &source[start..end]
}

/// First `displayed_count` items of `source`.
pub fn derive_infinite_slice<T>(source: &[T], displayed_count: usize) -> &[T] {
    &source[..displayed_count.min(source.len())]
}

/// Clamp a requested 1-based page into `[1, total_pages]`.
///
/// Stays at `1` when there are no pages.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}
