//! Search and pagination over name lists.
//!
//! Pure data transforms for the list view; no I/O. The store hands over an
//! alphabetically sorted list and these functions narrow it.

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 15;
pub const MAX_PER_PAGE: usize = 100;

/// Keep the names containing `search` as a substring.
///
/// An empty search term keeps everything; matching is case-sensitive, the
/// way site names are stored.
pub fn filter_names<'a>(names: &'a [String], search: &str) -> Vec<&'a String> {
    names.iter().filter(|name| name.contains(search)).collect()
}

/// Slice one page out of a filtered list.
///
/// Pages are 1-based; `page` is clamped to at least 1 and `per_page` to
/// `1..=MAX_PER_PAGE`. A page past the end is empty, not an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + per_page).min(items.len());
    items[start..end].to_vec()
}
