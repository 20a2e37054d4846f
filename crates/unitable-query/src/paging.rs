//! Page arithmetic.

/// Number of pages needed to show `total` rows, `size` rows at a time.
///
/// Zero rows (or a zero page size) means zero pages.
///
/// ```
/// use unitable_query::total_pages;
///
/// assert_eq!(total_pages(20, 5), 4);
/// assert_eq!(total_pages(21, 5), 5);
/// assert_eq!(total_pages(0, 5), 0);
/// ```
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}
