/// Number of pages needed for `len` items; zero when there is nothing to show.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Pages are 1-based. Anything outside `1..=total_pages` falls back to 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if page == 0 || page > total_pages {
        1
    } else {
        page
    }
}

/// The `[(page-1)*size, min(page*size, len))` window, empty when out of range.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pages() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(1, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(13, 6), 3);
    }

    #[test]
    fn slices_last_partial_page() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(page_slice(&items, 1, 6), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(page_slice(&items, 2, 6), &[7]);
        assert!(page_slice(&items, 3, 6).is_empty());
        assert!(page_slice(&items, 0, 6).is_empty());
    }

    #[test]
    fn pages_concatenate_to_the_input() {
        let items: Vec<u32> = (0..23).collect();
        let pages = total_pages(items.len(), 5);
        let joined: Vec<u32> = (1..=pages)
            .flat_map(|p| page_slice(&items, p, 5).to_vec())
            .collect();
        assert_eq!(joined, items);
        assert!((1..=pages).all(|p| page_slice(&items, p, 5).len() <= 5));
    }

    #[test]
    fn out_of_range_pages_reset_to_first() {
        assert_eq!(clamp_page(3, 3), 3);
        assert_eq!(clamp_page(3, 1), 1);
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(2, 0), 1);
    }
}
