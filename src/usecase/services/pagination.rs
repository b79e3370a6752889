use crate::domain::entities::table::PageItem;

const MAX_VISIBLE_PAGES: usize = 5;

/// Compact page links for a pager: all pages when there are few, otherwise
/// the first and last page with an ellipsis around a window near `current_page`.
///
/// `current_page` is 1-based.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current_page <= 3 {
        items.extend((1..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    } else if current_page >= total_pages - 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total_pages - 3..=total_pages).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((current_page - 1..=current_page + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total_pages));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::domain::entities::table::PageItem::{Ellipsis, Page};

    #[test]
    fn start_of_long_range() {
        assert_eq!(
            page_numbers(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn end_of_long_range() {
        assert_eq!(
            page_numbers(10, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn middle_of_long_range() {
        assert_eq!(
            page_numbers(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn boundaries_between_windows() {
        assert_eq!(
            page_numbers(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_numbers(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_numbers(4, 6),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn zero_pages_yields_nothing() {
        assert!(page_numbers(1, 0).is_empty());
    }

    proptest! {
        #[test]
        fn short_ranges_list_every_page(total in 0_usize..=5, current in 1_usize..=6) {
            let expected: Vec<PageItem> = (1..=total).map(Page).collect();
            prop_assert_eq!(page_numbers(current, total), expected);
        }

        #[test]
        fn long_ranges_always_show_first_and_last(total in 6_usize..500, offset in 0_usize..500) {
            let current = offset % total + 1;
            let items = page_numbers(current, total);
            prop_assert_eq!(items.first().copied(), Some(Page(1)));
            prop_assert_eq!(items.last().copied(), Some(Page(total)));
            prop_assert!(items.len() == 6 || items.len() == 7);
            prop_assert!(items.contains(&Page(current)));
        }
    }
}
