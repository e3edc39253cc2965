//! Pagination math.

use serde::Serialize;

/// Pages shown before and after the current one in the pager window.
const PAGE_WINDOW: usize = 5;

/// One entry of the pager window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// 1-based page number.
    pub page_num: usize,
    /// Whether this is the requested page.
    pub current: bool,
}

/// Paging metadata for one results page.
///
/// Field names are the contract with the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Total number of hits.
    pub total_entries: usize,
    /// 1-based index of the first hit on this page.
    pub start_num: usize,
    /// 1-based index of the last hit on this page (inclusive).
    pub stop_num: usize,
    /// Previous page number, or 0 on the first page.
    pub prev_page: usize,
    /// Next page number, or 0 on the last page.
    pub next_page: usize,
    /// Whether this is the first page.
    pub first_page: bool,
    /// Whether this is (at or beyond) the last page.
    pub last_page: bool,
    /// Pager window around the current page; empty when there is only one page.
    pub pages: Vec<PageLink>,
}

impl PageInfo {
    /// Returns the 0-based offset of the first hit, for seeking a hit cursor.
    pub fn offset(&self) -> usize {
        self.start_num.saturating_sub(1)
    }

    /// Returns the number of hits on this page.
    pub fn len(&self) -> usize {
        (self.stop_num + 1).saturating_sub(self.start_num)
    }

    /// Returns true if the page holds no hits.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes paging metadata.
///
/// A `page_size` of 0 puts every hit on one page. `requested_page` is 1-based;
/// 0 is treated as 1. Pages past the end are not clamped and yield an empty
/// window of hits.
pub fn paginate(total_hits: usize, page_size: usize, requested_page: usize) -> PageInfo {
    let page = requested_page.max(1);

    if page_size == 0 {
        return PageInfo {
            total_entries: total_hits,
            start_num: 1,
            stop_num: total_hits,
            prev_page: 0,
            next_page: 0,
            first_page: true,
            last_page: true,
            pages: Vec::new(),
        };
    }

    let last_page_number = total_hits.div_ceil(page_size).max(1);
    let start_num = (page - 1).saturating_mul(page_size).saturating_add(1);
    let stop_num = start_num
        .saturating_add(page_size - 1)
        .min(total_hits);

    let low = page.saturating_sub(PAGE_WINDOW).max(1);
    let high = page.saturating_add(PAGE_WINDOW).min(last_page_number);
    let pages = if high > low {
        (low..=high)
            .map(|page_num| PageLink {
                page_num,
                current: page_num == page,
            })
            .collect()
    } else {
        Vec::new()
    };

    PageInfo {
        total_entries: total_hits,
        start_num,
        stop_num,
        prev_page: if page > 1 { page - 1 } else { 0 },
        next_page: if page < last_page_number { page + 1 } else { 0 },
        first_page: page == 1,
        last_page: page >= last_page_number,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_nums(info: &PageInfo) -> Vec<usize> {
        info.pages.iter().map(|p| p.page_num).collect()
    }

    #[test]
    fn first_of_two_single_hit_pages() {
        let info = paginate(2, 1, 1);
        assert_eq!(info.start_num, 1);
        assert_eq!(info.stop_num, 1);
        assert_eq!(info.next_page, 2);
        assert_eq!(info.prev_page, 0);
        assert!(info.first_page);
        assert!(!info.last_page);
        assert_eq!(
            info.pages,
            vec![
                PageLink {
                    page_num: 1,
                    current: true
                },
                PageLink {
                    page_num: 2,
                    current: false
                }
            ]
        );
    }

    #[test]
    fn second_of_two_single_hit_pages() {
        let info = paginate(2, 1, 2);
        assert_eq!(info.start_num, 2);
        assert_eq!(info.stop_num, 2);
        assert_eq!(info.next_page, 0);
        assert_eq!(info.prev_page, 1);
        assert!(!info.first_page);
        assert!(info.last_page);
    }

    #[test]
    fn single_page_has_no_window() {
        let info = paginate(2, 10, 1);
        assert!(info.pages.is_empty());
        assert_eq!((info.start_num, info.stop_num), (1, 2));
        assert!(info.first_page && info.last_page);
    }

    #[test]
    fn zero_page_size_is_one_page() {
        let info = paginate(37, 0, 3);
        assert_eq!((info.start_num, info.stop_num), (1, 37));
        assert_eq!((info.prev_page, info.next_page), (0, 0));
        assert!(info.first_page && info.last_page);
        assert!(info.pages.is_empty());
    }

    #[test]
    fn window_clipped_to_bounds() {
        let info = paginate(1000, 10, 50);
        assert_eq!(page_nums(&info), (45..=55).collect::<Vec<_>>());
        assert!(info.pages.iter().filter(|p| p.current).all(|p| p.page_num == 50));

        let info = paginate(95, 10, 2);
        assert_eq!(page_nums(&info), (1..=7).collect::<Vec<_>>());

        let info = paginate(95, 10, 10);
        assert_eq!(page_nums(&info), (5..=10).collect::<Vec<_>>());
    }

    #[test]
    fn partial_last_page() {
        let info = paginate(25, 10, 3);
        assert_eq!((info.start_num, info.stop_num), (21, 25));
        assert_eq!(info.len(), 5);
        assert_eq!(info.offset(), 20);
    }

    #[test]
    fn no_hits() {
        let info = paginate(0, 10, 1);
        assert_eq!(info.total_entries, 0);
        assert_eq!((info.start_num, info.stop_num), (1, 0));
        assert!(info.is_empty());
        assert!(info.first_page && info.last_page);
        assert_eq!(info.next_page, 0);
        assert!(info.pages.is_empty());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let info = paginate(15, 10, 4);
        assert!(info.is_empty());
        assert!(info.last_page);
        assert_eq!(info.prev_page, 3);
        assert_eq!(page_nums(&info), vec![1, 2]);
    }

    #[test]
    fn page_zero_treated_as_first() {
        assert_eq!(paginate(30, 10, 0), paginate(30, 10, 1));
    }

    #[test]
    fn serialized_field_names() {
        let json = serde_json::to_value(paginate(2, 1, 1)).unwrap();
        for key in [
            "total_entries",
            "start_num",
            "stop_num",
            "prev_page",
            "next_page",
            "first_page",
            "last_page",
            "pages",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["pages"][0]["page_num"], 1);
        assert_eq!(json["pages"][0]["current"], true);
    }
}
