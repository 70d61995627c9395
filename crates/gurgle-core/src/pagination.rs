//! Pagination planning for search result navigation.
//!
//! A plan is an ordered list of page numbers and gap markers. Small result
//! sets list every page; larger ones use a fixed seven-slot layout.

use serde::{Deserialize, Serialize};

/// Result sets with at most this many pages list every page.
pub const FULL_PLAN_MAX_PAGES: i64 = 7;

/// Pages `1..=HEAD_WINDOW` count as "near the start".
const HEAD_WINDOW: i64 = 3;

/// Pages within this distance of the last page count as "near the end".
const TAIL_WINDOW: i64 = 2;

/// One navigation slot.
///
/// Serializes as the page number, or `null` for a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSlot {
    Page(i64),
    Gap,
}

/// Ordered navigation slots for a result set.
pub type PaginationPlan = Vec<PageSlot>;

/// Build the navigation plan for `current_page` of `total_pages`.
///
/// Returns `None` when either value is zero (or negative); callers then
/// suppress pagination entirely.
pub fn plan(current_page: i64, total_pages: i64) -> Option<PaginationPlan> {
    if current_page <= 0 || total_pages <= 0 {
        return None;
    }

    if total_pages <= FULL_PLAN_MAX_PAGES {
        return Some((1..=total_pages).map(PageSlot::Page).collect());
    }

    use PageSlot::{Gap, Page};

    if current_page <= HEAD_WINDOW || total_pages - current_page <= TAIL_WINDOW {
        return Some(vec![
            Page(1),
            Page(2),
            Page(3),
            Gap,
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ]);
    }

    Some(vec![
        Page(1),
        Page(2),
        Gap,
        Page(current_page),
        Gap,
        Page(total_pages - 1),
        Page(total_pages),
    ])
}

/// Row offset for a 1-based page; pages below 1 are treated as page 1.
///
/// Saturates at `i64::MAX` for pages far past any real result set.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(0))
}

/// Number of pages needed for `total_count` results.
///
/// Zero when there are no results or the page size is not positive.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 || page_size <= 0 {
        return 0;
    }
    total_count / page_size + i64::from(total_count % page_size != 0)
}
