//! Catalog controller: pure filter / paginate / page-button functions over the
//! registry's metadata. No hidden state.

pub mod handlers;

use serde::Serialize;

use crate::registry::TemplateMeta;

pub const ALL_CATEGORIES: &str = "all";

/// A template matches when the category is "all" or equal to its own, and the query
/// is empty or occurs (case-insensitively) in its label or description.
pub fn filter<'a>(all: &'a [TemplateMeta], category: &str, query: &str) -> Vec<&'a TemplateMeta> {
    let category = category.trim();
    let needle = query.trim().to_lowercase();
    all.iter()
        .filter(|t| {
            category.is_empty()
                || category.eq_ignore_ascii_case(ALL_CATEGORIES)
                || t.category.eq_ignore_ascii_case(category)
        })
        .filter(|t| {
            needle.is_empty()
                || t.label.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Distinct categories in registry order, preceded by "all".
pub fn categories(all: &[TemplateMeta]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for t in all {
        if !out.iter().any(|c| c == &t.category) {
            out.push(t.category.clone());
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window<T> {
    pub items: Vec<T>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// 1-based page window. `page_number` is clamped to `[1, ceil(len / page_size)]`;
/// a page size of 0 behaves as 1.
pub fn paginate<T: Clone>(subset: &[T], page_size: usize, page_number: usize) -> Window<T> {
    let size = page_size.max(1);
    let total_pages = page_count(subset.len(), size);
    let page = page_number.clamp(1, total_pages.max(1));
    let start = ((page - 1) * size).min(subset.len());
    let end = (start + size).min(subset.len());
    Window {
        items: subset[start..end].to_vec(),
        page,
        total_pages,
        total_items: subset.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageButton {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageButton::Page(n) => serializer.serialize_u64(*n as u64),
            PageButton::Ellipsis => serializer.serialize_str("\u{2026}"),
        }
    }
}

/// First, last, current and its neighbours. A hole of exactly one page shows that
/// page; any larger hole collapses to a single ellipsis.
pub fn page_buttons(total: usize, current: usize) -> Vec<PageButton> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut pages = vec![1, current.saturating_sub(1), current, current + 1, total];
    pages.retain(|p| (1..=total).contains(p));
    pages.sort_unstable();
    pages.dedup();

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<usize> = None;
    for p in pages {
        if let Some(prev) = prev {
            match p - prev {
                1 => {}
                2 => out.push(PageButton::Page(prev + 1)),
                _ => out.push(PageButton::Ellipsis),
            }
        }
        out.push(PageButton::Page(p));
        prev = Some(p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TemplateRegistry;
    use PageButton::{Ellipsis, Page};

    fn meta(id: &str, category: &str, description: &str) -> TemplateMeta {
        TemplateMeta {
            id: id.to_string(),
            label: id.to_uppercase(),
            description: description.to_string(),
            category: category.to_string(),
            is_popular: false,
            is_new: false,
        }
    }

    // ── filter ──────────────────────────────────────────────────────────────

    #[test]
    fn test_filter_query_is_case_insensitive() {
        let all = vec![
            meta("a", "modern", "A software engineer template"),
            meta("b", "simple", "For designers"),
        ];
        let hits = filter(&all, "all", "ENGINEER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_filter_combines_category_and_query() {
        let all = vec![
            meta("a", "modern", "clean"),
            meta("b", "simple", "clean"),
            meta("c", "modern", "bold"),
        ];
        let ids = |v: Vec<&TemplateMeta>| v.into_iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(filter(&all, "modern", "")), vec!["a", "c"]);
        assert_eq!(ids(filter(&all, "modern", "clean")), vec!["a"]);
        assert_eq!(ids(filter(&all, "all", "")), vec!["a", "b", "c"]);
        assert!(filter(&all, "creative", "").is_empty());
    }

    #[test]
    fn test_filter_matches_label() {
        let all = vec![meta("tech", "modern", "")];
        assert_eq!(filter(&all, "all", "Tec").len(), 1);
    }

    #[test]
    fn test_categories_starts_with_all_and_dedups() {
        let cats = categories(&TemplateRegistry::builtin().unwrap().list());
        assert_eq!(cats[0], "all");
        assert_eq!(cats, vec!["all", "professional", "modern", "simple", "creative"]);
    }

    // ── paginate ────────────────────────────────────────────────────────────

    #[test]
    fn test_paginate_first_page() {
        let items: Vec<u32> = (1..=30).collect();
        let w = paginate(&items, 12, 1);
        assert_eq!(w.items, (1..=12).collect::<Vec<_>>());
        assert_eq!(w.total_pages, 3);
    }

    #[test]
    fn test_paginate_clamps_page_number() {
        let items: Vec<u32> = (1..=30).collect();
        assert_eq!(paginate(&items, 12, 99).items, (25..=30).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 12, 99).page, 3);
        assert_eq!(paginate(&items, 12, 0).page, 1);
    }

    #[test]
    fn test_paginate_empty_and_zero_size() {
        let empty: Vec<u32> = Vec::new();
        let w = paginate(&empty, 12, 4);
        assert!(w.items.is_empty());
        assert_eq!((w.page, w.total_pages), (1, 0));

        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 0, 2).items, vec![2]);
    }

    // ── page buttons ────────────────────────────────────────────────────────

    #[test]
    fn test_page_buttons_middle() {
        assert_eq!(
            page_buttons(10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_page_buttons_small_totals_have_no_ellipsis() {
        assert_eq!(page_buttons(1, 1), vec![Page(1)]);
        assert_eq!(page_buttons(2, 1), vec![Page(1), Page(2)]);
        assert_eq!(page_buttons(3, 1), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_buttons(3, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_page_buttons_single_gap_shows_the_page() {
        // 1 _ 3 4 5 → the hole is exactly page 2
        assert_eq!(
            page_buttons(5, 4),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(
            page_buttons(10, 1),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_page_buttons_never_double_ellipsis() {
        for total in 0..40 {
            for current in 0..=total + 1 {
                let buttons = page_buttons(total, current);
                assert!(
                    !buttons.windows(2).any(|w| w == [Ellipsis, Ellipsis]),
                    "{total}/{current}: {buttons:?}"
                );
                if total > 0 {
                    assert_eq!(buttons.first(), Some(&Page(1)));
                    assert_eq!(buttons.last(), Some(&Page(total)));
                }
            }
        }
    }

    #[test]
    fn test_page_buttons_serialize_ellipsis_marker() {
        let json = serde_json::to_string(&page_buttons(10, 5)).unwrap();
        assert_eq!(json, "[1,\"\u{2026}\",4,5,6,\"\u{2026}\",10]");
    }
}
