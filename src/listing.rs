// src/listing.rs

//! In-memory search, category filtering and pagination for list views.

use crate::models::ContentItem;

/// User-driven filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text search term; blank matches everything
    pub search: String,
    /// Category filter; `None` matches everything
    pub category: Option<String>,
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// Zero-based page index
    pub index: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }
}

/// Holds fetched items and derives the visible page from filter state.
pub struct ContentListController<T, P>
where
    P: Fn(&T, &ListQuery) -> bool,
{
    items: Vec<T>,
    predicate: P,
    query: ListQuery,
    page_size: usize,
    page_index: usize,
}

impl<T, P> ContentListController<T, P>
where
    P: Fn(&T, &ListQuery) -> bool,
{
    /// A `page_size` of zero is treated as one.
    pub fn new(items: Vec<T>, page_size: usize, predicate: P) -> Self {
        Self {
            items,
            predicate,
            query: ListQuery::default(),
            page_size: page_size.max(1),
            page_index: 0,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the items, keeping filters and returning to the first page.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page_index = 0;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.page_index = 0;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.query.category = category;
        self.page_index = 0;
    }

    /// Items passing the current filters, in original order.
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| (self.predicate)(*item, &self.query))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// Jump to a page, clamped to the available range.
    pub fn go_to(&mut self, index: usize) {
        self.page_index = index.min(self.total_pages().saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page_index + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page_index.saturating_sub(1));
    }

    /// The current page.
    pub fn page(&self) -> Page<'_, T> {
        let filtered = self.filtered();
        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(self.page_size);
        let index = self.page_index.min(total_pages.saturating_sub(1));
        let items = filtered
            .into_iter()
            .skip(index * self.page_size)
            .take(self.page_size)
            .collect();
        Page {
            items,
            index,
            total_pages,
            total_items,
        }
    }
}

/// Default predicate for content items.
///
/// The search term matches case-insensitively as a substring of the title,
/// description, category or any tag. The category filter compares
/// case-insensitively.
pub fn matches_content_item(item: &ContentItem, query: &ListQuery) -> bool {
    if let Some(wanted) = &query.category {
        let wanted = wanted.to_lowercase();
        let same = item
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == wanted);
        if !same {
            return false;
        }
    }

    let term = query.search.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let contains = |text: &str| text.to_lowercase().contains(&term);
    contains(&item.title)
        || item.description.as_deref().is_some_and(contains)
        || item.category.as_deref().is_some_and(contains)
        || item.tags.iter().any(|tag| contains(tag))
}

/// Controller over content items with the default predicate.
pub fn content_list(
    items: Vec<ContentItem>,
    page_size: usize,
) -> ContentListController<ContentItem, fn(&ContentItem, &ListQuery) -> bool> {
    ContentListController::new(items, page_size, matches_content_item)
}
