use std::collections::VecDeque;

use crate::page_view::PageView;

/// Bounded most-recent view of pageviews, newest first.
///
/// Pushing past capacity drops the oldest entry.
#[derive(Debug, Clone)]
pub struct RecentPageViews {
    capacity: usize,
    items: VecDeque<PageView>,
}

impl RecentPageViews {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: VecDeque::with_capacity(capacity) }
    }

    /// Seed from rows ordered oldest first.
    #[must_use]
    pub fn from_oldest_first(capacity: usize, rows: impl IntoIterator<Item = PageView>) -> Self {
        let mut view = Self::new(capacity);
        for row in rows {
            view.push(row);
        }
        view
    }

    pub fn push(&mut self, view: PageView) {
        if self.capacity == 0 {
            return;
        }
        self.items.push_front(view);
        self.items.truncate(self.capacity);
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &PageView> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
