use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::page_view::PageView;

/// How often a page starts and ends a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFlow {
    pub page_url: String,
    pub entries: u64,
    pub exits: u64,
}

/// Entry and exit counts per page, most entries first, ties by URL.
///
/// Within a session views are ordered by `created_at` then `id`, so input
/// order does not matter. A single-view session counts as both entry and exit.
#[must_use]
pub fn page_flow(page_views: &[PageView], limit: usize) -> Vec<PageFlow> {
    let mut bounds: HashMap<&str, (&PageView, &PageView)> = HashMap::new();
    for view in page_views {
        bounds
            .entry(view.session_id.as_str())
            .and_modify(|(first, last)| {
                if view.visit_order() < first.visit_order() {
                    *first = view;
                }
                if view.visit_order() > last.visit_order() {
                    *last = view;
                }
            })
            .or_insert((view, view));
    }

    let mut pages: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for (first, last) in bounds.values() {
        pages.entry(first.page_url.as_str()).or_default().0 += 1;
        pages.entry(last.page_url.as_str()).or_default().1 += 1;
    }

    let mut flow: Vec<PageFlow> = pages
        .into_iter()
        .map(|(url, (entries, exits))| PageFlow { page_url: url.to_owned(), entries, exits })
        .collect();
    // Stable sort keeps the BTreeMap's URL order among equal entry counts.
    flow.sort_by(|a, b| b.entries.cmp(&a.entries));
    flow.truncate(limit);
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::{at, view};

    #[test]
    fn revisited_entry_page_is_entry_and_exit() {
        let views = vec![
            view(1, "s", "A", at(2024, 1, 1, 9, 0)),
            view(2, "s", "B", at(2024, 1, 1, 9, 1)),
            view(3, "s", "A", at(2024, 1, 1, 9, 2)),
        ];
        let flow = page_flow(&views, 10);
        assert_eq!(flow, vec![PageFlow { page_url: "A".to_owned(), entries: 1, exits: 1 }]);
    }

    #[test]
    fn single_view_session_counts_both_ways() {
        let views = vec![view(1, "s", "/only", at(2024, 1, 1, 9, 0))];
        let flow = page_flow(&views, 10);
        assert_eq!(flow[0].entries, 1);
        assert_eq!(flow[0].exits, 1);
    }

    #[test]
    fn same_timestamp_breaks_on_id() {
        let t = at(2024, 1, 1, 9, 0);
        let views = vec![view(7, "s", "/second", t), view(3, "s", "/first", t)];
        let flow = page_flow(&views, 10);
        let first = flow.iter().find(|f| f.page_url == "/first").unwrap();
        let second = flow.iter().find(|f| f.page_url == "/second").unwrap();
        assert_eq!((first.entries, first.exits), (1, 0));
        assert_eq!((second.entries, second.exits), (0, 1));
    }

    #[test]
    fn sorted_by_entries_then_url_and_truncated() {
        let t = at(2024, 1, 1, 9, 0);
        let views = vec![
            view(1, "a", "/z", t),
            view(2, "b", "/z", t),
            view(3, "c", "/b", t),
            view(4, "d", "/a", t),
            view(5, "e", "/c", t),
        ];
        let flow = page_flow(&views, 3);
        let urls: Vec<&str> = flow.iter().map(|f| f.page_url.as_str()).collect();
        assert_eq!(urls, vec!["/z", "/a", "/b"]);
    }

    #[test]
    fn exit_only_pages_are_listed() {
        let views = vec![
            view(1, "s", "/in", at(2024, 1, 1, 9, 0)),
            view(2, "s", "/out", at(2024, 1, 1, 9, 5)),
        ];
        let flow = page_flow(&views, 10);
        assert_eq!(flow.len(), 2);
        assert_eq!(flow[1], PageFlow { page_url: "/out".to_owned(), entries: 0, exits: 1 });
    }
}
