use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePage {
    pub page_url: String,
    pub visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeSummary {
    pub active_visitors: u64,
    pub pages_last_minute: u64,
}

/// Rank page URLs by how many views they received, ties by URL.
pub fn active_pages<'a>(urls: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<ActivePage> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for url in urls {
        *counts.entry(url).or_default() += 1;
    }
    let mut pages: Vec<ActivePage> = counts
        .into_iter()
        .map(|(url, visitors)| ActivePage { page_url: url.to_owned(), visitors })
        .collect();
    pages.sort_by(|a, b| b.visitors.cmp(&a.visitors));
    pages.truncate(limit);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_url() {
        let pages = active_pages(["/b", "/a", "/c", "/c", "/b", "/c"], 2);
        assert_eq!(
            pages,
            vec![
                ActivePage { page_url: "/c".to_owned(), visitors: 3 },
                ActivePage { page_url: "/b".to_owned(), visitors: 2 },
            ]
        );
    }

    #[test]
    fn no_views_no_pages() {
        assert!(active_pages(Vec::<&str>::new(), 10).is_empty());
    }
}
