/// List helpers shared by table views (search)

/// Types that can be matched against a search query
pub trait Searchable {
    /// `query` is already trimmed and lower-cased and never empty
    fn matches_query(&self, query: &str) -> bool;
}

/// Normalized query, or `None` when it would match everything
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Stable filter: keeps source order, never re-sorts
pub fn filter_list<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    match normalize_query(query) {
        None => items.to_vec(),
        Some(q) => items
            .iter()
            .filter(|item| item.matches_query(&q))
            .cloned()
            .collect(),
    }
}
