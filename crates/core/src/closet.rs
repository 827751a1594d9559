//! The closet view filter/sort engine.
//!
//! A pure function of (full item list, search text, category filter, brand
//! filter, sort order) to the visible item list. The HTTP layer maps query
//! parameters onto [`ClosetQuery`] and applies [`visible`] to the full list
//! fetched for the owner.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Deserialize;

use crate::types::Timestamp;

/// Sentinel filter value matching every category or brand.
pub const ALL: &str = "All";

/// Sort order for the closet list, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// An entry the filter engine can inspect. Implemented by the item row model.
pub trait ClosetEntry {
    fn name(&self) -> &str;
    fn category(&self) -> &str;
    fn brand(&self) -> Option<&str>;
    /// Creation time, if known. Entries without one are not comparable and
    /// keep their relative order when sorting.
    fn created_at(&self) -> Option<Timestamp>;
}

/// The current filter/sort state of the closet view.
#[derive(Debug, Clone)]
pub struct ClosetQuery {
    /// Case-insensitive substring match against the item name.
    pub search: String,
    /// Exact category match, or [`ALL`].
    pub category: String,
    /// Exact match against the trimmed brand, or [`ALL`].
    pub brand: String,
    pub sort: SortOrder,
}

impl Default for ClosetQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            brand: ALL.to_string(),
            sort: SortOrder::default(),
        }
    }
}

/// Whether a single entry passes all three filter predicates (AND-combined).
pub fn matches<T: ClosetEntry>(entry: &T, query: &ClosetQuery) -> bool {
    let needle = query.search.trim().to_lowercase();
    let matches_search = needle.is_empty() || entry.name().to_lowercase().contains(&needle);

    let matches_category = query.category == ALL || entry.category() == query.category;

    let entry_brand = entry.brand().unwrap_or("").trim();
    let matches_brand = query.brand == ALL || entry_brand == query.brand;

    matches_search && matches_category && matches_brand
}

/// Derive the visible, ordered subset of `items` for the given query.
pub fn visible<'a, T: ClosetEntry>(items: &'a [T], query: &ClosetQuery) -> Vec<&'a T> {
    let mut selected: Vec<&T> = items.iter().filter(|i| matches(*i, query)).collect();

    // Stable sort: entries with a missing timestamp compare equal and keep
    // their incoming relative order.
    selected.sort_by(|a, b| match (a.created_at(), b.created_at()) {
        (Some(ta), Some(tb)) => match query.sort {
            SortOrder::Newest => tb.cmp(&ta),
            SortOrder::Oldest => ta.cmp(&tb),
        },
        _ => Ordering::Equal,
    });

    selected
}

/// Distinct non-empty categories present in `items`, alphabetically sorted,
/// with [`ALL`] prepended.
pub fn category_options<T: ClosetEntry>(items: &[T]) -> Vec<String> {
    options(items.iter().map(|i| i.category()))
}

/// Distinct non-empty trimmed brands present in `items`, alphabetically
/// sorted, with [`ALL`] prepended.
pub fn brand_options<T: ClosetEntry>(items: &[T]) -> Vec<String> {
    options(items.iter().map(|i| i.brand().unwrap_or("").trim()))
}

fn options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();

    let mut out = Vec::with_capacity(distinct.len() + 1);
    out.push(ALL.to_string());
    out.extend(distinct.into_iter().map(str::to_string));
    out
}
