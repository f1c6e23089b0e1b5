//! Filtering, pagination and aggregation over a product collection.
//!
//! Everything here is a pure function of its inputs: the caller hands over a
//! snapshot of the collection and gets a freshly built page or count map back.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::product::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Parsed listing options. `page` and `limit` are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Exact, case-insensitive category match.
    pub category: Option<String>,
    /// Case-insensitive substring match against the product name.
    pub search: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryOptions {
    /// Builds options from raw query-string values.
    ///
    /// This never fails: empty filters count as absent and malformed paging
    /// values fall back to the defaults.
    pub fn from_raw(
        category: Option<&str>,
        search: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Self {
        Self {
            category: non_empty(category),
            search: non_empty(search),
            page: parse_positive_or(page, DEFAULT_PAGE),
            limit: parse_positive_or(limit, DEFAULT_LIMIT),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, limit: usize) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    /// Zero-based index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Leniently parses a positive integer.
///
/// Surrounding whitespace is ignored and only the leading run of digits is
/// read, so `"2abc"` is 2. Anything without leading digits, zero, or a value
/// that does not fit in `usize` yields `default`.
pub fn parse_positive_or(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..digits_end].parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => default,
    }
}

/// One page of the filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    /// Number of products matching the filters, before pagination.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub products: Vec<Product>,
}

/// Filters `collection` by `options` and returns the requested page.
///
/// Both filters must hold for a product to match. Matches keep their
/// collection order, and a page past the end is empty rather than an error.
pub fn query_products(collection: &[Product], options: &QueryOptions) -> ResultPage {
    let category = options.category.as_deref().map(str::to_lowercase);
    let search = options.search.as_deref().map(str::to_lowercase);

    let matches: Vec<&Product> = collection
        .iter()
        .filter(|product| {
            category
                .as_deref()
                .is_none_or(|category| product.category.to_lowercase() == category)
        })
        .filter(|product| {
            search
                .as_deref()
                .is_none_or(|search| product.name.to_lowercase().contains(search))
        })
        .collect();

    let total = matches.len();
    let products = matches
        .into_iter()
        .skip(options.offset())
        .take(options.limit)
        .cloned()
        .collect();

    ResultPage {
        total,
        page: options.page,
        limit: options.limit,
        products,
    }
}

/// Counts products per category over the whole collection.
///
/// Categories are grouped by their stored spelling, so `"Tools"` and
/// `"tools"` are counted separately even though filtering treats them alike.
pub fn category_counts(collection: &[Product]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in collection {
        *counts.entry(product.category.clone()).or_insert(0) += 1;
    }
    counts
}
