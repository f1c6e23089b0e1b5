//! DTOs exposed by the product API endpoints.

use crate::query::QueryOptions;

/// Raw query parameters accepted by `GET /products`.
///
/// Paging values stay strings here so that malformed input can fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ProductsQueryParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Collects decoded query pairs. The first occurrence of a key wins and
/// unknown keys are ignored.
impl FromIterator<(String, String)> for ProductsQueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "search" => &mut params.search,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl From<&ProductsQueryParams> for QueryOptions {
    fn from(params: &ProductsQueryParams) -> Self {
        QueryOptions::from_raw(
            params.category.as_deref(),
            params.search.as_deref(),
            params.page.as_deref(),
            params.limit.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_paging_falls_back_to_defaults() {
        let params = ProductsQueryParams {
            category: Some("Tools".to_string()),
            search: None,
            page: Some("two".to_string()),
            limit: Some("0".to_string()),
        };

        let options = QueryOptions::from(&params);

        assert_eq!(options.category.as_deref(), Some("Tools"));
        assert_eq!(options.page, 1);
        assert_eq!(options.limit, 5);
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let params: ProductsQueryParams = [
            ("page", "2"),
            ("sort", "name"),
            ("page", "9"),
            ("limit", "1"),
            ("limit", "x"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.limit.as_deref(), Some("1"));
        assert_eq!(params.category, None);
    }
}
