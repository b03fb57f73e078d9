//! Pagination descriptor and result envelope
//!
//! Raw query parameters are normalized into a [`PaginationParams`] that
//! repositories consume. Normalization never fails: malformed numbers fall
//! back to their defaults, unknown sort directions become ascending and
//! every key that is not `page`, `limit` or `sort` is kept as a filter.

use std::collections::BTreeMap;
use std::future::Future;

/// Page size used when the request does not carry a usable `limit`.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound for `limit`; larger requests are clamped.
pub const MAX_LIMIT: u64 = 30;
/// Highest page whose offset still fits a signed 64-bit SQL parameter.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

const PAGE_KEY: &str = "page";
const LIMIT_KEY: &str = "limit";
const SORT_KEY: &str = "sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `DESC` (case-insensitive) sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

/// A caller-supplied filter value: a single value compares with `=`,
/// several values compare with `IN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(vs) => vs,
        }
    }

    fn push(self, value: String) -> Self {
        let mut values = match self {
            Self::One(v) => vec![v],
            Self::Many(vs) => vs,
        };
        values.push(value);
        Self::Many(values)
    }
}

pub type Filter = BTreeMap<String, FilterValue>;

/// Normalized pagination descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: u64,
    /// Page size, always within `1..=MAX_LIMIT`
    pub limit: u64,
    pub sort: Vec<SortField>,
    pub filter: Filter,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort: Vec::new(),
            filter: Filter::new(),
        }
    }
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: normalize_page(Some(page)),
            limit: normalize_limit(Some(limit)),
            ..Self::default()
        }
    }

    /// Build the descriptor from raw `key=value` query pairs.
    ///
    /// Repeated keys and comma-separated values both produce a multi-value
    /// filter, so `?classes=5&classes=9` and `?classes=5,9` are equivalent.
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut page = None;
        let mut limit = None;
        let mut sort = Vec::new();
        let mut filter = Filter::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            match key {
                PAGE_KEY => page = value.parse::<i64>().ok(),
                LIMIT_KEY => limit = value.parse::<i64>().ok(),
                SORT_KEY => sort.extend(parse_sort(value)),
                "" => {}
                field => {
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        let part = part.to_string();
                        let merged = match filter.remove(field) {
                            Some(existing) => existing.push(part),
                            None => FilterValue::One(part),
                        };
                        filter.insert(field.to_string(), merged);
                    }
                }
            }
        }

        Self {
            page: normalize_page(page),
            limit: normalize_limit(limit),
            sort,
            filter,
        }
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.filter.insert(field.into(), value);
        self
    }

    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

fn normalize_page(requested: Option<i64>) -> u64 {
    requested
        .filter(|p| *p >= 1)
        .map(|p| p as u64)
        .unwrap_or(1)
        .min(MAX_PAGE)
}

fn normalize_limit(requested: Option<i64>) -> u64 {
    requested
        .filter(|l| *l >= 1)
        .map(|l| l as u64)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT)
}

/// Parse `field-DIRECTION` tokens separated by commas.
fn parse_sort(raw: &str) -> Vec<SortField> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let (field, direction) = match token.rsplit_once('-') {
                Some((field, direction)) => (field.trim(), SortDirection::parse(direction)),
                None => (token, SortDirection::Asc),
            };
            (!field.is_empty()).then(|| SortField {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}

/// One page of results plus the count of every matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl<T> PaginationResult<T> {
    pub fn new(data: Vec<T>, total_count: u64, params: &PaginationParams) -> Self {
        Self {
            data,
            total_count,
            page: params.page,
            total_pages: total_pages(total_count, params.limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(total_count: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_count.div_ceil(limit)
}

/// Run a `(rows, total_count)` fetch and wrap its output in the envelope.
pub async fn wrap_pagination<T, E, F, Fut>(
    params: &PaginationParams,
    fetch: F,
) -> Result<PaginationResult<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(Vec<T>, u64), E>>,
{
    let (data, total_count) = fetch().await?;
    Ok(PaginationResult::new(data, total_count, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> PaginationParams {
        PaginationParams::from_query(pairs.iter().copied())
    }

    #[test]
    fn defaults_when_nothing_requested() {
        let params = query(&[]);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert!(params.sort.is_empty());
        assert!(params.filter.is_empty());
    }

    #[test]
    fn limit_is_clamped_to_max() {
        assert_eq!(query(&[("limit", "500")]).limit, MAX_LIMIT);
        assert_eq!(query(&[("limit", "30")]).limit, 30);
        assert_eq!(query(&[("limit", "7")]).limit, 7);
    }

    #[test]
    fn bad_limit_falls_back_to_default() {
        assert_eq!(query(&[("limit", "abc")]).limit, DEFAULT_LIMIT);
        assert_eq!(query(&[("limit", "0")]).limit, DEFAULT_LIMIT);
        assert_eq!(query(&[("limit", "-4")]).limit, DEFAULT_LIMIT);
    }

    #[test]
    fn bad_page_becomes_first_page() {
        assert_eq!(query(&[("page", "0")]).page, 1);
        assert_eq!(query(&[("page", "-3")]).page, 1);
        assert_eq!(query(&[("page", "two")]).page, 1);
        assert_eq!(query(&[("page", "3")]).page, 3);
    }

    #[test]
    fn sort_tokens_are_parsed() {
        let params = query(&[("sort", "name-DESC, created_at-asc,city-sideways,email")]);
        let sort: Vec<_> = params
            .sort
            .iter()
            .map(|s| (s.field.as_str(), s.direction))
            .collect();
        assert_eq!(
            sort,
            vec![
                ("name", SortDirection::Desc),
                ("created_at", SortDirection::Asc),
                ("city", SortDirection::Asc),
                ("email", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn remaining_keys_become_filters() {
        let params = query(&[
            ("page", "2"),
            ("email", "ana@example.com"),
            ("classes", "5"),
            ("classes", "9"),
            ("city", "Recife,Olinda"),
        ]);
        assert_eq!(params.page, 2);
        assert_eq!(
            params.filter.get("email"),
            Some(&FilterValue::One("ana@example.com".into()))
        );
        assert_eq!(
            params.filter.get("classes"),
            Some(&FilterValue::Many(vec!["5".into(), "9".into()]))
        );
        assert_eq!(params.filter["city"].values(), ["Recife", "Olinda"]);
        assert!(!params.filter.contains_key("page"));
    }

    #[test]
    fn offset_follows_page_and_limit() {
        assert_eq!(PaginationParams::new(1, 10).offset(), 0);
        assert_eq!(PaginationParams::new(3, 10).offset(), 20);
        assert_eq!(PaginationParams::new(2, 100).offset(), 30);
    }

    #[test]
    fn huge_page_is_capped_and_offset_fits_i64() {
        let params = query(&[("page", "9223372036854775807"), ("limit", "30")]);
        assert_eq!(params.page, MAX_PAGE);
        assert!(params.offset() <= i64::MAX as u64);

        let params = query(&[("page", "400000000000000000"), ("limit", "30")]);
        assert!(params.offset() <= i64::MAX as u64);

        let params = PaginationParams {
            page: u64::MAX,
            ..PaginationParams::default()
        };
        assert_eq!(params.offset(), i64::MAX as u64);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[tokio::test]
    async fn wrap_pagination_builds_envelope() {
        let params = PaginationParams::new(2, 10);
        let result: Result<_, std::convert::Infallible> =
            wrap_pagination(&params, || async { Ok(((10..20).collect::<Vec<u32>>(), 25)) })
                .await;
        let page = result.unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn wrap_pagination_propagates_errors() {
        let params = PaginationParams::default();
        let result: Result<PaginationResult<u32>, &str> =
            wrap_pagination(&params, || async { Err("count failed") }).await;
        assert_eq!(result.unwrap_err(), "count failed");
    }
}
