//! Pagination query extractor
//!
//! Reads the raw `key=value` pairs of the query string into a normalized
//! [`PaginationParams`]. Extraction never rejects: an unreadable query
//! string behaves like an empty one.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::PaginationParams;

pub struct PageQuery(pub PaginationParams);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(PageQuery(PaginationParams::from_query(pairs)))
    }
}

/// Documented shape of the pagination query; any other key is a filter.
#[allow(dead_code)]
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-based). Default: 1
    pub page: Option<i64>,
    /// Page size, clamped to 30. Default: 10
    pub limit: Option<i64>,
    /// Comma-separated `field-ASC|DESC` list, e.g. `name-ASC,created_at-DESC`
    pub sort: Option<String>,
}
