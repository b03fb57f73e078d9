//! Shared HTTP building blocks: response envelopes, error mapping,
//! extractors and CSV attachments.

pub mod csv;
pub mod error;
pub mod page_query;
pub mod validated_json;

pub use csv::{csv_attachment, CsvRecord};
pub use error::{ApiError, ApiResult};
pub use page_query::PageQuery;
pub use validated_json::ValidatedJson;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PaginationResult;

/// Standard API response wrapper
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "...", "code": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code, e.g. `VOLUNTEER_ALREADY_EXISTS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// One page of a listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Rows matching the filters across all pages
    pub total_count: u64,
    /// Current page (1-based)
    pub page: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<D>(result: PaginationResult<D>) -> Self
    where
        T: From<D>,
    {
        let result = result.map(T::from);
        Self {
            data: result.data,
            total_count: result.total_count,
            page: result.page,
            total_pages: result.total_pages,
        }
    }
}
