//! Shared API types
//!
//! Error responses and offset pagination used across the asset endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};

use crate::core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Current time as an RFC 3339 string with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Effective limit/offset after clamping client input.
///
/// Limit is clamped to `[1, MAX_PAGE_LIMIT]`; missing or zero means
/// `DEFAULT_PAGE_LIMIT`. Offset is clamped to `>= 0` (default 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PageParams {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            None | Some(0) => DEFAULT_PAGE_LIMIT,
            Some(limit) => limit.clamp(1, MAX_PAGE_LIMIT),
        };
        let offset = offset.unwrap_or(0).max(0);
        Self {
            limit: limit as usize,
            offset: offset as usize,
        }
    }
}

/// One page of items plus the total before slicing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn count(&self) -> usize {
        self.data.len()
    }
}

/// Slice `items` according to `params`
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Page<T> {
    let total = items.len();
    let data = items
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .collect();
    Page {
        total,
        limit: params.limit,
        offset: params.offset,
        data,
    }
}
