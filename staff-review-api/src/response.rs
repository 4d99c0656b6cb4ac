//! Uniform response envelope.
//!
//! Every success body is `{success, message, data, pagination?}`; error
//! bodies are produced by `ApiError` with the same shape minus `data`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use staff_review_core::CursorMeta;

/// Offset-mode pagination block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PaginationInfo {
    Offset(OffsetMeta),
    Cursor(CursorMeta),
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

pub fn success<T: Serialize>(data: T, message: &str, status: StatusCode) -> Response {
    let body = ApiResponse {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
        pagination: None,
    };
    (status, Json(body)).into_response()
}

pub fn message_only(message: &str, status: StatusCode) -> Response {
    let body = ApiResponse::<()> {
        success: true,
        message: Some(message.to_string()),
        data: None,
        pagination: None,
    };
    (status, Json(body)).into_response()
}

pub fn paginated<T: Serialize>(data: T, meta: OffsetMeta, message: &str) -> Response {
    let body = ApiResponse {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
        pagination: Some(PaginationInfo::Offset(meta)),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn cursor_paginated<T: Serialize>(data: T, meta: CursorMeta, message: &str) -> Response {
    let body = ApiResponse {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
        pagination: Some(PaginationInfo::Cursor(meta)),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn offset_meta_serializes_camel_case() {
        let meta = OffsetMeta {
            page: 2,
            limit: 10,
            total: 45,
            total_pages: 5,
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            json!({"page": 2, "limit": 10, "total": 45, "totalPages": 5})
        );
    }

    #[test]
    fn envelope_drops_absent_fields() {
        let body: ApiResponse<Vec<i32>> = ApiResponse {
            success: true,
            message: None,
            data: Some(vec![1]),
            pagination: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"success": true, "data": [1]}));
    }
}
