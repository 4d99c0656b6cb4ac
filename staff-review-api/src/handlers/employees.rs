use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use staff_review_core::{EmployeeFilter, EmployeeId, PageParams, DEFAULT_LIMIT, DEFAULT_PAGE};

use crate::dto::{
    CreateEmployeeRequest, EmployeeCursorQuery, EmployeeListQuery, EmployeeResponse,
    RatedEmployeeResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::response::{cursor_paginated, message_only, paginated, success, OffsetMeta};
use crate::AppState;

const INVALID_PAGINATION: &str =
    "Invalid pagination parameters. Page and limit must be valid numbers.";
const INVALID_LIMIT: &str = "Invalid limit parameter. Limit must be a valid positive number.";

/// Parses an optional numeric query parameter, falling back to `default`
/// when absent. A present but unparseable value is a validation error.
fn parse_or(value: Option<&str>, default: i64, message: &str) -> ApiResult<i64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Validation(message.to_string())),
    }
}

fn filter_from(department: Option<&str>, first: Option<&str>, last: Option<&str>) -> EmployeeFilter {
    EmployeeFilter::from_params(department, first, last)
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult<Response> {
    let page = parse_or(query.page.as_deref(), DEFAULT_PAGE, INVALID_PAGINATION)?;
    let limit = parse_or(query.limit.as_deref(), DEFAULT_LIMIT, INVALID_PAGINATION)?;
    let params = PageParams::new(page, limit)?;

    let filter = filter_from(
        query.department.as_deref(),
        query.first_name.as_deref(),
        query.last_name.as_deref(),
    );

    let result = state.employees.list(params, &filter).await?;

    let meta = OffsetMeta {
        page: result.page,
        limit: result.limit,
        total: result.total,
        total_pages: params.total_pages(result.total),
    };
    let data: Vec<RatedEmployeeResponse> = result
        .employees
        .into_iter()
        .map(RatedEmployeeResponse::from)
        .collect();

    Ok(paginated(data, meta, "Employees fetched successfully"))
}

pub async fn list_with_cursor(
    State(state): State<AppState>,
    Query(query): Query<EmployeeCursorQuery>,
) -> ApiResult<Response> {
    let limit = parse_or(query.limit.as_deref(), DEFAULT_LIMIT, INVALID_LIMIT)?;
    if limit < 1 {
        return Err(ApiError::Validation(INVALID_LIMIT.to_string()));
    }

    let filter = filter_from(
        query.department.as_deref(),
        query.first_name.as_deref(),
        query.last_name.as_deref(),
    );

    let result = state
        .employees
        .list_with_cursor(query.cursor.as_deref(), limit, &filter)
        .await?;

    let data: Vec<RatedEmployeeResponse> = result
        .employees
        .into_iter()
        .map(RatedEmployeeResponse::from)
        .collect();

    Ok(cursor_paginated(
        data,
        result.pagination,
        "Employees fetched successfully with cursor pagination",
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> ApiResult<Response> {
    payload.validate()?;

    let employee = state
        .employees
        .create(payload.first_name, payload.last_name, payload.department)
        .await?;

    Ok(success(
        EmployeeResponse::from(employee),
        "Employee created successfully",
        StatusCode::CREATED,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let employee = state.employees.get(EmployeeId::from_uuid(id)).await?;

    Ok(success(
        EmployeeResponse::from(employee),
        "Employee fetched successfully",
        StatusCode::OK,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    state.employees.delete(EmployeeId::from_uuid(id)).await?;

    Ok(message_only("Employee deleted successfully", StatusCode::OK))
}
