use axum::{extract::State, http::StatusCode, response::Response, Json};
use validator::Validate;

use staff_review_core::EmployeeId;

use crate::dto::{CreateReviewRequest, ReviewResponse, TopPerformerResponse};
use crate::error::ApiResult;
use crate::response::success;
use crate::AppState;

pub async fn top_performers(State(state): State<AppState>) -> ApiResult<Response> {
    let performers = state.reviews.top_performers().await?;

    let data: Vec<TopPerformerResponse> = performers
        .into_iter()
        .map(TopPerformerResponse::from)
        .collect();

    Ok(success(
        data,
        "Top performers fetched successfully",
        StatusCode::OK,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> ApiResult<Response> {
    payload.validate()?;

    let review = state
        .reviews
        .create(
            EmployeeId::from_uuid(payload.employee_id),
            EmployeeId::from_uuid(payload.reviewer_id),
            payload.rating,
        )
        .await?;

    Ok(success(
        ReviewResponse::from(review),
        "Review created successfully",
        StatusCode::CREATED,
    ))
}
