use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use staff_review_core::{Employee, RatedEmployee, Review, TopPerformer};

// ===== Query parameters =====

/// Raw listing query. `page` and `limit` stay strings so that a value which
/// does not parse can be reported with the service's own validation message
/// instead of a framework rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub department: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCursorQuery {
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub department: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// ===== Request bodies =====

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(length(min = 1, max = 255))]
    pub department: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub employee_id: Uuid,
    pub reviewer_id: Uuid,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
}

// ===== Response bodies =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id.into(),
            first_name: e.first_name,
            last_name: e.last_name,
            department: e.department,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Listing row: employee plus the aggregate of their reviews.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedEmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub average_rating: f64,
    pub number_of_ratings: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RatedEmployee> for RatedEmployeeResponse {
    fn from(e: RatedEmployee) -> Self {
        Self {
            id: e.id.into(),
            first_name: e.first_name,
            last_name: e.last_name,
            department: e.department,
            average_rating: e.average_rating,
            number_of_ratings: e.number_of_ratings,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id.into(),
            employee_id: r.employee_id.into(),
            reviewer_id: r.reviewer_id.into(),
            rating: r.rating,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub average_rating: f64,
    pub number_of_reviews: i64,
}

impl From<TopPerformer> for TopPerformerResponse {
    fn from(t: TopPerformer) -> Self {
        Self {
            id: t.employee_id.into(),
            first_name: t.first_name,
            last_name: t.last_name,
            department: t.department,
            average_rating: t.average_rating,
            number_of_reviews: t.number_of_reviews,
        }
    }
}
