use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::employee::Employee;
use crate::domain::ids::EmployeeId;

/// Rounds a rating to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// An employee joined with the aggregate of their reviews.
///
/// Not persisted; computed by the store for every listed employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedEmployee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    /// Mean rating rounded to two decimals, 0 when the employee has no reviews.
    pub average_rating: f64,
    pub number_of_ratings: i64,
    pub created_at: DateTime<Utc>,
}

impl RatedEmployee {
    /// Joins an employee with its review ratings. Used by the in-memory store;
    /// the Postgres store computes the same shape in SQL.
    pub fn from_reviews(employee: &Employee, ratings: &[f64]) -> Self {
        let number_of_ratings = ratings.len() as i64;
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            round2(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            department: employee.department.clone(),
            average_rating,
            number_of_ratings,
            created_at: employee.created_at,
        }
    }
}

/// One row of the top-performers report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub average_rating: f64,
    pub number_of_reviews: i64,
}

/// An employee must have at least this many reviews to appear in the
/// top-performers report.
pub const MIN_REVIEWS_FOR_RANKING: i64 = 2;

/// Number of employees the top-performers report returns.
pub const TOP_PERFORMERS_LIMIT: i64 = 3;
