use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ids::{EmployeeId, ReviewId};
use crate::error::{CoreError, Result};

/// Lowest rating a reviewer may give.
pub const MIN_RATING: f64 = 1.0;

/// Highest rating a reviewer may give.
pub const MAX_RATING: f64 = 5.0;

/// A peer review of one employee by another.
///
/// `employee_id` and `reviewer_id` are weak references; deleting an employee
/// does not cascade to their reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Review {
    pub id: ReviewId,
    pub employee_id: EmployeeId,
    pub reviewer_id: EmployeeId,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(employee_id: EmployeeId, reviewer_id: EmployeeId, rating: f64) -> Result<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CoreError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: ReviewId::new(),
            employee_id,
            reviewer_id,
            rating,
            created_at: now,
            updated_at: now,
        })
    }
}
