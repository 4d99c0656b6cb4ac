use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ids::EmployeeId;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Employee {
    pub id: EmployeeId,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(length(min = 1, max = 255))]
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Builds a new employee record. Name and department fields are trimmed;
    /// a field that is blank after trimming is rejected.
    pub fn new(first_name: String, last_name: String, department: String) -> Result<Self> {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let department = department.trim().to_string();

        if first_name.is_empty() {
            return Err(CoreError::Validation("First name is required".to_string()));
        }
        if last_name.is_empty() {
            return Err(CoreError::Validation("Last name is required".to_string()));
        }
        if department.is_empty() {
            return Err(CoreError::Validation("Department is required".to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: EmployeeId::new(),
            first_name,
            last_name,
            department,
            created_at: now,
            updated_at: now,
        })
    }
}
