use serde::{Deserialize, Serialize};

use crate::domain::employee::Employee;

/// Conjunctive filter over the whitelisted employee fields.
///
/// Absent or blank values emit no clause, so an unset filter never excludes
/// records. Department matches exactly; names match as case-insensitive
/// substrings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

impl EmployeeFilter {
    /// Builds a filter from raw query parameter values, trimming each and
    /// dropping anything blank after the trim.
    pub fn from_params(
        department: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Self {
        Self {
            department: non_blank(department),
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
        }
    }

    /// True when no clause is active.
    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }

    /// Applies the filter semantics to a single record. The Postgres store
    /// expresses the same predicate in SQL; the in-memory store uses this.
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(department) = &self.department {
            if employee.department != *department {
                return false;
            }
        }
        if let Some(first_name) = &self.first_name {
            if !employee
                .first_name
                .to_lowercase()
                .contains(&first_name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(last_name) = &self.last_name {
            if !employee
                .last_name
                .to_lowercase()
                .contains(&last_name.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
