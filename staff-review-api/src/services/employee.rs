use std::sync::Arc;

use staff_review_core::{
    decode_cursor, encode_cursor, CoreError, CursorMeta, Employee, EmployeeFilter, EmployeeId,
    EmployeeStore, PageParams, RatedEmployee,
};

use crate::error::{ApiError, ApiResult};

/// One offset-paginated page of rated employees.
#[derive(Debug)]
pub struct EmployeePage {
    pub employees: Vec<RatedEmployee>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// One cursor-paginated page of rated employees.
#[derive(Debug)]
pub struct EmployeeCursorPage {
    pub employees: Vec<RatedEmployee>,
    pub pagination: CursorMeta,
}

fn source_message(err: CoreError) -> String {
    match err {
        CoreError::Database(msg) | CoreError::Internal(msg) => msg,
        other => other.to_string(),
    }
}

fn fetch_failed(err: CoreError) -> ApiError {
    ApiError::Internal(format!("Failed to fetch employees: {}", source_message(err)))
}

/// Stateless listing and CRUD operations over an employee store.
///
/// Every call re-reads from the store; the service holds no state beyond the
/// store handle, so any `EmployeeStore` implementation can back it.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Offset-paginated listing: a count of everything matching the filter
    /// plus one window sorted by creation time descending. Pages past the end
    /// come back empty with the true total.
    pub async fn list(&self, params: PageParams, filter: &EmployeeFilter) -> ApiResult<EmployeePage> {
        let total = self.store.count(filter).await.map_err(fetch_failed)?;
        let employees = self
            .store
            .list_rated(filter, params.limit, params.offset())
            .await
            .map_err(fetch_failed)?;

        Ok(EmployeePage {
            employees,
            total,
            page: params.page,
            limit: params.limit,
        })
    }

    /// Cursor-paginated listing. The cursor is decoded before any store
    /// access; `limit + 1` records are fetched and the extra one, when
    /// present, only signals that a next page exists.
    pub async fn list_with_cursor(
        &self,
        cursor: Option<&str>,
        limit: i64,
        filter: &EmployeeFilter,
    ) -> ApiResult<EmployeeCursorPage> {
        let before = cursor.map(decode_cursor).transpose()?;

        let mut employees = self
            .store
            .list_rated_before(filter, before, limit.saturating_add(1))
            .await
            .map_err(fetch_failed)?;

        let has_next = employees.len() as i64 > limit;
        if has_next {
            employees.truncate(limit as usize);
        }

        let next_cursor = if has_next {
            employees.last().map(|e| encode_cursor(&e.id))
        } else {
            None
        };

        Ok(EmployeeCursorPage {
            employees,
            pagination: CursorMeta {
                next_cursor,
                prev_cursor: cursor.map(String::from),
                has_next,
                has_prev: cursor.is_some(),
                limit,
            },
        })
    }

    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        department: String,
    ) -> ApiResult<Employee> {
        let employee = Employee::new(first_name, last_name, department)?;
        Ok(self.store.insert(&employee).await?)
    }

    pub async fn get(&self, id: EmployeeId) -> ApiResult<Employee> {
        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee not found: {id}")))
    }

    pub async fn delete(&self, id: EmployeeId) -> ApiResult<()> {
        if !self.store.delete(&id).await? {
            return Err(ApiError::NotFound(format!("Employee not found: {id}")));
        }
        Ok(())
    }
}
