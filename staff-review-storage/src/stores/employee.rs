use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use staff_review_core::{
    Employee, EmployeeFilter, EmployeeId, EmployeeStore, RatedEmployee, Result,
};

/// Escapes LIKE wildcards so filter values match literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Appends the filter's clauses to `builder` and returns the separator the
/// caller should use for any further condition.
fn push_filter<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filter: &'a EmployeeFilter,
) -> &'static str {
    let mut separator = " WHERE ";

    if let Some(department) = &filter.department {
        builder.push(separator);
        builder.push("e.department = ");
        builder.push_bind(department);
        separator = " AND ";
    }
    if let Some(first_name) = &filter.first_name {
        builder.push(separator);
        builder.push("e.first_name ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(first_name)));
        separator = " AND ";
    }
    if let Some(last_name) = &filter.last_name {
        builder.push(separator);
        builder.push("e.last_name ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(last_name)));
        separator = " AND ";
    }

    separator
}

fn row_to_employee(row: PgRow) -> Employee {
    Employee {
        id: EmployeeId::from_uuid(row.get("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        department: row.get("department"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn row_to_rated(row: PgRow) -> RatedEmployee {
    RatedEmployee {
        id: EmployeeId::from_uuid(row.get("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        department: row.get("department"),
        average_rating: row.get("average_rating"),
        number_of_ratings: row.get("number_of_ratings"),
        created_at: row.get("created_at"),
    }
}

const RATED_SELECT: &str = "SELECT e.id, e.first_name, e.last_name, e.department, e.created_at, \
     COALESCE(ROUND(AVG(r.rating)::numeric, 2)::float8, 0) AS average_rating, \
     COUNT(r.id) AS number_of_ratings \
     FROM employees e LEFT JOIN reviews r ON r.employee_id = e.id";

const RATED_GROUP_BY: &str =
    " GROUP BY e.id, e.first_name, e.last_name, e.department, e.created_at";

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn insert(&self, employee: &Employee) -> Result<Employee> {
        let row = sqlx::query(
            r#"
            INSERT INTO employees (id, first_name, last_name, department, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, department, created_at, updated_at
            "#,
        )
        .bind(employee.id.as_uuid())
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.department)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row_to_employee(row))
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, department, created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_employee))
    }

    async fn delete(&self, id: &EmployeeId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &EmployeeFilter) -> Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM employees e");
        push_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list_rated(
        &self,
        filter: &EmployeeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatedEmployee>> {
        let mut builder = QueryBuilder::new(RATED_SELECT);
        push_filter(&mut builder, filter);
        builder.push(RATED_GROUP_BY);
        builder.push(" ORDER BY e.created_at DESC, e.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder.build().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_rated).collect())
    }

    async fn list_rated_before(
        &self,
        filter: &EmployeeFilter,
        before: Option<EmployeeId>,
        fetch: i64,
    ) -> Result<Vec<RatedEmployee>> {
        let mut builder = QueryBuilder::new(RATED_SELECT);
        let separator = push_filter(&mut builder, filter);
        if let Some(before) = before {
            builder.push(separator);
            builder.push("e.id < ");
            builder.push_bind(*before.as_uuid());
        }
        builder.push(RATED_GROUP_BY);
        builder.push(" ORDER BY e.id DESC LIMIT ");
        builder.push_bind(fetch);

        let rows = builder.build().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_rated).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_done\\"), "50\\%\\_done\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn push_filter_emits_no_clause_for_empty_filter() {
        let filter = EmployeeFilter::default();
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM employees e");
        let separator = push_filter(&mut builder, &filter);

        assert_eq!(separator, " WHERE ");
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM employees e");
    }

    #[test]
    fn push_filter_joins_clauses_with_and() {
        let filter = EmployeeFilter::from_params(Some("Engineering"), Some("an"), None);
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM employees e");
        let separator = push_filter(&mut builder, &filter);

        assert_eq!(separator, " AND ");
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM employees e WHERE e.department = $1 AND e.first_name ILIKE $2"
        );
    }
}
