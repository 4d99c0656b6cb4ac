use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use staff_review_core::{EmployeeId, Result, Review, ReviewId, ReviewStore, TopPerformer};

fn row_to_review(row: PgRow) -> Review {
    Review {
        id: ReviewId::from_uuid(row.get("id")),
        employee_id: EmployeeId::from_uuid(row.get("employee_id")),
        reviewer_id: EmployeeId::from_uuid(row.get("reviewer_id")),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn insert(&self, review: &Review) -> Result<Review> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (id, employee_id, reviewer_id, rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, employee_id, reviewer_id, rating, created_at, updated_at
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.employee_id.as_uuid())
        .bind(review.reviewer_id.as_uuid())
        .bind(review.rating)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row_to_review(row))
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>> {
        let row = sqlx::query(
            r#"
            SELECT id, employee_id, reviewer_id, rating, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_review))
    }

    async fn top_performers(&self, min_reviews: i64, top_n: i64) -> Result<Vec<TopPerformer>> {
        // Ranking uses the unrounded average; only the projected value is
        // rounded. Reviews whose employee no longer exists drop out of the
        // join, matching the weak-reference model.
        let rows = sqlx::query(
            r#"
            SELECT r.employee_id, e.first_name, e.last_name, e.department,
                   ROUND(AVG(r.rating)::numeric, 2)::float8 AS average_rating,
                   COUNT(*) AS number_of_reviews
            FROM reviews r
            JOIN employees e ON e.id = r.employee_id
            GROUP BY r.employee_id, e.first_name, e.last_name, e.department
            HAVING COUNT(*) >= $1
            ORDER BY AVG(r.rating) DESC, r.employee_id DESC
            LIMIT $2
            "#,
        )
        .bind(min_reviews)
        .bind(top_n)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopPerformer {
                employee_id: EmployeeId::from_uuid(row.get("employee_id")),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                department: row.get("department"),
                average_rating: row.get("average_rating"),
                number_of_reviews: row.get("number_of_reviews"),
            })
            .collect())
    }
}
