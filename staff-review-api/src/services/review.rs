use std::sync::Arc;

use staff_review_core::{
    CoreError, EmployeeId, Review, ReviewStore, TopPerformer, MIN_REVIEWS_FOR_RANKING,
    TOP_PERFORMERS_LIMIT,
};

use crate::error::{ApiError, ApiResult};

fn fetch_failed(err: CoreError) -> ApiError {
    let cause = match err {
        CoreError::Database(msg) | CoreError::Internal(msg) => msg,
        other => other.to_string(),
    };
    ApiError::Internal(format!("Failed to fetch top performers: {cause}"))
}

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// The top-performers report: grouped review averages with the
    /// statistical-significance floor and fixed result size.
    pub async fn top_performers(&self) -> ApiResult<Vec<TopPerformer>> {
        self.store
            .top_performers(MIN_REVIEWS_FOR_RANKING, TOP_PERFORMERS_LIMIT)
            .await
            .map_err(fetch_failed)
    }

    pub async fn create(
        &self,
        employee_id: EmployeeId,
        reviewer_id: EmployeeId,
        rating: f64,
    ) -> ApiResult<Review> {
        let review = Review::new(employee_id, reviewer_id, rating)?;
        Ok(self.store.insert(&review).await?)
    }
}
