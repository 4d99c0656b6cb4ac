use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, RatedEmployee, Review, ReviewId, TopPerformer};
use crate::error::Result;
use crate::filter::EmployeeFilter;

/// A queryable employee collection.
///
/// The contract is the minimum the pagination and report engines need:
/// predicate filtering, counting, windowing, and the rating join. Both the
/// Postgres store and the in-memory fake implement it.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, employee: &Employee) -> Result<Employee>;

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>>;

    async fn delete(&self, id: &EmployeeId) -> Result<bool>;

    /// Total records matching the filter, ignoring any window.
    async fn count(&self, filter: &EmployeeFilter) -> Result<i64>;

    /// One offset window of rating-augmented employees, newest first.
    async fn list_rated(
        &self,
        filter: &EmployeeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatedEmployee>>;

    /// Up to `fetch` rating-augmented employees with `id` strictly below
    /// `before` (all records when `before` is absent), id descending.
    async fn list_rated_before(
        &self,
        filter: &EmployeeFilter,
        before: Option<EmployeeId>,
        fetch: i64,
    ) -> Result<Vec<RatedEmployee>>;
}

/// A queryable review collection with grouped aggregation.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert(&self, review: &Review) -> Result<Review>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>>;

    /// Groups reviews by employee, drops groups smaller than `min_reviews`,
    /// ranks by unrounded average rating descending and returns the first
    /// `top_n` joined with employee details. Ties break on employee id
    /// descending.
    async fn top_performers(&self, min_reviews: i64, top_n: i64) -> Result<Vec<TopPerformer>>;
}
