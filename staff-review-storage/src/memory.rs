use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::RwLock;

use async_trait::async_trait;

use staff_review_core::{
    round2, CoreError, Employee, EmployeeFilter, EmployeeId, EmployeeStore, RatedEmployee, Result,
    Review, ReviewId, ReviewStore, TopPerformer,
};

/// In-memory store implementing the same query contract as Postgres.
///
/// Substitutable fake for service and handler tests; also doubles as a
/// readable reference for the predicate, windowing, and grouping semantics.
#[derive(Default)]
pub struct MemoryStore {
    employees: RwLock<Vec<Employee>>,
    reviews: RwLock<Vec<Review>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with a database error. Lets tests
    /// exercise the store-failure wrapping paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, AtomicOrdering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(CoreError::Database("connection reset".to_string()));
        }
        Ok(())
    }

    fn ratings_by_employee(&self) -> HashMap<EmployeeId, Vec<f64>> {
        let reviews = self.reviews.read().unwrap();
        let mut map: HashMap<EmployeeId, Vec<f64>> = HashMap::new();
        for review in reviews.iter() {
            map.entry(review.employee_id).or_default().push(review.rating);
        }
        map
    }

    fn filtered_employees(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        let employees = self.employees.read().unwrap();
        employees
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn insert(&self, employee: &Employee) -> Result<Employee> {
        self.check()?;
        self.employees.write().unwrap().push(employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>> {
        self.check()?;
        let employees = self.employees.read().unwrap();
        Ok(employees.iter().find(|e| e.id == *id).cloned())
    }

    async fn delete(&self, id: &EmployeeId) -> Result<bool> {
        self.check()?;
        let mut employees = self.employees.write().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != *id);
        Ok(employees.len() < before)
    }

    async fn count(&self, filter: &EmployeeFilter) -> Result<i64> {
        self.check()?;
        Ok(self.filtered_employees(filter).len() as i64)
    }

    async fn list_rated(
        &self,
        filter: &EmployeeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatedEmployee>> {
        self.check()?;
        let ratings = self.ratings_by_employee();
        let mut matching = self.filtered_employees(filter);
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matching
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|e| {
                RatedEmployee::from_reviews(e, ratings.get(&e.id).map_or(&[][..], Vec::as_slice))
            })
            .collect())
    }

    async fn list_rated_before(
        &self,
        filter: &EmployeeFilter,
        before: Option<EmployeeId>,
        fetch: i64,
    ) -> Result<Vec<RatedEmployee>> {
        self.check()?;
        let ratings = self.ratings_by_employee();
        let mut matching = self.filtered_employees(filter);
        if let Some(before) = before {
            matching.retain(|e| e.id < before);
        }
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(matching
            .iter()
            .take(fetch.max(0) as usize)
            .map(|e| {
                RatedEmployee::from_reviews(e, ratings.get(&e.id).map_or(&[][..], Vec::as_slice))
            })
            .collect())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert(&self, review: &Review) -> Result<Review> {
        self.check()?;
        self.reviews.write().unwrap().push(review.clone());
        Ok(review.clone())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>> {
        self.check()?;
        let reviews = self.reviews.read().unwrap();
        Ok(reviews.iter().find(|r| r.id == *id).cloned())
    }

    async fn top_performers(&self, min_reviews: i64, top_n: i64) -> Result<Vec<TopPerformer>> {
        self.check()?;
        let employees = self.employees.read().unwrap().clone();

        // Rank on the unrounded mean; ties break on employee id descending.
        let mut groups: Vec<(EmployeeId, f64, i64)> = self
            .ratings_by_employee()
            .into_iter()
            .filter(|(_, ratings)| ratings.len() as i64 >= min_reviews)
            .map(|(id, ratings)| {
                let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
                (id, mean, ratings.len() as i64)
            })
            .collect();
        groups.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.cmp(&a.0))
        });

        Ok(groups
            .into_iter()
            .filter_map(|(employee_id, mean, number_of_reviews)| {
                let employee = employees.iter().find(|e| e.id == employee_id)?;
                Some(TopPerformer {
                    employee_id,
                    first_name: employee.first_name.clone(),
                    last_name: employee.last_name.clone(),
                    department: employee.department.clone(),
                    average_rating: round2(mean),
                    number_of_reviews,
                })
            })
            .take(top_n.max(0) as usize)
            .collect())
    }
}
