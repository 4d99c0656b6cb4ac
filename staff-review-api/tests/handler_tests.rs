use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use staff_review_api::{issue_token, routes, AppState, AuthStrategy};
use staff_review_core::{Employee, EmployeeStore, Review, ReviewStore};
use staff_review_storage::MemoryStore;

// ===== Test Helper Functions =====

fn app_with(store: Arc<MemoryStore>) -> axum::Router {
    routes(AppState::new(store.clone(), store, AuthStrategy::Mock))
}

async fn seeded_app(count: usize) -> (axum::Router, Vec<Employee>) {
    let store = Arc::new(MemoryStore::new());
    let mut seeded = Vec::new();
    for i in 0..count {
        let e = Employee::new(
            format!("First{i}"),
            format!("Last{i}"),
            "Engineering".to_string(),
        )
        .unwrap();
        EmployeeStore::insert(store.as_ref(), &e).await.unwrap();
        seeded.push(e);
    }
    (app_with(store), seeded)
}

async fn get(app: &axum::Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ===== Health =====

#[tokio::test]
async fn test_health_check() {
    let (app, _) = seeded_app(0).await;
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Server is running");
    assert!(body["timestamp"].is_string());
}

// ===== Offset-paginated listing =====

#[tokio::test]
async fn test_list_employees_envelope_and_window() {
    let (app, seeded) = seeded_app(5).await;
    let response = get(&app, "/employees?page=2&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Employees fetched successfully");
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["pagination"]["totalPages"], 3);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Newest-first: page 2 holds the third and fourth records.
    assert_eq!(data[0]["id"], seeded[2].id.to_string());
    assert_eq!(data[1]["id"], seeded[1].id.to_string());
}

#[tokio::test]
async fn test_list_employees_rejects_page_zero_before_store() {
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true); // any store access would 500
    let app = app_with(store);

    let response = get(&app, "/employees?page=0&limit=10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid pagination parameters. Page and limit must be valid numbers."
    );
}

#[tokio::test]
async fn test_list_employees_rejects_unparseable_limit() {
    let (app, _) = seeded_app(1).await;
    let response = get(&app, "/employees?page=1&limit=ten").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_employees_applies_filters() {
    let store = Arc::new(MemoryStore::new());
    for (first, last, dept) in [
        ("Andrea", "Smith", "Engineering"),
        ("Andrea", "Jones", "Sales"),
        ("Bob", "Brown", "Engineering"),
    ] {
        let e = Employee::new(first.into(), last.into(), dept.into()).unwrap();
        EmployeeStore::insert(store.as_ref(), &e).await.unwrap();
    }
    let app = app_with(store);

    let response = get(&app, "/employees?department=Engineering&firstName=an").await;
    let body = body_json(response).await;

    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["firstName"], "Andrea");
    assert_eq!(body["data"][0]["department"], "Engineering");
}

#[tokio::test]
async fn test_list_employees_includes_rating_aggregates() {
    let store = Arc::new(MemoryStore::new());
    let alice = Employee::new("Alice".into(), "A".into(), "Engineering".into()).unwrap();
    let bob = Employee::new("Bob".into(), "B".into(), "Engineering".into()).unwrap();
    EmployeeStore::insert(store.as_ref(), &alice).await.unwrap();
    EmployeeStore::insert(store.as_ref(), &bob).await.unwrap();
    for rating in [4.0, 5.0] {
        let review = Review::new(alice.id, bob.id, rating).unwrap();
        ReviewStore::insert(store.as_ref(), &review).await.unwrap();
    }
    let app = app_with(store);

    let response = get(&app, "/employees?firstName=alice").await;
    let body = body_json(response).await;

    assert_eq!(body["data"][0]["averageRating"], 4.5);
    assert_eq!(body["data"][0]["numberOfRatings"], 2);
}

// ===== Cursor-paginated listing =====

#[tokio::test]
async fn test_cursor_listing_walks_without_overlap() {
    let (app, seeded) = seeded_app(5).await;

    let first = body_json(get(&app, "/employees/cursor?limit=3").await).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["pagination"]["hasNext"], true);
    assert_eq!(first["pagination"]["hasPrev"], false);
    assert_eq!(first["data"].as_array().unwrap().len(), 3);

    let next_cursor = first["pagination"]["nextCursor"].as_str().unwrap().to_string();
    let second = body_json(
        get(&app, &format!("/employees/cursor?limit=3&cursor={next_cursor}")).await,
    )
    .await;

    assert_eq!(second["pagination"]["hasNext"], false);
    assert_eq!(second["pagination"]["hasPrev"], true);
    assert_eq!(second["pagination"]["prevCursor"], next_cursor.as_str());
    assert_eq!(second["data"].as_array().unwrap().len(), 2);

    let mut ids: Vec<String> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .chain(second["data"].as_array().unwrap())
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), seeded.len());
}

#[tokio::test]
async fn test_cursor_listing_rejects_malformed_cursor() {
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true); // decode must fail before any store access
    let app = app_with(store);

    let response = get(&app, "/employees/cursor?cursor=%25%25%25").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid cursor format");
}

#[tokio::test]
async fn test_cursor_listing_rejects_bad_limit() {
    let (app, _) = seeded_app(1).await;
    let response = get(&app, "/employees/cursor?limit=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Invalid limit parameter. Limit must be a valid positive number."
    );
}

// ===== Top performers =====

#[tokio::test]
async fn test_top_performers_report() {
    let store = Arc::new(MemoryStore::new());
    let alice = Employee::new("Alice".into(), "A".into(), "Engineering".into()).unwrap();
    let bob = Employee::new("Bob".into(), "B".into(), "Engineering".into()).unwrap();
    let carol = Employee::new("Carol".into(), "C".into(), "Sales".into()).unwrap();
    for e in [&alice, &bob, &carol] {
        EmployeeStore::insert(store.as_ref(), e).await.unwrap();
    }
    for rating in [4.5, 4.5, 4.5] {
        ReviewStore::insert(store.as_ref(), &Review::new(alice.id, bob.id, rating).unwrap())
            .await
            .unwrap();
    }
    for rating in [5.0, 5.0] {
        ReviewStore::insert(store.as_ref(), &Review::new(bob.id, alice.id, rating).unwrap())
            .await
            .unwrap();
    }
    ReviewStore::insert(store.as_ref(), &Review::new(carol.id, alice.id, 5.0).unwrap())
        .await
        .unwrap();
    let app = app_with(store);

    let response = get(&app, "/reviews/top-performers").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Top performers fetched successfully");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], bob.id.to_string());
    assert_eq!(data[0]["averageRating"], 5.0);
    assert_eq!(data[0]["numberOfReviews"], 2);
    assert_eq!(data[1]["id"], alice.id.to_string());
}

// ===== CRUD =====

#[tokio::test]
async fn test_create_employee_then_list() {
    let (app, _) = seeded_app(0).await;

    let request = Request::builder()
        .uri("/employees")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"firstName": " Dana ", "lastName": "Fox", "department": "Design"}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["data"]["firstName"], "Dana"); // trimmed

    let listed = body_json(get(&app, "/employees").await).await;
    assert_eq!(listed["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_create_employee_rejects_blank_name() {
    let (app, _) = seeded_app(0).await;

    let request = Request::builder()
        .uri("/employees")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"firstName": "   ", "lastName": "Fox", "department": "Design"}"#,
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_review_rejects_out_of_range_rating() {
    let (app, seeded) = seeded_app(2).await;

    let request = Request::builder()
        .uri("/reviews")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{"employeeId": "{}", "reviewerId": "{}", "rating": 6.0}}"#,
            seeded[0].id, seeded[1].id
        )))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_employee_is_404() {
    let (app, _) = seeded_app(0).await;

    let request = Request::builder()
        .uri(format!("/employees/{}", uuid::Uuid::now_v7()))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ===== Fallback and auth =====

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let (app, _) = seeded_app(0).await;
    let response = get(&app, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found - /nope");
}

#[tokio::test]
async fn test_jwt_strategy_guards_listing_routes() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store,
        AuthStrategy::Jwt {
            secret: "test-secret".to_string(),
        },
    );
    let app = routes(state);

    // No token: 401 on a protected route, health stays open.
    let denied = get(&app, "/employees").await;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    let open = get(&app, "/health").await;
    assert_eq!(open.status(), StatusCode::OK);

    // A freshly issued token passes.
    let token = issue_token("test-secret", "u1", "u1@example.com", "user", 1).unwrap();
    let request = Request::builder()
        .uri("/employees")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let allowed = app.oneshot(request).await.unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}
