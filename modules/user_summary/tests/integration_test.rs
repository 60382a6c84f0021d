use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use user_summary::{
    api::rest::routes::register_routes,
    contract::error::SourceError,
    contract::model::UserRecord,
    domain::{ports::UserSource, service::SummaryService},
};

/// Source stub serving a fixed in-memory user set
struct StaticSource {
    users: Vec<UserRecord>,
}

#[async_trait]
impl UserSource for StaticSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError> {
        Ok(self.users.clone())
    }
}

/// Source stub that always fails, standing in for an unreachable upstream
struct FailingSource;

#[async_trait]
impl UserSource for FailingSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError> {
        Err(SourceError::status(502))
    }
}

fn sample_user(
    id: u64,
    first: &str,
    last: &str,
    gender: &str,
    age: u32,
    hair: &str,
    postal: &str,
    department: Option<&str>,
) -> UserRecord {
    UserRecord {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        gender: gender.to_string(),
        age,
        hair_color: hair.to_string(),
        postal_code: postal.to_string(),
        department: department.map(str::to_string),
    }
}

fn test_router(source: impl UserSource + 'static) -> Router {
    let service = Arc::new(SummaryService::new(Arc::new(source)));
    register_routes(Router::new(), service)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}

#[tokio::test]
async fn summary_endpoint_groups_users_by_department() {
    let router = test_router(StaticSource {
        users: vec![
            sample_user(1, "A", "B", "male", 30, "black", "1", Some("Eng")),
            sample_user(2, "C", "D", "female", 40, "black", "2", Some("Eng")),
        ],
    });

    let response = router
        .oneshot(
            Request::builder()
                .uri("/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    let eng = &json["Eng"];
    assert_eq!(eng["male"], 1);
    assert_eq!(eng["female"], 1);
    assert_eq!(eng["ageRange"], "30-40");
    assert_eq!(eng["hair"]["black"], 2);
    assert_eq!(eng["addressUser"]["A B"], "1");
    assert_eq!(eng["addressUser"]["C D"], "2");
}

#[tokio::test]
async fn summary_endpoint_preserves_department_order() {
    let router = test_router(StaticSource {
        users: vec![
            sample_user(1, "A", "B", "male", 30, "", "1", Some("Support")),
            sample_user(2, "C", "D", "female", 40, "", "2", Some("Accounting")),
            sample_user(3, "E", "F", "female", 50, "", "3", None),
        ],
    });

    let response = router
        .oneshot(
            Request::builder()
                .uri("/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // First-encounter order must survive serialization.
    let body = body_string(response).await;
    let support = body.find("\"Support\"").expect("Support key missing");
    let accounting = body.find("\"Accounting\"").expect("Accounting key missing");
    let unknown = body.find("\"Unknown\"").expect("Unknown key missing");
    assert!(support < accounting && accounting < unknown);
}

#[tokio::test]
async fn summary_endpoint_handles_empty_user_set() {
    let router = test_router(StaticSource { users: vec![] });

    let response = router
        .oneshot(
            Request::builder()
                .uri("/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "{}");
}

#[tokio::test]
async fn users_endpoint_returns_enriched_records() {
    let router = test_router(StaticSource {
        users: vec![sample_user(
            7,
            "Terry",
            "Medhurst",
            "male",
            50,
            "black",
            "20020",
            Some("Marketing"),
        )],
    });

    let response = router
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["users"][0]["id"], 7);
    assert_eq!(json["users"][0]["firstName"], "Terry");
    assert_eq!(json["users"][0]["department"], "Marketing");
    assert_eq!(json["users"][0]["postalCode"], "20020");
}

#[tokio::test]
async fn failing_source_yields_generic_error_payload() {
    let router = test_router(FailingSource);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    // Generic payload only; upstream detail stays in the log.
    assert_eq!(json["error"], "Failed to fetch or process user data");
    assert_eq!(json["code"], 500);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn service_summary_matches_engine_output() {
    let users = vec![
        sample_user(1, "A", "B", "male", 30, "black", "1", Some("Eng")),
        sample_user(2, "C", "D", "female", 40, "brown", "2", None),
    ];
    let service = SummaryService::new(Arc::new(StaticSource {
        users: users.clone(),
    }));

    let summary = service.department_summary().await.unwrap();
    assert_eq!(
        summary,
        user_summary::domain::summary::generate_user_summary(&users)
    );
}
