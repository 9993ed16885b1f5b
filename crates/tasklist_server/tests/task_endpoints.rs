//! Integration tests for the `/tasks` resource.
//!
//! Each test drives a fresh router over an in-memory store through
//! `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tasklist_core::db::open_db_in_memory;
use tasklist_server::{build_router, AppState, CorsOrigin};
use tower::ServiceExt;
use uuid::Uuid;

fn test_router() -> Router {
    let conn = open_db_in_memory().expect("in-memory store should open");
    build_router(AppState::new(conn), &CorsOrigin::Any)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create(router: &Router, text: &str) -> Value {
    let (status, body) = send(router, Method::POST, "/tasks", Some(json!({ "text": text }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let router = test_router();

    let created = create(&router, "Buy milk").await;
    assert_eq!(created["text"], "Buy milk");
    assert_eq!(created["completed"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    let (status, patched) = send(
        &router,
        Method::PATCH,
        &format!("/tasks/{id}"),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched, json!({ "id": id, "text": "Buy milk", "completed": true }));

    let (status, edited) = send(
        &router,
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(json!({ "text": "Buy oat milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited, json!({ "id": id, "text": "Buy oat milk", "completed": true }));

    let (status, body) = send(&router, Method::DELETE, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let router = test_router();
    for text in ["first", "second", "third"] {
        create(&router, text).await;
    }

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    let texts: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[tokio::test]
async fn create_rejects_blank_or_missing_text() {
    let router = test_router();

    for body in [json!({ "text": "   " }), json!({ "text": "" }), json!({})] {
        let (status, error) = send(&router, Method::POST, "/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "VALIDATION_ERROR");
    }

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let router = test_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let created = create(&router, "real").await;
    let (status, error) = send(
        &router,
        Method::PATCH,
        &format!("/tasks/{}", created["id"].as_str().unwrap()),
        Some(json!({ "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_BODY");
}

#[tokio::test]
async fn delete_is_idempotent_for_known_unknown_and_malformed_ids() {
    let router = test_router();
    let keep = create(&router, "keep").await;
    let gone = create(&router, "gone").await;
    let gone_uri = format!("/tasks/{}", gone["id"].as_str().unwrap());

    for uri in [
        gone_uri.clone(),
        gone_uri,
        format!("/tasks/{}", Uuid::new_v4()),
        "/tasks/not-a-uuid".to_string(),
    ] {
        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([keep]));
}

#[tokio::test]
async fn updates_on_missing_ids_return_not_found_without_side_effects() {
    let router = test_router();
    let bystander = create(&router, "bystander").await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let uri = format!("/tasks/{id}");
        let (status, error) =
            send(&router, Method::PATCH, &uri, Some(json!({ "completed": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["code"], "NOT_FOUND");

        let (status, _) = send(&router, Method::PUT, &uri, Some(json!({ "text": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([bystander]));
}

#[tokio::test]
async fn toggle_twice_restores_original_and_keeps_other_fields() {
    let router = test_router();
    let created = create(&router, "water plants").await;
    let uri = format!("/tasks/{}", created["id"].as_str().unwrap());

    let (_, once) = send(&router, Method::PATCH, &uri, Some(json!({ "completed": true }))).await;
    assert_eq!(once["completed"], true);
    assert_eq!(once["text"], created["text"]);

    let (_, twice) = send(&router, Method::PATCH, &uri, Some(json!({ "completed": false }))).await;
    assert_eq!(twice, created);
}

#[tokio::test]
async fn edit_rejects_blank_text_and_keeps_original() {
    let router = test_router();
    let created = create(&router, "original").await;
    let uri = format!("/tasks/{}", created["id"].as_str().unwrap());

    let (status, error) = send(&router, Method::PUT, &uri, Some(json!({ "text": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (_, listed) = send(&router, Method::GET, "/tasks", None).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn root_reports_the_api_is_running() {
    let router = test_router();
    let (status, body) = send(&router, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().starts_with("task list API running"));
}

#[tokio::test]
async fn cors_preflight_allows_client_origin() {
    let router = test_router();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tasks")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn corrupt_stored_row_is_internal_error_not_validation() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    conn.execute(
        "INSERT INTO tasks (id, text) VALUES (?1, '   ');",
        [Uuid::new_v4().to_string()],
    )
    .expect("seed row should insert");
    let router = build_router(AppState::new(conn), &CorsOrigin::Any);

    let (status, body) = send(&router, Method::GET, "/tasks", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
}
