//! Route and status mapping tests against the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mediscreen_patient_api::router;
use mediscreen_patient_core::{DynStore, MemoryStore, PatientService};

fn app() -> Router {
    let store: DynStore = Box::new(MemoryStore::new());
    router(Arc::new(PatientService::new(store)))
}

fn doe_json() -> Value {
    json!({
        "lastName": "Doe",
        "firstName": "John",
        "birthdate": "2000-01-01",
        "sex": "M",
        "address": "123 Main St.",
        "phone": "555-1234"
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["ok"], true);
}

#[tokio::test]
async fn test_doe_lifecycle() {
    let app = app();

    let (status, body) = send(&app, post_json("/api/patient/validate", &doe_json())).await;
    assert_eq!(status, StatusCode::OK);
    let created = as_json(&body);
    assert_eq!(created["id"], 1);
    assert_eq!(created["lastName"], "Doe");

    let (status, body) = send(&app, get("/api/patient/find/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), created);

    let (status, body) = send(&app, get("/api/patient/finder/Doe")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), created);

    let (status, body) = send(&app, post_empty("/api/patient/delete/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, get("/api/patient/find/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Patient does not exist with id : 1"
    );
}

#[tokio::test]
async fn test_list_empty_is_no_content() {
    let app = app();

    let (status, body) = send(&app, get("/api/patient/list")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    send(&app, post_json("/api/patient/validate", &doe_json())).await;
    let (status, body) = send(&app, get("/api/patient/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_create_is_bad_request() {
    let app = app();
    let mut body = doe_json();
    body["sex"] = json!("X");

    let (status, text) = send(&app, post_json("/api/patient/validate", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(text).unwrap(), "M for Male or F for Female");

    let (status, _) = send(&app, get("/api/patient/list")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let mut body = doe_json();
    body["id"] = json!(42);

    let (status, text) = send(&app(), post_json("/api/patient/validate", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&text)["id"], 1);
}

#[tokio::test]
async fn test_update() {
    let app = app();
    send(&app, post_json("/api/patient/validate", &doe_json())).await;

    let mut replacement = doe_json();
    replacement["firstName"] = json!("Johnny");
    replacement["phone"] = json!("555-0000");

    let (status, body) = send(&app, post_json("/api/patient/update/1", &replacement)).await;
    assert_eq!(status, StatusCode::OK);
    let updated = as_json(&body);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["firstName"], "Johnny");
    assert_eq!(updated["phone"], "555-0000");
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let app = app();

    let (status, _) = send(&app, post_json("/api/patient/update/999", &doe_json())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, post_empty("/api/patient/delete/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/api/patient/finder/Nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Patient does not exist with name : Nobody"
    );
}

#[tokio::test]
async fn test_form_add() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/patient/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "family=Doe&given=John&dob=2000-01-01&sex=M&address=123+Main+St.&phone=555-1234",
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Patient added");

    let (status, body) = send(&app, get("/api/patient/find/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["address"], "123 Main St.");
}

#[tokio::test]
async fn test_form_add_validates() {
    let request = Request::builder()
        .method("POST")
        .uri("/patient/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "family=+&given=John&dob=2000-01-01&sex=M&address=x&phone=y",
        ))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Last Name is mandatory");
}
