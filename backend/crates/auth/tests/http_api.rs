//! HTTP-level tests for the auth router.
//!
//! The router runs against the in-memory directory and a fixed-code mock
//! channel, driven request by request with `oneshot`.

use auth::domain::{PhoneNumber, UserDirectory};
use auth::{AuthConfig, InMemoryPendingSignups, InMemoryUserDirectory, MockOtpChannel, auth_router_generic};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const CODE: &str = "123456";

fn app() -> Router {
    app_with(InMemoryUserDirectory::new())
}

fn app_with(users: InMemoryUserDirectory) -> Router {
    auth_router_generic(
        users,
        InMemoryPendingSignups::new(),
        MockOtpChannel::with_fixed_code("+91", CODE),
        AuthConfig::development(),
    )
}

fn signup_body(phone_no: &str) -> Value {
    json!({
        "first_name": "Asha",
        "last_name": "Rao",
        "phone_no": phone_no,
        "gender": "female",
        "address": "12 MG Road",
        "dob": "1995-04-02",
        "blood_type": "O+"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get_user(app: &Router, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri("/user");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn register(app: &Router, phone_no: &str) -> String {
    let (status, _) = post_json(app, "/initiate-signup", signup_body(phone_no)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        app,
        "/verify-signup",
        json!({ "phone_no": phone_no, "otp": CODE }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn signup_then_profile() {
    let app = app();

    let (status, body) = post_json(&app, "/initiate-signup", signup_body("9000000001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Mock OTP sent for signup" }));

    let (status, body) = post_json(
        &app,
        "/verify-signup",
        json!({ "phone_no": "9000000001", "otp": CODE }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user_details"]["phone_no"], "9000000001");
    assert_eq!(body["user_details"]["dob"], "1995-04-02");
    assert!(body["user_details"]["created_at"].is_string());
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = get_user(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user_details"]["first_name"], "Asha");
    assert!(body["user_details"]["emergency_contact"].is_null());
    assert!(body["user_details"].get("created_at").is_none());
}

#[tokio::test]
async fn profile_of_deleted_user_is_not_found() {
    let users = InMemoryUserDirectory::new();
    let app = app_with(users.clone());
    let token = register(&app, "9000000001").await;

    let phone = PhoneNumber::new("9000000001").unwrap();
    let user = users.find_by_phone(&phone).await.unwrap().unwrap();
    assert!(users.delete(&user.user_id).is_some());

    let (status, body) = get_user(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User profile not found");
}

#[tokio::test]
async fn verify_signup_twice_is_not_found() {
    let app = app();
    register(&app, "9000000001").await;

    let (status, body) = post_json(
        &app,
        "/verify-signup",
        json!({ "phone_no": "9000000001", "otp": CODE }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Signup data not found. Please try again.");
}

#[tokio::test]
async fn signup_for_registered_number_conflicts() {
    let app = app();
    register(&app, "9000000001").await;

    let (status, body) = post_json(&app, "/initiate-signup", signup_body("9000000001")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists");
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn wrong_code_is_unauthorized() {
    let app = app();
    post_json(&app, "/initiate-signup", signup_body("9000000001")).await;

    let (status, body) = post_json(
        &app,
        "/verify-signup",
        json!({ "phone_no": "9000000001", "otp": "000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid OTP");
}

#[tokio::test]
async fn login_flow() {
    let app = app();
    register(&app, "9000000001").await;

    let (status, body) = post_json(&app, "/initiate-login", json!({ "phone_no": "9000000001" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Mock OTP sent for login");

    let (status, body) = post_json(
        &app,
        "/verify-login",
        json!({ "phone_no": "9000000001", "otp": CODE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["user_details"]["phone_no"], "9000000001");
    assert!(body["user_details"].get("updated_at").is_none());
}

#[tokio::test]
async fn login_for_unregistered_number() {
    let app = app();
    let (status, body) = post_json(&app, "/initiate-login", json!({ "phone_no": "9000000002" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn missing_or_foreign_scheme_is_unauthenticated() {
    let app = app();
    let token = register(&app, "9000000001").await;

    for header in [None, Some("Basic abc"), Some("bearer abc"), Some("Bearer "), Some(token.as_str())] {
        let (status, body) = get_user(&app, header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
        assert_eq!(body["message"], "You are not authenticated");
    }
}

#[tokio::test]
async fn tampered_token_is_forbidden() {
    let app = app();
    let token = register(&app, "9000000001").await;

    let mut tampered = token.clone();
    tampered.pop();
    let (status, body) = get_user(&app, Some(&format!("Bearer {tampered}"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access token not valid");

    let (status, _) = get_user(&app, Some("Bearer not-a-token")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_from_other_secret_is_forbidden() {
    let issuer = app();
    let token = register(&issuer, "9000000001").await;

    // A second app instance has its own random secret
    let other = app();
    let (status, _) = get_user(&other, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app();
    let (status, body) = post_json(&app, "/initiate-signup", json!({ "phone_no": "9000000001" })).await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);

    let (status, body) = post_json(&app, "/initiate-login", json!({ "phone_no": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "phone_no is required");
}
