mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{send, test_app};

#[tokio::test]
async fn starts_signed_out() {
    let app = test_app().await;
    let (status, snap) = send(&app, "GET", "/api/auth", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["user"], json!(null));
    assert_eq!(snap["isAuthenticated"], false);
    assert_eq!(snap["isAdmin"], false);
}

#[tokio::test]
async fn login_derives_email_and_flags() {
    let app = test_app().await;
    let (status, snap) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "role": "advisor", "name": "Ada  Lovelace" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["user"]["email"], "ada.lovelace@university.edu");
    assert_eq!(snap["user"]["role"], "advisor");
    assert_eq!(snap["currentRole"], "advisor");
    assert_eq!(snap["isAuthenticated"], true);
    assert_eq!(snap["isAdvisor"], true);
    assert_eq!(snap["isAdmin"], false);

    let (_, again) = send(&app, "GET", "/api/auth", None).await;
    assert_eq!(again, snap);
}

#[tokio::test]
async fn login_validates_role_and_name() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/auth/login", Some(json!({ "name": "Ada" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: role");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "role": "dean", "name": "Ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "role": "admin", "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: name");
}

#[tokio::test]
async fn role_switch_needs_a_user() {
    let app = test_app().await;

    let (status, _) = send(&app, "PUT", "/api/auth/role", Some(json!({ "role": "student" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "role": "admin", "name": "Root" })),
    )
    .await;
    let (status, snap) = send(&app, "PUT", "/api/auth/role", Some(json!({ "role": "student" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["isStudent"], true);
    assert_eq!(snap["isAdmin"], false);
    assert_eq!(snap["user"]["role"], "student");
}

#[tokio::test]
async fn selectors_set_clear_and_survive_partial_updates() {
    let app = test_app().await;

    let (_, snap) = send(
        &app,
        "PUT",
        "/api/auth/selectors",
        Some(json!({ "currentMajor": "CS", "currentStudentId": "S1" })),
    )
    .await;
    assert_eq!(snap["currentMajor"], "CS");
    assert_eq!(snap["currentStudentId"], "S1");

    let (_, snap) = send(
        &app,
        "PUT",
        "/api/auth/selectors",
        Some(json!({ "currentStudentId": null })),
    )
    .await;
    assert_eq!(snap["currentMajor"], "CS");
    assert_eq!(snap["currentStudentId"], json!(null));
}

#[tokio::test]
async fn logout_clears_everything() {
    let app = test_app().await;
    send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "role": "admin", "name": "Root" })),
    )
    .await;
    send(
        &app,
        "PUT",
        "/api/auth/selectors",
        Some(json!({ "currentMajor": "EE" })),
    )
    .await;

    let (status, snap) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["user"], json!(null));
    assert_eq!(snap["currentRole"], json!(null));
    assert_eq!(snap["currentMajor"], json!(null));
    assert_eq!(snap["isAuthenticated"], false);
}
