mod common;

use axum::http::StatusCode;
use book_catalog::api::session::authorize;
use book_catalog::crypto::{generate_token, hash_password};
use book_catalog::db::{SessionRepository, UserRepository};
use book_catalog::error::AppError;
use common::spawn_app;

#[tokio::test]
async fn test_signup_then_signin_mints_distinct_tokens() {
    let app = spawn_app().await;

    let signup_token = app.sign_up("a@b.com", "secret").await;

    let (status, body) = app.post("/auth/signin?email=a@b.com&password=secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User has successfully signed in");
    let signin_token = body["token"].as_str().unwrap();

    assert_ne!(signup_token, signin_token);
    assert_eq!(app.session_count("a@b.com").await, 2);
}

#[tokio::test]
async fn test_password_is_stored_as_digest() {
    let app = spawn_app().await;
    app.sign_up("a@b.com", "secret").await;

    let user = UserRepository::get_by_email(&app.db, "a@b.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password, "secret");
    assert_eq!(user.password.len(), 64);
}

#[tokio::test]
async fn test_signin_with_wrong_password() {
    let app = spawn_app().await;
    app.sign_up("a@b.com", "secret").await;

    let (status, body) = app.post("/auth/signin?email=a@b.com&password=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid password credential");
}

#[tokio::test]
async fn test_signin_unknown_user() {
    let app = spawn_app().await;

    let (status, body) = app.post("/auth/signin?email=ghost@b.com&password=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User does not exist");
}

#[tokio::test]
async fn test_signup_twice_fails() {
    let app = spawn_app().await;
    app.sign_up("a@b.com", "secret").await;

    let (status, body) = app.post("/auth/signup?email=a@b.com&password=other").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_signup_requires_credentials() {
    let app = spawn_app().await;

    let (status, _) = app.post("/auth/signup?email=a@b.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signout_with_unknown_token() {
    let app = spawn_app().await;
    app.sign_up("a@b.com", "secret").await;

    let (status, body) = app.post("/auth/signout?email=a@b.com&token=not-a-token").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid request due to session expiration or invalid credentials"
    );
}

#[tokio::test]
async fn test_signout_without_credentials() {
    let app = spawn_app().await;

    let (status, body) = app.post("/auth/signout?email=a@b.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You lack authorization to make this call");
}

#[tokio::test]
async fn test_signout_removes_only_that_session() {
    let app = spawn_app().await;
    let token = app.sign_up("a@b.com", "secret").await;
    app.post("/auth/signin?email=a@b.com&password=secret").await;

    let (status, body) = app
        .post(&format!("/auth/signout?email=a@b.com&token={}", token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User has successfully signed out");

    assert!(SessionRepository::get(&app.db, "a@b.com", &token)
        .await
        .unwrap()
        .is_none());
    assert_eq!(app.session_count("a@b.com").await, 1);

    // the token is gone, so a second sign-out fails
    let (status, _) = app
        .post(&format!("/auth/signout?email=a@b.com&token={}", token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_authorize_requires_exact_pair() {
    let app = spawn_app().await;
    let token = app.sign_up("a@b.com", "secret").await;
    app.sign_up("c@d.com", "secret").await;

    assert!(authorize(&app.db, Some("a@b.com"), Some(token.as_str())).await.is_ok());
    assert!(authorize(&app.db, Some(" a@b.com "), Some(token.as_str())).await.is_ok());
    assert!(authorize(&app.db, Some("c@d.com"), Some(token.as_str())).await.is_err());
    assert!(authorize(&app.db, None, Some(token.as_str())).await.is_err());
    assert!(authorize(&app.db, Some("a@b.com"), Some("")).await.is_err());
}

#[tokio::test]
async fn test_losing_signup_insert_reports_existing_user() {
    let app = spawn_app().await;
    let digest = hash_password("secret");

    UserRepository::create_with_session(&app.db, "a@b.com", &digest, &generate_token())
        .await
        .unwrap();

    // a second insert that slipped past the existence check
    let err = UserRepository::create_with_session(&app.db, "a@b.com", &digest, &generate_token())
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "User already exists"),
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(app.session_count("a@b.com").await, 1);
}

#[tokio::test]
async fn test_signup_storage_failure_is_generic() {
    let app = spawn_app().await;
    app.drop_table("users").await;

    let (status, body) = app.post("/auth/signup?email=a@b.com&password=secret").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Unable to sign up the user"}));
}
