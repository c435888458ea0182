//! Tests for auth module
//!
//! These tests drive the auth routes through the full router:
//! - Registration validation, conflicts and token issuance
//! - Login success and enumeration-resistant failures
//! - The bearer-token gate

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::test_support::{register, send, test_app, TEST_SECRET};
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn credentials(email: &str, password: &str) -> Option<serde_json::Value> {
        Some(json!({ "email": email, "password": password }))
    }

    #[tokio::test]
    async fn test_register_returns_id_email_and_token() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            credentials("a@x.com", "secret1"),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "a@x.com");
        assert!(body["id"].as_str().unwrap().starts_with("U_"));

        let tokens = tokens::TokenService::new(TEST_SECRET);
        assert_eq!(tokens.verify(body["token"].as_str().unwrap()).unwrap(), body["id"]);
    }

    #[tokio::test]
    async fn test_register_validation_enumerates_fields() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            credentials("not-an-email", "123"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[tokio::test]
    async fn test_register_password_length_boundary() {
        let (app, _) = test_app().await;

        let (status, _) = send(&app, Method::POST, "/auth/register", None, credentials("a@x.com", "12345")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::POST, "/auth/register", None, credentials("a@x.com", "123456")).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_register_twice_is_conflict_and_keeps_original() {
        let (app, state) = test_app().await;
        register(&app, "a@x.com", "secret1").await;
        let before = state.read().await.store.find_by_email("a@x.com").await.unwrap().unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            credentials("A@X.COM", "different"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists");

        let after = state.read().await.store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(before.id, after.id);
        assert_eq!(before.password_hash, after.password_hash);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (app, _) = test_app().await;
        register(&app, "a@x.com", "secret1").await;

        let (status, body) = send(&app, Method::POST, "/auth/login", None, credentials("a@x.com", "secret1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        let tokens = tokens::TokenService::new(TEST_SECRET);
        assert!(tokens.verify(body["token"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (app, _) = test_app().await;
        register(&app, "a@x.com", "secret1").await;

        let unknown = send(&app, Method::POST, "/auth/login", None, credentials("nobody@x.com", "secret1")).await;
        let wrong = send(&app, Method::POST, "/auth/login", None, credentials("a@x.com", "wrong-password")).await;

        assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown, wrong);
        assert_eq!(unknown.1["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_validation() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/auth/login", None, credentials("a@x.com", "")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "password");
    }

    #[tokio::test]
    async fn test_mistyped_body_is_validation_error() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": 5, "password": "secret1" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        use axum::body::{to_bytes, Body};
        use axum::http::{header, Request};
        use tower::ServiceExt;

        let (app, _) = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let (app, _) = test_app().await;
        let token = register(&app, "a@x.com", "secret1").await;

        let (status, _) = send(&app, Method::GET, "/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["favoritesCount"], 0);
    }

    #[tokio::test]
    async fn test_gate_rejects_bad_tokens() {
        let (app, _) = test_app().await;
        let token = register(&app, "a@x.com", "secret1").await;

        let forged = tokens::TokenService::new("other_secret").issue("U_ANY").unwrap();
        let (status, _) = send(&app, Method::GET, "/auth/me", Some(&forged), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/auth/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gate_rejects_expired_token() {
        let (app, _) = test_app().await;
        register(&app, "a@x.com", "secret1").await;

        let (_, body) = send(&app, Method::POST, "/auth/login", None, credentials("a@x.com", "secret1")).await;
        let user_id = body["id"].as_str().unwrap();
        let expired = tokens::TokenService::new(TEST_SECRET)
            .issue_at(user_id, Utc::now() - Duration::days(31))
            .unwrap();

        let (status, _) = send(&app, Method::GET, "/auth/me", Some(&expired), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gate_rejects_token_for_unknown_user() {
        let (app, _) = test_app().await;

        let orphan = tokens::TokenService::new(TEST_SECRET).issue("U_DOESNOTEXIST").unwrap();
        let (status, _) = send(&app, Method::GET, "/auth/me", Some(&orphan), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_token_parsing() {
        use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        assert_eq!(extractors::bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extractors::bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(extractors::bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extractors::bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def.ghi"));
        assert_eq!(extractors::bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("BEARER  abc.def.ghi "));
        assert_eq!(extractors::bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }
}
