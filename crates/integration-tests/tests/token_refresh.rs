//! Integration tests for the refresh-and-retry interceptor.
//!
//! The backend rejects `access-1` with 401 and accepts whatever the refresh
//! endpoint hands out, so each test can tell the original request from the
//! retry by its bearer token.

#![allow(clippy::unwrap_used)]

use ioms_client::session::{self, MemorySessionStore};
use ioms_client::{ApiError, AuthError, PageRequest, SessionStore};
use ioms_integration_tests::{
    ACCESS, REFRESH, TestBackend, order_json, product_json, session_expiring_at,
};
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn reject_token(backend: &TestBackend, endpoint: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
}

async fn refresh_succeeds(backend: &TestBackend, new_access: &str) {
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": REFRESH })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": new_access })))
        .expect(1)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_401_refreshes_once_and_retries_once() {
    let backend = TestBackend::signed_in().await;
    let expires_at = backend.session().unwrap().expires_at;

    reject_token(&backend, "/orders/recent/", ACCESS).await;
    refresh_succeeds(&backend, "access-2").await;

    Mock::given(method("GET"))
        .and(path("/orders/recent/"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json(2, "2025-03-02T09:00:00Z", "5.00", 1),
            order_json(1, "2025-03-01T09:00:00Z", "9.99", 2)
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let orders = backend.client.recent_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders.first().unwrap().id.as_i64(), 2);

    // Only the access token changes; refresh token and expiry are kept.
    let stored = backend.session().unwrap();
    assert_eq!(stored.access_token().expose_secret(), "access-2");
    assert_eq!(stored.refresh_token().expose_secret(), REFRESH);
    assert_eq!(stored.expires_at, expires_at);
}

#[tokio::test]
async fn test_interceptor_applies_to_every_resource() {
    let backend = TestBackend::signed_in().await;

    reject_token(&backend, "/products/", ACCESS).await;
    refresh_succeeds(&backend, "access-2").await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Widget", "9.99", 50, "active")
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = backend
        .client
        .list_products(PageRequest::All, None)
        .await
        .unwrap();
    assert_eq!(page.count, 1);
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let backend = TestBackend::signed_in().await;

    reject_token(&backend, "/orders/recent/", ACCESS).await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired",
            "code": "token_not_valid"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let err = backend.client.recent_orders().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Unauthenticated(AuthError::RefreshFailed(_))
    ));
    assert!(backend.session().is_none());
}

#[tokio::test]
async fn test_second_401_clears_session_without_looping() {
    let backend = TestBackend::signed_in().await;

    reject_token(&backend, "/orders/recent/", ACCESS).await;
    reject_token(&backend, "/orders/recent/", "access-2").await;
    refresh_succeeds(&backend, "access-2").await;

    let err = backend.client.recent_orders().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated(AuthError::Rejected)));
    assert!(backend.session().is_none());

    // One original request, one retry, one refresh.
    assert_eq!(backend.server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_session_fails_before_any_request() {
    let backend = TestBackend::new().await;

    let err = backend.client.recent_orders().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated(AuthError::NoSession)));
    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_session_fails_without_refreshing() {
    let backend = TestBackend::new().await;
    backend
        .store
        .set(&session_expiring_at(session::now_ms() - 1))
        .unwrap();

    let err = backend.client.recent_orders().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Unauthenticated(AuthError::SessionExpired)
    ));
    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_explicit_refresh_without_session() {
    let backend = TestBackend::new().await;

    let err = backend.client.refresh_access_token().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Unauthenticated(AuthError::RefreshFailed(_))
    ));
    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_refreshes_leave_one_complete_record() {
    let backend = TestBackend::signed_in().await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "access-2" })))
        .expect(2)
        .mount(&backend.server)
        .await;

    let (a, b) = tokio::join!(
        backend.client.refresh_access_token(),
        backend.client.refresh_access_token()
    );
    a.unwrap();
    b.unwrap();

    let stored = backend.session().unwrap();
    assert_eq!(stored.access_token().expose_secret(), "access-2");
    assert_eq!(stored.refresh_token().expose_secret(), REFRESH);
    assert!(MemorySessionStore::with_session(stored).is_valid());
}
