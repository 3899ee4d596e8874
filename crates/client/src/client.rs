//! HTTP wrapper for the IOMS REST backend.
//!
//! Every authenticated call goes through [`ApiClient::send_authorized`]:
//!
//! 1. Read the access token from the session store. A missing or expired
//!    session fails here, before anything is sent.
//! 2. Send the request with `Authorization: Bearer <access>`.
//! 3. On `401`, refresh the access token once and retry once. A refresh
//!    failure clears the session; a second `401` clears it too.
//!
//! Responses are checked against the statuses each endpoint promises and
//! mapped to [`ApiError`] variants otherwise.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError};
use crate::session::{self, SessionStore};

/// Typed client for the IOMS backend.
///
/// Cheap to clone; clones share the HTTP connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `config`, keeping the session in `store`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ioms-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config,
                store,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session store this client reads and writes.
    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        self.inner.config.endpoint(path)
    }

    // =========================================================================
    // Request execution
    // =========================================================================

    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
        token: &SecretString,
    ) -> Result<Response, ApiError> {
        let mut request = self
            .inner
            .http
            .request(method.clone(), url)
            .bearer_auth(token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Send an authenticated request, refreshing the token at most once.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` if there is no usable session, if
    /// the refresh fails, or if the retried request is still rejected.
    /// Returns `ApiError::Transport` on network failures.
    #[instrument(skip_all, fields(method = %method, url = %url))]
    pub(crate) async fn send_authorized<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let token = session::access_token(self.store())?;
        let response = self.send_once(&method, url, body, &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::info!("Access token rejected, refreshing");
        self.refresh_access_token().await?;

        let token = session::access_token(self.store())?;
        let retried = self.send_once(&method, url, body, &token).await?;

        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Access token rejected after refresh, clearing session");
            self.store().clear()?;
            return Err(AuthError::Rejected.into());
        }

        Ok(retried)
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send_authorized::<()>(Method::GET, url, None)
            .await?;
        let response = expect_status(response, &[StatusCode::OK], resource).await?;
        decode(response).await
    }

    /// Send a JSON body and decode the JSON answer.
    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        accepted: &[StatusCode],
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self.send_authorized(method, url, Some(body)).await?;
        let response = expect_status(response, accepted, resource).await?;
        decode(response).await
    }

    /// `DELETE` a resource.
    pub(crate) async fn delete(&self, url: &str, resource: &str) -> Result<(), ApiError> {
        let response = self
            .send_authorized::<()>(Method::DELETE, url, None)
            .await?;
        expect_status(
            response,
            &[StatusCode::OK, StatusCode::NO_CONTENT],
            resource,
        )
        .await?;
        Ok(())
    }
}

/// Pass the response through if its status is one of `accepted`, otherwise
/// map it to the matching error.
pub(crate) async fn expect_status(
    response: Response,
    accepted: &[StatusCode],
    resource: &str,
) -> Result<Response, ApiError> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(body),
        StatusCode::UNAUTHORIZED => AuthError::Rejected.into(),
        StatusCode::FORBIDDEN => ApiError::Forbidden(body),
        StatusCode::NOT_FOUND => ApiError::NotFound(resource.to_string()),
        _ => ApiError::Status { status, body },
    })
}

/// Decode a JSON response body.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
