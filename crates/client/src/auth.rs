//! Sign-up, sign-in, logout and access-token refresh.
//!
//! These are the only calls that do not go through the refresh interceptor:
//! the credential endpoints need no token, and the refresh endpoint is what
//! the interceptor itself calls.

use ioms_core::forms::{SignInForm, SignUpForm};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use crate::client::{ApiClient, expect_status};
use crate::error::{ApiError, AuthError};
use crate::guard::Route;
use crate::session::{self, Session, SessionUser};

const REGISTER_PATH: &str = "/auth/register/";
const LOGIN_PATH: &str = "/auth/login/";
const REFRESH_PATH: &str = "/api/token/refresh/";

/// Response from `POST /auth/login/`.
#[derive(Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    /// Not every deployment returns the user.
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Response from `POST /api/token/refresh/`.
#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Error body returned by the credential endpoints.
#[derive(Deserialize)]
struct AuthErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

impl ApiClient {
    /// Register a new admin account.
    ///
    /// Does not sign in; the caller navigates to [`Route::SignIn`] next.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation and
    /// `ApiError::Validation` if the backend rejects it. Any status other
    /// than 201 is an error.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Route, ApiError> {
        let registration = form.validate()?;

        let response = self
            .http()
            .post(self.endpoint(REGISTER_PATH))
            .json(&registration)
            .send()
            .await?;
        expect_status(response, &[StatusCode::CREATED], "account").await?;

        tracing::info!("Registration succeeded");
        Ok(Route::SignIn)
    }

    /// Sign in and persist a session valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on 401, `ApiError::InvalidInput`
    /// if the form fails validation, and `ApiError::Session` if the session
    /// cannot be stored.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_in(&self, form: &SignInForm) -> Result<Session, ApiError> {
        let credentials = form.validate()?;

        let response = self
            .http()
            .post(self.endpoint(LOGIN_PATH))
            .json(&credentials)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = response
                .json::<AuthErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "Invalid credentials".to_string());
            tracing::warn!("Sign-in rejected");
            return Err(AuthError::InvalidCredentials(message).into());
        }

        let response = expect_status(response, &[StatusCode::OK], "session").await?;
        let body = response.bytes().await?;
        let login: LoginResponse = serde_json::from_slice(&body)?;

        let user = login.user.unwrap_or_else(|| SessionUser {
            email: credentials.email.into_inner(),
            ..SessionUser::default()
        });

        let session = Session::issue(
            SecretString::from(login.access),
            SecretString::from(login.refresh),
            user,
            session::now_ms(),
        );
        self.store().set(&session)?;

        tracing::info!(expires_at = session.expires_at, "Signed in");
        Ok(session)
    }

    /// Delete the session. Always succeeds from the caller's point of view
    /// unless the store itself fails.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the record cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<Route, ApiError> {
        self.store().clear()?;
        tracing::info!("Signed out");
        Ok(Route::SignIn)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// On success only the access token is replaced; the refresh token and
    /// expiry stay as they were. On any failure the session is deleted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RefreshFailed` if there is no refresh token or the
    /// backend refuses it.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<(), ApiError> {
        match self.try_refresh().await {
            Ok(()) => Ok(()),
            Err(reason) => {
                tracing::error!(error = %reason, "Failed to refresh access token");
                if let Err(e) = self.store().clear() {
                    tracing::warn!(error = %e, "Could not clear session after failed refresh");
                }
                Err(AuthError::RefreshFailed(reason).into())
            }
        }
    }

    async fn try_refresh(&self) -> Result<(), String> {
        let current = self
            .store()
            .get()
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "No refresh token found".to_string())?;

        let response = self
            .http()
            .post(self.endpoint(REFRESH_PATH))
            .json(&serde_json::json!({
                "refresh": current.refresh_token().expose_secret()
            }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP {status}: {error_text}"));
        }

        let refreshed: RefreshResponse = response.json().await.map_err(|e| e.to_string())?;
        if refreshed.access.is_empty() {
            return Err("Refresh response carried an empty access token".to_string());
        }

        self.store()
            .set(&current.with_access(SecretString::from(refreshed.access)))
            .map_err(|e| e.to_string())
    }
}
