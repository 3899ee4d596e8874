//! Sign-in, sign-up, logout and whoami.

use ioms_client::ApiClient;
use ioms_core::forms::{SignInForm, SignUpForm};
use serde_json::json;

use super::{CliError, print_json};

/// Sign in and report the session's user and expiry.
pub async fn sign_in(client: &ApiClient, form: &SignInForm) -> Result<(), CliError> {
    let session = client.sign_in(form).await?;

    print_json(&json!({
        "user": session.user,
        "expires_at": session.expires_at,
    }))
}

/// Register, then point at the sign-in view.
pub async fn sign_up(client: &ApiClient, form: &SignUpForm) -> Result<(), CliError> {
    let next = client.sign_up(form).await?;

    print_json(&json!({
        "registered": form.email.trim(),
        "next": next.path(),
    }))
}

pub fn logout(client: &ApiClient) -> Result<(), CliError> {
    let next = client.logout()?;
    print_json(&json!({ "next": next.path() }))
}

/// Show the stored user. Tokens are never printed.
pub fn whoami(client: &ApiClient) -> Result<(), CliError> {
    let session = client
        .store()
        .get()?
        .ok_or(CliError::Redirect(ioms_client::Route::SignIn))?;

    print_json(&json!({
        "user": session.user,
        "expires_at": session.expires_at,
        "expired": session.is_expired(),
    }))
}
