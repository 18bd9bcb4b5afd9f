//! Login, registration and logout handlers.

use std::io::Write;

use tracing::info;

use super::output::write_line;
use super::{NavigationRequest, Navigator};
use crate::api::ClientError;
use crate::auth::{LoginForm, RegisterForm};
use crate::routes::Route;
use crate::session::SessionState;
use crate::view::{History, Location};

/// Signs in with the request's credentials and moves to the catalog.
///
/// Without credentials the login prompt is shown instead.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for a malformed form, the login
/// error, or a session write error.
pub async fn login<W: Write>(
    nav: &mut Navigator<'_>,
    mut history: History,
    request: &NavigationRequest,
    out: &mut W,
) -> Result<History, ClientError> {
    if request.email.is_none() && request.password.is_none() {
        write_line(out, "Sign in with --email and --password.")?;
        return Ok(history);
    }

    let form = LoginForm {
        email: request.email.clone().unwrap_or_default(),
        password: request.password.clone().unwrap_or_default(),
    };
    let credentials = form.validate()?;
    let token = nav.services.auth.login(&credentials).await?;
    let state = SessionState::new(&token);
    nav.store.save(&state)?;
    nav.session = Some(state);
    nav.signed_in = true;
    info!(email = %credentials.email, "signed in");

    write_line(out, &format!("Signed in as {}.", credentials.email))?;
    history.push(Location::at(&Route::Books.to_string())?);
    Ok(history)
}

/// Creates an account and moves to the login page.
///
/// Without credentials the registration prompt is shown instead.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for a malformed form, or the
/// registration error.
pub async fn register<W: Write>(
    nav: &Navigator<'_>,
    mut history: History,
    request: &NavigationRequest,
    out: &mut W,
) -> Result<History, ClientError> {
    if request.email.is_none() && request.password.is_none() {
        write_line(
            out,
            "Create an account with --email and --password (and optionally --username).",
        )?;
        return Ok(history);
    }

    let form = RegisterForm {
        email: request.email.clone().unwrap_or_default(),
        password: request.password.clone().unwrap_or_default(),
        username: request.username.clone(),
    };
    let registration = form.validate()?;
    nav.services.auth.register(&registration).await?;
    info!(email = %registration.email, "account registered");

    write_line(
        out,
        &format!("Account created for {}. Sign in to continue.", registration.email),
    )?;
    history.push(Location::at(&Route::Login.to_string())?);
    Ok(history)
}

/// Forgets the stored session and moves to the login page.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the session file cannot be removed.
pub fn logout<W: Write>(
    nav: &mut Navigator<'_>,
    mut history: History,
    out: &mut W,
) -> Result<History, ClientError> {
    nav.store.clear()?;
    nav.session = None;
    nav.signed_in = false;
    info!("signed out");

    write_line(out, "Signed out.")?;
    history.push(Location::at(&Route::Login.to_string())?);
    Ok(history)
}
