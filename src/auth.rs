//! Login and registration forms.

use crate::api::{ClientError, Credentials, Registration};

const EMAIL: &str = "email";
const PASSWORD: &str = "password";

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginForm {
    /// Validates the form into login credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the email is missing or
    /// malformed or the password is empty.
    pub fn validate(&self) -> Result<Credentials, ClientError> {
        Ok(Credentials {
            email: validate_email(&self.email)?,
            password: validate_password(&self.password)?,
        })
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Optional display name.
    pub username: Option<String>,
}

impl RegisterForm {
    /// Validates the form into a registration request. A blank username is
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for the same email and password
    /// rules as [`LoginForm::validate`].
    pub fn validate(&self) -> Result<Registration, ClientError> {
        Ok(Registration {
            email: validate_email(&self.email)?,
            password: validate_password(&self.password)?,
            username: self
                .username
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToOwned::to_owned),
        })
    }
}

fn validate_email(raw: &str) -> Result<String, ClientError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ClientError::validation(EMAIL, "is required"));
    }
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(ClientError::validation(EMAIL, "must be an email address"));
    }
    Ok(email.to_owned())
}

fn validate_password(raw: &str) -> Result<String, ClientError> {
    if raw.is_empty() {
        return Err(ClientError::validation(PASSWORD, "is required"));
    }
    Ok(raw.to_owned())
}
