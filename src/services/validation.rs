// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and profile field rules.
//!
//! Each validator checks its rules in a fixed order and returns the first
//! one that fails.

use crate::models::User;

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters accepted as "special" in a password.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A field rule violation.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username must contain at least 6 characters")]
    UsernameTooShort,

    #[error("User already exist")]
    UsernameTaken,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Password must contain at least 8 characters")]
    PasswordTooShort,

    #[error("Password must contain at least 1 upper case character")]
    MissingUppercase,

    #[error("Password must contain at least 1 number")]
    MissingDigit,

    #[error("Password must contain at least 1 special character")]
    MissingSpecialChar,

    #[error("Password does not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UsernameTooShort => "username_too_short",
            ValidationError::UsernameTaken => "username_taken",
            ValidationError::InvalidEmail => "invalid_email",
            ValidationError::EmailTaken => "email_taken",
            ValidationError::PasswordTooShort => "password_too_short",
            ValidationError::MissingUppercase => "missing_uppercase",
            ValidationError::MissingDigit => "missing_digit",
            ValidationError::MissingSpecialChar => "missing_special_char",
            ValidationError::PasswordMismatch => "password_mismatch",
        }
    }
}

/// Check username length, then uniqueness against `users`.
///
/// `exclude` names a user whose own record does not count as a collision
/// (the active user during a profile update).
pub fn validate_username(
    username: &str,
    users: &[User],
    exclude: Option<&str>,
) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    let taken = users
        .iter()
        .filter(|u| Some(u.username.as_str()) != exclude)
        .any(|u| u.username == username);
    if taken {
        return Err(ValidationError::UsernameTaken);
    }
    Ok(())
}

/// Check the email has an `@`, then uniqueness against `users`.
pub fn validate_email(
    email: &str,
    users: &[User],
    exclude: Option<&str>,
) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let taken = users
        .iter()
        .filter(|u| Some(u.username.as_str()) != exclude)
        .any(|u| u.email == email);
    if taken {
        return Err(ValidationError::EmailTaken);
    }
    Ok(())
}

/// Check password strength and that it matches its confirmation.
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::MissingSpecialChar);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
