//! Client-side shape validation for the auth forms.
//!
//! Validation runs before any upstream call is made; the first violated
//! field rule is surfaced verbatim as a [`CoreError::Validation`]. Field
//! order is fixed per form so the "first" violation is deterministic.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Login form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
}

impl LoginInput {
    /// Validate the form shape, surfacing the first violated rule.
    pub fn validated(&self) -> Result<(), CoreError> {
        check(self, &["username", "password"])
    }
}

impl SignupInput {
    /// Validate the form shape, surfacing the first violated rule.
    pub fn validated(&self) -> Result<(), CoreError> {
        check(self, &["username", "password", "full_name", "email"])
    }
}

/// Run `validator` and reduce any failures to the first violation in
/// declared field order.
fn check<T: Validate>(input: &T, field_order: &[&str]) -> Result<(), CoreError> {
    match input.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(CoreError::Validation(first_message(&errors, field_order))),
    }
}

/// Pick the message of the first violated rule, walking fields in
/// declared order. Falls back to a generic message if a rule carries no
/// message (none of ours do).
fn first_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let by_field = errors.field_errors();
    for field in field_order {
        if let Some(violations) = by_field.get(*field) {
            if let Some(violation) = violations.first() {
                if let Some(message) = &violation.message {
                    return message.to_string();
                }
            }
        }
    }
    "Invalid form data".to_string()
}
