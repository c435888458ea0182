use super::models::CredentialsRequest;
use crate::common::validation::is_valid_email;
use crate::common::{ValidationResult, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Rules for `POST /auth/register`
pub struct RegisterValidator;

/// Rules for `POST /auth/login`
pub struct LoginValidator;

impl Validator<CredentialsRequest> for RegisterValidator {
    fn validate(&self, data: &CredentialsRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(data.email.trim()) {
            result.add_error("email", "Please enter a valid email");
        }

        if data.password.chars().count() < MIN_PASSWORD_LENGTH {
            result.add_error("password", "Password must be at least 6 characters");
        }

        result
    }
}

impl Validator<CredentialsRequest> for LoginValidator {
    fn validate(&self, data: &CredentialsRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(data.email.trim()) {
            result.add_error("email", "Please enter a valid email");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
