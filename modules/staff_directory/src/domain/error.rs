use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: i32 },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Password hashing failed: {message}")]
    PasswordHash { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn employee_not_found(id: i32) -> Self {
        Self::EmployeeNotFound { id }
    }

    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    pub fn password_hash(message: impl Into<String>) -> Self {
        Self::PasswordHash {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
