//! Form validation. Every check runs on each submission and all failures are
//! returned together, tagged with the field they belong to.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::ValidateEmail;

use crate::contract::EmployeeFields;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Invalid email address.";
pub const INVALID_CSRF: &str = "The CSRF token is missing or invalid.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of `(field, message)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Messages reported for one field, in insertion order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Group messages by field. `fields` are always present in the result,
    /// with an empty list when they have no error.
    pub fn by_field(&self, fields: &[&str]) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = fields
            .iter()
            .map(|f| ((*f).to_string(), Vec::new()))
            .collect();
        for e in &self.0 {
            grouped
                .entry(e.field.clone())
                .or_default()
                .push(e.message.clone());
        }
        grouped
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Address accepted by `validator` with at least one dot after the `@`.
pub fn is_valid_email(value: &str) -> bool {
    let domain_has_dot = value
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    domain_has_dot && value.validate_email()
}

fn require(errors: &mut ValidationErrors, field: &str, value: &str) -> bool {
    if is_blank(value) {
        errors.push(field, REQUIRED);
        return false;
    }
    true
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "username", username);
    require(&mut errors, "password", password);
    errors.into_result()
}

pub fn validate_employee(fields: &EmployeeFields) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "name", &fields.name);
    require(&mut errors, "role", &fields.role);
    if require(&mut errors, "email", &fields.email) && !is_valid_email(&fields.email) {
        errors.push("email", INVALID_EMAIL);
    }
    errors.into_result()
}
