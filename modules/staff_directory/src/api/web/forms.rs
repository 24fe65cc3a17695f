use serde::Deserialize;

use crate::contract::EmployeeFields;

/// `application/x-www-form-urlencoded` login submission. Missing fields
/// deserialize as empty strings so they surface as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    pub name: String,
    pub role: String,
    pub email: String,
    pub csrf_token: String,
}

impl EmployeeForm {
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields::new(&self.name, &self.role, &self.email)
    }
}
