use serde::{Deserialize, Serialize};

/// Stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
}

/// Editable employee fields. Used for both add and edit; edit overwrites all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl EmployeeFields {
    pub fn new(name: impl Into<String>, role: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            email: email.into(),
        }
    }
}

impl From<Employee> for EmployeeFields {
    fn from(e: Employee) -> Self {
        Self {
            name: e.name,
            role: e.role,
            email: e.email,
        }
    }
}

/// Credential record. `password_hash` is a PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}
