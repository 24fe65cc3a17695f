use async_trait::async_trait;

use crate::contract::{Employee, EmployeeFields, User};

/// Port for the domain layer: employee persistence.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait EmployeesRepository: Send + Sync {
    /// Load an employee by id.
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Employee>>;
    /// All employees ordered by ascending id.
    async fn list_all(&self) -> anyhow::Result<Vec<Employee>>;
    /// Insert validated fields; the store assigns the id.
    async fn insert(&self, fields: EmployeeFields) -> anyhow::Result<Employee>;
    /// Overwrite all fields. Returns false if no row has that id.
    async fn update(&self, id: i32, fields: EmployeeFields) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}

/// Port for the credential store.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn username_exists(&self, username: &str) -> anyhow::Result<bool>;
    /// Insert a user with an already hashed password.
    async fn insert(&self, username: &str, password_hash: &str) -> anyhow::Result<User>;
}
