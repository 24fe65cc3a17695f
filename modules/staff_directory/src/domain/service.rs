use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::{Employee, EmployeeFields};
use crate::domain::error::DomainError;
use crate::domain::repo::EmployeesRepository;
use crate::domain::validation::validate_employee;

/// Domain service for employee CRUD.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct EmployeeService {
    repo: Arc<dyn EmployeesRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeesRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "staff_directory.service.list_employees", skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<Employee>, DomainError> {
        let employees = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    #[instrument(name = "staff_directory.service.get_employee", skip(self), fields(employee_id = id))]
    pub async fn get_employee(&self, id: i32) -> Result<Employee, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::employee_not_found(id))
    }

    #[instrument(
        name = "staff_directory.service.add_employee",
        skip(self, fields),
        fields(name = %fields.name)
    )]
    pub async fn add_employee(&self, fields: EmployeeFields) -> Result<Employee, DomainError> {
        validate_employee(&fields)?;

        let employee = self
            .repo
            .insert(fields)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(employee_id = employee.id, "Created employee");
        Ok(employee)
    }

    /// Existence is checked before the submitted fields are validated, so an
    /// unknown id is reported as not found even for an invalid submission.
    #[instrument(
        name = "staff_directory.service.update_employee",
        skip(self, fields),
        fields(employee_id = id)
    )]
    pub async fn update_employee(
        &self,
        id: i32,
        fields: EmployeeFields,
    ) -> Result<Employee, DomainError> {
        self.get_employee(id).await?;
        validate_employee(&fields)?;

        let updated = self
            .repo
            .update(id, fields.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !updated {
            // Deleted between the lookup and the write.
            return Err(DomainError::employee_not_found(id));
        }

        info!("Updated employee");
        Ok(Employee {
            id,
            name: fields.name,
            role: fields.role,
            email: fields.email,
        })
    }

    #[instrument(name = "staff_directory.service.delete_employee", skip(self), fields(employee_id = id))]
    pub async fn delete_employee(&self, id: i32) -> Result<(), DomainError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !deleted {
            return Err(DomainError::employee_not_found(id));
        }
        info!("Deleted employee");
        Ok(())
    }
}
