pub mod model;

pub use model::{Employee, EmployeeFields, User};
