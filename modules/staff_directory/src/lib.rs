//! Employee directory: credential store, cookie sessions and employee CRUD
//! served as server-rendered HTML pages.
//!
//! Layout follows the usual split:
//! - `contract`: plain data types shared with callers
//! - `domain`: validation, services and repository ports
//! - `infra`: SeaORM entities, repositories and migrations
//! - `api::web`: axum handlers, extractors and templates

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::StaffDirectoryConfig;
pub use module::StaffDirectory;
