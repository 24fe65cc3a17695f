pub mod auth;
pub mod error;
pub mod repo;
pub mod service;
pub mod session;
pub mod validation;
