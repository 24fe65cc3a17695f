//! SQLite DSN helpers.

pub mod dsn;
pub(crate) mod path;
