//! SQLite path preparation utilities.

use std::io;
use std::path::PathBuf;

use super::dsn::{is_memory_dsn, split_sqlite_dsn};

/// Ensure the parent directory of a file database exists.
///
/// Memory databases and DSNs without a file path are left alone.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> io::Result<()> {
    if !create_dirs || is_memory_dsn(dsn) {
        return Ok(());
    }
    if let Some(parent) = extract_file_path_from_dsn(dsn).and_then(|p| p.parent().map(PathBuf::from))
    {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Extract the file path from a SQLite DSN.
fn extract_file_path_from_dsn(dsn: &str) -> Option<PathBuf> {
    let (path, _) = split_sqlite_dsn(dsn)?;
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}
