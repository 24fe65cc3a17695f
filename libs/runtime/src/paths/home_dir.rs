//! Home directory resolution for the server's writable state
//! (SQLite database, log files).

use std::io;
use std::path::{Path, PathBuf};

/// Resolve the server home directory into an absolute path.
///
/// - `None` falls back to `<user home>/<default_subdir>`.
/// - A leading `~` is expanded to the user home directory.
/// - Relative paths are resolved against the current working directory.
///
/// When `create` is set the directory is created if it does not exist yet.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> io::Result<PathBuf> {
    let resolved = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => user_home()?.join(default_subdir),
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()?.join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)?;
    }
    Ok(absolute)
}

fn expand_tilde(raw: &str) -> io::Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(Path::new(raw).to_path_buf()),
    }
}

fn user_home() -> io::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "unable to determine the user home directory",
        )
    })
}
