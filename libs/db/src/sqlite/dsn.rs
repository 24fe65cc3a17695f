//! SQLite DSN classification and normalization.

use std::io;
use std::path::{Path, PathBuf};

/// Split a SQLite DSN into its path part and optional query string.
///
/// Accepts both `sqlite://path` and `sqlite:path`. Returns `None` when the
/// DSN does not use the sqlite scheme.
pub(crate) fn split_sqlite_dsn(dsn: &str) -> Option<(&str, Option<&str>)> {
    let rest = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    Some(match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    })
}

/// Check if the DSN represents an in-memory SQLite database.
///
/// Returns `true` for:
/// - `sqlite::memory:`, `sqlite://:memory:` and `sqlite://memory:`
/// - DSNs carrying a `mode=memory` query parameter
pub fn is_memory_dsn(dsn: &str) -> bool {
    let Some((path, query)) = split_sqlite_dsn(dsn.trim()) else {
        return false;
    };
    if matches!(path, ":memory:" | "memory:") {
        return true;
    }
    query.is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .any(|(k, v)| k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory"))
    })
}

/// Rewrite a file DSN so that a relative database path is anchored at
/// `base_dir`. In-memory DSNs are normalized to `sqlite::memory:`.
///
/// With `create_dirs` the parent directory of the database file is created.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> io::Result<String> {
    let dsn = dsn.trim();
    if is_memory_dsn(dsn) {
        return Ok("sqlite::memory:".to_string());
    }
    let (path_str, query) = split_sqlite_dsn(dsn).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("DSN must start with sqlite: (got: {dsn})"),
        )
    })?;

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Empty SQLite path in DSN",
        ));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}
