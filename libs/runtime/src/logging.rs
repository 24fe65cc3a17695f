use crate::config::{LoggingConfig, Section};
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- level helpers --------

/// `None` means the sink is switched off; unknown strings fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" | "" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

fn level_or_off(s: &str) -> LevelFilter {
    parse_level(s).unwrap_or(LevelFilter::OFF)
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotatingWriter(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .flush()
    }
}

impl<'a> fmt::MakeWriter<'a> for RotatingWriter {
    type Writer = RotatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// -------- path resolution helpers --------

/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer(section: &Section, log_path: &Path) -> std::io::Result<RotatingWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let rot = FileRotate::new(
        log_path,
        AppendCount::new(section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS)),
        ContentLimit::BytesSurpassed(usize::try_from(max_bytes).unwrap_or(usize::MAX)),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotatingWriter(Arc::new(Mutex::new(rot))))
}

// -------- filters --------

/// Console filter: subsystem sections set their own level, everything else
/// follows the "default" section.
fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .map(|s| level_or_off(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(default), |t, (name, s)| {
            t.with_target(name.clone(), level_or_off(&s.console_level))
        })
}

/// File filter for one section. The default file excludes subsystems that
/// have a file of their own so records are not duplicated.
fn file_targets(cfg: &LoggingConfig, name: &str, section: &Section) -> Targets {
    let level = level_or_off(&section.file_level);
    if name != DEFAULT_SECTION {
        return Targets::new()
            .with_default(LevelFilter::OFF)
            .with_target(name.to_string(), level);
    }

    cfg.iter()
        .filter(|(other, s)| other.as_str() != DEFAULT_SECTION && !s.file.trim().is_empty())
        .fold(Targets::new().with_default(level), |t, (other, _)| {
            t.with_target(other.clone(), LevelFilter::OFF)
        })
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: logging sections keyed by subsystem ("default" is the catch-all)
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let mut file_layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    for (name, section) in cfg {
        if section.file.trim().is_empty() {
            continue;
        }
        let log_path = resolve_log_path(&section.file, base_dir);
        match create_rotating_writer(section, &log_path) {
            Ok(writer) => file_layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_writer(writer)
                    .with_filter(file_targets(cfg, name, section))
                    .boxed(),
            ),
            Err(e) => eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.to_string_lossy(),
                e
            ),
        }
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let _ = Registry::default()
        .with(file_layers)
        .with(console_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

// =================== tests ===================
