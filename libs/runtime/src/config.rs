use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::home_dir::resolve_home_dir;

/// Main application configuration: strongly-typed global sections plus a
/// per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Database configuration (optional).
    pub database: Option<DatabaseConfig>,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub home_dir: String, // normalized to an absolute path on load
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds; 0 selects the ingress default.
    #[serde(default)]
    pub timeout_sec: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. "sqlite://database/staffdesk.db" or "sqlite::memory:".
    pub url: String,
    /// Maximum number of connections in the pool (optional, defaults to 10).
    pub max_conns: Option<u32>,
    /// SQLite busy timeout in milliseconds (optional, defaults to 5000).
    pub busy_timeout_ms: Option<u32>,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/staffdesk.log", empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => $HOME/.staffdesk (resolved on load)
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            timeout_sec: 0,
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/staffdesk.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: Some(DatabaseConfig {
                url: "sqlite://database/staffdesk.db".to_string(),
                max_conns: Some(10),
                busy_timeout_ms: Some(5000),
            }),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Optional sections stay None unless YAML/ENV provide them.
        let base = AppConfig {
            server: ServerConfig::default(),
            database: None,
            logging: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // APP__SERVER__PORT=8081 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .context("Failed to extract config from figment")?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c.server)
                    .context("Failed to resolve server.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Typed view of a module section; a missing section yields `T::default()`.
    pub fn module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid configuration for module '{module_name}'")),
            None => Ok(T::default()),
        }
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        if args.mock {
            let db = self.database.get_or_insert_with(|| DatabaseConfig {
                url: String::new(),
                max_conns: None,
                busy_timeout_ms: None,
            });
            db.url = "sqlite::memory:".to_string();
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
    pub mock: bool,
}

const DEFAULT_HOME_SUBDIR: &str = ".staffdesk";

fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let configured = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(configured, DEFAULT_HOME_SUBDIR, true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::tempdir;

    fn is_normalized_path(p: &str) -> bool {
        PathBuf::from(p).is_absolute() && !p.starts_with('~')
    }

    #[test]
    fn test_default_config_structure() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.home_dir, "");
        assert_eq!(config.server.timeout_sec, 0);

        let db = config.database.as_ref().unwrap();
        assert_eq!(db.url, "sqlite://database/staffdesk.db");
        assert_eq!(db.max_conns, Some(10));
        assert_eq!(db.busy_timeout_ms, Some(5000));

        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging["default"].console_level, "info");
        assert_eq!(logging["default"].file, "logs/staffdesk.log");

        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_load_layered_reads_all_sections() {
        let tmp = tempdir().unwrap();
        let home = tmp.path().join("home");
        let cfg_path = tmp.path().join("cfg.yaml");

        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "0.0.0.0"
  port: 9090
  timeout_sec: 15

database:
  url: "sqlite://data/app.db"
  max_conns: 4
  busy_timeout_ms: 2500

logging:
  default:
    console_level: debug
    file: "logs/default.log"

modules:
  staff_directory:
    session_ttl_sec: 600
"#,
            home.to_string_lossy().replace('\\', "/")
        );
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert!(is_normalized_path(&config.server.home_dir));
        assert!(home.is_dir(), "home_dir must be created on load");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.timeout_sec, 15);

        let db = config.database.as_ref().unwrap();
        assert_eq!(db.url, "sqlite://data/app.db");
        assert_eq!(db.max_conns, Some(4));
        assert_eq!(db.busy_timeout_ms, Some(2500));

        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging["default"].console_level, "debug");
        assert_eq!(logging["default"].file, "logs/default.log");

        assert_eq!(config.modules["staff_directory"]["session_ttl_sec"], 600);
    }

    #[test]
    fn test_minimal_yaml_leaves_optional_sections_empty() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "localhost"
  port: 8081
"#,
            tmp.path().join("minimal").to_string_lossy().replace('\\', "/")
        );
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert!(config.server.home_dir.ends_with("minimal"));
        assert_eq!(config.server.port, 8081);
        assert!(config.database.is_none());
        assert!(config.logging.is_none());
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let yaml = r#"
server:
  home_dir: ""
  host: "127.0.0.1"
  port: 8080
unexpected: true
"#;
        let result: Result<AppConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            port: Some(3000),
            verbose: 2,
            mock: true,
            ..Default::default()
        };

        config.apply_cli_overrides(&args);

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.as_ref().unwrap().url, "sqlite::memory:");
        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging["default"].console_level, "trace");
    }

    #[test]
    fn test_cli_verbose_levels() {
        for (verbose, expected) in [(0, "info"), (1, "debug"), (2, "trace"), (5, "trace")] {
            let mut config = AppConfig::default();
            config.apply_cli_overrides(&CliArgs {
                verbose,
                ..Default::default()
            });
            let logging = config.logging.as_ref().unwrap();
            assert_eq!(logging["default"].console_level, expected);
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Knobs {
        #[serde(default)]
        limit: u32,
    }

    #[test]
    fn test_module_config_defaults_and_errors() {
        let mut config = AppConfig::default();
        assert_eq!(config.module_config::<Knobs>("absent").unwrap(), Knobs::default());

        config
            .modules
            .insert("knobs".into(), serde_json::json!({ "limit": 7 }));
        assert_eq!(config.module_config::<Knobs>("knobs").unwrap().limit, 7);

        config
            .modules
            .insert("knobs".into(), serde_json::json!({ "limit": "many" }));
        assert!(config.module_config::<Knobs>("knobs").is_err());
    }

    #[test]
    fn test_to_yaml_roundtrip_basic() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("database:"));

        let roundtrip: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(roundtrip.server.port, config.server.port);
    }
}
