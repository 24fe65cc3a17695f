use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use staff_directory::module::MODULE_NAME;
use staff_directory::{StaffDirectory, StaffDirectoryConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use web_ingress::WebIngressConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// StaffDesk Server - employee directory web application
#[derive(Parser)]
#[command(name = "staffdesk-server")]
#[command(about = "StaffDesk Server - employee directory web application")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Create a login account
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("StaffDesk Server starting");
    tracing::debug!(server = ?config.server, "Effective server configuration");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
        Commands::CreateUser { username, password } => {
            create_user(config, &username, &password).await
        }
    }
}

/// Open the configured SQLite database; relative paths resolve under home_dir.
async fn connect_db(config: &AppConfig) -> Result<DbHandle> {
    let db_config = config
        .database
        .clone()
        .or_else(|| AppConfig::default().database)
        .ok_or_else(|| anyhow!("Database URL not configured"))?;

    let dsn = db_config.url.trim();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    let base_dir = PathBuf::from(&config.server.home_dir);
    let final_dsn = db::absolutize_sqlite_dsn(dsn, &base_dir, true)
        .with_context(|| format!("Invalid database DSN '{dsn}'"))?;

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
    };

    tracing::info!("Connecting to database: {}", final_dsn);
    let db = DbHandle::connect(&final_dsn, connect_opts).await?;
    tracing::info!(in_memory = db.is_in_memory(), "Connected to database");
    Ok(db)
}

async fn init_directory(config: &AppConfig, db: &DbHandle) -> Result<StaffDirectory> {
    let module_cfg: StaffDirectoryConfig = config.module_config(MODULE_NAME)?;
    StaffDirectory::init(db, module_cfg).await
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db = connect_db(&config).await?;
    let directory = init_directory(&config, &db).await?;

    let ingress_cfg = WebIngressConfig::from_server(&config.server);
    let router = web_ingress::build_router(directory.router()?, &ingress_cfg);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = web_ingress::shutdown::wait_for_shutdown().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signals");
        }
        signal_cancel.cancel();
    });

    let served = web_ingress::serve(router, &ingress_cfg, cancel).await;
    db.close().await;
    tracing::info!("StaffDesk Server stopped");
    served
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: StaffDirectoryConfig = config.module_config(MODULE_NAME)?;
    WebIngressConfig::from_server(&config.server)
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .context("Invalid server host/port")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

async fn create_user(config: AppConfig, username: &str, password: &str) -> Result<()> {
    let db = connect_db(&config).await?;
    let directory = init_directory(&config, &db).await?;

    let user = directory.auth().create_user(username, password).await?;
    println!("Created user '{}' (id {})", user.username, user.id);

    db.close().await;
    Ok(())
}
