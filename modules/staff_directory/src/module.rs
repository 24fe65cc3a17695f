use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::web::state::{CookieSettings, WebState};
use crate::api::web::templates::Templates;
use crate::api::web::register_routes;
use crate::config::StaffDirectoryConfig;
use crate::domain::auth::{Argon2PasswordHasher, AuthService};
use crate::domain::service::EmployeeService;
use crate::domain::session::SessionStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{SeaOrmEmployeesRepository, SeaOrmUsersRepository};

pub const MODULE_NAME: &str = "staff_directory";

/// Wired module: services built over the database plus the web routes.
#[derive(Clone)]
pub struct StaffDirectory {
    employees: Arc<EmployeeService>,
    auth: Arc<AuthService>,
    config: StaffDirectoryConfig,
}

impl StaffDirectory {
    /// Run migrations and wire repositories into the domain services.
    pub async fn init(db: &db::DbHandle, cfg: StaffDirectoryConfig) -> anyhow::Result<Self> {
        info!("Initializing staff_directory module");
        debug!(
            "Loaded staff_directory config: session_ttl_sec={}, csrf_enabled={}, cookie_secure={}",
            cfg.session_ttl_sec, cfg.csrf_enabled, cfg.cookie_secure
        );

        Self::migrate(db).await?;

        let conn = db.sea();
        let employees = EmployeeService::new(Arc::new(SeaOrmEmployeesRepository::new(conn.clone())));
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(cfg.session_ttl_sec)));
        let auth = AuthService::new(
            Arc::new(SeaOrmUsersRepository::new(conn)),
            Arc::new(Argon2PasswordHasher),
            sessions,
        );

        Ok(Self {
            employees: Arc::new(employees),
            auth: Arc::new(auth),
            config: cfg,
        })
    }

    /// Create the `users` and `employees` tables. Safe to run on every start.
    pub async fn migrate(db: &db::DbHandle) -> anyhow::Result<()> {
        info!("Running staff_directory database migrations");
        Migrator::up(&db.sea(), None)
            .await
            .context("staff_directory migrations failed")?;
        info!("Staff directory migrations completed successfully");
        Ok(())
    }

    pub fn employees(&self) -> Arc<EmployeeService> {
        self.employees.clone()
    }

    pub fn auth(&self) -> Arc<AuthService> {
        self.auth.clone()
    }

    /// Page routes for the directory, ready to be mounted by the ingress.
    pub fn router(&self) -> anyhow::Result<axum::Router> {
        let templates = Templates::new().context("failed to load templates")?;
        let state = WebState {
            employees: self.employees.clone(),
            auth: self.auth.clone(),
            templates: Arc::new(templates),
            cookies: CookieSettings {
                secure: self.config.cookie_secure,
                csrf_enabled: self.config.csrf_enabled,
            },
        };
        info!("Registering staff_directory routes");
        Ok(register_routes(axum::Router::new(), state))
    }
}
