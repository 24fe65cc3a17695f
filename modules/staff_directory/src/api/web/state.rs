use std::sync::Arc;

use crate::api::web::templates::Templates;
use crate::domain::auth::AuthService;
use crate::domain::service::EmployeeService;

/// Cookie behaviour shared by all handlers.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub secure: bool,
    pub csrf_enabled: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: false,
            csrf_enabled: true,
        }
    }
}

/// Everything the web handlers need, passed as an `Extension`.
#[derive(Clone)]
pub struct WebState {
    pub employees: Arc<EmployeeService>,
    pub auth: Arc<AuthService>,
    pub templates: Arc<Templates>,
    pub cookies: CookieSettings,
}
