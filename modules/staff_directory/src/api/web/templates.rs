//! Server-side HTML templates, embedded in the binary.

use serde::Serialize;
use tera::{Context, Tera};

use crate::contract::{Employee, EmployeeFields};
use crate::domain::validation::ValidationErrors;

const LOGIN_FIELDS: &[&str] = &["csrf_token", "username", "password"];
const EMPLOYEE_FIELDS: &[&str] = &["csrf_token", "name", "role", "email"];

pub struct Templates {
    tera: Tera,
}

/// Values needed to render the login page.
#[derive(Debug, Default)]
pub struct LoginView<'a> {
    pub csrf_token: &'a str,
    pub username: &'a str,
    pub flash: Option<&'a str>,
    pub errors: Option<&'a ValidationErrors>,
}

/// Values needed to render the add/edit form.
#[derive(Debug)]
pub struct EmployeeFormView<'a> {
    pub heading: &'a str,
    pub action: &'a str,
    pub csrf_token: &'a str,
    pub form: &'a EmployeeFields,
    pub errors: Option<&'a ValidationErrors>,
}

impl Templates {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../../templates/base.html")),
            ("login.html", include_str!("../../../templates/login.html")),
            ("dashboard.html", include_str!("../../../templates/dashboard.html")),
            (
                "employee_form.html",
                include_str!("../../../templates/employee_form.html"),
            ),
        ])?;
        Ok(Self { tera })
    }

    pub fn login(&self, view: &LoginView<'_>) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("csrf_token", view.csrf_token);
        ctx.insert("username", view.username);
        ctx.insert("flash", &view.flash);
        ctx.insert("errors", &errors_by_field(view.errors, LOGIN_FIELDS));
        self.tera.render("login.html", &ctx)
    }

    pub fn dashboard(&self, employees: &[Employee]) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("employees", employees);
        self.tera.render("dashboard.html", &ctx)
    }

    pub fn employee_form(&self, view: &EmployeeFormView<'_>) -> tera::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("heading", view.heading);
        ctx.insert("action", view.action);
        ctx.insert("csrf_token", view.csrf_token);
        ctx.insert("form", view.form);
        ctx.insert("errors", &errors_by_field(view.errors, EMPLOYEE_FIELDS));
        self.tera.render("employee_form.html", &ctx)
    }
}

fn errors_by_field(errors: Option<&ValidationErrors>, fields: &[&str]) -> impl Serialize {
    errors
        .cloned()
        .unwrap_or_default()
        .by_field(fields)
}
