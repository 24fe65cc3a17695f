use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use cookie::Cookie;
use tracing::{debug, info};

use crate::api::web::cookies::{
    clear_session_cookie, csrf_matches, csrf_token, session_cookie,
};
use crate::api::web::error::WebError;
use crate::api::web::extract::CurrentUser;
use crate::api::web::forms::{EmployeeForm, LoginForm};
use crate::api::web::state::WebState;
use crate::api::web::templates::{EmployeeFormView, LoginView};
use crate::contract::EmployeeFields;
use crate::domain::error::DomainError;
use crate::domain::validation::{
    validate_employee, validate_login, ValidationErrors, INVALID_CSRF,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

type WebResult = Result<Response, WebError>;

fn with_cookies(
    cookies: impl IntoIterator<Item = Cookie<'static>>,
    res: impl IntoResponse,
) -> Response {
    let set_cookies: Vec<_> = cookies
        .into_iter()
        .map(|c| (header::SET_COOKIE, c.to_string()))
        .collect();
    (AppendHeaders(set_cookies), res).into_response()
}

/// Path ids are plain non-negative integers; anything else is not found.
fn parse_id(raw: &str) -> Result<i32, WebError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WebError::NotFound);
    }
    raw.parse().map_err(|_| WebError::NotFound)
}

fn check_csrf(web: &WebState, headers: &HeaderMap, submitted: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !csrf_matches(headers, submitted, web.cookies) {
        debug!("CSRF token mismatch");
        errors.push("csrf_token", INVALID_CSRF);
    }
    errors
}

/// A forged submission is reported together with the field errors so the
/// form is re-rendered once. Otherwise the service validates the fields.
fn rejected_csrf(
    web: &WebState,
    headers: &HeaderMap,
    submitted: &str,
    fields: &EmployeeFields,
) -> Option<ValidationErrors> {
    let mut errors = check_csrf(web, headers, submitted);
    if errors.is_empty() {
        return None;
    }
    if let Err(e) = validate_employee(fields) {
        errors.merge(e);
    }
    Some(errors)
}

// -------- login --------

fn render_login(
    web: &WebState,
    headers: &HeaderMap,
    username: &str,
    flash: Option<&str>,
    errors: Option<&ValidationErrors>,
) -> WebResult {
    let (token, cookie) = csrf_token(headers, web.cookies);
    let html = web.templates.login(&LoginView {
        csrf_token: &token,
        username,
        flash,
        errors,
    })?;
    Ok(with_cookies(cookie, Html(html)))
}

pub async fn login_page(Extension(web): Extension<Arc<WebState>>, headers: HeaderMap) -> WebResult {
    render_login(&web, &headers, "", None, None)
}

pub async fn login_submit(
    Extension(web): Extension<Arc<WebState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> WebResult {
    let mut errors = check_csrf(&web, &headers, &form.csrf_token);
    if !errors.is_empty() {
        if let Err(e) = validate_login(&form.username, &form.password) {
            errors.merge(e);
        }
        return render_login(&web, &headers, &form.username, None, Some(&errors));
    }

    match web.auth.login(&form.username, &form.password).await {
        Ok(token) => Ok(with_cookies(
            [session_cookie(token, web.cookies)],
            Redirect::to("/dashboard"),
        )),
        Err(DomainError::InvalidCredentials) => render_login(
            &web,
            &headers,
            &form.username,
            Some(INVALID_CREDENTIALS),
            None,
        ),
        Err(DomainError::Validation(e)) => {
            render_login(&web, &headers, &form.username, None, Some(&e))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(user: CurrentUser, Extension(web): Extension<Arc<WebState>>) -> Response {
    web.auth.logout(&user.token);
    info!(user_id = user.user_id, "Session closed");
    with_cookies([clear_session_cookie(web.cookies)], Redirect::to("/"))
}

// -------- employees --------

pub async fn dashboard(user: CurrentUser, Extension(web): Extension<Arc<WebState>>) -> WebResult {
    debug!(user_id = user.user_id, "Rendering dashboard");
    let employees = web.employees.list_employees().await?;
    let html = web.templates.dashboard(&employees)?;
    Ok(Html(html).into_response())
}

fn render_employee_form(
    web: &WebState,
    headers: &HeaderMap,
    heading: &str,
    action: &str,
    form: &EmployeeFields,
    errors: Option<&ValidationErrors>,
) -> WebResult {
    let (token, cookie) = csrf_token(headers, web.cookies);
    let html = web.templates.employee_form(&EmployeeFormView {
        heading,
        action,
        csrf_token: &token,
        form,
        errors,
    })?;
    Ok(with_cookies(cookie, Html(html)))
}

pub async fn add_page(
    _user: CurrentUser,
    Extension(web): Extension<Arc<WebState>>,
    headers: HeaderMap,
) -> WebResult {
    render_employee_form(
        &web,
        &headers,
        "Add Employee",
        "/add",
        &EmployeeFields::default(),
        None,
    )
}

pub async fn add_submit(
    _user: CurrentUser,
    Extension(web): Extension<Arc<WebState>>,
    headers: HeaderMap,
    Form(form): Form<EmployeeForm>,
) -> WebResult {
    let fields = form.fields();
    if let Some(errors) = rejected_csrf(&web, &headers, &form.csrf_token, &fields) {
        return render_employee_form(&web, &headers, "Add Employee", "/add", &fields, Some(&errors));
    }

    match web.employees.add_employee(fields.clone()).await {
        Ok(_) => Ok(Redirect::to("/dashboard").into_response()),
        Err(DomainError::Validation(e)) => {
            render_employee_form(&web, &headers, "Add Employee", "/add", &fields, Some(&e))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_page(
    _user: CurrentUser,
    Extension(web): Extension<Arc<WebState>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> WebResult {
    let id = parse_id(&raw_id)?;
    let employee = web.employees.get_employee(id).await?;
    render_employee_form(
        &web,
        &headers,
        "Edit Employee",
        &format!("/edit/{id}"),
        &employee.into(),
        None,
    )
}

pub async fn edit_submit(
    _user: CurrentUser,
    Extension(web): Extension<Arc<WebState>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<EmployeeForm>,
) -> WebResult {
    let id = parse_id(&raw_id)?;
    web.employees.get_employee(id).await?;

    let action = format!("/edit/{id}");
    let fields = form.fields();
    if let Some(errors) = rejected_csrf(&web, &headers, &form.csrf_token, &fields) {
        return render_employee_form(&web, &headers, "Edit Employee", &action, &fields, Some(&errors));
    }

    match web.employees.update_employee(id, fields.clone()).await {
        Ok(_) => Ok(Redirect::to("/dashboard").into_response()),
        Err(DomainError::Validation(e)) => {
            render_employee_form(&web, &headers, "Edit Employee", &action, &fields, Some(&e))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    _user: CurrentUser,
    Extension(web): Extension<Arc<WebState>>,
    Path(raw_id): Path<String>,
) -> WebResult {
    let id = parse_id(&raw_id)?;
    web.employees.delete_employee(id).await?;
    Ok(Redirect::to("/dashboard").into_response())
}
