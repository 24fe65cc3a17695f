//! Shared fixtures: a fresh in-memory database per test and a small
//! cookie-keeping client for driving the router.

#![allow(dead_code)]

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use cookie::Cookie;
use tower::ServiceExt;

use db::{ConnectOpts, DbHandle};
use staff_directory::{StaffDirectory, StaffDirectoryConfig};

pub const ALICE: &str = "alice";
pub const ALICE_PW: &str = "correct-pw";

pub async fn create_test_db() -> DbHandle {
    DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("Failed to connect to test database")
}

/// Module over a migrated in-memory database with user `alice` created.
pub async fn create_test_module(cfg: StaffDirectoryConfig) -> StaffDirectory {
    let db = create_test_db().await;
    let module = StaffDirectory::init(&db, cfg)
        .await
        .expect("Failed to init module");
    module
        .auth()
        .create_user(ALICE, ALICE_PW)
        .await
        .expect("Failed to create user");
    module
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn is_redirect_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location() == Some(path)
    }
}

/// Browser stand-in: keeps cookies between requests and fills in the
/// CSRF field from the CSRF cookie.
pub struct TestClient {
    app: Router,
    pub jar: BTreeMap<String, String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            jar: BTreeMap::new(),
        }
    }

    pub async fn for_config(cfg: StaffDirectoryConfig) -> Self {
        let module = create_test_module(cfg).await;
        Self::new(module.router().expect("Failed to build router"))
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let req = self.request("GET", path).body(Body::empty()).unwrap();
        self.send(req).await
    }

    /// POST a form; `csrf_token` is added from the jar unless given.
    pub async fn post(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in fields {
            ser.append_pair(k, v);
        }
        if !fields.iter().any(|(k, _)| *k == "csrf_token") {
            if let Some(token) = self.jar.get("staffdesk_csrf") {
                ser.append_pair("csrf_token", token);
            }
        }
        let req = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(ser.finish()))
            .unwrap();
        self.send(req).await
    }

    /// Fetch the login page (for the CSRF cookie) and sign in.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.get("/").await;
        self.post("/", &[("username", username), ("password", password)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if !self.jar.is_empty() {
            let cookie = self
                .jar
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> TestResponse {
        let res = self.app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();

        for value in headers.get_all(header::SET_COOKIE) {
            let c = Cookie::parse(value.to_str().unwrap().to_owned()).unwrap();
            let removed = c.value().is_empty()
                || c.max_age().is_some_and(|age| age.is_zero());
            if removed {
                self.jar.remove(c.name());
            } else {
                self.jar.insert(c.name().to_owned(), c.value().to_owned());
            }
        }

        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

/// Employee ids listed on the dashboard, in page order.
pub fn dashboard_ids(html: &str) -> Vec<i32> {
    html.match_indices(r#"<tr id="employee-"#)
        .filter_map(|(i, m)| {
            let rest = &html[i + m.len()..];
            rest.split('"').next()?.parse().ok()
        })
        .collect()
}
