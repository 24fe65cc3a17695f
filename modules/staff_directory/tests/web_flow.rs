//! End-to-end page flows through the real router.

mod common;

use axum::http::StatusCode;

use common::{dashboard_ids, TestClient, ALICE, ALICE_PW};
use staff_directory::domain::validation::{INVALID_CSRF, INVALID_EMAIL, REQUIRED};
use staff_directory::StaffDirectoryConfig;

async fn logged_in_client() -> TestClient {
    let mut client = TestClient::for_config(StaffDirectoryConfig::default()).await;
    let res = client.login(ALICE, ALICE_PW).await;
    assert!(res.is_redirect_to("/dashboard"), "login failed: {}", res.status);
    client
}

#[tokio::test]
async fn full_employee_lifecycle() {
    let mut client = logged_in_client().await;

    let res = client
        .post(
            "/add",
            &[("name", "Bob"), ("role", "Engineer"), ("email", "bob@x.com")],
        )
        .await;
    assert!(res.is_redirect_to("/dashboard"));

    let page = client.get("/dashboard").await;
    assert_eq!(page.status, StatusCode::OK);
    let ids = dashboard_ids(&page.body);
    assert_eq!(ids.len(), 1);
    let id = ids[0];
    assert!(page.body.contains("Bob"));
    assert!(page.body.contains("bob@x.com"));

    let form = client.get(&format!("/edit/{id}")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(r#"value="Engineer""#));

    let res = client
        .post(
            &format!("/edit/{id}"),
            &[("name", "Bob"), ("role", "Senior Engineer"), ("email", "bob@x.com")],
        )
        .await;
    assert!(res.is_redirect_to("/dashboard"));
    let page = client.get("/dashboard").await;
    assert!(page.body.contains("Senior Engineer"));

    let res = client.get(&format!("/delete/{id}")).await;
    assert!(res.is_redirect_to("/dashboard"));
    let page = client.get("/dashboard").await;
    assert!(dashboard_ids(&page.body).is_empty());

    let res = client.get(&format!("/delete/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_redirect_anonymous_requests() {
    let mut client = TestClient::for_config(StaffDirectoryConfig::default()).await;

    for path in ["/dashboard", "/add", "/edit/1", "/delete/1", "/logout", "/edit/abc"] {
        let res = client.get(path).await;
        assert!(res.is_redirect_to("/"), "{path} -> {}", res.status);
    }

    let res = client
        .post("/add", &[("name", "Bob"), ("role", "Eng"), ("email", "bob@x.com")])
        .await;
    assert!(res.is_redirect_to("/"));
}

#[tokio::test]
async fn invalid_credentials_render_generic_message() {
    let mut client = TestClient::for_config(StaffDirectoryConfig::default()).await;

    let unknown = client.login("mallory", ALICE_PW).await;
    let wrong = client.login(ALICE, "wrong-pw").await;

    for res in [&unknown, &wrong] {
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("Invalid credentials"));
    }
    assert!(!client.jar.contains_key("staffdesk_session"));
    assert!(client.get("/dashboard").await.is_redirect_to("/"));
}

#[tokio::test]
async fn blank_login_fields_are_required() {
    let mut client = TestClient::for_config(StaffDirectoryConfig::default()).await;
    client.get("/").await;

    let res = client.post("/", &[("username", ""), ("password", "")]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.matches(REQUIRED).count(), 2);
    assert!(!res.body.contains("Invalid credentials"));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut client = logged_in_client().await;
    let token = client.jar["staffdesk_session"].clone();

    let res = client.get("/logout").await;
    assert!(res.is_redirect_to("/"));
    assert!(!client.jar.contains_key("staffdesk_session"));

    // Replaying the old cookie does not work either.
    client.jar.insert("staffdesk_session".into(), token);
    assert!(client.get("/dashboard").await.is_redirect_to("/"));
}

#[tokio::test]
async fn add_with_errors_rerenders_with_values() {
    let mut client = logged_in_client().await;

    let res = client
        .post("/add", &[("name", "Bob"), ("role", ""), ("email", "bob@x")])
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(REQUIRED));
    assert!(res.body.contains(INVALID_EMAIL));
    assert!(res.body.contains(r#"value="Bob""#));

    let page = client.get("/dashboard").await;
    assert!(dashboard_ids(&page.body).is_empty());
}

#[tokio::test]
async fn edit_unknown_or_malformed_id_is_not_found() {
    let mut client = logged_in_client().await;

    assert_eq!(client.get("/edit/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/edit/abc").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/delete/abc").await.status, StatusCode::NOT_FOUND);

    // Not found wins over invalid form data.
    let res = client
        .post("/edit/999", &[("name", ""), ("role", ""), ("email", "")])
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forged_post_is_rejected() {
    let mut client = logged_in_client().await;

    let res = client
        .post(
            "/add",
            &[
                ("name", "Eve"),
                ("role", "Spy"),
                ("email", "eve@x.com"),
                ("csrf_token", "forged"),
            ],
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(INVALID_CSRF));

    let page = client.get("/dashboard").await;
    assert!(dashboard_ids(&page.body).is_empty());
}

#[tokio::test]
async fn forged_post_reports_field_errors_too() {
    let mut client = logged_in_client().await;

    let res = client
        .post(
            "/add",
            &[("name", ""), ("role", "Spy"), ("email", "eve@x"), ("csrf_token", "forged")],
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(INVALID_CSRF));
    assert!(res.body.contains(REQUIRED));
    assert!(res.body.contains(INVALID_EMAIL));

    let res = client
        .post("/", &[("username", ""), ("password", ""), ("csrf_token", "forged")])
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(INVALID_CSRF));
    assert!(res.body.contains(REQUIRED));
}

#[tokio::test]
async fn invalid_edit_rerenders_without_mutating() {
    let mut client = logged_in_client().await;
    client
        .post("/add", &[("name", "Bob"), ("role", "Engineer"), ("email", "bob@x.com")])
        .await;
    let id = dashboard_ids(&client.get("/dashboard").await.body)[0];

    let res = client
        .post(
            &format!("/edit/{id}"),
            &[("name", "Bob"), ("role", " "), ("email", "bob@x.com")],
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(REQUIRED));
    assert!(!res.body.contains(INVALID_CSRF));
    assert!(res.body.contains(&format!(r#"action="/edit/{id}""#)));

    let page = client.get("/dashboard").await;
    assert!(page.body.contains("Engineer"));
}

#[tokio::test]
async fn csrf_check_can_be_disabled() {
    let mut client = TestClient::for_config(StaffDirectoryConfig {
        csrf_enabled: false,
        ..Default::default()
    })
    .await;

    let res = client
        .post(
            "/",
            &[("username", ALICE), ("password", ALICE_PW), ("csrf_token", "")],
        )
        .await;
    assert!(res.is_redirect_to("/dashboard"));
}

#[tokio::test]
async fn login_page_is_shown_to_logged_in_users() {
    let mut client = logged_in_client().await;
    let res = client.get("/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(r#"name="password""#));
}
