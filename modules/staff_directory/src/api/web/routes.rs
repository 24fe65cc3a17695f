use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::web::handlers;
use crate::api::web::state::WebState;

/// Mount the directory pages on `router`.
pub fn register_routes(router: Router, state: WebState) -> Router {
    let pages = Router::new()
        .route("/", get(handlers::login_page).post(handlers::login_submit))
        .route("/dashboard", get(handlers::dashboard))
        .route("/add", get(handlers::add_page).post(handlers::add_submit))
        .route(
            "/edit/{id}",
            get(handlers::edit_page).post(handlers::edit_submit),
        )
        .route("/delete/{id}", get(handlers::delete))
        .route("/logout", get(handlers::logout))
        .layer(Extension(Arc::new(state)));

    router.merge(pages)
}
