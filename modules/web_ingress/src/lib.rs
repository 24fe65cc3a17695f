//! HTTP ingress: wraps application routes with the shared middleware stack
//! (request ids, tracing, timeouts, body limits) and runs the listener.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
pub mod shutdown;
mod web;

pub use config::WebIngressConfig;

/// Mount `app` next to `/health` and apply the ingress layers.
///
/// A request passes the body limit and timeout first, then the trace span.
/// The request id is generated (or kept) before it is copied into request
/// extensions and finally echoed back on the response.
pub fn build_router(app: Router, cfg: &WebIngressConfig) -> Router {
    let x_request_id = request_id::header();

    Router::new()
        .route("/health", get(web::health_check))
        .merge(app)
        .fallback(web::not_found)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
        .layer(request_id::create_trace_layer())
        .layer(TimeoutLayer::new(cfg.request_timeout()))
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
}

/// Bind the configured address and serve until `cancel` fires.
pub async fn serve(router: Router, cfg: &WebIngressConfig, cancel: CancellationToken) -> Result<()> {
    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", cfg.bind_addr, e))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    serve_listener(listener, router, cancel).await
}

/// Serve on an already bound listener.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
