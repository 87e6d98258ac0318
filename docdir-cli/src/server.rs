use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use docdir::DocumentDirectoryService;
use serde::Serialize;

use crate::handlers::{self, HandledDocument};
use crate::logging::LoggingMiddleware;

/// Header carrying the lower directory of the requested collection.
pub const LOWER_DIRECTORY_HEADER: &str = "content";

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub documents: Vec<HandledDocument>,
}

/// Build the HTTP router for a service.
#[must_use]
pub fn router(service: DocumentDirectoryService, verbose: u8) -> Router {
    let logging = LoggingMiddleware::new(verbose);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/{upper}/getcontent", get(get_content))
        .with_state(service)
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let logging = logging.clone();
            async move { logging.handle(req, next).await }
        }))
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(
    service: DocumentDirectoryService,
    host: &str,
    port: u16,
    verbose: u8,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        "Serving {} on http://{addr}",
        service.config().root.display()
    );

    axum::serve(listener, router(service, verbose))
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolve once `signal` fires. If the signal cannot be installed the server
/// keeps running instead of shutting down at once.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn get_content(
    State(service): State<DocumentDirectoryService>,
    Path(upper): Path<String>,
    headers: HeaderMap,
) -> Response {
    let lower = headers
        .get(LOWER_DIRECTORY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !service.exists(&upper, lower) {
        return (StatusCode::BAD_REQUEST, "Supplied directory does not exist").into_response();
    }

    let documents = match service.fetch_documents(&upper, lower).await {
        Ok(docs) => docs,
        Err(e) if e.is_invalid_input() => {
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
        Err(e) => {
            tracing::error!("Fetching {upper} failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let documents = documents.iter().map(handlers::dispatch).collect();
    Json(ContentResponse { documents }).into_response()
}
