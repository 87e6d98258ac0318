use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level:
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Clone)]
pub struct LoggingMiddleware {
    pub verbose: u8,
}

impl LoggingMiddleware {
    #[must_use]
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    pub async fn handle(&self, request: Request, next: Next) -> Response {
        if self.verbose == 0 {
            return next.run(request).await;
        }

        let method = request.method().clone();
        let uri = request.uri().clone();
        let lower = request
            .headers()
            .get("content")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let start = Instant::now();

        if self.verbose >= 2 {
            tracing::debug!(
                "{method} {} lower={}",
                uri.path(),
                lower.as_deref().unwrap_or("<none>")
            );
        }

        let response = next.run(request).await;

        let status = response.status();
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        if is_failure(status) {
            tracing::warn!(
                "{method} {} -> {} in {duration_ms:.1}ms",
                uri.path(),
                status.as_u16()
            );
        } else {
            tracing::info!(
                "{method} {} -> {} in {duration_ms:.1}ms",
                uri.path(),
                status.as_u16()
            );
        }

        response
    }
}

fn is_failure(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}
