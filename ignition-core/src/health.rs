use axum::routing::get;
use axum::Router;

/// Returns the standard health route: `GET /health` → 200 `"OK"`.
///
/// Merged into every app's router so load balancers and probes have a
/// dependency-free liveness endpoint.
pub fn routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
