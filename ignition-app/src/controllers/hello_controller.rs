use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/hello", get(hello))
}

async fn hello() -> &'static str {
    "Hello World"
}
