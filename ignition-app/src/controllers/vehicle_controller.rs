use axum::extract::State;
use axum::routing::post;
use axum::Router;
use ignition_events::EventBus;

use crate::models::StartEvent;
use crate::services::Vehicle;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/vehicle/start", post(start))
}

/// Starts the vehicle: publishes a [`StartEvent`] with the default message,
/// then logs the engine's start line. Responds 200 with an empty body.
async fn start(State(vehicle): State<Vehicle>, State(event_bus): State<EventBus>) {
    event_bus.publish(StartEvent::default()).await;
    let started = vehicle.start();
    tracing::info!(%started, "vehicle started");
}
