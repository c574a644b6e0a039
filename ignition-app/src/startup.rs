use axum::Router;
use ignition_core::{layers, BeanError, BeanRegistry, BeanState};
use ignition_events::EventBus;

use crate::controllers::{event_controller, hello_controller, vehicle_controller};
use crate::services::{self, Vehicle};
use crate::state::AppState;

/// The designated startup routine: registers every singleton, wires the
/// vehicle to its `"v6"` engine, subscribes the sample listener, then
/// freezes the registry and assembles the app state.
///
/// Any [`BeanError`] here means the wiring is wrong and the process must
/// not start.
pub async fn build_state() -> Result<AppState, BeanError> {
    let mut registry = BeanRegistry::new();

    services::register_engines(&mut registry)?;
    let vehicle = Vehicle::from_registry(&registry, "v6")?;

    let event_bus = EventBus::new();
    event_controller::register_listeners(&event_bus).await;

    registry.provide(vehicle)?.provide(event_bus)?;

    AppState::from_context(&registry.into_context())
}

/// Assemble the app router: controller routes, the health route, and the
/// standard tracing and panic-catching layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(hello_controller::routes())
        .merge(vehicle_controller::routes())
        .merge(ignition_core::health::routes())
        .layer(layers::default_trace())
        .layer(layers::catch_panic_layer())
        .with_state(state)
}
