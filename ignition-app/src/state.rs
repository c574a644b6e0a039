use axum::extract::FromRef;
use ignition_core::{BeanContext, BeanError, BeanState};
use ignition_events::EventBus;

use crate::services::Vehicle;

/// Axum state for the app, assembled from the frozen bean context.
#[derive(Clone)]
pub struct AppState {
    pub vehicle: Vehicle,
    pub event_bus: EventBus,
}

impl BeanState for AppState {
    fn from_context(ctx: &BeanContext) -> Result<Self, BeanError> {
        Ok(Self {
            vehicle: ctx.resolve()?,
            event_bus: ctx.resolve()?,
        })
    }
}

impl FromRef<AppState> for Vehicle {
    fn from_ref(state: &AppState) -> Self {
        state.vehicle.clone()
    }
}

impl FromRef<AppState> for EventBus {
    fn from_ref(state: &AppState) -> Self {
        state.event_bus.clone()
    }
}
