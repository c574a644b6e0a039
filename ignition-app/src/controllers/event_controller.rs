use std::sync::Arc;

use ignition_events::EventBus;

use crate::models::StartEvent;

/// Subscribe the app's sample listener. Called once during startup;
/// subscriptions are never removed.
pub async fn register_listeners(event_bus: &EventBus) {
    event_bus
        .subscribe(|event: Arc<StartEvent>| async move {
            tracing::info!(message = %event.message, "start event received");
        })
        .await;
}
