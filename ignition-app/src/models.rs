use serde::{Deserialize, Serialize};

/// Event published whenever the vehicle is started.
///
/// Immutable value object: created per publish, dropped once every
/// subscriber has seen it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartEvent {
    pub message: String,
}

impl Default for StartEvent {
    fn default() -> Self {
        Self {
            message: "Hello World!".into(),
        }
    }
}
