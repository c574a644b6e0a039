use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use ignition_core::{BeanError, BeanRegistry};

/// A vehicle engine. Implementations are registered as singletons under a
/// name tag so consumers can pick a specific variant.
pub trait Engine: Send + Sync {
    fn start(&self) -> String;
    fn cylinders(&self) -> u32;
    fn set_cylinders(&self, cylinders: u32);
}

pub struct V6Engine {
    cylinders: AtomicU32,
}

impl V6Engine {
    pub fn new() -> Self {
        Self {
            cylinders: AtomicU32::new(6),
        }
    }
}

impl Default for V6Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for V6Engine {
    fn start(&self) -> String {
        "Starting V6".into()
    }

    fn cylinders(&self) -> u32 {
        self.cylinders.load(Ordering::Relaxed)
    }

    fn set_cylinders(&self, cylinders: u32) {
        self.cylinders.store(cylinders, Ordering::Relaxed);
    }
}

pub struct V8Engine {
    cylinders: AtomicU32,
}

impl V8Engine {
    pub fn new() -> Self {
        Self {
            cylinders: AtomicU32::new(8),
        }
    }
}

impl Default for V8Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for V8Engine {
    fn start(&self) -> String {
        "Starting V8".into()
    }

    fn cylinders(&self) -> u32 {
        self.cylinders.load(Ordering::Relaxed)
    }

    fn set_cylinders(&self, cylinders: u32) {
        self.cylinders.store(cylinders, Ordering::Relaxed);
    }
}

/// Register both engine singletons under their tags.
///
/// The explicit replacement for annotation scanning: every engine variant
/// the app knows about is listed here, once, at startup.
pub fn register_engines(registry: &mut BeanRegistry) -> Result<(), BeanError> {
    registry
        .provide_named::<Arc<dyn Engine>>("v6", Arc::new(V6Engine::new()))?
        .provide_named::<Arc<dyn Engine>>("v8", Arc::new(V8Engine::new()))?;
    Ok(())
}

/// Composition root binding exactly one engine variant, chosen by tag at
/// construction time and never rebound.
#[derive(Clone)]
pub struct Vehicle {
    engine: Arc<dyn Engine>,
}

impl std::fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vehicle").finish_non_exhaustive()
    }
}

impl Vehicle {
    /// Resolve the engine registered under `tag` and bind it.
    pub fn from_registry(registry: &BeanRegistry, tag: &str) -> Result<Self, BeanError> {
        Ok(Self {
            engine: registry.resolve_named::<Arc<dyn Engine>>(tag)?,
        })
    }

    /// Delegates to the bound engine, result unchanged.
    pub fn start(&self) -> String {
        self.engine.start()
    }
}
