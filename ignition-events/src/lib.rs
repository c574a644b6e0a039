use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

type Handler =
    Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// In-process event bus with typed pub/sub.
///
/// Events are dispatched by `TypeId` — subscribers register for a concrete
/// event type and receive an `Arc<E>` when that type is published. Events
/// published with no subscribers are dropped without error.
///
/// `EventBus` is `Clone`; clones share the same subscriber table.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<Handler>>>>,
}

impl EventBus {
    /// Create a new `EventBus` with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe to events of type `E`.
    ///
    /// The handler receives `Arc<E>` and is called once for every
    /// `publish()` of that type. Subscriptions are never deduplicated:
    /// subscribing the same handler twice means it runs twice per event.
    pub async fn subscribe<E, F, Fut>(&self, handler: F)
    where
        E: Send + Sync + 'static,
        F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let type_id = TypeId::of::<E>();
        let handler: Handler = Arc::new(move |any| {
            let event = any.downcast::<E>().expect("event type mismatch");
            Box::pin(handler(event))
        });
        let mut handlers = self.handlers.write().await;
        handlers.entry(type_id).or_default().push(handler);
    }

    /// Publish an event and wait for every subscriber to complete.
    ///
    /// Handlers run as concurrent tasks; delivery order across subscribers
    /// is unspecified. A panicking handler is confined to its task and
    /// logged — the remaining subscribers still run and `publish` still
    /// returns normally.
    pub async fn publish<E: Send + Sync + 'static>(&self, event: E) {
        let type_id = TypeId::of::<E>();
        let event = Arc::new(event) as Arc<dyn Any + Send + Sync>;
        let handlers = self.handlers.read().await;
        let Some(subs) = handlers.get(&type_id) else {
            return;
        };
        let tasks: Vec<_> = subs
            .iter()
            .map(|handler| {
                let h = handler.clone();
                let e = event.clone();
                tokio::spawn(async move { h(e).await })
            })
            .collect();
        drop(handlers);
        for task in tasks {
            if let Err(err) = task.await {
                if err.is_panic() {
                    tracing::warn!("event handler panicked during publish");
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub mod prelude {
    //! Re-exports of the most commonly used event types.
    pub use crate::EventBus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct TestEvent {
        value: usize,
    }

    struct OtherEvent;

    #[tokio::test]
    async fn publish_invokes_subscriber() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        bus.subscribe(move |event: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(event.value, Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(TestEvent { value: 42 }).await;
        assert_eq!(counter.load(Ordering::SeqCst), 42);
    }

    #[tokio::test]
    async fn every_subscriber_runs_exactly_once() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let c = counter.clone();
            bus.subscribe(move |_: Arc<TestEvent>| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;
        }

        bus.publish(TestEvent { value: 1 }).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn no_cross_type_dispatch() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(OtherEvent).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_is_a_noop() {
        let bus = EventBus::new();
        // Should return instantly without panic.
        bus.publish(TestEvent { value: 1 }).await;
    }

    #[tokio::test]
    async fn panicking_handler_does_not_stop_the_others() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        bus.subscribe(move |_: Arc<TestEvent>| async move {
            panic!("middle handler panics");
        })
        .await;

        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(TestEvent { value: 1 }).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn publish_waits_for_slow_handlers() {
        let bus = EventBus::new();
        let flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let f = flag.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let f = f.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                f.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        })
        .await;

        bus.publish(TestEvent { value: 1 }).await;
        assert!(flag.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::new();
        bus.publish(TestEvent { value: 1 }).await;

        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn clone_shares_subscribers() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        let bus2 = bus.clone();
        bus2.publish(TestEvent { value: 1 }).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_publishes_deliver_everything() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        bus.subscribe(move |_: Arc<TestEvent>| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let bus = bus.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..10 {
                    bus.publish(TestEvent { value: 1 }).await;
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }
}
