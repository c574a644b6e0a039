use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

// ── Traits ──────────────────────────────────────────────────────────────────

/// Trait for state structs that can be assembled from a [`BeanContext`].
///
/// The app's axum state struct implements this to pull every field out of
/// the frozen context once startup registration is complete.
pub trait BeanState: Clone + Send + Sync + 'static {
    /// Construct the state struct by resolving every field from the context.
    fn from_context(ctx: &BeanContext) -> Result<Self, BeanError>;
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Errors that can occur during bean registration or resolution.
///
/// Both variants are startup-fatal: the process should refuse to start when
/// its wiring is wrong, rather than limp along with missing collaborators.
#[derive(Debug)]
pub enum BeanError {
    /// The same (type, tag) slot was registered more than once.
    DuplicateTag {
        type_name: String,
        tag: Option<String>,
    },
    /// No instance is registered under the requested (type, tag) slot.
    UnresolvedDependency {
        type_name: String,
        tag: Option<String>,
    },
}

impl fmt::Display for BeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeanError::DuplicateTag {
                type_name,
                tag: Some(tag),
            } => {
                write!(
                    f,
                    "Bean of type '{}' already registered under tag '{}'",
                    type_name, tag
                )
            }
            BeanError::DuplicateTag {
                type_name,
                tag: None,
            } => {
                write!(f, "Bean of type '{}' registered twice", type_name)
            }
            BeanError::UnresolvedDependency {
                type_name,
                tag: Some(tag),
            } => {
                write!(
                    f,
                    "No bean of type '{}' registered under tag '{}'. \
                     Use .provide_named(tag, instance) during startup",
                    type_name, tag
                )
            }
            BeanError::UnresolvedDependency {
                type_name,
                tag: None,
            } => {
                write!(
                    f,
                    "No bean of type '{}' registered. \
                     Use .provide(instance) during startup",
                    type_name
                )
            }
        }
    }
}

impl std::error::Error for BeanError {}

// ── BeanRegistry ────────────────────────────────────────────────────────────

type Slot = (TypeId, Option<String>);

/// Registry mapping a (type, optional tag) slot to a singleton instance.
///
/// Tags disambiguate multiple implementations of one capability: two
/// `Arc<dyn Engine>` entries can coexist under the tags `"v6"` and `"v8"`.
/// Untagged slots hold singletons resolved by type alone.
///
/// All registration happens single-threaded during process startup, in
/// dependency order; [`into_context`](Self::into_context) then freezes the
/// registry into a read-only [`BeanContext`] for the rest of the process
/// lifetime.
#[derive(Debug)]
pub struct BeanRegistry {
    entries: HashMap<Slot, Box<dyn Any + Send + Sync>>,
}

impl BeanRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an instance under its type alone.
    ///
    /// Fails with [`BeanError::DuplicateTag`] if the untagged slot for `T`
    /// is already taken.
    pub fn provide<T: Clone + Send + Sync + 'static>(
        &mut self,
        value: T,
    ) -> Result<&mut Self, BeanError> {
        self.insert(None, value)
    }

    /// Register an instance under a name tag.
    ///
    /// Fails with [`BeanError::DuplicateTag`] if `tag` is already taken for
    /// type `T`. The same tag under a different type is fine.
    pub fn provide_named<T: Clone + Send + Sync + 'static>(
        &mut self,
        tag: impl Into<String>,
        value: T,
    ) -> Result<&mut Self, BeanError> {
        self.insert(Some(tag.into()), value)
    }

    /// Resolve the untagged singleton for type `T`, cloning it out.
    pub fn resolve<T: Clone + 'static>(&self) -> Result<T, BeanError> {
        lookup(&self.entries, None)
    }

    /// Resolve the singleton registered under `tag` for type `T`.
    pub fn resolve_named<T: Clone + 'static>(&self, tag: &str) -> Result<T, BeanError> {
        lookup(&self.entries, Some(tag))
    }

    /// Freeze the registry into a read-only [`BeanContext`].
    pub fn into_context(self) -> BeanContext {
        BeanContext {
            entries: self.entries,
        }
    }

    fn insert<T: Clone + Send + Sync + 'static>(
        &mut self,
        tag: Option<String>,
        value: T,
    ) -> Result<&mut Self, BeanError> {
        let slot = (TypeId::of::<T>(), tag);
        if self.entries.contains_key(&slot) {
            return Err(BeanError::DuplicateTag {
                type_name: type_name::<T>().to_string(),
                tag: slot.1,
            });
        }
        self.entries.insert(slot, Box::new(value));
        Ok(self)
    }
}

impl Default for BeanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── BeanContext ─────────────────────────────────────────────────────────────

/// Read-only container holding all registered bean instances.
///
/// Produced by [`BeanRegistry::into_context`]. Resolution clones the stored
/// instance out, so beans are `Clone` (typically `Arc`-backed) and the
/// context itself is never written after startup.
pub struct BeanContext {
    entries: HashMap<Slot, Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for BeanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanContext")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

impl BeanContext {
    /// Resolve the untagged singleton for type `T`, cloning it out.
    pub fn resolve<T: Clone + 'static>(&self) -> Result<T, BeanError> {
        lookup(&self.entries, None)
    }

    /// Resolve the singleton registered under `tag` for type `T`.
    pub fn resolve_named<T: Clone + 'static>(&self, tag: &str) -> Result<T, BeanError> {
        lookup(&self.entries, Some(tag))
    }
}

fn lookup<T: Clone + 'static>(
    entries: &HashMap<Slot, Box<dyn Any + Send + Sync>>,
    tag: Option<&str>,
) -> Result<T, BeanError> {
    let slot = (TypeId::of::<T>(), tag.map(str::to_string));
    entries
        .get(&slot)
        .and_then(|v| v.downcast_ref::<T>())
        .cloned()
        .ok_or_else(|| BeanError::UnresolvedDependency {
            type_name: type_name::<T>().to_string(),
            tag: slot.1,
        })
}
