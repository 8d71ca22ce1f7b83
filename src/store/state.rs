use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Type-erased state of a single slice.
pub type SliceValue = Arc<dyn Any + Send + Sync>;

/// Snapshot of the whole state tree: slice key → slice state.
///
/// Cheap to clone and safe to hold across dispatches; a new snapshot is
/// produced on every state transition and the old one is never mutated.
#[derive(Clone, Default)]
pub struct StoreState {
    slices: Arc<BTreeMap<String, SliceValue>>,
}

impl StoreState {
    pub(crate) fn from_slices(slices: BTreeMap<String, SliceValue>) -> Self {
        Self {
            slices: Arc::new(slices),
        }
    }

    /// Typed access to a slice. `None` when the key is not registered or
    /// holds a different type.
    pub fn slice<T: Any>(&self, key: &str) -> Option<&T> {
        self.slices.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Raw access to a slice, used by reducers of the registry.
    pub fn raw(&self, key: &str) -> Option<&SliceValue> {
        self.slices.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slices.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// True when `key` refers to the very same value in both snapshots.
    pub fn same_slice(&self, other: &StoreState, key: &str) -> bool {
        match (self.slices.get(key), other.slices.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreState")
            .field("slices", &self.slices.keys().collect::<Vec<_>>())
            .finish()
    }
}
