//! Slice registry: which reducer owns which key.
//!
//! The registry is never mutated in place. Registration produces a new
//! registry and the combined reducer is re-derived from that snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::action::Action;
use super::error::StoreError;
use super::reducer::SliceReducer;
use super::state::StoreState;

/// Outcome of adding a slice to a registry.
pub enum Registration {
    /// The same reducer was already registered under the key.
    Unchanged,
    /// A new registry containing the slice.
    Rebuilt(SliceRegistry),
}

/// Immutable key → reducer map.
#[derive(Clone, Default)]
pub struct SliceRegistry {
    reducers: Arc<BTreeMap<String, Arc<dyn SliceReducer>>>,
}

impl SliceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `reducer` under `key`.
    ///
    /// # Errors
    /// Returns `DuplicateSlice` if a different reducer already owns the key.
    pub fn with_slice(
        &self,
        key: &str,
        reducer: Arc<dyn SliceReducer>,
    ) -> Result<Registration, StoreError> {
        if let Some(existing) = self.reducers.get(key) {
            if existing.reducer_id() == reducer.reducer_id() {
                return Ok(Registration::Unchanged);
            }
            return Err(StoreError::DuplicateSlice {
                key: key.to_string(),
                existing: existing.reducer_name(),
                attempted: reducer.reducer_name(),
            });
        }

        Ok(Registration::Rebuilt(self.replacing(key, reducer)))
    }

    /// Registry with `reducer` under `key`, whatever was there before.
    pub fn replacing(&self, key: &str, reducer: Arc<dyn SliceReducer>) -> SliceRegistry {
        let mut reducers = (*self.reducers).clone();
        reducers.insert(key.to_string(), reducer);
        SliceRegistry {
            reducers: Arc::new(reducers),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.reducers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    /// Run every registered reducer against its substate.
    ///
    /// Missing substates start from the reducer's default. Keys present in
    /// `state` without a reducer are dropped. Returns the new snapshot and
    /// whether any slice changed.
    pub fn reduce(&self, state: &StoreState, action: &Action) -> (StoreState, bool) {
        let mut changed = state.len() != self.reducers.len();
        let mut slices = BTreeMap::new();

        for (key, reducer) in self.reducers.iter() {
            let current = state.raw(key);
            let next = reducer.reduce(current, action);
            if !current.is_some_and(|value| Arc::ptr_eq(value, &next)) {
                changed = true;
            }
            slices.insert(key.clone(), next);
        }

        if !changed {
            return (state.clone(), false);
        }
        (StoreState::from_slices(slices), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::error_modal::{ErrorModalAction, ErrorModalReducer, ErrorModalState};
    use crate::modules::location::{LocationReducer, LocationState};
    use crate::store::ReducerSlice;

    #[test]
    fn rebuilding_keeps_existing_substate() {
        let registry = match SliceRegistry::new()
            .with_slice("errorModalData", ReducerSlice::<ErrorModalReducer>::shared())
            .unwrap()
        {
            Registration::Rebuilt(registry) => registry,
            Registration::Unchanged => panic!("expected rebuild"),
        };

        let (state, _) = registry.reduce(
            &StoreState::default(),
            &ErrorModalAction::show("serverErrorMessage").into(),
        );

        let registry = match registry
            .with_slice("location", ReducerSlice::<LocationReducer>::shared())
            .unwrap()
        {
            Registration::Rebuilt(registry) => registry,
            Registration::Unchanged => panic!("expected rebuild"),
        };
        let (next, changed) = registry.reduce(&state, &Action::Init);

        assert!(changed);
        assert!(next.same_slice(&state, "errorModalData"));
        assert!(next.slice::<ErrorModalState>("errorModalData").unwrap().visible);
        assert_eq!(
            next.slice::<LocationState>("location"),
            Some(&LocationState::default())
        );
    }

    #[test]
    fn same_reducer_is_unchanged() {
        let registry = SliceRegistry::new()
            .replacing("location", ReducerSlice::<LocationReducer>::shared());
        let outcome = registry
            .with_slice("location", ReducerSlice::<LocationReducer>::shared())
            .unwrap();
        assert!(matches!(outcome, Registration::Unchanged));
    }

    #[test]
    fn conflicting_reducer_is_rejected() {
        let registry = SliceRegistry::new()
            .replacing("location", ReducerSlice::<LocationReducer>::shared());
        let err = registry
            .with_slice("location", ReducerSlice::<ErrorModalReducer>::shared())
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::DuplicateSlice { ref key, .. } if key == "location"));
    }
}
