//! Central state store with dynamically registered slices.
//!
//! This module provides the unidirectional data flow used by every feature
//! of the portal.
//!
//! # Architecture
//!
//! ```text
//! Dispatchable ──→ Middleware ──→ … ──→ Slice reducers ──→ StoreState
//!      ↑                                                     │
//!      └──────────── thunks / network responses ─────────────┘
//! ```
//!
//! - **Action**: immutable description of something that happened
//! - **Reducer**: pure function `(slice state, action) -> slice state`
//! - **SliceRegistry**: key → reducer map, rebuilt on every registration
//! - **Middleware**: interceptors that observe, veto or expand dispatches
//! - **Store**: the owner of the registry and the current state snapshot

mod action;
mod error;
mod middleware;
mod reducer;
mod registry;
mod state;
#[allow(clippy::module_inception)]
mod store;
mod telemetry;
mod thunk;

pub use action::Action;
pub use error::StoreError;
pub use middleware::{DispatchResult, Dispatchable, Dispatched, Middleware, Next};
pub use reducer::{Reducer, ReducerSlice, SliceReducer, SliceState};
pub use registry::{Registration, SliceRegistry};
pub use state::{SliceValue, StoreState};
pub use store::{Store, StoreBuilder};
pub use telemetry::{
    AnalyticsError, AnalyticsEvent, AnalyticsSink, BeaconSink, TelemetryMiddleware, TracingSink,
};
pub use thunk::{Thunk, ThunkMiddleware};
