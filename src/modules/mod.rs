//! Feature slices of the portal.
//!
//! Each feature owns a slice key, a closed action enumeration, a state type
//! and a pure reducer. Features fetched over the network also expose the
//! thunks that drive them.

pub mod activity;
pub mod agreements;
pub mod api;
pub mod error_modal;
pub mod location;
mod services;
pub mod shipping_label;

pub use services::{Endpoints, Services};
