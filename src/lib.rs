//! Client-side state engine for the support account portal.
//!
//! A [`Store`](store::Store) holds independently reduced slices, some of
//! them registered lazily when their route is first visited. Network data
//! flows through the async resource lifecycle in [`resource`], side effects
//! through the middleware pipeline, and every navigation refreshes the
//! security token used by mutating requests.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod modules;
pub mod navigation;
pub mod portal;
pub mod resource;
pub mod routes;
pub mod store;

pub use portal::{Portal, PortalError};
