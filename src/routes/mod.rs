//! Routing and lazy feature loading.
//!
//! ```text
//!   Router::navigate(path)
//!     ├─ NavigationListener::on_navigate   (location slice + token refresh)
//!     ├─ RouteTable::resolve               (route key + params)
//!     ├─ LazyModuleLoader::load            (fetch module once, register slice)
//!     └─ Component::mount                  (initial dispatch of the feature)
//! ```
//!
//! A module's slice is always registered before its component mounts, so
//! the first render never sees the slice missing.

mod bundled;
mod component;
mod error;
mod loader;
mod pattern;
mod router;

pub use bundled::{BundledModules, ACTIVITY_ROUTE, SHIPPING_LABEL_ROUTE};
pub use component::{Component, FeatureModule, ModuleSource};
pub use error::{LoadError, RouteError};
pub use loader::LazyModuleLoader;
pub use pattern::{RouteParams, RoutePattern, RouteTable};
pub use router::{Navigated, Router};
