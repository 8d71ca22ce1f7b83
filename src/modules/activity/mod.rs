//! Activity history: the user's support cases, fetched page by page, and
//! the notifications derived from them.

mod model;
mod reducer;
mod resource;

pub use model::{ActivityPayload, Case, Notification};
pub use reducer::{ActivityAction, ActivityReducer, ActivityState};
pub use resource::{fetch_all_activities, fetch_more_activities, ActivityResource};

pub const SLICE_KEY: &str = "activityData";

/// Query parameter scoping activity to one device.
pub const SCOPE_PARAM: &str = "serialNumberKey";
